use log::warn;
use serde::{Deserialize, Serialize};

// @module: Burned-in caption styling for the ffmpeg subtitles filter

/// Vertical placement of captions
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPosition {
    Top,
    Middle,
    #[default]
    Bottom,
}

impl CaptionPosition {
    // @returns: ASS numpad alignment (centered horizontally)
    pub fn alignment(&self) -> u8 {
        match self {
            Self::Top => 8,
            Self::Middle => 5,
            Self::Bottom => 2,
        }
    }
}

impl std::str::FromStr for CaptionPosition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(anyhow::anyhow!("Invalid caption position: {}", s)),
        }
    }
}

/// Caption appearance settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubtitleStyle {
    // @field: Font family
    #[serde(default = "default_font_name")]
    pub font_name: String,

    // @field: Font size
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    // @field: Text color (name or #RRGGBB / #AARRGGBB)
    #[serde(default = "default_font_color")]
    pub font_color: String,

    // @field: Outline color
    #[serde(default = "default_outline_color")]
    pub outline_color: String,

    // @field: Box color behind the text
    #[serde(default)]
    pub background_color: Option<String>,

    // @field: Vertical position
    #[serde(default)]
    pub position: CaptionPosition,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            font_color: default_font_color(),
            outline_color: default_outline_color(),
            background_color: None,
            position: CaptionPosition::default(),
        }
    }
}

impl SubtitleStyle {
    /// Render as the `force_style` value of ffmpeg's subtitles filter
    pub fn force_style(&self) -> String {
        let mut fields = vec![
            format!("FontName={}", self.font_name),
            format!("FontSize={}", self.font_size),
            format!("PrimaryColour={}", parse_color(&self.font_color)),
            format!("OutlineColour={}", parse_color(&self.outline_color)),
        ];

        if let Some(background) = &self.background_color {
            fields.push(format!("BackColour={}", parse_color(background)));
        }

        fields.push(format!("Alignment={}", self.position.alignment()));
        fields.join(",")
    }
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_font_size() -> u32 {
    24
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_outline_color() -> String {
    "black".to_string()
}

const WHITE: &str = "&HFFFFFF";

/// Convert a color name or hex value to the ASS `&H` form used by libass.
///
/// ASS stores colors as BGR (with alpha first when present), so `#RRGGBB`
/// becomes `&HBBGGRR` and `#AARRGGBB` becomes `&HAABBGGRR`.
/// Unrecognized values fall back to white.
pub fn parse_color(color: &str) -> String {
    let color = color.trim();
    let named = match color.to_lowercase().as_str() {
        "white" => Some("&HFFFFFF"),
        "black" => Some("&H000000"),
        "red" => Some("&H0000FF"),
        "green" => Some("&H00FF00"),
        "blue" => Some("&HFF0000"),
        "yellow" => Some("&H00FFFF"),
        "cyan" => Some("&HFFFF00"),
        "magenta" => Some("&HFF00FF"),
        "gray" | "grey" => Some("&H808080"),
        "transparent" => Some("&HFF000000"),
        "semitransparent" => Some("&H80000000"),
        _ => None,
    };
    if let Some(value) = named {
        return value.to_string();
    }

    if let Some(hex) = color.strip_prefix('#') {
        if hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let hex = hex.to_uppercase();
            match hex.len() {
                6 => return format!("&H{}{}{}", &hex[4..6], &hex[2..4], &hex[0..2]),
                8 => return format!("&H{}{}{}{}", &hex[0..2], &hex[6..8], &hex[4..6], &hex[2..4]),
                _ => {}
            }
        }
    }

    warn!("Unrecognized color: {}, using white instead", color);
    WHITE.to_string()
}
