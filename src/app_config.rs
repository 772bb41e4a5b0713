use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::captions::{CaptionEngine, CaptionOptions, CaptionPolicy, FloorMode};
use crate::video::style::SubtitleStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Caption generation config
    #[serde(default)]
    pub captions: CaptionConfig,

    /// Narration (TTS) config
    #[serde(default)]
    pub narration: NarrationConfig,

    /// Video compositing config
    #[serde(default)]
    pub video: VideoConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptionConfig {
    // @field: Segmentation policy
    #[serde(default)]
    pub policy: CaptionPolicy,

    // @field: Minimum seconds per sentence caption
    #[serde(default = "default_sentence_floor_secs")]
    pub sentence_floor_secs: f64,

    // @field: Overshoot handling for the sentence floor
    #[serde(default)]
    pub floor_mode: FloorMode,

    // @field: Words per word-group caption
    #[serde(default = "default_words_per_group")]
    pub words_per_group: usize,

    // @field: Words per fixed-window caption
    #[serde(default = "default_words_per_window")]
    pub words_per_window: usize,

    // @field: Reading speed warning threshold
    #[serde(default = "default_max_chars_per_second")]
    pub max_chars_per_second: f64,
}

impl CaptionConfig {
    // @returns: Engine options derived from this config
    pub fn options(&self) -> CaptionOptions {
        CaptionOptions {
            sentence_floor_secs: self.sentence_floor_secs,
            floor_mode: self.floor_mode,
            words_per_group: self.words_per_group,
            words_per_window: self.words_per_window,
        }
    }

    // @returns: Caption engine configured from this section
    pub fn engine(&self) -> CaptionEngine {
        CaptionEngine::with_options(self.policy, self.options())
            .with_max_cps(self.max_chars_per_second)
    }

    /// Validate the caption settings on their own
    pub fn validate(&self) -> Result<()> {
        if !(self.sentence_floor_secs.is_finite() && self.sentence_floor_secs >= 0.0) {
            return Err(anyhow!("Sentence floor must be a non-negative number of seconds"));
        }
        if self.words_per_group == 0 || self.words_per_window == 0 {
            return Err(anyhow!("Words per caption must be at least 1"));
        }
        if !(self.max_chars_per_second > 0.0) {
            return Err(anyhow!("Maximum characters per second must be positive"));
        }
        Ok(())
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            policy: CaptionPolicy::default(),
            sentence_floor_secs: default_sentence_floor_secs(),
            floor_mode: FloorMode::default(),
            words_per_group: default_words_per_group(),
            words_per_window: default_words_per_window(),
            max_chars_per_second: default_max_chars_per_second(),
        }
    }
}

/// Text-to-speech engine type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NarrationEngine {
    // @engine: espeak-ng
    #[default]
    Espeak,
    // @engine: Piper neural TTS
    Piper,
    // @engine: Any program reading text on stdin
    Command,
}

impl NarrationEngine {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Espeak => "eSpeak NG",
            Self::Piper => "Piper",
            Self::Command => "Custom command",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Espeak => "espeak".to_string(),
            Self::Piper => "piper".to_string(),
            Self::Command => "command".to_string(),
        }
    }

    // @returns: Program run when the config does not name one
    pub fn default_program(&self) -> Option<&'static str> {
        match self {
            Self::Espeak => Some("espeak-ng"),
            Self::Piper => Some("piper"),
            Self::Command => None,
        }
    }

    // @returns: Argument template used when the config gives none
    pub fn default_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            Self::Espeak => &["-v", "{voice}", "-w", "{output}", "--stdin"],
            Self::Piper => &["--model", "{voice}", "--output_file", "{output}"],
            Self::Command => &[],
        };
        args.iter().map(|a| a.to_string()).collect()
    }
}

// Implement Display trait for NarrationEngine
impl std::fmt::Display for NarrationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for NarrationEngine
impl std::str::FromStr for NarrationEngine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "espeak" | "espeak-ng" => Ok(Self::Espeak),
            "piper" => Ok(Self::Piper),
            "command" => Ok(Self::Command),
            _ => Err(anyhow!("Invalid narration engine: {}", s)),
        }
    }
}

/// Narration producer configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NarrationConfig {
    // @field: Engine type
    #[serde(default)]
    pub engine: NarrationEngine,

    // @field: Program override
    #[serde(default)]
    pub program: Option<String>,

    // @field: Argument template override ({output}, {voice}, {language})
    #[serde(default)]
    pub args: Vec<String>,

    // @field: Voice name or model path
    #[serde(default = "default_voice")]
    pub voice: String,

    // @field: Language code
    #[serde(default = "default_language")]
    pub language: String,

    // @field: Timeout seconds
    #[serde(default = "default_narration_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Expand abbreviations and symbols before synthesis
    #[serde(default = "default_true")]
    pub prepare_text: bool,
}

impl NarrationConfig {
    /// Program to run, falling back to the engine default
    pub fn get_program(&self) -> Option<String> {
        self.program
            .clone()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.engine.default_program().map(str::to_string))
    }

    /// Argument template, falling back to the engine default
    pub fn get_args(&self) -> Vec<String> {
        if self.args.is_empty() {
            self.engine.default_args()
        } else {
            self.args.clone()
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            engine: NarrationEngine::default(),
            program: None,
            args: Vec::new(),
            voice: default_voice(),
            language: default_language(),
            timeout_secs: default_narration_timeout_secs(),
            prepare_text: true,
        }
    }
}

/// Video compositing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoConfig {
    // @field: ffmpeg executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: ffprobe executable
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    // @field: Loop the background when shorter than the narration
    #[serde(default = "default_true")]
    pub loop_background: bool,

    // @field: Cut the output at the end of the narration
    #[serde(default = "default_true")]
    pub trim_background: bool,

    // @field: Timeout seconds
    #[serde(default = "default_video_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Burned-in caption style
    #[serde(default)]
    pub style: SubtitleStyle,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            loop_background: true,
            trim_background: true,
            timeout_secs: default_video_timeout_secs(),
            style: SubtitleStyle::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_sentence_floor_secs() -> f64 {
    crate::captions::policy::DEFAULT_SENTENCE_FLOOR_SECS
}

fn default_words_per_group() -> usize {
    crate::captions::policy::DEFAULT_WORDS_PER_GROUP
}

fn default_words_per_window() -> usize {
    crate::captions::policy::DEFAULT_WORDS_PER_WINDOW
}

fn default_max_chars_per_second() -> f64 {
    crate::captions::validation::DEFAULT_MAX_CPS
}

fn default_voice() -> String {
    "en".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_narration_timeout_secs() -> u64 {
    300
}

fn default_video_timeout_secs() -> u64 {
    1800
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.captions.validate()?;

        let narration = &self.narration;
        if narration.get_program().is_none() {
            return Err(anyhow!("A program is required for the command narration engine"));
        }
        if !narration.get_args().iter().any(|a| a.contains("{output}")) {
            return Err(anyhow!("Narration arguments must contain an {{output}} placeholder"));
        }
        if narration.engine == NarrationEngine::Piper && narration.voice.trim().is_empty() {
            return Err(anyhow!("A voice model path is required for the Piper engine"));
        }
        if narration.timeout_secs == 0 {
            return Err(anyhow!("Narration timeout must be at least 1 second"));
        }

        let video = &self.video;
        if video.ffmpeg_path.trim().is_empty() || video.ffprobe_path.trim().is_empty() {
            return Err(anyhow!("ffmpeg and ffprobe paths must not be empty"));
        }
        if video.timeout_secs == 0 {
            return Err(anyhow!("Video timeout must be at least 1 second"));
        }
        if video.style.font_size == 0 {
            return Err(anyhow!("Caption font size must be at least 1"));
        }

        Ok(())
    }
}
