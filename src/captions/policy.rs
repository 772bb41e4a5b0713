use serde::{Deserialize, Serialize};

use crate::errors::CaptionError;

// @module: Caption segmentation policies and allocation options

/// Default minimum on-screen time for a sentence caption, in seconds
pub const DEFAULT_SENTENCE_FLOOR_SECS: f64 = 1.5;

/// Default number of words per caption for the word-group policy
pub const DEFAULT_WORDS_PER_GROUP: usize = 4;

/// Default number of words per caption for the fixed-window policy
pub const DEFAULT_WORDS_PER_WINDOW: usize = 12;

/// How text is split into caption units and how time is spread across them
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionPolicy {
    /// One caption per sentence, length-weighted with a floor
    #[default]
    Sentence,
    /// One caption per blank-line separated block, length-weighted
    Paragraph,
    /// Small word groups, uniform timing
    #[serde(alias = "word", alias = "word_group")]
    WordGroup,
    /// Larger word windows, uniform timing
    #[serde(alias = "simple", alias = "fixed_window")]
    FixedWindow,
}

impl CaptionPolicy {
    /// All policies, in the order they are listed to users
    pub const ALL: [CaptionPolicy; 4] = [
        CaptionPolicy::Sentence,
        CaptionPolicy::Paragraph,
        CaptionPolicy::WordGroup,
        CaptionPolicy::FixedWindow,
    ];

    // @returns: Canonical policy identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
            Self::WordGroup => "word-group",
            Self::FixedWindow => "fixed-window",
        }
    }

    /// Whether every unit gets the same share of the narration
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::WordGroup | Self::FixedWindow)
    }
}

impl std::fmt::Display for CaptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CaptionPolicy {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentence" => Ok(Self::Sentence),
            "paragraph" => Ok(Self::Paragraph),
            "word-group" | "word_group" | "word" => Ok(Self::WordGroup),
            "fixed-window" | "fixed_window" | "simple" => Ok(Self::FixedWindow),
            _ => Err(CaptionError::UnsupportedPolicy(s.to_string())),
        }
    }
}

/// What to do when the sentence floor pushes the allocated total past the narration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FloorMode {
    /// Scale every duration back so captions end with the narration
    #[default]
    Renormalize,
    /// Keep the floored durations; captions may run past the narration
    Overshoot,
}

/// Tunables for segmentation and duration allocation
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionOptions {
    /// Minimum duration of a sentence caption in seconds
    pub sentence_floor_secs: f64,
    /// Handling of floor-induced overshoot
    pub floor_mode: FloorMode,
    /// Words per caption for the word-group policy
    pub words_per_group: usize,
    /// Words per caption for the fixed-window policy
    pub words_per_window: usize,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            sentence_floor_secs: DEFAULT_SENTENCE_FLOOR_SECS,
            floor_mode: FloorMode::default(),
            words_per_group: DEFAULT_WORDS_PER_GROUP,
            words_per_window: DEFAULT_WORDS_PER_WINDOW,
        }
    }
}
