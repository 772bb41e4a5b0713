/*!
 * Narration (text-to-speech) producers.
 *
 * The caption engine only needs the narration's duration; this module
 * produces the audio file and measures it.
 *
 * - `command`: Runs an external TTS program and probes the result with ffprobe
 * - `text`: Text clean-up applied before synthesis
 */

pub mod command;
pub mod text;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::NarrationError;

// Re-export main types
pub use command::{CommandNarrator, probe_duration};
pub use text::prepare_text;

/// A synthesized narration on disk
#[derive(Debug, Clone, PartialEq)]
pub struct Narration {
    /// Audio file
    pub audio_path: PathBuf,
    /// Measured length in seconds
    pub duration_secs: f64,
}

/// Produces narration audio for a text
#[async_trait]
pub trait NarrationProducer: Send + Sync {
    /// Synthesize `text` into `output_path` and report the audio duration
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<Narration, NarrationError>;

    /// File extension of the audio this producer writes
    fn audio_extension(&self) -> &str {
        "wav"
    }
}
