/*!
 * Error types for the text2video application.
 *
 * This module contains custom error types for the caption engine and the
 * external collaborators around it (narration and composition),
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing captions
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Segmentation produced no usable caption units
    #[error("No content to caption: input text is empty")]
    EmptyInput,

    /// The narration duration is zero, negative or not a number
    #[error("Invalid narration duration: {0} seconds (must be greater than zero)")]
    InvalidDuration(f64),

    /// The requested segmentation policy is not known
    #[error("Unsupported caption policy: {0}")]
    UnsupportedPolicy(String),

    /// Writing the subtitle file failed
    #[error("Failed to write subtitle file {path}: {source}")]
    Write {
        /// Target path of the subtitle file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while producing narration audio
#[derive(Error, Debug)]
pub enum NarrationError {
    /// The TTS command could not be started or exited with an error
    #[error("TTS command failed: {0}")]
    CommandFailed(String),

    /// The audio duration could not be measured
    #[error("Failed to probe audio duration: {0}")]
    ProbeFailed(String),

    /// The TTS command did not finish in time
    #[error("TTS command timed out after {0} seconds")]
    Timeout(u64),

    /// Error while preparing or reading audio files
    #[error("Narration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while compositing the final video
#[derive(Error, Debug)]
pub enum CompositorError {
    /// ffmpeg is not available at the configured path
    #[error("ffmpeg not found or not executable: {0}")]
    NotInstalled(String),

    /// A required input file does not exist
    #[error("Missing input file: {0}")]
    MissingInput(PathBuf),

    /// ffmpeg exited with an error
    #[error("ffmpeg failed: {0}")]
    CommandFailed(String),

    /// ffmpeg did not finish in time
    #[error("ffmpeg timed out after {0} seconds")]
    Timeout(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from caption generation
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error from narration
    #[error("Narration error: {0}")]
    Narration(#[from] NarrationError),

    /// Error from composition
    #[error("Compositor error: {0}")]
    Compositor(#[from] CompositorError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
