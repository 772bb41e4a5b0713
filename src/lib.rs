/*!
 * # text2video - narrated story videos from plain text
 *
 * A Rust library that turns a text into a narrated video with burned-in captions.
 *
 * ## Features
 *
 * - Speech synthesis through external TTS programs (espeak-ng, piper, any command)
 * - Caption timing derived from the narration length:
 *   - Sentence and paragraph captions weighted by length
 *   - Fixed-size word groups and windows timed evenly
 * - Standard SRT output
 * - Caption styling and background looping/trimming with ffmpeg
 * - Folder mode for processing many texts at once
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `captions`: Caption timing engine:
 *   - `captions::segmenter`: Splitting text into caption units
 *   - `captions::allocator`: Assigning time intervals
 *   - `captions::srt`: SRT formatting and file output
 *   - `captions::validation`: Reading-speed and continuity checks
 * - `narration`: Text-to-speech producers and duration probing
 * - `video`: Caption styling and ffmpeg compositing
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod captions;
pub mod narration;
pub mod video;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use captions::{CaptionEngine, CaptionEntry, CaptionPolicy};
pub use errors::{AppError, CaptionError, CompositorError, NarrationError};
