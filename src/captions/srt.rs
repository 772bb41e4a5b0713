use std::fmt;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::errors::CaptionError;

// @module: SRT timestamps, caption entries and subtitle file output

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    // @field: 1-based sequence number
    pub index: usize,

    // @field: Start time in seconds
    pub start_secs: f64,

    // @field: End time in seconds
    pub end_secs: f64,

    // @field: Caption text
    pub text: String,
}

impl CaptionEntry {
    pub fn new(index: usize, start_secs: f64, end_secs: f64, text: String) -> Self {
        CaptionEntry {
            index,
            start_secs,
            end_secs,
            text,
        }
    }

    /// Length of the interval in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_secs)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_secs)
    }
}

impl fmt::Display for CaptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm).
///
/// Negative and NaN inputs are clamped to zero; values are rounded to the
/// nearest millisecond.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds > 0.0 { seconds } else { 0.0 };
    format_millis((seconds * 1000.0).round() as u64)
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_millis(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Render entries as SRT text, one block per entry separated by a blank line
pub fn render_srt(entries: &[CaptionEntry]) -> String {
    entries.iter().map(|entry| entry.to_string()).collect()
}

/// Write entries to `path` as UTF-8 SRT.
///
/// The content goes to a temporary file in the destination directory which
/// is renamed over `path` once fully flushed, so a failed write never leaves
/// a partial file at the target.
pub fn write_srt<P: AsRef<Path>>(entries: &[CaptionEntry], path: P) -> Result<PathBuf, CaptionError> {
    let path = path.as_ref();
    let write_error = |source: std::io::Error| CaptionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        writer.write_all(render_srt(entries).as_bytes()).map_err(write_error)?;
        writer.flush().map_err(write_error)?;
    }
    temp.as_file().sync_all().map_err(write_error)?;

    temp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(path.to_path_buf())
}
