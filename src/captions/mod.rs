/*!
 * Caption timing engine.
 *
 * Turns narration text and the narration's duration into a timed SRT file:
 * segment -> allocate -> format -> write.
 *
 * # Architecture
 *
 * - `policy`: Segmentation policies and allocation options
 * - `segmenter`: Splits text into caption units
 * - `allocator`: Assigns contiguous time intervals to units
 * - `srt`: Caption entries, SRT timestamps and file output
 * - `validation`: Reading-speed and continuity checks on the result
 */

pub mod policy;
pub mod segmenter;
pub mod allocator;
pub mod srt;
pub mod validation;

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::CaptionError;

// Re-export main types
pub use policy::{CaptionOptions, CaptionPolicy, FloorMode};
pub use srt::{CaptionEntry, format_timestamp, render_srt, write_srt};
pub use validation::{TimingIssue, TimingReport, TimingValidator};

/// Caption generator bound to one policy and its options
#[derive(Debug, Clone)]
pub struct CaptionEngine {
    policy: CaptionPolicy,
    options: CaptionOptions,
    max_cps: f64,
}

impl CaptionEngine {
    /// Create an engine with default options
    pub fn new(policy: CaptionPolicy) -> Self {
        Self::with_options(policy, CaptionOptions::default())
    }

    pub fn with_options(policy: CaptionPolicy, options: CaptionOptions) -> Self {
        Self {
            policy,
            options,
            max_cps: validation::DEFAULT_MAX_CPS,
        }
    }

    /// Reading speed above which generated captions are reported
    pub fn with_max_cps(mut self, max_cps: f64) -> Self {
        self.max_cps = max_cps;
        self
    }

    pub fn policy(&self) -> CaptionPolicy {
        self.policy
    }

    pub fn options(&self) -> &CaptionOptions {
        &self.options
    }

    /// Build timed caption entries for `text` spread over `total_duration` seconds
    pub fn build_entries(&self, text: &str, total_duration: f64) -> Result<Vec<CaptionEntry>, CaptionError> {
        allocator::validate_duration(total_duration)?;
        let units = segmenter::segment(text, self.policy, &self.options)?;
        let entries = allocator::allocate(&units, total_duration, self.policy, &self.options)?;

        debug!(
            "Built {} {} captions over {:.3}s",
            entries.len(),
            self.policy,
            total_duration
        );

        let report = TimingValidator::with_max_cps(self.max_cps).validate(&entries);
        for (index, issue) in &report.issues {
            warn!("Caption {}: {}", index, issue);
        }

        Ok(entries)
    }

    /// Generate captions and write them to `output_path` as SRT.
    ///
    /// Input is validated before anything touches the filesystem.
    pub fn generate_srt<P: AsRef<Path>>(&self, text: &str, total_duration: f64, output_path: P) -> Result<PathBuf, CaptionError> {
        let entries = self.build_entries(text, total_duration)?;
        write_srt(&entries, output_path)
    }
}

impl Default for CaptionEngine {
    fn default() -> Self {
        Self::new(CaptionPolicy::default())
    }
}
