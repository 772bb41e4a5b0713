/*!
 * Timing checks for generated captions.
 *
 * This module verifies that caption entries are:
 * - Numbered as a contiguous 1-based sequence
 * - Logically consistent (start < end)
 * - Contiguous with their neighbours (no gaps, no overlaps)
 * - Within reasonable reading speed limits
 */

use log::debug;

use super::srt::CaptionEntry;

/// Maximum characters per second for readable captions
pub const DEFAULT_MAX_CPS: f64 = 25.0;

/// Minimum duration for a caption in seconds
const MIN_CAPTION_DURATION_SECS: f64 = 0.5;

/// Neighbouring entries closer than this are considered touching
const ADJACENCY_TOLERANCE_SECS: f64 = 0.001;

/// Types of timing issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimingIssue {
    /// Sequence number does not follow the previous one
    IndexOutOfSequence {
        expected: usize,
        found: usize,
    },
    /// End is not after start
    InvalidTimeRange {
        start_secs: f64,
        end_secs: f64,
    },
    /// Duration is too short to read
    DurationTooShort {
        duration_secs: f64,
        min_duration_secs: f64,
    },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh {
        cps: f64,
        max_cps: f64,
    },
    /// Starts before the previous entry ends
    OverlapsPrevious {
        prev_index: usize,
        overlap_secs: f64,
    },
    /// Starts after the previous entry ends
    GapAfterPrevious {
        prev_index: usize,
        gap_secs: f64,
    },
}

impl std::fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingIssue::IndexOutOfSequence { expected, found } => {
                write!(f, "Index {} out of sequence (expected {})", found, expected)
            }
            TimingIssue::InvalidTimeRange { start_secs, end_secs } => {
                write!(f, "Invalid time range: start {:.3}s >= end {:.3}s", start_secs, end_secs)
            }
            TimingIssue::DurationTooShort { duration_secs, min_duration_secs } => {
                write!(f, "Duration too short: {:.3}s (min: {:.3}s)", duration_secs, min_duration_secs)
            }
            TimingIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
            TimingIssue::OverlapsPrevious { prev_index, overlap_secs } => {
                write!(f, "Overlaps entry {} by {:.3}s", prev_index, overlap_secs)
            }
            TimingIssue::GapAfterPrevious { prev_index, gap_secs } => {
                write!(f, "Gap of {:.3}s after entry {}", gap_secs, prev_index)
            }
        }
    }
}

/// Issues found across a list of captions
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    /// (caption index, issue) pairs in caption order
    pub issues: Vec<(usize, TimingIssue)>,
}

impl TimingReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any issue breaks the contiguous timeline
    pub fn has_structural_issues(&self) -> bool {
        self.issues.iter().any(|(_, issue)| {
            matches!(
                issue,
                TimingIssue::IndexOutOfSequence { .. }
                    | TimingIssue::InvalidTimeRange { .. }
                    | TimingIssue::OverlapsPrevious { .. }
                    | TimingIssue::GapAfterPrevious { .. }
            )
        })
    }
}

/// Timing validator for caption entries
pub struct TimingValidator {
    max_cps: f64,
    min_duration_secs: f64,
}

impl TimingValidator {
    pub fn new() -> Self {
        Self::with_max_cps(DEFAULT_MAX_CPS)
    }

    pub fn with_max_cps(max_cps: f64) -> Self {
        Self {
            max_cps,
            min_duration_secs: MIN_CAPTION_DURATION_SECS,
        }
    }

    /// Validate a list of captions in order
    pub fn validate(&self, entries: &[CaptionEntry]) -> TimingReport {
        let mut report = TimingReport::default();

        for (position, entry) in entries.iter().enumerate() {
            let expected = position + 1;
            if entry.index != expected {
                report.issues.push((entry.index, TimingIssue::IndexOutOfSequence {
                    expected,
                    found: entry.index,
                }));
            }

            self.check_entry(entry, &mut report);

            if position > 0 {
                let prev = &entries[position - 1];
                let delta = entry.start_secs - prev.end_secs;
                if delta > ADJACENCY_TOLERANCE_SECS {
                    report.issues.push((entry.index, TimingIssue::GapAfterPrevious {
                        prev_index: prev.index,
                        gap_secs: delta,
                    }));
                } else if delta < -ADJACENCY_TOLERANCE_SECS {
                    report.issues.push((entry.index, TimingIssue::OverlapsPrevious {
                        prev_index: prev.index,
                        overlap_secs: -delta,
                    }));
                }
            }
        }

        debug!("Caption timing check: {} entries, {} issues", entries.len(), report.issues.len());

        report
    }

    fn check_entry(&self, entry: &CaptionEntry, report: &mut TimingReport) {
        let duration = entry.duration_secs();
        if duration <= 0.0 {
            report.issues.push((entry.index, TimingIssue::InvalidTimeRange {
                start_secs: entry.start_secs,
                end_secs: entry.end_secs,
            }));
            // Can't do further validation with invalid times
            return;
        }

        if duration < self.min_duration_secs {
            report.issues.push((entry.index, TimingIssue::DurationTooShort {
                duration_secs: duration,
                min_duration_secs: self.min_duration_secs,
            }));
        }

        let cps = Self::calculate_cps(entry);
        if cps > self.max_cps {
            report.issues.push((entry.index, TimingIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.max_cps,
            }));
        }
    }

    /// Calculate reading speed (characters per second) for an entry
    pub fn calculate_cps(entry: &CaptionEntry) -> f64 {
        let duration = entry.duration_secs();
        if duration <= 0.0 {
            return f64::INFINITY;
        }
        entry.text.chars().count() as f64 / duration
    }
}

impl Default for TimingValidator {
    fn default() -> Self {
        Self::new()
    }
}
