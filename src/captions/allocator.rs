/*!
 * Duration allocation for caption units.
 *
 * Maps each unit to a `[start, end)` interval of the narration:
 * - Sentence and paragraph units are weighted by character count, with a
 *   per-sentence floor
 * - Word-group and fixed-window units share the narration uniformly
 *
 * Intervals are contiguous: the end of each entry is the start of the next.
 */

use log::debug;

use super::policy::{CaptionOptions, CaptionPolicy, FloorMode};
use super::srt::CaptionEntry;
use crate::errors::CaptionError;

/// Assign time intervals to `units` so they cover `total_duration` seconds.
pub fn allocate(
    units: &[String],
    total_duration: f64,
    policy: CaptionPolicy,
    options: &CaptionOptions,
) -> Result<Vec<CaptionEntry>, CaptionError> {
    validate_duration(total_duration)?;
    if units.is_empty() {
        return Err(CaptionError::EmptyInput);
    }

    let entries = match policy {
        CaptionPolicy::Sentence => proportional(units, total_duration, Some(options.sentence_floor_secs), options.floor_mode),
        CaptionPolicy::Paragraph => proportional(units, total_duration, None, options.floor_mode),
        CaptionPolicy::WordGroup | CaptionPolicy::FixedWindow => uniform(units, total_duration),
    };

    Ok(entries)
}

/// Reject durations that cannot be divided among captions
pub fn validate_duration(total_duration: f64) -> Result<(), CaptionError> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(CaptionError::InvalidDuration(total_duration));
    }
    Ok(())
}

/// Per-unit durations before they are laid out on the timeline.
///
/// Returns the durations and whether they overshoot `total_duration`.
pub fn weighted_durations(
    units: &[String],
    total_duration: f64,
    floor_secs: Option<f64>,
    floor_mode: FloorMode,
) -> (Vec<f64>, bool) {
    let lengths: Vec<f64> = units.iter().map(|u| u.chars().count() as f64).collect();
    let total_len: f64 = lengths.iter().sum();

    let mut durations: Vec<f64> = lengths
        .iter()
        .map(|len| len / total_len * total_duration)
        .map(|d| floor_secs.map_or(d, |floor| d.max(floor)))
        .collect();

    let allocated: f64 = durations.iter().sum();
    let inflated = allocated > total_duration * (1.0 + f64::EPSILON * units.len() as f64);
    if !inflated {
        return (durations, false);
    }

    match floor_mode {
        FloorMode::Overshoot => {
            debug!(
                "Sentence floor extends captions to {:.3}s past a {:.3}s narration",
                allocated, total_duration
            );
            (durations, true)
        }
        FloorMode::Renormalize => {
            let scale = total_duration / allocated;
            for d in durations.iter_mut() {
                *d *= scale;
            }
            (durations, false)
        }
    }
}

fn proportional(units: &[String], total_duration: f64, floor_secs: Option<f64>, floor_mode: FloorMode) -> Vec<CaptionEntry> {
    let (durations, overshoot) = weighted_durations(units, total_duration, floor_secs, floor_mode);
    let last = units.len() - 1;

    let mut cumulative = 0.0;
    units
        .iter()
        .zip(durations)
        .enumerate()
        .map(|(i, (unit, duration))| {
            let start = cumulative;
            // Absorb running-sum drift so the last caption ends with the narration
            let end = if i == last && !overshoot {
                total_duration
            } else {
                cumulative + duration
            };
            cumulative = end;
            CaptionEntry::new(i + 1, start, end, unit.clone())
        })
        .collect()
}

fn uniform(units: &[String], total_duration: f64) -> Vec<CaptionEntry> {
    let share = total_duration / units.len() as f64;
    let last = units.len() - 1;

    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let start = i as f64 * share;
            let end = if i == last { total_duration } else { (i + 1) as f64 * share };
            CaptionEntry::new(i + 1, start, end, unit.clone())
        })
        .collect()
}
