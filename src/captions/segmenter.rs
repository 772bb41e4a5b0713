/*!
 * Text segmentation for caption units.
 *
 * Splits narration text into ordered, non-empty caption units:
 * - Sentence: terminal punctuation followed by whitespace and an
 *   uppercase letter, a digit or a double quote
 * - Paragraph: blocks separated by blank lines
 * - Word group / fixed window: fixed-size runs of words
 *
 * Whitespace inside every unit is collapsed to single spaces so a unit
 * never carries a blank line into the subtitle file.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::policy::{CaptionOptions, CaptionPolicy};
use crate::errors::CaptionError;

// @const: Terminal mark followed by a whitespace run
static SENTENCE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?…]\s+").unwrap()
});

// @const: Blank-line paragraph separator
static PARAGRAPH_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

const TERMINAL_MARKS: [char; 4] = ['.', '!', '?', '…'];

/// Split `text` into caption units according to `policy`.
///
/// Fails with [`CaptionError::EmptyInput`] when no unit survives trimming.
pub fn segment(text: &str, policy: CaptionPolicy, options: &CaptionOptions) -> Result<Vec<String>, CaptionError> {
    let units = match policy {
        CaptionPolicy::Sentence => split_sentences(text),
        CaptionPolicy::Paragraph => split_paragraphs(text),
        CaptionPolicy::WordGroup => group_words(text, options.words_per_group),
        CaptionPolicy::FixedWindow => group_words(text, options.words_per_window),
    };

    if units.is_empty() {
        return Err(CaptionError::EmptyInput);
    }

    Ok(units)
}

/// Sentence units. No abbreviation awareness: "Mr. Smith" splits after "Mr.".
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for part in sentence_parts(text) {
        current.push_str(part);
        if ends_with_terminal(part.trim()) {
            push_unit(&mut sentences, &current);
            current.clear();
        }
    }

    // Trailing fragment without terminal punctuation
    push_unit(&mut sentences, &current);

    sentences
}

/// Paragraph units: blank-line separated blocks, empty blocks dropped
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    for block in PARAGRAPH_BREAK_REGEX.split(text) {
        push_unit(&mut paragraphs, block);
    }
    paragraphs
}

/// Fixed-size word runs; the last run may be shorter
pub fn group_words(text: &str, words_per_unit: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(words_per_unit.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

// Slices between sentence boundaries; the whitespace run at each boundary is dropped
fn sentence_parts(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;

    for m in SENTENCE_BREAK_REGEX.find_iter(text) {
        let opens_sentence = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '"');
        if !opens_sentence {
            continue;
        }

        // Keep the terminal mark with the sentence it closes
        let mark_len = text[m.start()..].chars().next().map_or(1, char::len_utf8);
        parts.push(&text[last..m.start() + mark_len]);
        last = m.end();
    }

    parts.push(&text[last..]);
    parts
}

fn ends_with_terminal(fragment: &str) -> bool {
    fragment.ends_with(TERMINAL_MARKS)
}

fn push_unit(units: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        units.push(normalized);
    }
}
