use once_cell::sync::Lazy;
use regex::Regex;

// @module: Text preparation before speech synthesis

// @const: Any whitespace run
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @const: Percentages such as 42%
static PERCENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)%").unwrap()
});

// @const: Abbreviations spoken in full
static ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bMrs\.", "Misses"),
        (r"\bMr\.", "Mister"),
        (r"\bDr\.", "Doctor"),
        (r"\bProf\.", "Professor"),
        (r"\bvs\.", "versus"),
        (r"\be\.g\.", "for example"),
        (r"\bi\.e\.", "that is"),
    ]
    .into_iter()
    .map(|(pattern, spoken)| (Regex::new(pattern).unwrap(), spoken))
    .collect()
});

/// Normalize text for a TTS engine: collapse whitespace, spell out common
/// abbreviations and percent signs.
///
/// Only the narration sees this text; captions keep the original wording.
pub fn prepare_text(text: &str) -> String {
    let mut prepared = WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned();

    for (pattern, spoken) in ABBREVIATIONS.iter() {
        prepared = pattern.replace_all(&prepared, *spoken).into_owned();
    }

    PERCENT_REGEX.replace_all(&prepared, "$1 percent").into_owned()
}
