/*!
 * Tests for the caption timing engine
 */

use std::fs;

use text2video::captions::{
    CaptionEngine, CaptionOptions, CaptionPolicy, FloorMode, TimingValidator, format_timestamp, render_srt,
};
use text2video::errors::CaptionError;
use crate::common;

const STORY: &str = "Hello there. How are you? I am fine!";
const NINE_WORDS: &str = "one two three four five six seven eight nine";

#[test]
fn test_formatTimestamp_withKnownValues_shouldMatchSrtFormat() {
    assert_eq!(format_timestamp(0.0), "00:00:00,000");
    assert_eq!(format_timestamp(3661.5), "01:01:01,500");
}

#[test]
fn test_buildEntries_withSentencePolicy_shouldProduceThreeOrderedCaptions() {
    let engine = CaptionEngine::new(CaptionPolicy::Sentence);
    let entries = engine.build_entries(STORY, 9.0).unwrap();

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello there.", "How are you?", "I am fine!"]);

    assert_eq!(entries[0].format_start_time(), "00:00:00,000");
    for pair in entries.windows(2) {
        assert!(pair[1].start_secs >= pair[0].start_secs);
        assert_eq!(pair[0].end_secs, pair[1].start_secs);
    }
    for entry in &entries {
        assert!(entry.duration_secs() >= 1.5);
    }
    assert_eq!(entries[2].format_end_time(), "00:00:09,000");
}

#[test]
fn test_buildEntries_withWordGroupPolicy_shouldShareUniformly() {
    let engine = CaptionEngine::new(CaptionPolicy::WordGroup);
    let entries = engine.build_entries(NINE_WORDS, 9.0).unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text, "one two three four");
    assert_eq!(entries[1].text, "five six seven eight");
    assert_eq!(entries[2].text, "nine");

    assert_eq!(entries[1].start_secs, 3.0);
    assert_eq!(entries[1].end_secs, 6.0);
    assert_eq!(entries[1].format_start_time(), "00:00:03,000");
    assert_eq!(entries[1].format_end_time(), "00:00:06,000");
}

#[test]
fn test_buildEntries_withWhitespaceInput_shouldFailForEveryPolicy() {
    for policy in CaptionPolicy::ALL {
        let result = CaptionEngine::new(policy).build_entries("   ", 9.0);
        assert!(
            matches!(result, Err(CaptionError::EmptyInput)),
            "policy {} should reject whitespace-only input",
            policy
        );
    }
}

#[test]
fn test_generateSrt_withInvalidDuration_shouldFailBeforeWriting() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("captions.srt");
    let engine = CaptionEngine::default();

    for bad in [0.0, -4.0] {
        let result = engine.generate_srt(STORY, bad, &path);
        assert!(matches!(result, Err(CaptionError::InvalidDuration(_))));
        assert!(!path.exists());
    }
}

#[test]
fn test_generateSrt_withEmptyInput_shouldNotCreateFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("captions.srt");

    let result = CaptionEngine::default().generate_srt("\n\n  \t", 5.0, &path);
    assert!(matches!(result, Err(CaptionError::EmptyInput)));
    assert!(!path.exists());
}

#[test]
fn test_generateSrt_calledTwice_shouldWriteIdenticalBytes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let first = temp_dir.path().join("first.srt");
    let second = temp_dir.path().join("second.srt");
    let engine = CaptionEngine::new(CaptionPolicy::Sentence);

    engine.generate_srt(STORY, 7.25, &first).unwrap();
    engine.generate_srt(STORY, 7.25, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_generateSrt_withExistingFile_shouldReplaceIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "captions.srt", "stale content").unwrap();

    CaptionEngine::default().generate_srt(STORY, 9.0, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("1\n00:00:00,000 --> "));
    assert!(!content.contains("stale"));
}

#[test]
fn test_generateSrt_intoMissingDirectory_shouldFailWithWriteError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("missing").join("captions.srt");

    let result = CaptionEngine::default().generate_srt(STORY, 9.0, &path);
    assert!(matches!(result, Err(CaptionError::Write { .. })));
    assert!(!path.exists());
}

#[test]
fn test_buildEntries_withEveryPolicy_shouldCoverTheNarration() {
    let text = "The fox ran. It was fast!\n\nThe dog slept. It was tired and it did not care at all.";

    for policy in CaptionPolicy::ALL {
        let entries = CaptionEngine::new(policy).build_entries(text, 12.5).unwrap();

        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, i + 1);
            assert!(entry.end_secs > entry.start_secs);
        }
        assert_eq!(entries[0].start_secs, 0.0);
        assert_eq!(entries.last().unwrap().end_secs, 12.5);

        let report = TimingValidator::new().validate(&entries);
        assert!(!report.has_structural_issues(), "policy {}: {:?}", policy, report.issues);
    }
}

#[test]
fn test_buildEntries_withParagraphPolicy_shouldKeepBlocksTogether() {
    let text = "First block line one.\nStill first block.\n\nSecond block.";
    let entries = CaptionEngine::new(CaptionPolicy::Paragraph).build_entries(text, 6.0).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "First block line one. Still first block.");
    assert_eq!(entries[1].text, "Second block.");
    assert!(entries[0].duration_secs() > entries[1].duration_secs());
}

#[test]
fn test_buildEntries_withFloorOvershoot_shouldDependOnFloorMode() {
    let text = "Go. This second sentence is quite a lot longer than the first one ever was.";

    let renormalized = CaptionEngine::new(CaptionPolicy::Sentence)
        .build_entries(text, 2.0)
        .unwrap();
    assert_eq!(renormalized.last().unwrap().end_secs, 2.0);

    let options = CaptionOptions {
        floor_mode: FloorMode::Overshoot,
        ..CaptionOptions::default()
    };
    let overshoot = CaptionEngine::with_options(CaptionPolicy::Sentence, options)
        .build_entries(text, 2.0)
        .unwrap();
    assert_eq!(overshoot[0].duration_secs(), 1.5);
    assert!(overshoot.last().unwrap().end_secs > 2.0);
}

#[test]
fn test_renderSrt_withEntries_shouldSeparateBlocksWithBlankLines() {
    let entries = CaptionEngine::new(CaptionPolicy::WordGroup)
        .build_entries(NINE_WORDS, 9.0)
        .unwrap();
    let srt = render_srt(&entries);

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:03,000\none two three four\n\n\
         2\n00:00:03,000 --> 00:00:06,000\nfive six seven eight\n\n\
         3\n00:00:06,000 --> 00:00:09,000\nnine\n\n"
    );
}

#[test]
fn test_captionPolicy_fromStr_withAliases_shouldResolve() {
    assert_eq!("word".parse::<CaptionPolicy>().unwrap(), CaptionPolicy::WordGroup);
    assert_eq!("Simple".parse::<CaptionPolicy>().unwrap(), CaptionPolicy::FixedWindow);
    assert!(matches!(
        "karaoke".parse::<CaptionPolicy>(),
        Err(CaptionError::UnsupportedPolicy(_))
    ));
}
