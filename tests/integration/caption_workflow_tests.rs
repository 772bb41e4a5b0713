/*!
 * Integration tests for caption files written through the controller
 */

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use text2video::app_config::{Config, NarrationEngine};
use text2video::app_controller::Controller;
use text2video::captions::CaptionPolicy;
use text2video::errors::CaptionError;
use crate::common;
use crate::common::mock_collaborators::{FixedDurationNarrator, RecordingCompositor};

fn caption_controller(policy: CaptionPolicy) -> Controller {
    let mut config = Config::default();
    config.captions.policy = policy;
    Controller::with_components(
        config,
        Arc::new(FixedDurationNarrator::new(1.0)),
        Arc::new(RecordingCompositor::new()),
    )
}

#[test]
fn test_generateCaptions_withNestedOutput_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("subs").join("story.srt");

    let path = caption_controller(CaptionPolicy::Sentence).generate_captions(common::SAMPLE_STORY, 9.0, &output)?;

    assert_eq!(path, output);
    let content = fs::read_to_string(&output)?;
    let blocks: Vec<&str> = content.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("1\n00:00:00,000 --> "));
    assert!(blocks[2].ends_with("--> 00:00:09,000\nI am fine!"));
    Ok(())
}

#[test]
fn test_generateCaptions_withFixedWindow_shouldSplitEveryTwelveWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("window.srt");
    let words: Vec<String> = (1..=30).map(|i| format!("w{}", i)).collect();

    caption_controller(CaptionPolicy::FixedWindow).generate_captions(&words.join(" "), 30.0, &output)?;

    let content = fs::read_to_string(&output)?;
    assert!(content.contains("1\n00:00:00,000 --> 00:00:10,000\nw1 w2"));
    assert!(content.contains("3\n00:00:20,000 --> 00:00:30,000\nw25 w26 w27 w28 w29 w30\n"));
    Ok(())
}

#[test]
fn test_generateCaptions_withInvalidDuration_shouldReportCaptionError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("bad.srt");

    let error = caption_controller(CaptionPolicy::Sentence)
        .generate_captions(common::SAMPLE_STORY, 0.0, &output)
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<CaptionError>(),
        Some(CaptionError::InvalidDuration(_))
    ));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_writeCaptions_withUnusableNarrationConfig_shouldStillWriteCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("only.srt");

    let mut config = Config::default();
    config.narration.engine = NarrationEngine::Command;
    assert!(config.validate().is_err());
    assert!(Controller::with_config(config.clone()).is_err());

    config.captions.validate()?;
    let path = Controller::write_captions(&config.captions, common::SAMPLE_STORY, 9.0, &output)?;

    assert_eq!(path, output);
    assert!(fs::read_to_string(&output)?.contains("--> 00:00:09,000\nI am fine!\n"));
    Ok(())
}
