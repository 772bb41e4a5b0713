/*!
 * Tests for application configuration functionality
 */

use text2video::app_config::{Config, LogLevel, NarrationEngine};
use text2video::captions::{CaptionPolicy, FloorMode};
use text2video::video::CaptionPosition;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.captions.policy, CaptionPolicy::Sentence);
    assert_eq!(config.captions.sentence_floor_secs, 1.5);
    assert_eq!(config.captions.floor_mode, FloorMode::Renormalize);
    assert_eq!(config.captions.words_per_group, 4);
    assert_eq!(config.captions.words_per_window, 12);

    assert_eq!(config.narration.engine, NarrationEngine::Espeak);
    assert_eq!(config.narration.get_program().as_deref(), Some("espeak-ng"));
    assert_eq!(config.narration.voice, "en");

    assert_eq!(config.video.ffmpeg_path, "ffmpeg");
    assert!(config.video.loop_background);
    assert!(config.video.trim_background);
    assert_eq!(config.video.style.position, CaptionPosition::Bottom);

    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.captions.words_per_group = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.captions.sentence_floor_secs = -1.0;
    assert!(config.validate().is_err());

    // Custom command without a program
    let mut config = Config::default();
    config.narration.engine = NarrationEngine::Command;
    assert!(config.validate().is_err());
    config.narration.program = Some("my-tts".to_string());
    config.narration.args = vec!["--out".to_string(), "{output}".to_string()];
    assert!(config.validate().is_ok());

    // Arguments must say where the audio goes
    config.narration.args = vec!["--quiet".to_string()];
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.video.style.font_size = 0;
    assert!(config.validate().is_err());
}

/// Test that a partial JSON file falls back to defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "captions": { "policy": "word" },
        "narration": { "engine": "piper", "voice": "/models/en_US.onnx" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.captions.policy, CaptionPolicy::WordGroup);
    assert_eq!(config.captions.words_per_window, 12);
    assert_eq!(config.narration.engine, NarrationEngine::Piper);
    assert_eq!(config.narration.get_program().as_deref(), Some("piper"));
    assert!(config.narration.get_args().contains(&"{output}".to_string()));
    assert_eq!(config.video.ffprobe_path, "ffprobe");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

/// Test that the default config survives being written and read back
#[test]
fn test_config_serialize_withDefaults_shouldParseBack() {
    let json = serde_json::to_string_pretty(&Config::default()).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.captions.policy, CaptionPolicy::Sentence);
    assert_eq!(parsed.narration.timeout_secs, Config::default().narration.timeout_secs);
    assert_eq!(parsed.video.style.font_name, "Arial");
}

#[test]
fn test_captionOptions_fromConfig_shouldCarryCaptionSettings() {
    let mut config = Config::default();
    config.captions.words_per_group = 6;
    config.captions.floor_mode = FloorMode::Overshoot;

    let options = config.captions.options();
    assert_eq!(options.words_per_group, 6);
    assert_eq!(options.floor_mode, FloorMode::Overshoot);
}

#[test]
fn test_narrationEngine_fromStr_shouldAcceptKnownNames() {
    assert_eq!("espeak-ng".parse::<NarrationEngine>().unwrap(), NarrationEngine::Espeak);
    assert_eq!("PIPER".parse::<NarrationEngine>().unwrap(), NarrationEngine::Piper);
    assert!("festival".parse::<NarrationEngine>().is_err());
}
