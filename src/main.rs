// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use text2video::app_config::{self, Config, NarrationEngine};
use text2video::app_controller::Controller;
use text2video::captions::CaptionPolicy;
use text2video::file_utils::FileManager;
use text2video::video::{CaptionPosition, FfmpegCompositor};

/// CLI Wrapper for CaptionPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCaptionPolicy {
    Sentence,
    Paragraph,
    #[value(alias = "word")]
    WordGroup,
    #[value(alias = "simple")]
    FixedWindow,
}

impl From<CliCaptionPolicy> for CaptionPolicy {
    fn from(cli_policy: CliCaptionPolicy) -> Self {
        match cli_policy {
            CliCaptionPolicy::Sentence => CaptionPolicy::Sentence,
            CliCaptionPolicy::Paragraph => CaptionPolicy::Paragraph,
            CliCaptionPolicy::WordGroup => CaptionPolicy::WordGroup,
            CliCaptionPolicy::FixedWindow => CaptionPolicy::FixedWindow,
        }
    }
}

/// CLI Wrapper for NarrationEngine to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliNarrationEngine {
    Espeak,
    Piper,
    Command,
}

impl From<CliNarrationEngine> for NarrationEngine {
    fn from(cli_engine: CliNarrationEngine) -> Self {
        match cli_engine {
            CliNarrationEngine::Espeak => NarrationEngine::Espeak,
            CliNarrationEngine::Piper => NarrationEngine::Piper,
            CliNarrationEngine::Command => NarrationEngine::Command,
        }
    }
}

/// CLI Wrapper for CaptionPosition to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPosition {
    Top,
    Middle,
    Bottom,
}

impl From<CliPosition> for CaptionPosition {
    fn from(cli_position: CliPosition) -> Self {
        match cli_position {
            CliPosition::Top => CaptionPosition::Top,
            CliPosition::Middle => CaptionPosition::Middle,
            CliPosition::Bottom => CaptionPosition::Bottom,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a narrated, captioned video from text
    Generate(GenerateArgs),

    /// Write an SRT caption file for a known narration duration
    Captions(CaptionsArgs),

    /// Generate shell completions for text2video
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the story text comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TextSource {
    /// Text file, or a directory of .txt files (generate only)
    #[arg(long = "text", value_name = "PATH")]
    text_path: Option<PathBuf>,

    /// Text given directly on the command line
    #[arg(long)]
    text_input: Option<String>,
}

/// Options shared by every subcommand that loads the configuration
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Caption segmentation policy
    #[arg(short, long, value_enum)]
    policy: Option<CliCaptionPolicy>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: TextSource,

    /// Background video
    #[arg(short, long)]
    bg_video: PathBuf,

    /// Output video (required unless --text is a directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    /// Text-to-speech engine
    #[arg(long, value_enum)]
    tts: Option<CliNarrationEngine>,

    /// Voice name (espeak) or model path (piper)
    #[arg(long)]
    voice: Option<String>,

    /// Language code
    #[arg(long)]
    language: Option<String>,

    /// Caption font name
    #[arg(long)]
    font_name: Option<String>,

    /// Caption font size
    #[arg(long)]
    font_size: Option<u32>,

    /// Caption text color (name, #RRGGBB or #AARRGGBB)
    #[arg(long)]
    font_color: Option<String>,

    /// Caption outline color
    #[arg(long)]
    outline_color: Option<String>,

    /// Caption box color
    #[arg(long)]
    bg_color: Option<String>,

    /// Vertical caption position
    #[arg(long, value_enum)]
    position: Option<CliPosition>,

    /// Do not loop the background video if it is shorter than the narration
    #[arg(long)]
    no_loop: bool,

    /// Do not cut the background video at the end of the narration
    #[arg(long)]
    no_trim: bool,

    /// Path to the ffmpeg executable
    #[arg(long)]
    ffmpeg_path: Option<String>,

    /// Keep intermediate audio and subtitle files in this directory
    #[arg(long, value_name = "DIR")]
    keep_temp: Option<PathBuf>,

    /// Force overwrite of existing videos in folder mode
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Args, Debug)]
struct CaptionsArgs {
    #[command(flatten)]
    source: TextSource,

    /// Narration duration in seconds
    #[arg(short, long)]
    duration: f64,

    /// Output SRT file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

/// text2video - narrated story videos from plain text
///
/// Synthesizes speech for a text, times captions against the narration and
/// burns them into a background video with ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "text2video")]
#[command(version)]
#[command(about = "Convert text to video with speech and captions")]
#[command(long_about = "text2video narrates a text, times captions to the narration and composites both onto a background video.

EXAMPLES:
    text2video generate --text story.txt --bg-video bg.mp4 --output story.mp4
    text2video generate --text stories/ --bg-video bg.mp4           # One video per .txt file
    text2video generate --text story.txt --bg-video bg.mp4 -o out.mp4 --policy word-group
    text2video generate --text-input \"Hello there.\" --bg-video bg.mp4 -o hi.mp4 --font-size 28
    text2video captions --text story.txt --duration 42.5 --output story.srt
    text2video completions bash > text2video.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

CAPTION POLICIES:
    sentence      - One caption per sentence, timed by length (default)
    paragraph     - One caption per blank-line separated paragraph
    word-group    - Four words per caption, evenly timed
    fixed-window  - Twelve words per caption, evenly timed")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything at the logger; the max level filters
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "text2video", &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => run_generate(args).await,
        Commands::Captions(args) => run_captions(args),
    }
}

/// Load the config file (creating a default one when missing) and apply common overrides
fn load_config(common: &CommonArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &common.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = &common.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(policy) = &common.policy {
        config.captions.policy = policy.clone().into();
    }

    match &common.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    Ok(config)
}

fn read_text(source: &TextSource) -> Result<String> {
    match (&source.text_path, &source.text_input) {
        (Some(path), _) => {
            let text = FileManager::read_to_string(path)?;
            info!("Read {} characters from {:?}", text.chars().count(), path);
            Ok(text)
        }
        (None, Some(text)) => {
            info!("Using direct text input ({} characters)", text.chars().count());
            Ok(text.clone())
        }
        (None, None) => Err(anyhow!("Either --text or --text-input is required")),
    }
}

fn run_captions(options: CaptionsArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    // Narration and video settings are not used here
    config.captions.validate()
        .context("Configuration validation failed")?;

    let text = read_text(&options.source)?;
    let path = Controller::write_captions(&config.captions, &text, options.duration, &options.output)?;

    info!("Success: {:?}", path);
    Ok(())
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    // Override config with CLI options if provided
    if let Some(engine) = &options.tts {
        config.narration.engine = engine.clone().into();
    }
    if let Some(voice) = &options.voice {
        config.narration.voice = voice.clone();
    }
    if let Some(language) = &options.language {
        config.narration.language = language.clone();
    }
    if let Some(ffmpeg_path) = &options.ffmpeg_path {
        config.video.ffmpeg_path = ffmpeg_path.clone();
    }
    if options.no_loop {
        config.video.loop_background = false;
    }
    if options.no_trim {
        config.video.trim_background = false;
    }

    let style = &mut config.video.style;
    if let Some(font_name) = &options.font_name {
        style.font_name = font_name.clone();
    }
    if let Some(font_size) = options.font_size {
        style.font_size = font_size;
    }
    if let Some(font_color) = &options.font_color {
        style.font_color = font_color.clone();
    }
    if let Some(outline_color) = &options.outline_color {
        style.outline_color = outline_color.clone();
    }
    if let Some(bg_color) = &options.bg_color {
        style.background_color = Some(bg_color.clone());
    }
    if let Some(position) = &options.position {
        style.position = position.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    let ffmpeg_version = FfmpegCompositor::from_config(&config.video)
        .check_available()
        .await
        .context("ffmpeg is required to generate videos")?;
    info!("Using {}", ffmpeg_version);

    let mut controller = Controller::with_config(config)?;
    if let Some(keep_dir) = &options.keep_temp {
        controller = controller.keep_intermediates_in(keep_dir.clone());
    }

    if let Some(dir) = options.source.text_path.as_ref().filter(|p| FileManager::dir_exists(p)) {
        let summary = controller.run_folder(dir, &options.bg_video, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} of the texts in {:?} failed", summary.failed, dir));
        }
        return Ok(());
    }

    let output = options.output
        .as_ref()
        .ok_or_else(|| anyhow!("--output is required when generating a single video"))?;
    let text = read_text(&options.source)?;

    info!("Starting video generation...");
    let video = controller.generate(&text, &options.bg_video, output).await?;
    info!("Video generated successfully: {:?}", video);

    Ok(())
}
