use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use tempfile::TempDir;
use uuid::Uuid;

use crate::app_config::{CaptionConfig, Config};
use crate::captions::{CaptionEngine, segmenter};
use crate::file_utils::{FileManager, FileType};
use crate::narration::{CommandNarrator, NarrationProducer};
use crate::video::{Compositor, CompositionJob, FfmpegCompositor};

// @module: Application controller for text-to-video generation

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller: narration -> captions -> compositing
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Speech producer
    narrator: Arc<dyn NarrationProducer>,

    // @field: Video compositor
    compositor: Arc<dyn Compositor>,

    // @field: Directory kept for intermediate files (temporary when unset)
    work_dir: Option<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let narrator = CommandNarrator::from_config(&config.narration, &config.video)
            .context("Failed to set up narration")?;
        let compositor = FfmpegCompositor::from_config(&config.video);

        Ok(Self::with_components(config, Arc::new(narrator), Arc::new(compositor)))
    }

    /// Create a controller with explicit narration and compositing backends
    pub fn with_components(
        config: Config,
        narrator: Arc<dyn NarrationProducer>,
        compositor: Arc<dyn Compositor>,
    ) -> Self {
        Self {
            config,
            narrator,
            compositor,
            work_dir: None,
        }
    }

    /// Keep intermediate audio and subtitle files in `dir`
    pub fn keep_intermediates_in(mut self, dir: PathBuf) -> Self {
        self.work_dir = Some(dir);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Caption engine configured from the captions section
    pub fn caption_engine(&self) -> CaptionEngine {
        self.config.captions.engine()
    }

    /// Write captions for `text` spread over `duration_secs` without any narration or video
    pub fn generate_captions(&self, text: &str, duration_secs: f64, output_path: &Path) -> Result<PathBuf> {
        Self::write_captions(&self.config.captions, text, duration_secs, output_path)
    }

    /// Caption-only run that needs nothing but the captions section, so no
    /// narration or video backend is set up
    pub fn write_captions(captions: &CaptionConfig, text: &str, duration_secs: f64, output_path: &Path) -> Result<PathBuf> {
        FileManager::ensure_parent_dir(output_path)?;

        let path = captions.engine()
            .generate_srt(text, duration_secs, output_path)
            .context("Failed to generate captions")?;

        info!("Captions written to {:?}", path);
        Ok(path)
    }

    /// Run the full workflow for one text and return the output video path
    pub async fn generate(&self, text: &str, background: &Path, output_path: &Path) -> Result<PathBuf> {
        let start_time = Instant::now();
        info!("Starting video generation for text of length {}", text.chars().count());

        // Fail on empty text before spending time on speech synthesis
        segmenter::segment(text, self.config.captions.policy, &self.config.captions.options())
            .context("Text cannot be captioned")?;

        if !FileManager::file_exists(background) {
            return Err(anyhow!("Background video not found: {:?}", background));
        }
        if FileManager::detect_file_type(background)? != FileType::Video {
            warn!("Background {:?} does not have a known video extension, passing it to ffmpeg anyway", background);
        }

        // Temporary directory lives until the end of this call
        let temp_dir: Option<TempDir>;
        let work_dir = match &self.work_dir {
            Some(dir) => {
                FileManager::ensure_dir(dir)?;
                temp_dir = None;
                dir.clone()
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("text2video-")
                    .tempdir()
                    .context("Failed to create temporary directory")?;
                let path = dir.path().to_path_buf();
                temp_dir = Some(dir);
                path
            }
        };

        let job_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        let progress = Self::step_progress_bar(3);

        progress.set_message("Synthesizing narration");
        let audio_path = work_dir.join(format!("{}_speech.{}", job_id, self.narrator.audio_extension()));
        debug!("Generating speech to {:?}", audio_path);
        let narration = self.narrator
            .synthesize(text, &audio_path)
            .await
            .context("Failed to synthesize narration")?;
        progress.inc(1);

        progress.set_message("Timing captions");
        let srt_path = work_dir.join(format!("{}_captions.srt", job_id));
        debug!("Generating captions to {:?}", srt_path);
        self.caption_engine()
            .generate_srt(text, narration.duration_secs, &srt_path)
            .context("Failed to generate captions")?;
        progress.inc(1);

        progress.set_message("Compositing video");
        FileManager::ensure_parent_dir(output_path)?;
        let job = CompositionJob {
            background: background.to_path_buf(),
            audio: narration.audio_path.clone(),
            subtitles: srt_path,
            output: output_path.to_path_buf(),
            duration_secs: narration.duration_secs,
        };
        let video_path = self.compositor
            .compose(&job)
            .await
            .context("Failed to composite video")?;
        progress.inc(1);
        progress.finish_and_clear();

        if temp_dir.is_none() {
            info!("Intermediate files kept in {:?}", work_dir);
        }

        info!(
            "Video generation completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        info!("Final video saved to: {:?}", video_path);

        Ok(video_path)
    }

    /// Generate a video for every story text under `input_dir`, next to the text file.
    /// Texts that already have a video are skipped unless `force_overwrite` is set.
    pub async fn run_folder(&self, input_dir: &Path, background: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let text_files = FileManager::find_text_files(input_dir)?;
        if text_files.is_empty() {
            return Err(anyhow!("No text files found in directory: {:?}", input_dir));
        }

        let folder_pb = Self::step_progress_bar(text_files.len() as u64);
        let mut summary = FolderSummary::default();

        for text_file in &text_files {
            let file_name = text_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = text_file.parent().unwrap_or(input_dir);
            let output_path = FileManager::generate_output_path(text_file, output_dir, "mp4");

            if output_path.exists() && !force_overwrite {
                warn!("Skipping {}, video already exists (use -f to force overwrite)", file_name);
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            let result = match FileManager::read_to_string(text_file) {
                Ok(text) => self.generate(&text, background, &output_path).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(_) => summary.succeeded += 1,
                Err(e) => {
                    error!("Error processing {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();
        info!(
            "Finished {} files in {}: {} generated, {} skipped, {} failed",
            text_files.len(),
            Self::format_duration(start_time.elapsed()),
            summary.succeeded,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    fn step_progress_bar(len: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Human readable elapsed time
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
