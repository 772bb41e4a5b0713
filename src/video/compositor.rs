use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::process::Command;

use super::style::SubtitleStyle;
use crate::app_config::VideoConfig;
use crate::errors::CompositorError;

// @module: Final video compositing through ffmpeg

/// Inputs and destination of one compositing run
#[derive(Debug, Clone)]
pub struct CompositionJob {
    /// Background video
    pub background: PathBuf,
    /// Narration audio
    pub audio: PathBuf,
    /// SRT file burned into the picture
    pub subtitles: PathBuf,
    /// Output video path
    pub output: PathBuf,
    /// Narration length in seconds
    pub duration_secs: f64,
}

/// Merges background video, narration and captions into one file
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Produce the composited video and return its path
    async fn compose(&self, job: &CompositionJob) -> Result<PathBuf, CompositorError>;
}

/// Compositor backed by the ffmpeg command line tool
#[derive(Debug, Clone)]
pub struct FfmpegCompositor {
    ffmpeg_path: String,
    style: SubtitleStyle,
    loop_background: bool,
    trim_background: bool,
    timeout_secs: u64,
}

impl FfmpegCompositor {
    pub fn from_config(config: &VideoConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            style: config.style.clone(),
            loop_background: config.loop_background,
            trim_background: config.trim_background,
            timeout_secs: config.timeout_secs,
        }
    }

    /// Check that ffmpeg runs and return its version line
    pub async fn check_available(&self) -> Result<String, CompositorError> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .output()
            .await
            .map_err(|e| CompositorError::NotInstalled(format!("{}: {}", self.ffmpeg_path, e)))?;

        if !output.status.success() {
            return Err(CompositorError::NotInstalled(self.ffmpeg_path.clone()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().to_string())
    }

    /// Command line arguments for `job`, without the program name.
    ///
    /// A looped background is always cut at the narration length, since the
    /// loop itself never ends.
    pub fn build_args(&self, job: &CompositionJob) -> Vec<String> {
        let mut args: Vec<String> = vec!["-y".into()];

        if self.loop_background {
            args.extend(["-stream_loop".into(), "-1".into()]);
        }

        args.extend([
            "-i".into(),
            job.background.to_string_lossy().into_owned(),
            "-i".into(),
            job.audio.to_string_lossy().into_owned(),
            "-vf".into(),
            format!(
                "subtitles={}:force_style='{}'",
                escape_filter_path(&job.subtitles),
                self.style.force_style()
            ),
            "-map".into(),
            "0:v:0".into(),
            "-map".into(),
            "1:a:0".into(),
            "-c:v".into(),
            "libx264".into(),
            "-c:a".into(),
            "aac".into(),
        ]);

        if self.trim_background || self.loop_background {
            args.extend(["-t".into(), format!("{:.3}", job.duration_secs)]);
        }

        args.push(job.output.to_string_lossy().into_owned());
        args
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    async fn compose(&self, job: &CompositionJob) -> Result<PathBuf, CompositorError> {
        for input in [&job.background, &job.audio, &job.subtitles] {
            if !input.exists() {
                return Err(CompositorError::MissingInput(input.clone()));
            }
        }

        let args = self.build_args(job);
        debug!("FFmpeg command: {} {}", self.ffmpeg_path, args.join(" "));

        let ffmpeg_future = Command::new(&self.ffmpeg_path)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(self.timeout_secs);
        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| CompositorError::NotInstalled(format!("{}: {}", self.ffmpeg_path, e)))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(CompositorError::Timeout(self.timeout_secs));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Video compositing failed: {}", filtered);
            return Err(CompositorError::CommandFailed(filtered));
        }

        Ok(job.output.clone())
    }
}

/// Escape a path for use as a filter option value
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Drop ffmpeg's banner and stream listing, keeping the lines that explain a failure
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "encoder",
        "handler_name",
        "major_brand",
        "minor_version",
        "compatible_brands",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
