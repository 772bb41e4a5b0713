use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{Narration, NarrationProducer, prepare_text};
use crate::app_config::{NarrationConfig, VideoConfig};
use crate::errors::NarrationError;

// @module: External TTS program driver

/// Narration producer that pipes text into a TTS program.
///
/// The argument template may contain `{output}`, `{voice}` and `{language}`
/// placeholders; the text itself is written to the program's stdin.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
    voice: String,
    language: String,
    timeout_secs: u64,
    prepare: bool,
    ffprobe_path: String,
}

impl CommandNarrator {
    /// Build a narrator from the narration and video sections of the config
    pub fn from_config(narration: &NarrationConfig, video: &VideoConfig) -> Result<Self, NarrationError> {
        let program = narration.get_program().ok_or_else(|| {
            NarrationError::CommandFailed(format!("no program configured for the {} engine", narration.engine.display_name()))
        })?;

        Ok(Self {
            program,
            args: narration.get_args(),
            voice: narration.voice.clone(),
            language: narration.language.clone(),
            timeout_secs: narration.timeout_secs,
            prepare: narration.prepare_text,
            ffprobe_path: video.ffprobe_path.clone(),
        })
    }

    /// Arguments with placeholders filled in for `output_path`
    pub fn render_args(&self, output_path: &Path) -> Vec<String> {
        let output = output_path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{output}", &output)
                    .replace("{voice}", &self.voice)
                    .replace("{language}", &self.language)
            })
            .collect()
    }
}

#[async_trait]
impl NarrationProducer for CommandNarrator {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<Narration, NarrationError> {
        let spoken = if self.prepare { prepare_text(text) } else { text.to_string() };
        let args = self.render_args(output_path);
        debug!("TTS command: {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| NarrationError::CommandFailed(format!("failed to start {}: {}", self.program, e)))?;

        let stdin = child.stdin.take();
        let feed_text = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(spoken.as_bytes()).await {
                    // The program stopped reading; its exit status tells why
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                        debug!("TTS program closed stdin before reading all text");
                    }
                    other => other?,
                }
                // Dropping stdin closes the pipe so the program sees end of input
            }
            Ok::<(), io::Error>(())
        };

        // Writing and waiting run together under the timeout; the child is
        // killed on drop if the timeout wins
        let timeout_duration = Duration::from_secs(self.timeout_secs);
        let (written, result) = tokio::select! {
            pair = async { tokio::join!(feed_text, child.wait_with_output()) } => pair,
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(NarrationError::Timeout(self.timeout_secs));
            }
        };
        let result = result?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            error!("TTS command failed: {}", stderr);
            return Err(NarrationError::CommandFailed(format!("{} exited with {}: {}", self.program, result.status, stderr)));
        }
        written?;

        if !output_path.exists() {
            return Err(NarrationError::CommandFailed(format!("{} produced no audio at {:?}", self.program, output_path)));
        }

        let duration_secs = probe_duration(&self.ffprobe_path, output_path).await?;
        info!("Narration duration: {:.2} seconds", duration_secs);

        Ok(Narration {
            audio_path: output_path.to_path_buf(),
            duration_secs,
        })
    }
}

/// Measure a media file's duration in seconds with ffprobe
pub async fn probe_duration(ffprobe_path: &str, path: &Path) -> Result<f64, NarrationError> {
    let output = Command::new(ffprobe_path)
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(path)
        .output()
        .await
        .map_err(|e| NarrationError::ProbeFailed(format!("failed to run {}: {}", ffprobe_path, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NarrationError::ProbeFailed(stderr.trim().to_string()));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the single duration value ffprobe prints
pub fn parse_probe_output(stdout: &str) -> Result<f64, NarrationError> {
    let value = stdout.trim();
    let duration: f64 = value
        .parse()
        .map_err(|_| NarrationError::ProbeFailed(format!("unexpected ffprobe output: {:?}", value)))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(NarrationError::ProbeFailed(format!("audio has no duration ({})", value)));
    }

    Ok(duration)
}
