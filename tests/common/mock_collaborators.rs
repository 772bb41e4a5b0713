/*!
 * Mock narration and compositing backends for testing
 *
 * These stand in for the TTS program and ffmpeg so workflow tests run
 * without external tools. Each mock records what it was asked to do.
 */

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use text2video::errors::{CompositorError, NarrationError};
use text2video::narration::{Narration, NarrationProducer};
use text2video::video::{Compositor, CompositionJob};

/// Narrator that writes a dummy audio file and reports a fixed duration
#[derive(Debug)]
pub struct FixedDurationNarrator {
    duration_secs: f64,
    fail: bool,
    texts: Arc<Mutex<Vec<String>>>,
}

impl FixedDurationNarrator {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            fail: false,
            texts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A narrator whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(1.0)
        }
    }

    /// Texts received so far
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrationProducer for FixedDurationNarrator {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<Narration, NarrationError> {
        self.texts.lock().unwrap().push(text.to_string());

        if self.fail {
            return Err(NarrationError::CommandFailed("mock narrator failure".to_string()));
        }

        fs::write(output_path, b"RIFF")?;
        Ok(Narration {
            audio_path: output_path.to_path_buf(),
            duration_secs: self.duration_secs,
        })
    }
}

/// Compositor that copies the subtitle file to the output path and records the job
#[derive(Debug, Default)]
pub struct RecordingCompositor {
    jobs: Arc<Mutex<Vec<CompositionJob>>>,
    subtitles: Arc<Mutex<Vec<String>>>,
}

impl RecordingCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs received so far
    pub fn jobs(&self) -> Vec<CompositionJob> {
        self.jobs.lock().unwrap().clone()
    }

    /// SRT contents seen at compose time, one per job
    pub fn subtitles(&self) -> Vec<String> {
        self.subtitles.lock().unwrap().clone()
    }
}

#[async_trait]
impl Compositor for RecordingCompositor {
    async fn compose(&self, job: &CompositionJob) -> Result<PathBuf, CompositorError> {
        let srt = fs::read_to_string(&job.subtitles)
            .map_err(|_| CompositorError::MissingInput(job.subtitles.clone()))?;
        if !job.audio.exists() {
            return Err(CompositorError::MissingInput(job.audio.clone()));
        }

        fs::write(&job.output, srt.as_bytes())
            .map_err(|e| CompositorError::CommandFailed(e.to_string()))?;

        self.subtitles.lock().unwrap().push(srt);
        self.jobs.lock().unwrap().push(job.clone());
        Ok(job.output.clone())
    }
}
