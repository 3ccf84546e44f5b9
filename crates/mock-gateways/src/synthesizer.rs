//! Synthesizer that writes text instead of audio.

use std::path::PathBuf;
use std::sync::Mutex;

use alert_core::{async_trait, GatewayError, Synthesizer};

/// File name used for every mock artifact.
pub const MOCK_AUDIO_FILE_NAME: &str = "mock_alert.mp3";

/// A synthesizer that writes the input text to a fixed file in a directory.
#[derive(Debug)]
pub struct FileSynthesizer {
    dir: PathBuf,
    failing: bool,
    fail_for: Option<String>,
    texts: Mutex<Vec<String>>,
}

impl FileSynthesizer {
    /// Write artifacts into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            failing: false,
            fail_for: None,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// A synthesizer whose backend is down.
    pub fn failing(dir: impl Into<PathBuf>) -> Self {
        Self {
            failing: true,
            ..Self::new(dir)
        }
    }

    /// A synthesizer that fails only for texts containing `needle`.
    pub fn failing_for(dir: impl Into<PathBuf>, needle: impl Into<String>) -> Self {
        Self {
            fail_for: Some(needle.into()),
            ..Self::new(dir)
        }
    }

    /// Every text this synthesizer was asked to speak.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.texts().len()
    }
}

#[async_trait]
impl Synthesizer for FileSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<PathBuf, GatewayError> {
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }

        let rejected = self
            .fail_for
            .as_deref()
            .is_some_and(|needle| text.contains(needle));
        if self.failing || rejected {
            return Err(GatewayError::Unavailable("mock synthesizer is down".to_string()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(MOCK_AUDIO_FILE_NAME);
        tokio::fs::write(&path, text).await?;
        Ok(path)
    }

    fn name(&self) -> &str {
        "FileSynthesizer"
    }
}
