//! Player that records instead of playing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alert_core::{async_trait, GatewayError, Player};
use tokio::time::sleep;

/// A player that remembers every artifact it was handed.
///
/// An optional delay simulates playback length.
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    delay: Duration,
    fail_first: usize,
    attempts: AtomicUsize,
    played: Mutex<Vec<PathBuf>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `delay` to "play" each artifact.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// A player whose device is unavailable.
    pub fn failing() -> Self {
        Self::failing_first(usize::MAX)
    }

    /// A player whose first `n` calls fail.
    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: n,
            ..Self::default()
        }
    }

    /// Artifacts played so far, in order.
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.played().len()
    }
}

#[async_trait]
impl Player for RecordingPlayer {
    async fn play(&self, artifact: &Path) -> Result<(), GatewayError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            return Err(GatewayError::Unavailable("mock audio device is busy".to_string()));
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Ok(mut played) = self.played.lock() {
            played.push(artifact.to_path_buf());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingPlayer"
    }
}
