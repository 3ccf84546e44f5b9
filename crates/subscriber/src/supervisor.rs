//! Ownership of the single background consumer task.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::consumer::ConsumerLoop;

/// Result of [`ConsumerSupervisor::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new consumer task was spawned.
    Started,
    /// A consumer task was already running; nothing was spawned.
    AlreadyRunning,
}

impl StartOutcome {
    pub fn already_running(&self) -> bool {
        matches!(self, StartOutcome::AlreadyRunning)
    }
}

/// Starts the consumer loop at most once.
///
/// Repeated starts while the loop is alive are no-ops. If the task has
/// ended (it only does so by panicking) the next start replaces it.
pub struct ConsumerSupervisor {
    consumer: Arc<ConsumerLoop>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConsumerSupervisor {
    pub fn new(consumer: ConsumerLoop) -> Self {
        Self {
            consumer: Arc::new(consumer),
            task: Mutex::new(None),
        }
    }

    pub fn consumer(&self) -> &ConsumerLoop {
        &self.consumer
    }

    /// Spawn the consumer loop unless it is already running.
    ///
    /// Returns immediately; the loop runs on the tokio runtime.
    pub async fn start(&self) -> StartOutcome {
        let mut task = self.task.lock().await;

        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                return StartOutcome::AlreadyRunning;
            }
            warn!("Previous consumer task has ended, restarting");
        }

        let consumer = Arc::clone(&self.consumer);
        *task = Some(tokio::spawn(async move { consumer.run().await }));
        info!("Consumer task started");

        StartOutcome::Started
    }

    /// Whether a consumer task is currently alive.
    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ConsumerSupervisor {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}
