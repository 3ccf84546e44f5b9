//! The consumer loop: scan the store, announce nearby events, clean up.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alert_core::{
    is_relevant, EventRecord, GatewayError, Locator, Narrator, Player, Synthesizer,
    DEFAULT_AFFECTED_DISTANCE_KM,
};
use event_store::{purge_directory, EventStore, StoreError};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// Default pause between scans of an empty store (5 seconds).
pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_secs(5);

/// Default bound on narration and speech calls (60 seconds).
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(60);

/// When evaluated records are removed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// Empty the whole store at the end of each pass, including records
    /// that arrived while the pass was running.
    #[default]
    Batch,
    /// Remove each record right after it is evaluated. Records written
    /// mid-pass wait for the next scan.
    PerRecord,
}

impl FromStr for CleanupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batch" => Ok(CleanupPolicy::Batch),
            "per_record" | "per-record" => Ok(CleanupPolicy::PerRecord),
            other => Err(format!("unknown cleanup policy '{}'", other)),
        }
    }
}

/// Configuration for the consumer loop.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Events at or beyond this distance are consumed silently.
    pub affected_distance_km: f64,

    /// Pause after a pass that found nothing.
    pub idle_interval: Duration,

    /// Bound on each narration and speech call. A call that takes longer
    /// counts as a failure for that record. Playback is not bounded.
    pub gateway_timeout: Duration,

    pub cleanup: CleanupPolicy,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            affected_distance_km: DEFAULT_AFFECTED_DISTANCE_KM,
            idle_interval: DEFAULT_IDLE_INTERVAL,
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
            cleanup: CleanupPolicy::default(),
        }
    }
}

/// The external services a consumer talks to.
#[derive(Clone)]
pub struct Gateways {
    pub locator: Arc<dyn Locator>,
    pub narrator: Arc<dyn Narrator>,
    pub synthesizer: Arc<dyn Synthesizer>,
    pub player: Arc<dyn Player>,
}

impl Gateways {
    pub fn new(
        locator: Arc<dyn Locator>,
        narrator: Arc<dyn Narrator>,
        synthesizer: Arc<dyn Synthesizer>,
        player: Arc<dyn Player>,
    ) -> Self {
        Self {
            locator,
            narrator,
            synthesizer,
            player,
        }
    }
}

/// Errors that can occur while consuming events.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// The store could not be scanned or cleaned.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A gateway call failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A gateway call did not finish in time.
    #[error("gateway call timed out after {0:?}")]
    Timeout(Duration),

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] JoinError),
}

/// Counters for one processed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Record entries seen, including malformed ones.
    pub scanned: usize,
    /// Entries that could not be decoded.
    pub malformed: usize,
    /// Events that were narrated, synthesized and played.
    pub announced: usize,
    /// Events at or beyond the affected distance.
    pub out_of_range: usize,
    /// Events skipped because the consumer's position was unknown.
    pub location_unavailable: usize,
    /// Events whose narration, speech or playback failed.
    pub failed: usize,
    pub records_removed: usize,
    pub artifacts_removed: usize,
}

/// Result of a single [`ConsumerLoop::run_cycle`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The store held no records.
    Idle,
    /// At least one record was evaluated.
    Processed(CycleReport),
}

/// What happened to one record.
#[derive(Debug)]
enum Evaluation {
    Announced,
    OutOfRange,
    LocationUnavailable,
    Failed,
}

/// Polls the event store and announces events near the consumer.
///
/// Records are handled strictly one at a time: the next record is not
/// looked at until the previous announcement has finished playing.
pub struct ConsumerLoop {
    store: EventStore,
    audio_dir: PathBuf,
    gateways: Gateways,
    config: ConsumerConfig,
}

impl ConsumerLoop {
    pub fn new(
        store: EventStore,
        audio_dir: impl Into<PathBuf>,
        gateways: Gateways,
        config: ConsumerConfig,
    ) -> Self {
        Self {
            store,
            audio_dir: audio_dir.into(),
            gateways,
            config,
        }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Run one scan, evaluate and cleanup pass.
    ///
    /// Gateway failures are contained within the record they concern. An
    /// `Err` means the store itself could not be scanned or cleaned.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, ConsumerError> {
        let mut report = CycleReport::default();

        // The listing is taken up front. Records written after this point
        // wait for the next scan.
        let store = self.store.clone();
        let pending = blocking(move || Ok(store.list_pending()?.collect::<Vec<_>>())).await?;

        for entry in pending {
            report.scanned += 1;

            let path = match entry {
                Ok(stored) => {
                    match self.evaluate(&stored.record).await {
                        Evaluation::Announced => report.announced += 1,
                        Evaluation::OutOfRange => report.out_of_range += 1,
                        Evaluation::LocationUnavailable => report.location_unavailable += 1,
                        Evaluation::Failed => report.failed += 1,
                    }
                    Some(stored.path)
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable event record");
                    report.malformed += 1;
                    e.path().map(Path::to_path_buf)
                }
            };

            if self.config.cleanup == CleanupPolicy::PerRecord {
                if let Some(path) = path {
                    report.records_removed += self.remove_record(path).await;
                }
            }
        }

        // An empty scan leaves the store alone: clearing it would drop a
        // record written after the scan without it ever being seen.
        if report.scanned == 0 {
            let stray = self.purge_audio().await?;
            if stray > 0 {
                debug!(artifacts_removed = stray, "Removed stray audio artifacts");
            }
            return Ok(CycleOutcome::Idle);
        }

        if self.config.cleanup == CleanupPolicy::Batch {
            let store = self.store.clone();
            report.records_removed += blocking(move || store.clear_all()).await?;
        }
        report.artifacts_removed = self.purge_audio().await?;

        Ok(CycleOutcome::Processed(report))
    }

    /// Run passes forever, pausing whenever the store is empty.
    pub async fn run(&self) {
        info!(
            dir = %self.store.dir().display(),
            affected_distance_km = self.config.affected_distance_km,
            cleanup = ?self.config.cleanup,
            narrator = self.gateways.narrator.name(),
            "Starting consumer loop"
        );

        loop {
            match self.run_cycle().await {
                Ok(CycleOutcome::Idle) => {
                    debug!("No pending events");
                    sleep(self.config.idle_interval).await;
                }
                Ok(CycleOutcome::Processed(report)) => {
                    info!(
                        scanned = report.scanned,
                        announced = report.announced,
                        out_of_range = report.out_of_range,
                        location_unavailable = report.location_unavailable,
                        failed = report.failed,
                        malformed = report.malformed,
                        "Consumer pass complete"
                    );
                }
                Err(e) => {
                    error!("Consumer pass failed: {}", e);
                    sleep(self.config.idle_interval).await;
                }
            }
        }
    }

    async fn evaluate(&self, record: &EventRecord) -> Evaluation {
        let here = match self.gateways.locator.current_location().await {
            Ok(here) => here,
            Err(e) => {
                warn!(
                    id = %record.id,
                    locator = self.gateways.locator.name(),
                    error = %e,
                    "Consumer location unavailable, skipping event"
                );
                return Evaluation::LocationUnavailable;
            }
        };

        let distance_km = record.coordinates().distance_km(&here);
        if !is_relevant(distance_km, self.config.affected_distance_km) {
            info!(
                id = %record.id,
                event_type = %record.event_type,
                city = %record.city,
                distance_km,
                "Event outside affected area"
            );
            return Evaluation::OutOfRange;
        }

        match self.announce(record).await {
            Ok(()) => Evaluation::Announced,
            Err(e) => {
                warn!(
                    id = %record.id,
                    event_type = %record.event_type,
                    city = %record.city,
                    error = %e,
                    "Failed to announce event"
                );
                Evaluation::Failed
            }
        }
    }

    async fn announce(&self, record: &EventRecord) -> Result<(), ConsumerError> {
        let request = record.alert_request(self.config.affected_distance_km);
        let text = self.bounded(self.gateways.narrator.narrate(&request)).await?;
        let artifact = self.bounded(self.gateways.synthesizer.synthesize(&text)).await?;

        info!(
            event_type = %record.event_type,
            city = %record.city,
            artifact = %artifact.display(),
            "*** Speaking now ***"
        );
        debug!("Alert text: {}", text);

        self.gateways.player.play(&artifact).await?;
        Ok(())
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, ConsumerError> {
        match timeout(self.config.gateway_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_elapsed) => Err(ConsumerError::Timeout(self.config.gateway_timeout)),
        }
    }

    async fn purge_audio(&self) -> Result<usize, ConsumerError> {
        let dir = self.audio_dir.clone();
        blocking(move || purge_directory(&dir)).await
    }

    async fn remove_record(&self, path: PathBuf) -> usize {
        let store = self.store.clone();
        match blocking(move || store.remove(&path)).await {
            Ok(true) => 1,
            Ok(false) => 0,
            Err(e) => {
                warn!(error = %e, "Failed to remove event record");
                0
            }
        }
    }
}

/// Run store file I/O off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ConsumerError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
