//! Disaster event subscriber.
//!
//! A [`ConsumerLoop`] polls the shared event store, asks a
//! [`Locator`](alert_core::Locator) where it is, and announces every event
//! inside the affected radius: narration, then speech, then playback to
//! completion. Every pass ends by clearing the store and the audio
//! directory, relevant or not.
//!
//! The loop is started over HTTP through a [`ConsumerSupervisor`], which
//! keeps exactly one loop alive.

pub mod config;
pub mod consumer;
pub mod routes;
pub mod state;
pub mod supervisor;

pub use config::{Config, ConfigError, NarrationBackend};
pub use consumer::{
    CleanupPolicy, ConsumerConfig, ConsumerError, ConsumerLoop, CycleOutcome, CycleReport,
    Gateways, DEFAULT_GATEWAY_TIMEOUT, DEFAULT_IDLE_INTERVAL,
};
pub use routes::router;
pub use state::AppState;
pub use supervisor::{ConsumerSupervisor, StartOutcome};
