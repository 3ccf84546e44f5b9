//! Disaster event publisher.
//!
//! Accepts `{event_type, city, state, country}` submissions over HTTP,
//! resolves the location with a [`Geocoder`](alert_core::Geocoder) and
//! records the event in an [`EventStore`](event_store::EventStore) for the
//! subscriber to pick up. Unresolvable locations are rejected and nothing is
//! written.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::router;
pub use service::{PublishError, PublishedEvent, PublisherService, Submission};
pub use state::AppState;
