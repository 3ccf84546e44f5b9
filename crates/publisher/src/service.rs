//! Event publication: validate, geocode, persist.

use std::sync::Arc;

use alert_core::{EventRecord, GatewayError, Geocoder};
use event_store::{EventStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

/// An event as submitted by a reporter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

impl Submission {
    pub fn new(
        event_type: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
        }
    }
}

/// What was stored for a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedEvent {
    pub id: Uuid,
    pub event_type: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: Option<&'static str>,
    pub lat: f64,
    pub lng: f64,
}

impl From<&EventRecord> for PublishedEvent {
    fn from(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            event_type: record.event_type.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            country: record.country.clone(),
            description: record.description(),
            lat: record.lat,
            lng: record.lng,
        }
    }
}

/// Errors that can occur while publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required submission field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The geocoder found no match for the location.
    #[error("Invalid location provided.")]
    LocationNotFound,

    /// The geocoder could not be used.
    #[error("geocoding failed: {0}")]
    Geocoder(#[from] GatewayError),

    /// The record could not be written.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The blocking write task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] JoinError),
}

/// Accepts submissions and records resolved events.
pub struct PublisherService {
    geocoder: Arc<dyn Geocoder>,
    store: EventStore,
}

impl PublisherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, store: EventStore) -> Self {
        Self { geocoder, store }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Geocode `submission` and persist it.
    ///
    /// Nothing is written unless the location resolves.
    pub async fn publish(&self, submission: Submission) -> Result<PublishedEvent, PublishError> {
        if submission.event_type.trim().is_empty() {
            return Err(PublishError::MissingField("event_type"));
        }
        if submission.city.trim().is_empty() {
            return Err(PublishError::MissingField("city"));
        }

        let coordinates = self
            .geocoder
            .geocode(&submission.city, &submission.state, &submission.country)
            .await
            .map_err(|e| {
                warn!(geocoder = self.geocoder.name(), error = %e, "Geocoding failed");
                e
            })?
            .ok_or_else(|| {
                info!(
                    city = %submission.city,
                    state = %submission.state,
                    country = %submission.country,
                    "Location not found, dropping event"
                );
                PublishError::LocationNotFound
            })?;

        let record = EventRecord::new(
            submission.event_type,
            submission.city,
            submission.state,
            submission.country,
            coordinates,
        );
        let store = self.store.clone();
        let record = tokio::task::spawn_blocking(move || store.put(&record).map(|_| record))
            .await??;

        info!(
            id = %record.id,
            event_type = %record.event_type,
            city = %record.city,
            lat = record.lat,
            lng = record.lng,
            "Event published"
        );

        Ok(PublishedEvent::from(&record))
    }
}
