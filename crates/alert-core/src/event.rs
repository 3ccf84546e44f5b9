//! Disaster event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_type::describe_event_type;
use crate::geo::Coordinates;

/// Description used for event codes outside the catalog.
pub const NO_DESCRIPTION: &str = "no description";

/// A geocoded disaster event waiting to be consumed.
///
/// Records only exist once their location has been resolved, so the
/// coordinates are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub event_type: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "Utc::now")]
    pub published_at: DateTime<Utc>,
}

impl EventRecord {
    /// Create a record for a freshly resolved submission.
    pub fn new(
        event_type: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            lat: coordinates.lat,
            lng: coordinates.lng,
            published_at: Utc::now(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// The catalog description of this record's event type, if any.
    pub fn description(&self) -> Option<&'static str> {
        describe_event_type(&self.event_type)
    }

    /// Build the narration request for this record.
    pub fn alert_request(&self, affected_distance_km: f64) -> AlertRequest {
        AlertRequest {
            event_type: self.event_type.clone(),
            description: self.description().unwrap_or(NO_DESCRIPTION).to_string(),
            city: self.city.clone(),
            affected_distance_km,
        }
    }
}

/// The facts handed to a narrator to produce alert text.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub event_type: String,
    pub description: String,
    pub city: String,
    /// Radius the listener is inside of, quoted in the alert.
    pub affected_distance_km: f64,
}
