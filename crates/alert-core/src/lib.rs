//! Core types and gateway traits for disaster alert distribution.
//!
//! This crate provides the shared vocabulary for the publisher and the
//! subscriber. It defines:
//!
//! - [`EventRecord`] - A geocoded disaster event as it moves through the queue
//! - [`EventType`] - The fixed catalog of event codes and their descriptions
//! - [`Coordinates`] / [`great_circle_km`] - Geographic points and distance
//! - [`is_relevant`] - The distance-threshold relevance filter
//! - [`Geocoder`], [`Locator`], [`Narrator`], [`Synthesizer`], [`Player`] -
//!   Traits for the external capabilities the pipeline depends on
//! - [`GatewayError`] - Error type shared by all gateway implementations
//!
//! # Example
//!
//! ```rust
//! use alert_core::{is_relevant, Coordinates, EventRecord, DEFAULT_AFFECTED_DISTANCE_KM};
//!
//! let record = EventRecord::new("EQ", "Tokyo", "", "Japan", Coordinates::new(35.68, 139.69));
//! let here = Coordinates::new(35.45, 139.64);
//!
//! let distance = record.coordinates().distance_km(&here);
//! assert!(is_relevant(distance, DEFAULT_AFFECTED_DISTANCE_KM));
//! assert_eq!(
//!     record.description(),
//!     Some("Sudden ground shaking from tectonic movements or volcanic activity.")
//! );
//! ```

mod error;
mod event;
mod event_type;
mod gateway;
mod geo;

pub use error::GatewayError;
pub use event::{AlertRequest, EventRecord, NO_DESCRIPTION};
pub use event_type::{describe_event_type, EventType};
pub use gateway::{Geocoder, Locator, Narrator, Player, Synthesizer};
pub use geo::{great_circle_km, is_relevant, Coordinates, DEFAULT_AFFECTED_DISTANCE_KM};

// Re-export async_trait for gateway implementors
pub use async_trait::async_trait;
