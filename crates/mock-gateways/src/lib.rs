//! Mock gateway implementations for the alert pipeline.
//!
//! This crate provides deterministic stand-ins for every external capability:
//! - `StaticGeocoder` - Resolves from a fixed table of places
//! - `FixedLocator` - Always reports the same location
//! - `ScriptedNarrator` - Renders a predictable one-line alert
//! - `FileSynthesizer` - Writes the alert text to an "audio" file
//! - `RecordingPlayer` - Records what it was asked to play
//!
//! Each double records its calls so tests can assert on exactly what the
//! pipeline did, and each can be switched into a failing mode.
//!
//! # Example
//!
//! ```rust
//! use mock_gateways::{Coordinates, FixedLocator, Locator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let locator = FixedLocator::new(Coordinates::new(35.68, 139.69));
//!     let here = locator.current_location().await.unwrap();
//!     assert_eq!(here.lat, 35.68);
//!     assert_eq!(locator.call_count(), 1);
//! }
//! ```

mod geocoder;
mod locator;
mod narrator;
mod player;
mod synthesizer;

// Re-export alert-core types for convenience
pub use alert_core::{
    async_trait, AlertRequest, Coordinates, GatewayError, Geocoder, Locator, Narrator, Player,
    Synthesizer,
};

pub use geocoder::StaticGeocoder;
pub use locator::FixedLocator;
pub use narrator::ScriptedNarrator;
pub use player::RecordingPlayer;
pub use synthesizer::{FileSynthesizer, MOCK_AUDIO_FILE_NAME};
