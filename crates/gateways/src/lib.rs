//! Production adapters for the alert pipeline's external capabilities.
//!
//! | Capability | Adapter | Backend |
//! |------------|---------|---------|
//! | Geocoding | [`NominatimGeocoder`] | OpenStreetMap Nominatim search API |
//! | Location | [`IpInfoLocator`] | ipinfo.io IP geolocation |
//! | Narration | [`OpenAiNarrator`] | OpenAI-compatible chat completions |
//! | Narration | [`TemplateNarrator`] | Local text template, no network |
//! | Speech | [`OpenAiSpeech`] | OpenAI-compatible audio speech endpoint |
//! | Playback | [`CommandPlayer`] | External player process (ffplay by default) |
//!
//! Every adapter implements the matching trait from `alert-core`, so services
//! hold them as `Arc<dyn Trait>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateways::{IpInfoLocator, Locator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let locator = IpInfoLocator::from_env()?;
//!     let here = locator.current_location().await?;
//!     println!("Listening from {:.2}, {:.2}", here.lat, here.lng);
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod ipinfo;
mod nominatim;
mod openai;
mod player;
mod template;

pub use config::OpenAiConfig;
pub use ipinfo::{IpInfoLocator, DEFAULT_IPINFO_URL};
pub use nominatim::{NominatimGeocoder, DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT};
pub use openai::{narration_prompt, OpenAiNarrator, OpenAiSpeech, AUDIO_FILE_NAME};
pub use player::{CommandPlayer, DEFAULT_PLAYER_COMMAND};
pub use template::TemplateNarrator;

// Re-export alert-core gateway types for convenience
pub use alert_core::{
    async_trait, AlertRequest, Coordinates, GatewayError, Geocoder, Locator, Narrator, Player,
    Synthesizer,
};

use std::time::Duration;

/// Timeout applied to every HTTP request made by the adapters.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client(user_agent: Option<&str>) -> Result<reqwest::Client, GatewayError> {
    let mut builder = reqwest::Client::builder().timeout(HTTP_TIMEOUT);
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent);
    }
    builder
        .build()
        .map_err(|e| GatewayError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

pub(crate) fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Unavailable(e.to_string())
    }
}
