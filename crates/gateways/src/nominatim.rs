//! Geocoding via OpenStreetMap Nominatim.

use std::env;

use alert_core::{async_trait, Coordinates, GatewayError, Geocoder};
use tracing::{debug, warn};

use crate::api_types::NominatimPlace;
use crate::{http_client, transport_error};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "geoapi";

/// Resolves place names with the Nominatim search API.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a geocoder against `base_url`, identifying as `user_agent`.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(Some(user_agent))?,
            base_url: base_url.into(),
        })
    }

    /// Build from environment variables.
    ///
    /// Optional env vars:
    /// - `NOMINATIM_URL` (default: https://nominatim.openstreetmap.org)
    /// - `GEOCODER_USER_AGENT` (default: geoapi)
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string());
        let user_agent =
            env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        Self::new(base_url, &user_agent)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(
        &self,
        city: &str,
        state: &str,
        country: &str,
    ) -> Result<Option<Coordinates>, GatewayError> {
        let query = search_query(city, state, country);
        if query.is_empty() {
            return Ok(None);
        }

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        debug!("Geocoding '{}' via {}", query, url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(GatewayError::Unavailable(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| {
                GatewayError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;

        let Some(place) = places.into_iter().next() else {
            debug!("No geocoding match for '{}'", query);
            return Ok(None);
        };

        match parse_place(&place) {
            Some(coordinates) => Ok(Some(coordinates)),
            None => {
                warn!("Nominatim returned unparseable coordinates: {:?}", place);
                Err(GatewayError::InvalidResponse(format!(
                    "unparseable coordinates: {}, {}",
                    place.lat, place.lon
                )))
            }
        }
    }

    fn name(&self) -> &str {
        "Nominatim"
    }
}

/// Join the non-empty location parts into a free-form search query.
fn search_query(city: &str, state: &str, country: &str) -> String {
    [city, state, country]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_place(place: &NominatimPlace) -> Option<Coordinates> {
    let lat = place.lat.trim().parse().ok()?;
    let lng = place.lon.trim().parse().ok()?;
    Some(Coordinates::new(lat, lng))
}
