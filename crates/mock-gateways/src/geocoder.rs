//! Table-driven geocoder.

use std::collections::HashMap;
use std::sync::Mutex;

use alert_core::{async_trait, Coordinates, GatewayError, Geocoder};

/// A geocoder that resolves cities from a fixed table.
///
/// Lookups are case-insensitive on the city name only; state and country are
/// recorded but ignored.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
    unavailable: bool,
    queries: Mutex<Vec<(String, String, String)>>,
}

impl StaticGeocoder {
    /// Create a geocoder that knows no places.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known place.
    pub fn with_place(mut self, city: &str, coordinates: Coordinates) -> Self {
        self.places.insert(city.to_lowercase(), coordinates);
        self
    }

    /// Create a geocoder whose backend is down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Every `(city, state, country)` this geocoder was asked about.
    pub fn queries(&self) -> Vec<(String, String, String)> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queries().len()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(
        &self,
        city: &str,
        state: &str,
        country: &str,
    ) -> Result<Option<Coordinates>, GatewayError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((city.to_string(), state.to_string(), country.to_string()));
        }

        if self.unavailable {
            return Err(GatewayError::Unavailable("mock geocoder is down".to_string()));
        }

        Ok(self.places.get(&city.to_lowercase()).copied())
    }

    fn name(&self) -> &str {
        "StaticGeocoder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_and_unknown_places() {
        let geocoder = StaticGeocoder::new().with_place("Tokyo", Coordinates::new(35.68, 139.69));

        let found = geocoder.geocode("tokyo", "", "Japan").await.unwrap();
        assert_eq!(found, Some(Coordinates::new(35.68, 139.69)));

        let missing = geocoder.geocode("Atlantis", "", "").await.unwrap();
        assert_eq!(missing, None);

        assert_eq!(geocoder.call_count(), 2);
        assert_eq!(geocoder.queries()[0].2, "Japan");
    }

    #[tokio::test]
    async fn test_unavailable() {
        let geocoder = StaticGeocoder::unavailable();
        assert!(geocoder.geocode("Tokyo", "", "").await.is_err());
        assert_eq!(geocoder.call_count(), 1);
    }
}
