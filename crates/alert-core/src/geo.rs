//! Geographic points, great-circle distance and the relevance filter.

use serde::{Deserialize, Serialize};

/// Default radius, in kilometers, within which an event is announced.
pub const DEFAULT_AFFECTED_DISTANCE_KM: f64 = 200.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        great_circle_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn great_circle_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1.0 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Whether an event `distance_km` away is close enough to announce.
///
/// The boundary is exclusive: an event exactly `threshold_km` away is not
/// relevant.
pub fn is_relevant(distance_km: f64, threshold_km: f64) -> bool {
    distance_km < threshold_km
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_zero_distance() {
        let tokyo = Coordinates::new(35.68, 139.69);
        assert_eq!(tokyo.distance_km(&tokyo), 0.0);
    }

    #[test]
    fn test_one_degree_on_equator() {
        // 2πR / 360
        assert_close(great_circle_km(0.0, 0.0, 0.0, 1.0), 111.195, 0.01);
    }

    #[test]
    fn test_known_city_pair() {
        let tokyo = Coordinates::new(35.68, 139.69);
        let osaka = Coordinates::new(34.69, 135.50);
        assert_close(tokyo.distance_km(&osaka), 397.0, 5.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(37.77, -122.42);
        let b = Coordinates::new(34.05, -118.24);
        assert_close(a.distance_km(&b), b.distance_km(&a), 1e-9);
    }

    #[test]
    fn test_antipodal_points() {
        let d = great_circle_km(0.0, 0.0, 0.0, 180.0);
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_KM, 0.001);
    }

    #[test]
    fn test_relevance_boundary_is_exclusive() {
        assert!(is_relevant(50.0, 200.0));
        assert!(is_relevant(199.999, 200.0));
        assert!(!is_relevant(200.0, 200.0));
        assert!(!is_relevant(250.0, 200.0));
    }
}
