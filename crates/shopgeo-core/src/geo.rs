//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geohash length used when nothing else is configured. Cells are roughly
/// 39 km × 19.5 km at the equator.
pub const DEFAULT_GEOHASH_PRECISION: usize = 4;

/// Longest geohash that still fits in 64 interleaved bits.
pub const MAX_GEOHASH_PRECISION: usize = 12;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Checks that latitude is in `[-90, 90]` and longitude in `[-180, 180]`.
    ///
    /// The index never calls this; it is offered to the layers that accept
    /// coordinates from outside.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidQuery`] naming the offending component.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoreError::InvalidQuery(format!(
                "latitude {} is outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(CoreError::InvalidQuery(format!(
                "longitude {} is outside [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between `a` and `b` in kilometers on a sphere of
/// radius [`EARTH_RADIUS_KM`].
///
/// NaN or infinite inputs propagate into the result.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCKHOLM: Coordinate = Coordinate::new(59.3293, 18.0686);
    const GOTHENBURG: Coordinate = Coordinate::new(57.7089, 11.9746);

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(STOCKHOLM, STOCKHOLM), 0.0);
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(haversine_km(origin, origin), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (STOCKHOLM, GOTHENBURG),
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)),
            (Coordinate::new(-33.8688, 151.2093), Coordinate::new(51.5074, -0.1278)),
            (Coordinate::new(10.0, 179.9), Coordinate::new(10.0, -179.9)),
        ];
        for (a, b) in pairs {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
        }
    }

    #[test]
    fn stockholm_to_gothenburg_is_about_398_km() {
        let d = haversine_km(STOCKHOLM, GOTHENBURG);
        assert!((d - 398.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn hundredth_of_a_degree_at_equator_is_about_1_1_km() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01));
        assert!((d - 1.112).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodes_are_half_the_circumference_apart() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn distance_across_antimeridian_is_short() {
        let d = haversine_km(Coordinate::new(0.0, 179.95), Coordinate::new(0.0, -179.95));
        assert!(d < 12.0, "got {d}");
    }

    #[test]
    fn nan_input_propagates() {
        let d = haversine_km(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn validate_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_latitude() {
        let err = Coordinate::new(91.0, 0.0).validate().unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn validate_rejects_nan_longitude() {
        let err = Coordinate::new(0.0, f64::NAN).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuery(_)));
    }
}
