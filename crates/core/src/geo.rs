//! Coordinates and the bounding box used for "cats near me".

use serde::{Deserialize, Serialize};

/// Kilometres per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Default search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Errors for out-of-range coordinates.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("latitude must be between -90 and 90, got {0}")]
    Latitude(f64),
    #[error("longitude must be between -180 and 180, got {0}")]
    Longitude(f64),
    #[error("radius must be positive, got {0}")]
    Radius(f64),
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns [`GeoError`] if either value is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Approximate box of `radius_km` around `center`.
    ///
    /// Longitude degrees shrink with `cos(latitude)`, so the box widens
    /// towards the poles.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Radius`] if the radius is not positive.
    pub fn around(center: Coordinates, radius_km: f64) -> Result<Self, GeoError> {
        if radius_km.is_nan() || radius_km <= 0.0 {
            return Err(GeoError::Radius(radius_km));
        }
        let lat_delta = radius_km / KM_PER_DEGREE;
        let lon_delta = radius_km / (KM_PER_DEGREE * center.latitude.to_radians().cos());
        Ok(Self {
            min_lat: center.latitude - lat_delta,
            max_lat: center.latitude + lat_delta,
            min_lon: center.longitude - lon_delta,
            max_lon: center.longitude + lon_delta,
        })
    }

    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Coordinates::new(91.0, 0.0), Err(GeoError::Latitude(91.0)));
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(GeoError::Longitude(-180.5))
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_box_at_equator() {
        let b = BoundingBox::around(Coordinates::new(0.0, 0.0).unwrap(), 111.0).unwrap();
        assert!((b.max_lat - 1.0).abs() < 1e-9);
        assert!((b.max_lon - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_widens_with_latitude() {
        let dresden = Coordinates::new(51.0504, 13.7373).unwrap();
        let b = BoundingBox::around(dresden, DEFAULT_RADIUS_KM).unwrap();
        let lat_span = b.max_lat - b.min_lat;
        let lon_span = b.max_lon - b.min_lon;
        assert!(lon_span > lat_span);
        assert!(b.contains(Coordinates::new(51.06, 13.75).unwrap()));
        assert!(!b.contains(Coordinates::new(51.3, 13.75).unwrap()));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let c = Coordinates::new(0.0, 0.0).unwrap();
        assert!(BoundingBox::around(c, 0.0).is_err());
        assert!(BoundingBox::around(c, -5.0).is_err());
    }
}
