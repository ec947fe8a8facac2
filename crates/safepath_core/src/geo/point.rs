use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Range is not enforced here: any finite pair is usable by the
/// distance functions. Input layers validate ranges before building one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// True when both coordinates sit in the usual WGS84 ranges.
    pub fn in_range(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Linear interpolation in lat/lng space, `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint::new(
            self.lat + t * (other.lat - self.lat),
            self.lng + t * (other.lng - self.lng),
        )
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(12.0, 16.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(11.0, 18.0));
    }

    #[test]
    fn range_check_rejects_out_of_bounds_and_nan() {
        assert!(GeoPoint::new(-90.0, 180.0).in_range());
        assert!(!GeoPoint::new(90.5, 0.0).in_range());
        assert!(!GeoPoint::new(0.0, -180.1).in_range());
        assert!(!GeoPoint::new(f64::NAN, 0.0).in_range());
    }

    #[test]
    fn serializes_with_lat_lng_keys() {
        let json = serde_json::to_string(&GeoPoint::new(34.0522, -118.2437)).unwrap();
        assert_eq!(json, r#"{"lat":34.0522,"lng":-118.2437}"#);
    }
}
