//! Ground (metric) distance between two geographic points.
//!
//! Two models are available:
//! - `Haversine`: great-circle distance on a sphere. This is the default
//!   and matches what web map libraries report for `distanceTo`.
//! - `Equirectangular`: flat-earth approximation around the mean
//!   latitude. Cheaper, and within centimetres of haversine at the scale
//!   of a walk or a drive across town.

use crate::geo::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceModel {
    #[default]
    Haversine,
    Equirectangular,
}

impl DistanceModel {
    /// Case-insensitive parsing, accepts a few common spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "haversine" | "great-circle" | "gc" => Some(Self::Haversine),
            "equirectangular" | "equirect" | "flat" => Some(Self::Equirectangular),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceModel::Haversine => "haversine",
            DistanceModel::Equirectangular => "equirectangular",
        }
    }
}

impl std::fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn ground_distance(a: GeoPoint, b: GeoPoint, model: DistanceModel) -> f64 {
    match model {
        DistanceModel::Haversine => haversine(a, b),
        DistanceModel::Equirectangular => equirectangular(a, b),
    }
}

pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let sin_phi = (d_phi / 2.0).sin();
    let sin_lambda = (d_lambda / 2.0).sin();
    let h = sin_phi * sin_phi + phi1.cos() * phi2.cos() * sin_lambda * sin_lambda;

    // rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

pub fn equirectangular(a: GeoPoint, b: GeoPoint) -> f64 {
    let mean_phi = ((a.lat + b.lat) / 2.0).to_radians();
    let x = (b.lng - a.lng).to_radians() * mean_phi.cos();
    let y = (b.lat - a.lat).to_radians();
    EARTH_RADIUS_M * (x * x + y * y).sqrt()
}
