use crate::geo::distance::{DistanceModel, ground_distance};
use crate::geo::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Planar space used to compute the projection parameter `t`.
///
/// The closest point itself is always interpolated linearly in lat/lng
/// and measured with the configured [`DistanceModel`]; the projection only
/// decides where along the segment that point falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Projection {
    /// Latitude and longitude used directly as Cartesian coordinates.
    #[default]
    Degrees,
    /// Longitude scaled by the cosine of the segment's mean latitude.
    Equirectangular,
}

impl Projection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "degrees" | "deg" | "latlng" | "lat-lng" | "raw" => Some(Self::Degrees),
            "equirectangular" | "equirect" | "scaled" => Some(Self::Equirectangular),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Projection::Degrees => "degrees",
            Projection::Equirectangular => "equirectangular",
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How segment distances are measured: ground distance model plus the
/// planar projection used for the interpolation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentMetric {
    pub distance: DistanceModel,
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Clamped interpolation parameter in `[0, 1]`.
    pub t: f64,
    pub q: GeoPoint,
    /// Ground distance in meters from the query point to `q`.
    pub dist: f64,
}

#[derive(Debug, Clone, Copy)]
struct Planar {
    x: f64,
    y: f64,
}

fn sub(a: Planar, b: Planar) -> Planar {
    Planar {
        x: a.x - b.x,
        y: a.y - b.y,
    }
}

fn dot(a: Planar, b: Planar) -> f64 {
    a.x * b.x + a.y * b.y
}

fn norm2(a: Planar) -> f64 {
    dot(a, a)
}

fn project(p: GeoPoint, projection: Projection, lng_scale: f64) -> Planar {
    match projection {
        Projection::Degrees => Planar { x: p.lng, y: p.lat },
        Projection::Equirectangular => Planar {
            x: p.lng * lng_scale,
            y: p.lat,
        },
    }
}

pub fn closest_point_on_segment(
    p: GeoPoint,
    a: GeoPoint,
    b: GeoPoint,
    metric: SegmentMetric,
) -> ClosestPoint {
    let lng_scale = ((a.lat + b.lat) / 2.0).to_radians().cos();

    let pa = project(a, metric.projection, lng_scale);
    let pb = project(b, metric.projection, lng_scale);
    let pp = project(p, metric.projection, lng_scale);

    let ab = sub(pb, pa);
    let ap = sub(pp, pa);
    let ab2 = norm2(ab);

    // degenerate segment: measure against the start point
    if ab2 == 0.0 {
        return ClosestPoint {
            t: 0.0,
            q: a,
            dist: ground_distance(p, a, metric.distance),
        };
    }

    let t = (dot(ap, ab) / ab2).clamp(0.0, 1.0);

    // land exactly on the endpoints so clamped results match endpoint distances
    let q = if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a.lerp(b, t)
    };

    ClosestPoint {
        t,
        q,
        dist: ground_distance(p, q, metric.distance),
    }
}

/// Distance in meters from `p` to the segment `[a, b]`.
pub fn distance_to_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint, metric: SegmentMetric) -> f64 {
    closest_point_on_segment(p, a, b, metric).dist
}
