//! Route proximity check.
//!
//! A point is "on route" when at least one segment of the polyline lies
//! strictly closer than the tolerance. The check is a pure function of
//! its inputs and never fails: routes with fewer than two points simply
//! have no segment to be near.

use crate::geo::{ClosestPoint, GeoPoint, SegmentMetric, closest_point_on_segment};
use crate::route::Route;
use serde::{Deserialize, Serialize};

/// Corridor half-width used by the caregiver screen, in meters.
pub const DEFAULT_TOLERANCE_M: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityOptions {
    pub tolerance_m: f64,
    pub metric: SegmentMetric,
}

impl Default for ProximityOptions {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            metric: SegmentMetric::default(),
        }
    }
}

impl ProximityOptions {
    pub fn with_tolerance(tolerance_m: f64) -> Self {
        Self {
            tolerance_m,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Index of the segment, i.e. `route.points[index]..route.points[index + 1]`.
    pub segment_index: usize,
    pub closest: ClosestPoint,
}

/// Short-circuits on the first segment closer than `tolerance_m`.
pub fn is_on_route(
    route: &Route,
    point: GeoPoint,
    tolerance_m: f64,
    metric: SegmentMetric,
) -> bool {
    if !route.is_available() {
        return false;
    }

    route
        .segments()
        .any(|(a, b)| closest_point_on_segment(point, a, b, metric).dist < tolerance_m)
}

/// Segment with the smallest distance to `point`. Ties keep the earliest segment.
pub fn nearest_segment(
    route: &Route,
    point: GeoPoint,
    metric: SegmentMetric,
) -> Option<SegmentHit> {
    let mut best: Option<SegmentHit> = None;

    for (segment_index, (a, b)) in route.segments().enumerate() {
        let closest = closest_point_on_segment(point, a, b, metric);

        best = match best {
            Some(prev) if prev.closest.dist <= closest.dist => Some(prev),
            _ => Some(SegmentHit {
                segment_index,
                closest,
            }),
        };
    }

    best
}
