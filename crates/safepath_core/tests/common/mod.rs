#![allow(dead_code)]

use safepath_core::{GeoPoint, Route, SegmentMetric, distance_to_segment};

pub fn route(points: &[(f64, f64)]) -> Route {
    points.iter().copied().map(GeoPoint::from).collect()
}

/// Brute-force minimum over all segments, independent of `nearest_segment`.
pub fn min_segment_distance(route: &Route, p: GeoPoint, metric: SegmentMetric) -> Option<f64> {
    route
        .points
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1], metric))
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))))
}

pub fn all_metrics() -> Vec<SegmentMetric> {
    use safepath_core::{DistanceModel, Projection};
    let mut out = Vec::new();
    for distance in [DistanceModel::Haversine, DistanceModel::Equirectangular] {
        for projection in [Projection::Degrees, Projection::Equirectangular] {
            out.push(SegmentMetric {
                distance,
                projection,
            });
        }
    }
    out
}
