mod common;

use crate::common::{all_metrics, min_segment_distance, route};
use safepath_core::geo::{closest_point_on_segment, ground_distance};
use safepath_core::{GeoPoint, Route, distance_to_segment, is_on_route};

fn sample_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.3, -0.2),
        GeoPoint::new(-1.0, 2.5),
        GeoPoint::new(45.0, 7.0),
        GeoPoint::new(45.0005, 7.0003),
        GeoPoint::new(-33.9, 151.2),
        GeoPoint::new(89.0, -179.0),
    ]
}

#[test]
fn short_routes_are_never_on_route() {
    for metric in all_metrics() {
        for p in sample_points() {
            for r in [Route::empty(), Route::new(vec![p])] {
                assert!(!is_on_route(&r, p, f64::MAX, metric));
            }
        }
    }
}

#[test]
fn degenerate_segment_equals_ground_distance() {
    for metric in all_metrics() {
        for s in sample_points() {
            for p in sample_points() {
                let d = distance_to_segment(p, s, s, metric);
                assert_eq!(d, ground_distance(p, s, metric.distance));
            }
        }
    }
}

#[test]
fn interior_points_are_at_zero_distance() {
    let segments = [
        (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)),
        (GeoPoint::new(45.0, 7.0), GeoPoint::new(45.01, 7.02)),
        (GeoPoint::new(-33.9, 151.2), GeoPoint::new(-33.8, 151.1)),
    ];

    for metric in all_metrics() {
        for (a, b) in segments {
            for t in [0.1, 0.25, 0.5, 0.9] {
                let p = a.lerp(b, t);
                let d = distance_to_segment(p, a, b, metric);
                assert!(d < 1e-6, "interior point at t={t} measured {d} m");
            }
        }
    }
}

#[test]
fn clamped_projection_measures_to_the_endpoint() {
    let a = GeoPoint::new(10.0, 10.0);
    let b = GeoPoint::new(10.0, 10.01);

    for metric in all_metrics() {
        // beyond the start, along the segment's direction
        let before = GeoPoint::new(10.0002, 9.995);
        let cp = closest_point_on_segment(before, a, b, metric);
        assert_eq!(cp.t, 0.0);
        assert_eq!(cp.dist, ground_distance(before, a, metric.distance));
        assert!(cp.dist < ground_distance(before, b, metric.distance));

        // beyond the end
        let after = GeoPoint::new(9.9998, 10.02);
        let cp = closest_point_on_segment(after, a, b, metric);
        assert_eq!(cp.t, 1.0);
        assert_eq!(cp.dist, ground_distance(after, b, metric.distance));
        assert!(cp.dist < ground_distance(after, a, metric.distance));
    }
}

#[test]
fn distances_are_finite_and_non_negative() {
    for metric in all_metrics() {
        for a in sample_points() {
            for b in sample_points() {
                for p in sample_points() {
                    let d = distance_to_segment(p, a, b, metric);
                    assert!(d.is_finite() && d >= 0.0);
                }
            }
        }
    }
}

#[test]
fn on_route_iff_minimum_distance_below_tolerance() {
    let routes = [
        route(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.02)]),
        route(&[(45.0, 7.0), (45.001, 7.001), (45.001, 7.003)]),
        route(&[(1.0, 1.0), (1.0, 1.0), (1.001, 1.0)]),
    ];
    let probes = [
        GeoPoint::new(0.0001, 0.005),
        GeoPoint::new(0.005, 0.0098),
        GeoPoint::new(0.02, 0.03),
        GeoPoint::new(45.0006, 7.0004),
        GeoPoint::new(45.002, 7.002),
        GeoPoint::new(1.0, 1.0003),
    ];
    let tolerances = [1.0, 10.0, 30.0, 50.0, 100.0, 500.0, 5_000.0];

    for metric in all_metrics() {
        for r in &routes {
            for p in probes {
                let min = min_segment_distance(r, p, metric).unwrap();
                for tol in tolerances {
                    assert_eq!(
                        is_on_route(r, p, tol, metric),
                        min < tol,
                        "route={:?} p={p} tol={tol} min={min}",
                        r.points
                    );
                }
                // the boundary itself is outside
                assert!(!is_on_route(r, p, min, metric));
            }
        }
    }
}
