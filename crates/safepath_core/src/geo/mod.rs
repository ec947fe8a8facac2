//! Geographic primitives: points, ground distances and point-to-segment
//! measurement.

pub mod distance;
pub mod point;
pub mod segment;

pub use distance::{DistanceModel, EARTH_RADIUS_M, ground_distance};
pub use point::GeoPoint;
pub use segment::{
    ClosestPoint, Projection, SegmentMetric, closest_point_on_segment, distance_to_segment,
};
