use crate::geo::{DistanceModel, GeoPoint, ground_distance};
use serde::{Deserialize, Serialize};

/// An ordered polyline produced by a routing service.
///
/// Fewer than two points means no route is available; such a value is
/// still a valid `Route` and every check treats it as "nothing to be on".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<GeoPoint>,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn start(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    /// Consecutive `(start, end)` pairs. Empty for routes with fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn length_m(&self, model: DistanceModel) -> f64 {
        self.segments()
            .map(|(a, b)| ground_distance(a, b, model))
            .sum()
    }
}

impl From<Vec<GeoPoint>> for Route {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Route {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
