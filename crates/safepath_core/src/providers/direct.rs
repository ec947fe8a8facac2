use anyhow::Result;

use crate::geo::GeoPoint;
use crate::providers::RouteProvider;
use crate::route::Route;

/// Straight line between the endpoints. Used when no routing service is
/// reachable or wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectProvider;

impl RouteProvider for DirectProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route> {
        Ok(Route::new(vec![from, to]))
    }

    fn name(&self) -> &str {
        "direct"
    }
}
