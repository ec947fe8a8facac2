//! Capabilities the tracking session depends on, injected as traits:
//! where routes come from and where the current location comes from.

pub mod direct;
pub mod file;
pub mod location;
pub mod osrm;

use anyhow::Result;

use crate::geo::GeoPoint;
use crate::route::Route;

pub use direct::DirectProvider;
pub use file::FileRouteProvider;
pub use location::{FixedLocation, TrackReplay};
pub use osrm::OsrmProvider;

/// Computes the polyline between two endpoints.
pub trait RouteProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route>;

    /// Short label for logs and reports.
    fn name(&self) -> &str;
}

/// Reports where the tracked person currently is.
///
/// `Ok(None)` means no fix is available right now (not an error).
pub trait LocationSource {
    fn current(&mut self) -> Result<Option<GeoPoint>>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for Box<P> {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route> {
        (**self).route(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
