use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::formats::load_route;
use crate::geo::GeoPoint;
use crate::providers::RouteProvider;
use crate::route::Route;

/// A pre-computed polyline exported from a routing tool.
///
/// The endpoints passed to [`RouteProvider::route`] are not used to pick
/// the file; they are only compared against the polyline ends for a log hint.
#[derive(Debug, Clone)]
pub struct FileRouteProvider {
    path: PathBuf,
}

impl FileRouteProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteProvider for FileRouteProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route> {
        let route = load_route(&self.path)?;

        if route.start() != Some(from) || route.end() != Some(to) {
            log::debug!(
                "route file {} does not start/end at {from} -> {to}",
                self.path.display()
            );
        }

        Ok(route)
    }

    fn name(&self) -> &str {
        "file"
    }
}
