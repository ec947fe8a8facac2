//! The caregiver's tracking session: home, destination, the tracked
//! person's last known location and the route currently planned between
//! home and destination.
//!
//! Locations survive restarts through a [`KeyValueStore`]; the route does
//! not, it is recomputed from the endpoints whenever they change.

use anyhow::Result;

use crate::geo::GeoPoint;
use crate::providers::{LocationSource, RouteProvider};
use crate::proximity::ProximityOptions;
use crate::route::Route;
use crate::status::{StatusReport, evaluate};
use crate::store::{KeyValueStore, get_json, set_json};

pub const KEY_HOME: &str = "homeLocation";
pub const KEY_DESTINATION: &str = "destinationLocation";
pub const KEY_CURRENT: &str = "currentLocation";

/// Los Angeles City Hall.
pub const DEFAULT_HOME: GeoPoint = GeoPoint {
    lat: 34.0522,
    lng: -118.2437,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSession {
    home: GeoPoint,
    destination: Option<GeoPoint>,
    current: Option<GeoPoint>,
    route: Option<Route>,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self {
            home: DEFAULT_HOME,
            destination: None,
            current: None,
            route: None,
        }
    }
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            home: get_json(store, KEY_HOME)?.unwrap_or(DEFAULT_HOME),
            destination: get_json(store, KEY_DESTINATION)?,
            current: get_json(store, KEY_CURRENT)?,
            route: None,
        })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        set_json(store, KEY_HOME, &self.home)?;
        save_optional(store, KEY_DESTINATION, self.destination)?;
        save_optional(store, KEY_CURRENT, self.current)?;
        Ok(())
    }

    pub fn home(&self) -> GeoPoint {
        self.home
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.destination
    }

    pub fn current(&self) -> Option<GeoPoint> {
        self.current
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn set_home(&mut self, p: GeoPoint) {
        if self.home != p {
            self.home = p;
            self.route = None;
        }
    }

    pub fn set_destination(&mut self, p: GeoPoint) {
        if self.destination != Some(p) {
            self.destination = Some(p);
            self.route = None;
        }
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
        self.route = None;
    }

    pub fn set_current(&mut self, p: GeoPoint) {
        self.current = Some(p);
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Pull the next fix from a location source. A source with no fix
    /// leaves the last known location in place.
    pub fn update_location(
        &mut self,
        source: &mut dyn LocationSource,
    ) -> Result<Option<GeoPoint>> {
        let fix = source.current()?;
        if let Some(p) = fix {
            self.current = Some(p);
        }
        Ok(fix)
    }

    /// Recompute the route when both endpoints are known.
    ///
    /// A provider failure is logged and leaves the session without a
    /// route, which reads as an unknown status downstream.
    pub fn refresh_route(&mut self, provider: &dyn RouteProvider) -> Option<&Route> {
        let Some(destination) = self.destination else {
            self.route = None;
            return None;
        };

        self.route = match provider.route(self.home, destination) {
            Ok(route) => {
                log::debug!(
                    "{} route {} -> {}: {} points",
                    provider.name(),
                    self.home,
                    destination,
                    route.len()
                );
                Some(route)
            }
            Err(err) => {
                log::warn!("{} routing failed: {err:#}", provider.name());
                None
            }
        };

        self.route.as_ref()
    }

    /// Install a route computed elsewhere (e.g. loaded from a file).
    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    /// The badge for the current state: unknown unless there is a
    /// destination, a usable route and a current location.
    pub fn status(&self, opts: &ProximityOptions) -> StatusReport {
        if self.destination.is_none() {
            return StatusReport::unknown(opts.tolerance_m);
        }
        evaluate(self.route.as_ref(), self.current, opts)
    }
}

fn save_optional(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: Option<GeoPoint>,
) -> Result<()> {
    match value {
        Some(p) => set_json(store, key, &p),
        None => store.remove(key),
    }
}
