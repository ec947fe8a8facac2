//! SafePath core: decides whether a tracked person is still near the
//! route planned for them.
//!
//! The proximity check itself ([`proximity`], [`status`]) is pure and
//! synchronous. Everything with side effects (routing services, location
//! sources, persistence) sits behind the traits in [`providers`] and
//! [`store`], and [`session`] wires them together.

pub mod formats;
pub mod geo;
pub mod providers;
pub mod proximity;
pub mod route;
pub mod session;
pub mod settings;
pub mod status;
pub mod store;

pub use geo::{DistanceModel, GeoPoint, Projection, SegmentMetric, distance_to_segment};
pub use proximity::{DEFAULT_TOLERANCE_M, ProximityOptions, is_on_route, nearest_segment};
pub use route::Route;
pub use session::TrackingSession;
pub use settings::Settings;
pub use status::{RouteStatus, StatusReport, evaluate};
