use safepath_core::{GeoPoint, RouteStatus, StatusReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CheckExport {
    pub route: RouteMeta,
    pub point: GeoPoint,
    pub distance_model: String,
    pub projection: String,
    pub report: StatusReport,
}

#[derive(Debug, Serialize)]
pub struct RouteMeta {
    pub source: String,
    pub points: usize,
    pub length_m: f64,
}

#[derive(Debug, Serialize)]
pub struct ReplayExport {
    pub route: RouteMeta,
    pub tolerance_m: f64,
    pub rows: Vec<ReplayRow>,
    pub summary: ReplaySummary,
}

#[derive(Debug, Serialize)]
pub struct ReplayRow {
    pub idx: usize,
    pub timestamp: Option<String>,
    pub point: GeoPoint,
    pub status: RouteStatus,
    pub distance_m: Option<f64>,
    pub segment_index: Option<usize>,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    Strayed,
    BackOnRoute,
}

#[derive(Debug, Default, Serialize)]
pub struct ReplaySummary {
    pub total: usize,
    pub on_route: usize,
    pub off_route: usize,
    pub unknown: usize,
    pub strayed: usize,
    pub max_distance_m: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SessionExport {
    pub home: GeoPoint,
    pub destination: Option<GeoPoint>,
    pub current: Option<GeoPoint>,
    pub router: String,
    pub route_points: Option<usize>,
    pub report: StatusReport,
}
