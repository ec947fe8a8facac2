//! Client for an OSRM-compatible routing service.
//!
//! Only the fields needed to rebuild the polyline are deserialized:
//! `code`, and for each route the GeoJSON geometry plus distance/duration.

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::formats::route_file::geojson_positions;
use crate::geo::GeoPoint;
use crate::providers::RouteProvider;
use crate::route::Route;

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_OSRM_PROFILE: &str = "driving";

#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: serde_json::Value,

    // meters / seconds, as reported by the service
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

pub struct OsrmProvider {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmProvider {
    pub fn new(base_url: &str, profile: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("safepath/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            profile: profile.to_string(),
        })
    }

    pub fn route_url(&self, from: GeoPoint, to: GeoPoint) -> String {
        // OSRM wants lng,lat
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, from.lng, from.lat, to.lng, to.lat
        )
    }
}

impl RouteProvider for OsrmProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route> {
        let url = self.route_url(from, to);
        log::debug!("requesting route: {url}");

        let resp: OsrmResponse = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .context("Failed to reach routing service")?
            .error_for_status()
            .context("Routing request returned error status")?
            .json()
            .context("Failed to parse routing response JSON")?;

        route_from_response(resp)
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

/// First route of the response as a polyline.
pub fn route_from_response(resp: OsrmResponse) -> Result<Route> {
    if !resp.code.eq_ignore_ascii_case("ok") {
        bail!(
            "Routing service answered {}: {}",
            resp.code,
            resp.message.as_deref().unwrap_or("no message")
        );
    }

    let Some(first) = resp.routes.into_iter().next() else {
        bail!("Routing service returned no routes");
    };

    let points = geojson_positions(first.geometry.get("coordinates"))
        .context("Unexpected route geometry (request geometries=geojson)")?;

    log::debug!(
        "routing service returned {} points ({:.0} m, {:.0} s)",
        points.len(),
        first.distance.unwrap_or(f64::NAN),
        first.duration.unwrap_or(f64::NAN)
    );

    Ok(Route::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> OsrmResponse {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn builds_lng_lat_url() {
        let p = OsrmProvider::new("http://localhost:5000/", "foot", Duration::from_secs(1)).unwrap();
        let url = p.route_url(GeoPoint::new(34.05, -118.24), GeoPoint::new(34.06, -118.25));
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/foot/-118.24,34.05;-118.25,34.06"
        );
    }

    #[test]
    fn takes_first_route_geometry() {
        let resp = parse(
            r#"{
                "code": "Ok",
                "routes": [
                    { "geometry": { "type": "LineString", "coordinates": [[-118.24, 34.05], [-118.245, 34.055]] },
                      "distance": 712.4, "duration": 95.1 },
                    { "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] } }
                ],
                "waypoints": []
            }"#,
        );
        let route = route_from_response(resp).unwrap();
        assert_eq!(
            route.points,
            vec![GeoPoint::new(34.05, -118.24), GeoPoint::new(34.055, -118.245)]
        );
    }

    #[test]
    fn error_code_is_reported() {
        let resp = parse(r#"{ "code": "NoRoute", "message": "Impossible route between points" }"#);
        let err = route_from_response(resp).unwrap_err();
        assert!(err.to_string().contains("NoRoute"));
    }

    #[test]
    fn empty_routes_is_an_error() {
        let resp = parse(r#"{ "code": "Ok", "routes": [] }"#);
        assert!(route_from_response(resp).is_err());
    }

    #[test]
    fn encoded_polyline_geometry_is_rejected() {
        let resp = parse(r#"{ "code": "Ok", "routes": [ { "geometry": "_p~iF~ps|U_ulLnnqC" } ] }"#);
        assert!(route_from_response(resp).is_err());
    }
}
