use crate::geo::GeoPoint;
use crate::proximity::{ProximityOptions, SegmentHit, nearest_segment};
use crate::route::Route;
use serde::{Deserialize, Serialize};

/// What the caregiver badge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteStatus {
    /// No usable route, or no current location.
    Unknown,
    OnRoute,
    OffRoute,
}

impl RouteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Unknown => "unknown",
            RouteStatus::OnRoute => "on-route",
            RouteStatus::OffRoute => "off-route",
        }
    }

    /// `None` for [`RouteStatus::Unknown`].
    pub fn as_bool(self) -> Option<bool> {
        match self {
            RouteStatus::Unknown => None,
            RouteStatus::OnRoute => Some(true),
            RouteStatus::OffRoute => Some(false),
        }
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearestInfo {
    pub segment_index: usize,
    pub distance_m: f64,
    pub t: f64,
    pub closest: GeoPoint,
}

impl From<SegmentHit> for NearestInfo {
    fn from(hit: SegmentHit) -> Self {
        Self {
            segment_index: hit.segment_index,
            distance_m: hit.closest.dist,
            t: hit.closest.t,
            closest: hit.closest.q,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: RouteStatus,
    pub tolerance_m: f64,
    pub nearest: Option<NearestInfo>,
}

impl StatusReport {
    pub fn unknown(tolerance_m: f64) -> Self {
        Self {
            status: RouteStatus::Unknown,
            tolerance_m,
            nearest: None,
        }
    }
}

/// Combine route availability, the current point and the proximity check
/// into the tri-state badge.
///
/// A non-finite observation cannot be placed on a map, so it reads as
/// "no current point" rather than a result.
pub fn evaluate(
    route: Option<&Route>,
    point: Option<GeoPoint>,
    opts: &ProximityOptions,
) -> StatusReport {
    let (Some(route), Some(point)) = (route, point) else {
        return StatusReport::unknown(opts.tolerance_m);
    };

    if !route.is_available() || !point.is_finite() {
        return StatusReport::unknown(opts.tolerance_m);
    }

    let Some(hit) = nearest_segment(route, point, opts.metric) else {
        return StatusReport::unknown(opts.tolerance_m);
    };

    let status = if hit.closest.dist < opts.tolerance_m {
        RouteStatus::OnRoute
    } else {
        RouteStatus::OffRoute
    };

    log::debug!(
        "route status {status}: {:.1} m from segment {} (tolerance {} m)",
        hit.closest.dist,
        hit.segment_index,
        opts.tolerance_m
    );

    StatusReport {
        status,
        tolerance_m: opts.tolerance_m,
        nearest: Some(hit.into()),
    }
}

/// Degrade an integration failure to [`RouteStatus::Unknown`].
pub fn evaluate_or_unknown(
    route: anyhow::Result<Option<Route>>,
    point: Option<GeoPoint>,
    opts: &ProximityOptions,
) -> StatusReport {
    match route {
        Ok(route) => evaluate(route.as_ref(), point, opts),
        Err(err) => {
            log::warn!("could not compute route status: {err:#}");
            StatusReport::unknown(opts.tolerance_m)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north_south() -> Route {
        Route::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)])
    }

    #[test]
    fn unknown_without_route_or_point() {
        let opts = ProximityOptions::default();
        let r = north_south();

        let p = Some(GeoPoint::new(0.5, 0.0));
        assert_eq!(evaluate(None, p, &opts).status, RouteStatus::Unknown);
        assert_eq!(evaluate(Some(&r), None, &opts).status, RouteStatus::Unknown);
        assert_eq!(
            evaluate(Some(&Route::empty()), Some(GeoPoint::new(0.0, 0.0)), &opts).status,
            RouteStatus::Unknown
        );
    }

    #[test]
    fn non_finite_point_is_unknown() {
        let opts = ProximityOptions::default();
        let p = Some(GeoPoint::new(f64::NAN, 0.0));
        let report = evaluate(Some(&north_south()), p, &opts);
        assert_eq!(report.status, RouteStatus::Unknown);
        assert!(report.nearest.is_none());
    }

    #[test]
    fn on_and_off_route() {
        let opts = ProximityOptions::default();
        let r = north_south();

        let on = evaluate(Some(&r), Some(GeoPoint::new(0.5, 0.0002)), &opts);
        assert_eq!(on.status, RouteStatus::OnRoute);
        assert_eq!(on.tolerance_m, 50.0);
        assert!(on.nearest.as_ref().unwrap().distance_m < 50.0);

        let off = evaluate(Some(&r), Some(GeoPoint::new(0.5, 0.01)), &opts);
        assert_eq!(off.status, RouteStatus::OffRoute);
        assert!(off.nearest.unwrap().distance_m > 1000.0);
    }

    #[test]
    fn provider_failure_degrades_to_unknown() {
        let opts = ProximityOptions::default();
        let report = evaluate_or_unknown(
            Err(anyhow::anyhow!("routing service unreachable")),
            Some(GeoPoint::new(0.5, 0.0)),
            &opts,
        );
        assert_eq!(report.status, RouteStatus::Unknown);
        assert_eq!(report.tolerance_m, 50.0);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let on = serde_json::to_string(&RouteStatus::OnRoute).unwrap();
        let off = serde_json::to_string(&RouteStatus::OffRoute).unwrap();
        assert_eq!(on, r#""on-route""#);
        assert_eq!(off, r#""off-route""#);
        assert_eq!(RouteStatus::Unknown.as_bool(), None);
    }
}
