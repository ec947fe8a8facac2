use anyhow::{Result, bail};

use super::args::RouterKind;

pub const TIP_NEGATIVE_COORDS: &str = "Note: for negative coordinates, use the '=' form, e.g.:\n  check --route route.csv --lat=-33.9 --lng=151.2";

pub fn validate_point(lat: f64, lng: f64, ctx: &str) -> Result<()> {
    if !lat.is_finite() || !lng.is_finite() {
        bail!("Invalid coordinates for {ctx}: ({lat}, {lng}) must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&lat) {
        bail!("Invalid latitude for {ctx}: {lat} (must be within -90..90)\n\n{TIP_NEGATIVE_COORDS}");
    }
    if !(-180.0..=180.0).contains(&lng) {
        bail!("Invalid longitude for {ctx}: {lng} (must be within -180..180)\n\n{TIP_NEGATIVE_COORDS}");
    }
    Ok(())
}

pub fn validate_router(router: RouterKind, route: Option<&str>) -> Result<()> {
    match (router, route) {
        (RouterKind::File, None) => bail!("--router file requires --route <FILE>"),
        (RouterKind::File, Some(r)) if r.trim().is_empty() => {
            bail!("--route must be a non-empty path")
        }
        (RouterKind::Osrm | RouterKind::Direct, Some(_)) => {
            bail!("--route is only used with --router file")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ranges() {
        assert!(validate_point(34.05, -118.24, "x").is_ok());
        assert!(validate_point(90.0, 180.0, "x").is_ok());
        assert!(validate_point(90.5, 0.0, "x").is_err());
        assert!(validate_point(0.0, -181.0, "x").is_err());
        assert!(validate_point(f64::NAN, 0.0, "x").is_err());
    }

    #[test]
    fn file_router_needs_a_path() {
        assert!(validate_router(RouterKind::File, None).is_err());
        assert!(validate_router(RouterKind::File, Some("r.csv")).is_ok());
        assert!(validate_router(RouterKind::Direct, Some("r.csv")).is_err());
        assert!(validate_router(RouterKind::Osrm, None).is_ok());
    }
}
