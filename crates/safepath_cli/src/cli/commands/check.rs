use anyhow::Result;
use safepath_core::formats::load_route;
use safepath_core::status::evaluate_or_unknown;
use safepath_core::{GeoPoint, ProximityOptions};
use std::path::Path;

use crate::cli::export::{CheckExport, RouteMeta};
use crate::cli::format::meters;
use crate::ui::{info, warning};

pub fn run(route_path: &str, lat: f64, lng: f64, opts: &ProximityOptions, json: bool) -> Result<()> {
    let point = GeoPoint::new(lat, lng);
    let loaded = load_route(Path::new(route_path));

    let meta = loaded.as_ref().ok().map(|r| RouteMeta {
        source: route_path.to_string(),
        points: r.len(),
        length_m: r.length_m(opts.metric.distance),
    });
    if let Err(err) = &loaded {
        warning(format!("Route unavailable: {err:#}"));
    }

    let report = evaluate_or_unknown(loaded.map(Some), Some(point), opts);

    if json {
        let export = CheckExport {
            route: meta.unwrap_or(RouteMeta {
                source: route_path.to_string(),
                points: 0,
                length_m: 0.0,
            }),
            point,
            distance_model: opts.metric.distance.to_string(),
            projection: opts.metric.projection.to_string(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    if let Some(m) = &meta {
        info(format!(
            "Route {}: {} points, {}",
            m.source,
            m.points,
            meters(m.length_m)
        ));
    }
    println!("Location: {point}");
    println!();
    super::print_report(&report);

    Ok(())
}
