use anyhow::{Context, Result};
use safepath_core::formats::{load_route, load_track};
use safepath_core::providers::{LocationSource, TrackReplay};
use safepath_core::{ProximityOptions, RouteStatus, evaluate};
use std::path::Path;

use crate::cli::color::Colors;
use crate::cli::export::{ReplayExport, ReplayRow, ReplaySummary, RouteMeta, Transition};
use crate::cli::format::{meters, print_kv_block};
use crate::ui::{Style, error, info, success, warning};

pub fn run(route_path: &str, track_path: &str, opts: &ProximityOptions, json: bool) -> Result<()> {
    let route = load_route(Path::new(route_path))?;
    let track = load_track(Path::new(track_path))?;

    if !route.is_available() {
        warning(format!(
            "Route {route_path} has fewer than 2 points: every status will be unknown"
        ));
    }

    let mut source = TrackReplay::new(track);
    let mut rows = Vec::with_capacity(source.remaining());
    let mut last_known: Option<RouteStatus> = None;

    while let Some(point) = source.current().context("Track replay failed")? {
        let report = evaluate(Some(&route), Some(point), opts);
        let transition = transition(last_known, report.status);
        if report.status != RouteStatus::Unknown {
            last_known = Some(report.status);
        }

        rows.push(ReplayRow {
            idx: rows.len(),
            timestamp: source
                .last()
                .and_then(|tp| tp.at)
                .map(|at| at.to_rfc3339()),
            point,
            status: report.status,
            distance_m: report.nearest.as_ref().map(|n| n.distance_m),
            segment_index: report.nearest.as_ref().map(|n| n.segment_index),
            transition,
        });
    }

    let summary = summarize(&rows);
    let meta = RouteMeta {
        source: route_path.to_string(),
        points: route.len(),
        length_m: route.length_m(opts.metric.distance),
    };

    if json {
        let export = ReplayExport {
            route: meta,
            tolerance_m: opts.tolerance_m,
            rows,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    print_table(&meta, &rows, opts.tolerance_m);
    print_summary(&summary, opts.tolerance_m);
    Ok(())
}

/// Only changes between two known states count; unknown samples in
/// between do not reset the last known state.
fn transition(previous: Option<RouteStatus>, now: RouteStatus) -> Option<Transition> {
    match (previous, now) {
        (Some(RouteStatus::OnRoute), RouteStatus::OffRoute) => Some(Transition::Strayed),
        (Some(RouteStatus::OffRoute), RouteStatus::OnRoute) => Some(Transition::BackOnRoute),
        _ => None,
    }
}

fn summarize(rows: &[ReplayRow]) -> ReplaySummary {
    let mut s = ReplaySummary {
        total: rows.len(),
        ..Default::default()
    };

    for r in rows {
        match r.status {
            RouteStatus::OnRoute => s.on_route += 1,
            RouteStatus::OffRoute => s.off_route += 1,
            RouteStatus::Unknown => s.unknown += 1,
        }
        if r.transition == Some(Transition::Strayed) {
            s.strayed += 1;
        }
        if let Some(d) = r.distance_m {
            s.max_distance_m = Some(s.max_distance_m.map_or(d, |m| m.max(d)));
        }
    }
    s
}

fn print_table(meta: &RouteMeta, rows: &[ReplayRow], tolerance_m: f64) {
    let c = Colors::new(&Style::default());

    info(format!(
        "Route {}: {} points, {}",
        meta.source,
        meta.points,
        meters(meta.length_m)
    ));
    println!();
    println!("#\tTime\tLat\tLng\tStatus\tDistance");

    for r in rows {
        let dist = r
            .distance_m
            .map(|d| c.distance(d, tolerance_m, meters(d)))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{}\t{}\t{:.6}\t{:.6}\t{}\t{}",
            r.idx,
            r.timestamp.as_deref().unwrap_or("-"),
            r.point.lat,
            r.point.lng,
            c.status(r.status, r.status.as_str()),
            dist
        );

        match r.transition {
            Some(Transition::Strayed) => error(format!("Strayed from path at #{}", r.idx)),
            Some(Transition::BackOnRoute) => success(format!("Back on route at #{}", r.idx)),
            None => {}
        }
    }
}

fn print_summary(s: &ReplaySummary, tolerance_m: f64) {
    let c = Colors::new(&Style::default());

    println!();
    let pairs = [
        ("Samples", s.total.to_string()),
        ("On route", c.ok(s.on_route.to_string())),
        ("Off route", c.err(s.off_route.to_string())),
        ("Unknown", c.warn(s.unknown.to_string())),
        ("Strayed", s.strayed.to_string()),
        ("Tolerance", meters(tolerance_m)),
        (
            "Max distance",
            s.max_distance_m
                .map(|d| c.distance(d, tolerance_m, meters(d)))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];
    print_kv_block(&pairs, |k| c.key(k));
}
