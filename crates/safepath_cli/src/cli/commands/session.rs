use anyhow::Result;
use safepath_core::providers::{DirectProvider, FileRouteProvider, OsrmProvider, RouteProvider};
use safepath_core::store::KeyValueStore;
use safepath_core::{GeoPoint, Settings, TrackingSession};

use crate::cli::args::{RouterKind, SessionCmd};
use crate::cli::color::Colors;
use crate::cli::export::SessionExport;
use crate::cli::format::{meters, point, print_kv_block};
use crate::cli::validate::{validate_point, validate_router};
use crate::cli::effective_options;
use crate::ui::{Style, info, success, warning};

pub fn run(store: &mut dyn KeyValueStore, cmd: &SessionCmd) -> Result<()> {
    let mut session = TrackingSession::load(store)?;

    match cmd {
        SessionCmd::Show => {
            show(&session);
            return Ok(());
        }

        SessionCmd::SetHome { lat, lng } => {
            validate_point(*lat, *lng, "home")?;
            session.set_home(GeoPoint::new(*lat, *lng));
            session.save(store)?;
            success(format!("Home set to {}", session.home()));
        }

        SessionCmd::SetDestination { lat, lng } => {
            validate_point(*lat, *lng, "destination")?;
            session.set_destination(GeoPoint::new(*lat, *lng));
            session.save(store)?;
            success(format!("Destination set to {}", point(session.destination())));
        }

        SessionCmd::ClearDestination => {
            session.clear_destination();
            session.save(store)?;
            success("Destination cleared");
        }

        SessionCmd::SetCurrent { lat, lng } => {
            validate_point(*lat, *lng, "current location")?;
            session.set_current(GeoPoint::new(*lat, *lng));
            session.save(store)?;
            success(format!("Current location set to {}", point(session.current())));
        }

        SessionCmd::ClearCurrent => {
            session.clear_current();
            session.save(store)?;
            success("Current location cleared");
        }

        SessionCmd::Status {
            router,
            route,
            metric,
            json,
        } => {
            validate_router(*router, route.as_deref())?;
            let settings = Settings::load(store)?;
            let opts = effective_options(&settings, metric)?;

            let provider = build_provider(*router, route.as_deref(), &settings)?;
            if session.destination().is_some() {
                session.refresh_route(provider.as_ref());
            }
            let report = session.status(&opts);

            if *json {
                let export = SessionExport {
                    home: session.home(),
                    destination: session.destination(),
                    current: session.current(),
                    router: provider.name().to_string(),
                    route_points: session.route().map(|r| r.len()),
                    report,
                };
                println!("{}", serde_json::to_string_pretty(&export)?);
                return Ok(());
            }

            show(&session);
            println!();
            match session.route() {
                Some(r) => info(format!(
                    "Route via {}: {} points, {}",
                    provider.name(),
                    r.len(),
                    meters(r.length_m(opts.metric.distance))
                )),
                None if session.destination().is_some() => {
                    warning(format!("No route available from {}", provider.name()))
                }
                None => warning("No destination set"),
            }
            println!();
            super::print_report(&report);
        }
    }

    Ok(())
}

fn build_provider(
    router: RouterKind,
    route: Option<&str>,
    settings: &Settings,
) -> Result<Box<dyn RouteProvider>> {
    let provider: Box<dyn RouteProvider> = match (router, route) {
        (RouterKind::File, Some(path)) => Box::new(FileRouteProvider::new(path)),
        (RouterKind::Direct, _) => Box::new(DirectProvider),
        _ => Box::new(OsrmProvider::new(
            &settings.osrm_url,
            &settings.osrm_profile,
            settings.http_timeout(),
        )?),
    };
    Ok(provider)
}

fn show(session: &TrackingSession) {
    let c = Colors::new(&Style::default());
    let pairs = [
        ("Home", point(Some(session.home()))),
        ("Destination", point(session.destination())),
        ("Current", point(session.current())),
    ];
    print_kv_block(&pairs, |k| c.key(k));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::MetricArgs;
    use safepath_core::store::MemoryStore;

    #[test]
    fn set_commands_persist_locations() {
        let mut store = MemoryStore::new();

        run(&mut store, &SessionCmd::SetDestination { lat: 34.06, lng: -118.25 }).unwrap();
        run(&mut store, &SessionCmd::SetCurrent { lat: 34.055, lng: -118.245 }).unwrap();

        let s = TrackingSession::load(&store).unwrap();
        assert_eq!(s.destination(), Some(GeoPoint::new(34.06, -118.25)));
        assert_eq!(s.current(), Some(GeoPoint::new(34.055, -118.245)));

        run(&mut store, &SessionCmd::ClearCurrent).unwrap();
        assert_eq!(TrackingSession::load(&store).unwrap().current(), None);
    }

    #[test]
    fn out_of_range_location_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(run(&mut store, &SessionCmd::SetHome { lat: 95.0, lng: 0.0 }).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn status_with_direct_router_runs_offline() {
        let mut store = MemoryStore::new();
        run(&mut store, &SessionCmd::SetDestination { lat: 34.0622, lng: -118.2437 }).unwrap();
        run(&mut store, &SessionCmd::SetCurrent { lat: 34.0572, lng: -118.2437 }).unwrap();

        let cmd = SessionCmd::Status {
            router: RouterKind::Direct,
            route: None,
            metric: MetricArgs::default(),
            json: true,
        };
        run(&mut store, &cmd).unwrap();
    }
}
