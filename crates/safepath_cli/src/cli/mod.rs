pub mod args;
pub mod color;
pub mod commands;
pub mod export;
pub mod format;
pub mod validate;

use anyhow::Result;
use clap::Parser;
use safepath_core::store::SqliteStore;
use safepath_core::store::paths::resolve_db_path;
use safepath_core::{ProximityOptions, Settings};

pub fn run() -> Result<()> {
    let cli = args::Cli::parse();
    init_logging(cli.verbose);

    match &cli.cmd {
        args::Commands::Check {
            route,
            lat,
            lng,
            metric,
            json,
        } => {
            validate::validate_point(*lat, *lng, "--lat/--lng")?;
            let store = open_store(cli.db.as_deref())?;
            let opts = effective_options(&Settings::load(&store)?, metric)?;
            commands::check::run(route, *lat, *lng, &opts, *json)
        }

        args::Commands::Replay {
            route,
            track,
            metric,
            json,
        } => {
            let store = open_store(cli.db.as_deref())?;
            let opts = effective_options(&Settings::load(&store)?, metric)?;
            commands::replay::run(route, track, &opts, *json)
        }

        args::Commands::Session { cmd } => {
            let mut store = open_store(cli.db.as_deref())?;
            commands::session::run(&mut store, cmd)
        }

        args::Commands::Config { cmd } => {
            let mut store = open_store(cli.db.as_deref())?;
            commands::config::run(&mut store, cmd)
        }

        args::Commands::Db { cmd } => match cmd {
            args::DbCmd::Status => {
                let store = open_store(cli.db.as_deref())?;
                commands::db::status(&store)
            }
        },
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default));
}

fn open_store(db_arg: Option<&str>) -> Result<SqliteStore> {
    let db_path = resolve_db_path(db_arg)?;
    log::debug!("using store at {}", db_path.display());
    SqliteStore::open(&db_path)
}

/// Stored settings with the per-invocation flags applied on top.
pub(crate) fn effective_options(
    settings: &Settings,
    metric: &args::MetricArgs,
) -> Result<ProximityOptions> {
    let mut s = settings.clone();
    if let Some(t) = metric.tolerance {
        s.apply("tolerance_m", &t.to_string())?;
    }
    if let Some(d) = &metric.distance {
        s.apply("distance_model", d)?;
    }
    if let Some(p) = &metric.projection {
        s.apply("projection", p)?;
    }
    Ok(s.proximity())
}
