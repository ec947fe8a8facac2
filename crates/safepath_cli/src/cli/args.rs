use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "safepath",
    version,
    about = "Check whether a tracked person is still near their planned route"
)]
pub struct Cli {
    /// Path to the SQLite store holding session locations and settings
    #[arg(long, env = "SAFEPATH_DB", global = true)]
    pub db: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

/// Per-invocation overrides of the stored settings.
#[derive(Args, Clone, Debug, Default)]
pub struct MetricArgs {
    /// Corridor half-width in meters
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Ground distance model (haversine, equirectangular)
    #[arg(long)]
    pub distance: Option<String>,

    /// Projection used to place the closest point (degrees, equirectangular)
    #[arg(long)]
    pub projection: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one location against a route file
    Check {
        /// Route file (.csv, .json or .geojson)
        #[arg(long)]
        route: String,

        /// Latitude of the observed location
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the observed location
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[command(flatten)]
        metric: MetricArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every point of a recorded track against a route file
    Replay {
        /// Route file (.csv, .json or .geojson)
        #[arg(long)]
        route: String,

        /// Track file (.csv with lat,lng and optional timestamp, or .json)
        #[arg(long)]
        track: String,

        #[command(flatten)]
        metric: MetricArgs,

        /// Print the per-point results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the home / destination / current location of the session
    Session {
        #[command(subcommand)]
        cmd: SessionCmd,
    },

    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Store maintenance
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RouterKind {
    /// OSRM-compatible routing service (see `config set osrm_url`)
    Osrm,
    /// Straight line between home and destination
    Direct,
    /// Polyline loaded from --route
    File,
}

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Print the stored locations
    Show,

    /// Set the home location
    SetHome {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Set the destination
    SetDestination {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Forget the destination (and with it the route)
    ClearDestination,

    /// Set the tracked person's current location
    SetCurrent {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Forget the tracked person's current location
    ClearCurrent,

    /// Compute the route between home and destination and report the status
    Status {
        /// Where the route comes from
        #[arg(long, value_enum, default_value_t = RouterKind::Osrm)]
        router: RouterKind,

        /// Route file, required with --router file
        #[arg(long)]
        route: Option<String>,

        #[command(flatten)]
        metric: MetricArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the effective settings
    Show,

    /// Change one setting (tolerance_m, distance_model, projection, osrm_url, osrm_profile, http_timeout_secs)
    Set { key: String, value: String },

    /// Remove all stored settings (back to defaults)
    Reset,
}

#[derive(Subcommand)]
pub enum DbCmd {
    /// Show store path, schema version and stored keys
    Status,
}
