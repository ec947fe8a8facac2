pub mod route_file;
pub mod track;

pub use route_file::{load_route, parse_route_csv, parse_route_json};
pub use track::{TrackPoint, load_track, parse_track_csv};
