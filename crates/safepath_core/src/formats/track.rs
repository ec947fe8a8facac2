//! Location tracks: timed sequences of observed points, replayed as if
//! they came from a device one update at a time.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::formats::route_file::parse_route_json;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub at: Option<DateTime<Utc>>,
    pub point: GeoPoint,
}

#[derive(Debug, Deserialize)]
struct TrackRow {
    #[serde(default, alias = "time", alias = "at")]
    timestamp: Option<String>,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "lon", alias = "long", alias = "longitude")]
    lng: f64,
}

pub fn load_track(path: &Path) -> Result<Vec<TrackPoint>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => {
            let file = fs::File::open(path)
                .with_context(|| format!("Unable to open track file: {}", path.display()))?;
            parse_track_csv(file)
        }
        "json" | "geojson" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Unable to read track file: {}", path.display()))?;
            let route = parse_route_json(&text)?;
            Ok(route
                .points
                .into_iter()
                .map(|point| TrackPoint { at: None, point })
                .collect())
        }
        other => bail!(
            "Unsupported track file extension '{}' for {} (expected .csv, .json or .geojson)",
            other,
            path.display()
        ),
    }
    .with_context(|| format!("Invalid track file: {}", path.display()))
}

/// Rows with an empty timestamp are accepted; a present but malformed
/// timestamp is an error.
pub fn parse_track_csv<R: Read>(reader: R) -> Result<Vec<TrackPoint>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut out = Vec::new();
    for (idx, row) in rdr.deserialize::<TrackRow>().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("Bad CSV row at line {line}"))?;

        let point = GeoPoint::new(row.lat, row.lng);
        if !point.in_range() {
            bail!("Line {line}: coordinates out of range ({}, {})", row.lat, row.lng);
        }

        let at = match row.timestamp.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(ts) => Some(
                DateTime::parse_from_rfc3339(ts)
                    .with_context(|| format!("Line {line}: invalid RFC 3339 timestamp '{ts}'"))?
                    .with_timezone(&Utc),
            ),
        };

        out.push(TrackPoint { at, point });
    }

    Ok(out)
}
