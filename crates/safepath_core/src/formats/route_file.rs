//! Loading polylines from disk.
//!
//! Accepted layouts:
//! - CSV with `lat` and `lng` columns (extra columns ignored)
//! - JSON array of `[lat, lng]` pairs or of `{"lat": .., "lng": ..}` objects
//! - GeoJSON `LineString`, `Feature` or `FeatureCollection`
//!   (positions are `[lng, lat]`, as GeoJSON mandates)

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::geo::GeoPoint;
use crate::route::Route;

#[derive(Debug, Deserialize)]
struct CsvPoint {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "lon", alias = "long", alias = "longitude")]
    lng: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPoint {
    Pair([f64; 2]),
    Object { lat: f64, lng: f64 },
}

impl From<JsonPoint> for GeoPoint {
    fn from(p: JsonPoint) -> Self {
        match p {
            JsonPoint::Pair([lat, lng]) => GeoPoint::new(lat, lng),
            JsonPoint::Object { lat, lng } => GeoPoint::new(lat, lng),
        }
    }
}

pub fn load_route(path: &Path) -> Result<Route> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let route = match ext.as_str() {
        "csv" => {
            let file = fs::File::open(path)
                .with_context(|| format!("Unable to open route file: {}", path.display()))?;
            parse_route_csv(file)
        }
        "json" | "geojson" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Unable to read route file: {}", path.display()))?;
            parse_route_json(&text)
        }
        other => bail!(
            "Unsupported route file extension '{}' for {} (expected .csv, .json or .geojson)",
            other,
            path.display()
        ),
    }
    .with_context(|| format!("Invalid route file: {}", path.display()))?;

    log::debug!(
        "loaded route with {} points from {}",
        route.len(),
        path.display()
    );
    Ok(route)
}

pub fn parse_route_csv<R: Read>(reader: R) -> Result<Route> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut points = Vec::new();
    for (idx, row) in rdr.deserialize::<CsvPoint>().enumerate() {
        // +2: header line and 1-based numbering
        let row = row.with_context(|| format!("Bad CSV row at line {}", idx + 2))?;
        points.push(checked(GeoPoint::new(row.lat, row.lng), idx)?);
    }

    Ok(Route::new(points))
}

pub fn parse_route_json(text: &str) -> Result<Route> {
    let value: Value = serde_json::from_str(text).context("Failed to parse JSON")?;

    let points = if value.is_array() {
        let raw: Vec<JsonPoint> = serde_json::from_value(value)
            .context("Expected an array of [lat, lng] pairs or {lat, lng} objects")?;
        raw.into_iter().map(GeoPoint::from).collect::<Vec<_>>()
    } else if value.is_object() {
        geojson_line(&value)?
    } else {
        bail!("Expected a JSON array or a GeoJSON object");
    };

    for (idx, p) in points.iter().enumerate() {
        checked(*p, idx)?;
    }

    Ok(Route::new(points))
}

fn checked(p: GeoPoint, idx: usize) -> Result<GeoPoint> {
    if !p.in_range() {
        bail!("Point #{} out of range: lat={}, lng={}", idx, p.lat, p.lng);
    }
    Ok(p)
}

fn geojson_line(value: &Value) -> Result<Vec<GeoPoint>> {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("");

    match kind {
        "LineString" => geojson_positions(value.get("coordinates")),
        "Feature" => match value.get("geometry") {
            Some(geom) => geojson_line(geom),
            None => bail!("GeoJSON Feature without geometry"),
        },
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .context("GeoJSON FeatureCollection without features")?;

            let line = features.iter().find(|f| {
                f.get("geometry")
                    .and_then(|g| g.get("type"))
                    .and_then(Value::as_str)
                    == Some("LineString")
            });

            match line {
                Some(f) => geojson_line(f),
                None => bail!("GeoJSON FeatureCollection has no LineString feature"),
            }
        }
        "" => bail!("JSON object is not GeoJSON (missing \"type\")"),
        other => bail!("Unsupported GeoJSON type: {other}"),
    }
}

/// GeoJSON positions are `[lng, lat, (alt)]`.
pub(crate) fn geojson_positions(coords: Option<&Value>) -> Result<Vec<GeoPoint>> {
    let arr = coords
        .and_then(Value::as_array)
        .context("GeoJSON geometry without coordinates array")?;

    arr.iter()
        .enumerate()
        .map(|(idx, pos)| {
            let pair = pos.as_array().filter(|p| p.len() >= 2);
            let lng = pair.and_then(|p| p[0].as_f64());
            let lat = pair.and_then(|p| p[1].as_f64());
            match (lat, lng) {
                (Some(lat), Some(lng)) => Ok(GeoPoint::new(lat, lng)),
                _ => bail!("Invalid GeoJSON position #{idx}: {pos}"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_with_extra_columns() {
        let data = "name,lat,lng\nhome, 34.0522 ,-118.2437\ncorner,34.0530,-118.2440\n";
        let route = parse_route_csv(data.as_bytes()).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route.points[0], GeoPoint::new(34.0522, -118.2437));
    }

    #[test]
    fn csv_accepts_longitude_alias() {
        let data = "latitude,longitude\n1.5,2.5\n";
        let route = parse_route_csv(data.as_bytes()).unwrap();
        assert_eq!(route.points, vec![GeoPoint::new(1.5, 2.5)]);
    }

    #[test]
    fn csv_out_of_range_is_rejected() {
        let data = "lat,lng\n95.0,0.0\n";
        assert!(parse_route_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn json_pairs_and_objects() {
        let pairs = parse_route_json("[[0, 0], [0, 1]]").unwrap();
        let objects =
            parse_route_json(r#"[{"lat": 0, "lng": 0}, {"lat": 0, "lng": 1}]"#).unwrap();
        assert_eq!(pairs, objects);
        assert_eq!(pairs.points[1], GeoPoint::new(0.0, 1.0));
    }

    #[test]
    fn geojson_swaps_axis_order() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": [[-118.24, 34.05], [-118.25, 34.06, 80.0]] }
        }"#;
        let route = parse_route_json(text).unwrap();
        assert_eq!(route.points[0], GeoPoint::new(34.05, -118.24));
        assert_eq!(route.points[1], GeoPoint::new(34.06, -118.25));
    }

    #[test]
    fn feature_collection_uses_first_line() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [5, 5] } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[1, 2], [3, 4]] } }
            ]
        }"#;
        let route = parse_route_json(text).unwrap();
        assert_eq!(route.points, vec![GeoPoint::new(2.0, 1.0), GeoPoint::new(4.0, 3.0)]);
    }

    #[test]
    fn empty_array_is_an_empty_route() {
        let route = parse_route_json("[]").unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn rejects_non_geojson_objects() {
        assert!(parse_route_json(r#"{"points": []}"#).is_err());
        assert!(parse_route_json(r#"{"type": "Polygon", "coordinates": []}"#).is_err());
        assert!(parse_route_json("42").is_err());
    }
}
