//! User-tunable settings, persisted next to the session state.
//!
//! The corridor width and the distance approximation are product
//! decisions, so both live here instead of being hard-coded.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::time::Duration;

use crate::geo::{DistanceModel, Projection, SegmentMetric};
use crate::providers::osrm::{DEFAULT_OSRM_PROFILE, DEFAULT_OSRM_URL};
use crate::proximity::{DEFAULT_TOLERANCE_M, ProximityOptions};
use crate::store::KeyValueStore;

const PREFIX: &str = "settings.";

pub const KEYS: &[&str] = &[
    "tolerance_m",
    "distance_model",
    "projection",
    "osrm_url",
    "osrm_profile",
    "http_timeout_secs",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub tolerance_m: f64,
    pub distance_model: DistanceModel,
    pub projection: Projection,
    pub osrm_url: String,
    pub osrm_profile: String,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            distance_model: DistanceModel::default(),
            projection: Projection::default(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            osrm_profile: DEFAULT_OSRM_PROFILE.to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Missing keys fall back to defaults; unparsable stored values are errors.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let mut s = Self::default();
        for key in KEYS {
            if let Some(raw) = store.get(&format!("{PREFIX}{key}"))? {
                s.apply(key, &raw)
                    .with_context(|| format!("Invalid stored setting '{key}'"))?;
            }
        }
        Ok(s)
    }

    /// Validate and persist one setting.
    pub fn set(store: &mut dyn KeyValueStore, key: &str, value: &str) -> Result<Self> {
        let mut s = Self::load(store)?;
        s.apply(key, value)?;
        store.set(&format!("{PREFIX}{key}"), &s.value_of(key)?)?;
        Ok(s)
    }

    pub fn reset(store: &mut dyn KeyValueStore) -> Result<()> {
        for key in KEYS {
            store.remove(&format!("{PREFIX}{key}"))?;
        }
        Ok(())
    }

    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "tolerance_m" => self.tolerance_m = parse_tolerance(value)?,
            "distance_model" => {
                self.distance_model = DistanceModel::parse(value).with_context(|| {
                    format!("Unknown distance model '{value}' (haversine, equirectangular)")
                })?
            }
            "projection" => {
                self.projection = Projection::parse(value).with_context(|| {
                    format!("Unknown projection '{value}' (degrees, equirectangular)")
                })?
            }
            "osrm_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    bail!("osrm_url must start with http:// or https://");
                }
                self.osrm_url = value.to_string();
            }
            "osrm_profile" => {
                if value.is_empty() || value.contains('/') {
                    bail!("osrm_profile must be a non-empty name without '/'");
                }
                self.osrm_profile = value.to_string();
            }
            "http_timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout '{value}'"))?;
                if secs == 0 {
                    bail!("http_timeout_secs must be > 0");
                }
                self.http_timeout_secs = secs;
            }
            other => bail!("Unknown setting '{other}' (known: {})", KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn value_of(&self, key: &str) -> Result<String> {
        Ok(match key {
            "tolerance_m" => self.tolerance_m.to_string(),
            "distance_model" => self.distance_model.to_string(),
            "projection" => self.projection.to_string(),
            "osrm_url" => self.osrm_url.clone(),
            "osrm_profile" => self.osrm_profile.clone(),
            "http_timeout_secs" => self.http_timeout_secs.to_string(),
            other => bail!("Unknown setting '{other}'"),
        })
    }

    pub fn proximity(&self) -> ProximityOptions {
        ProximityOptions {
            tolerance_m: self.tolerance_m,
            metric: SegmentMetric {
                distance: self.distance_model,
                projection: self.projection,
            },
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

pub fn parse_tolerance(value: &str) -> Result<f64> {
    let t: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid tolerance '{value}'"))?;
    if !t.is_finite() || t <= 0.0 {
        bail!("Tolerance must be a finite number of meters > 0 (got {value})");
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let s = Settings::load(&MemoryStore::new()).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.proximity(), ProximityOptions::default());
    }

    #[test]
    fn set_persists_normalized_values() {
        let mut store = MemoryStore::new();
        Settings::set(&mut store, "tolerance_m", " 75 ").unwrap();
        Settings::set(&mut store, "distance_model", "FLAT").unwrap();

        assert_eq!(store.get("settings.tolerance_m").unwrap().as_deref(), Some("75"));
        assert_eq!(
            store.get("settings.distance_model").unwrap().as_deref(),
            Some("equirectangular")
        );

        let s = Settings::load(&store).unwrap();
        assert_eq!(s.tolerance_m, 75.0);
        assert_eq!(s.proximity().metric.distance, DistanceModel::Equirectangular);
    }

    #[test]
    fn rejects_bad_values() {
        let mut store = MemoryStore::new();
        for (k, v) in [
            ("tolerance_m", "0"),
            ("tolerance_m", "-5"),
            ("tolerance_m", "NaN"),
            ("tolerance_m", "inf"),
            ("distance_model", "vincenty"),
            ("projection", "mercator"),
            ("osrm_url", "ftp://x"),
            ("osrm_profile", "a/b"),
            ("http_timeout_secs", "0"),
            ("colour", "blue"),
        ] {
            assert!(Settings::set(&mut store, k, v).is_err(), "{k}={v} accepted");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn corrupted_stored_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set("settings.tolerance_m", "wide").unwrap();
        let err = Settings::load(&store).unwrap_err();
        assert!(format!("{err:#}").contains("tolerance_m"));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut store = MemoryStore::new();
        Settings::set(&mut store, "osrm_profile", "foot").unwrap();
        Settings::reset(&mut store).unwrap();
        assert_eq!(Settings::load(&store).unwrap(), Settings::default());
    }
}
