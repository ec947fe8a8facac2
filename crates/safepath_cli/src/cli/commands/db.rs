use anyhow::{Context, Result};
use safepath_core::store::sqlite::SCHEMA_VERSION;
use safepath_core::store::{KeyValueStore, SqliteStore};
use std::fs;

use crate::cli::color::Colors;
use crate::cli::format::print_kv_block;
use crate::ui::{Style, success, warning};

pub fn status(store: &SqliteStore) -> Result<()> {
    let c = Colors::new(&Style::default());

    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    let size = match store.path() {
        Some(p) => {
            let meta = fs::metadata(p).context("Unable to read database file metadata")?;
            format!("{} bytes", meta.len())
        }
        None => "-".to_string(),
    };

    let version = store.schema_version()?;
    let pairs = [
        ("Database path", path),
        ("Size", size),
        ("Schema version", version.to_string()),
        ("Keys", store.count()?.to_string()),
    ];
    print_kv_block(&pairs, |k| c.key(k));

    if version == SCHEMA_VERSION {
        success("Status: OK");
    } else {
        warning(format!(
            "Schema version v{version} differs from the supported v{SCHEMA_VERSION}"
        ));
    }

    let keys = store.keys()?;
    if !keys.is_empty() {
        println!();
        println!("Key\tUpdated (UTC)");
        for k in keys {
            let at = store.updated_at(&k)?.unwrap_or_else(|| "-".to_string());
            println!("{}\t{}", k, c.dim(at));
        }
    }

    Ok(())
}
