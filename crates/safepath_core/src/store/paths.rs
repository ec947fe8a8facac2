use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "safepath.sqlite";

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("", "", "safepath")
        .context("Unable to determine OS app data directory")?;

    let dir = proj.data_local_dir();
    std::fs::create_dir_all(dir).context("Unable to create app data directory")?;

    Ok(dir.join(DB_FILE_NAME))
}

/// `--db` / `SAFEPATH_DB` when given, else the OS data directory.
pub fn resolve_db_path(db_arg: Option<&str>) -> Result<PathBuf> {
    Ok(match db_arg {
        Some(p) => PathBuf::from(p),
        None => default_db_path()?,
    })
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}
