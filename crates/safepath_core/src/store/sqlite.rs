use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};

use crate::store::KeyValueStore;
use crate::store::paths::ensure_parent_dir;

pub const SCHEMA_VERSION: i64 = 2;

/// SQLite-backed [`KeyValueStore`]. Schema migrations run on open.
pub struct SqliteStore {
    con: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        let con = Connection::open(path)
            .with_context(|| format!("Unable to open database: {}", path.display()))?;

        let mut store = Self {
            con,
            path: Some(path.to_path_buf()),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let con = Connection::open_in_memory().context("Unable to open in-memory database")?;
        let mut store = Self { con, path: None };
        store.migrate()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema_version(&self) -> Result<i64> {
        Ok(meta_get_i64(&self.con, "schema_version")?.unwrap_or(0))
    }

    pub fn count(&self) -> Result<i64> {
        self.con
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
            .context("Failed to count rows in table: kv")
    }

    /// Last update time (SQLite `datetime('now')`, UTC) of a key.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let v: Option<Option<String>> = self
            .con
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |r| {
                r.get(0)
            })
            .optional()
            .with_context(|| format!("Failed to read key: {key}"))?;
        Ok(v.flatten())
    }

    /// Bring the schema up to [`SCHEMA_VERSION`]. Idempotent.
    pub fn migrate(&mut self) -> Result<()> {
        self.con
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS meta (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                "#,
            )
            .context("Failed to create meta table")?;

        let current = meta_get_i64(&self.con, "schema_version")?.unwrap_or(0);
        if current >= SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "store schema upgrade required (current: v{}, target: v{})",
            current,
            SCHEMA_VERSION
        );

        let tx = self
            .con
            .transaction()
            .context("Failed to start migration transaction")?;

        if current < 1 {
            m_to_v1(&tx)?;
            meta_upsert(&tx, "schema_version", "1")
                .context("Failed to update meta.schema_version to 1")?;
        }

        if current < 2 {
            m_to_v2(&tx)?;
            meta_upsert(&tx, "schema_version", "2")
                .context("Failed to update meta.schema_version to 2")?;
        }

        tx.commit().context("Failed to commit migration")?;
        log::info!("store schema updated to v{SCHEMA_VERSION}");

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.con
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()
            .with_context(|| format!("Failed to read key: {key}"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.con
            .execute(
                r#"
                INSERT INTO kv(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                (key, value),
            )
            .with_context(|| format!("Failed to write key: {key}"))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.con
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .with_context(|| format!("Failed to delete key: {key}"))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.con.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;

        let mut out = Vec::new();
        for k in rows {
            out.push(k?);
        }
        Ok(out)
    }
}

fn column_exists(tx: &Transaction<'_>, table: &str, col: &str) -> Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = tx.prepare(&sql)?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?; // 1 = name
        if name.eq_ignore_ascii_case(col) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn meta_get_i64(con: &Connection, key: &str) -> Result<Option<i64>> {
    let s: Option<String> = con
        .query_row("SELECT value FROM meta WHERE key = ?1", [key], |r| r.get(0))
        .optional()?;

    match s {
        None => Ok(None),
        Some(v) => Ok(Some(v.parse::<i64>().with_context(|| {
            format!("Invalid integer value in meta table for key '{key}': '{v}'")
        })?)),
    }
}

fn meta_upsert(tx: &Transaction<'_>, key: &str, value: &str) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO meta(key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
        (key, value),
    )?;
    Ok(())
}

fn m_to_v1(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )
    .context("Failed to migrate schema to v1 (create kv table)")?;
    Ok(())
}

fn m_to_v2(tx: &Transaction<'_>) -> Result<()> {
    if !column_exists(tx, "kv", "updated_at")? {
        tx.execute_batch(
            r#"
            ALTER TABLE kv ADD COLUMN updated_at TEXT;
            "#,
        )
        .context("Failed to add kv.updated_at")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_at_latest_schema() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.path().is_none());
    }

    #[test]
    fn migrate_twice_is_a_no_op() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();
        store.migrate().unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn upgrades_a_v1_database() {
        let con = Connection::open_in_memory().unwrap();
        con.execute_batch(
            r#"
            CREATE TABLE meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);
            INSERT INTO meta(key, value) VALUES ('schema_version', '1');
            CREATE TABLE kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);
            INSERT INTO kv(key, value) VALUES ('homeLocation', '{"lat":1.0,"lng":2.0}');
            "#,
        )
        .unwrap();

        let mut store = SqliteStore { con, path: None };
        store.migrate().unwrap();

        assert_eq!(store.schema_version().unwrap(), 2);
        assert_eq!(
            store.get("homeLocation").unwrap().as_deref(),
            Some(r#"{"lat":1.0,"lng":2.0}"#)
        );
        assert_eq!(store.updated_at("homeLocation").unwrap(), None);

        store.set("homeLocation", "{}").unwrap();
        assert!(store.updated_at("homeLocation").unwrap().is_some());
    }

    #[test]
    fn kv_operations() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        assert_eq!(store.count().unwrap(), 2);

        store.remove("a").unwrap();
        store.remove("nope").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
