// Database module

pub mod migrations;
pub mod schema;

use rusqlite::Connection;
use std::env;
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::constants::{APP_DB_DIR, DB_FILENAME, ENV_DB_PATH};

/// Open or create the history database at the given path
pub fn open_db(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Cannot create database directory {}: {}. Check directory permissions.",
                    parent.display(),
                    e
                )
            })?;
        }
    }

    let conn = Connection::open(db_path)?;
    configure(&conn)?;

    Ok(conn)
}

/// Open an in-memory database with the same pragmas (tests, dry runs)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    // WAL is a no-op for in-memory databases
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

    migrations::run_migrations(conn)?;

    Ok(())
}

/// Resolve the database path.
/// Order: explicit override, then $REELPICK_DB_PATH, then ~/.reelpick/history.db
pub fn get_db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(v) = env::var(ENV_DB_PATH) {
        if !v.trim().is_empty() {
            return Ok(PathBuf::from(v));
        }
    }

    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.home_dir().join(APP_DB_DIR).join(DB_FILENAME))
}
