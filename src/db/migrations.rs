// Database migrations
// Migrations are forward-only. Never edit or delete a migration after it ships.

use rusqlite::Connection;
use anyhow::Result;

/// All migrations in order. Each migration is a SQL string.
const MIGRATIONS: &[&str] = &[
    // Migration 1: Video history + settings
    r#"
    -- Opened/added videos. path is the lookup key but is not UNIQUE:
    -- the same file can be recorded more than once.
    CREATE TABLE IF NOT EXISTS videos (
        id INTEGER PRIMARY KEY,
        path TEXT NOT NULL,
        name TEXT NOT NULL,
        rating REAL,
        opened_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_videos_path ON videos(path);
    CREATE INDEX IF NOT EXISTS idx_videos_opened_at ON videos(opened_at);
    "#,
];

/// Get current schema version from database
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    let version: u32 = conn.query_row(
        "PRAGMA user_version",
        [],
        |row| row.get(0)
    )?;
    Ok(version)
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    let target_version = MIGRATIONS.len() as u32;

    // Refuse to open a DB created by a newer build
    if current_version > target_version {
        anyhow::bail!(
            "Database schema version {} is newer than this build supports (max {}). Please upgrade ReelPick.",
            current_version,
            target_version
        );
    }

    if current_version == target_version {
        return Ok(());
    }

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as u32;
        if migration_version <= current_version {
            continue;
        }

        conn.execute_batch(migration)?;
        conn.execute_batch(&format!("PRAGMA user_version = {}", migration_version))?;

        log::info!("Applied migration {}", migration_version);
    }

    Ok(())
}
