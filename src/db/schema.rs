// Database schema types and query helpers

use rusqlite::{Connection, params, OptionalExtension};
use serde::{Deserialize, Serialize};
use crate::error::Result;

const VIDEO_COLUMNS: &str = "id, path, name, rating, opened_at";

// ----- Video -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub id: i64,
    pub path: String,
    pub name: String,
    pub rating: Option<f64>,
    pub opened_at: String,
}

#[derive(Debug, Clone)]
pub struct NewVideoEntry {
    pub path: String,
    pub name: String,
    pub rating: Option<f64>,
    pub opened_at: String,
}

impl From<&VideoEntry> for NewVideoEntry {
    fn from(entry: &VideoEntry) -> Self {
        Self {
            path: entry.path.clone(),
            name: entry.name.clone(),
            rating: entry.rating,
            opened_at: entry.opened_at.clone(),
        }
    }
}

pub fn insert_video(conn: &Connection, video: &NewVideoEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO videos (path, name, rating, opened_at) VALUES (?1, ?2, ?3, ?4)",
        params![video.path, video.name, video.rating, video.opened_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_video(conn: &Connection, id: i64) -> Result<Option<VideoEntry>> {
    let result = conn.query_row(
        &format!("SELECT {} FROM videos WHERE id = ?1", VIDEO_COLUMNS),
        params![id],
        map_video,
    ).optional()?;
    Ok(result)
}

/// All videos, newest first. Ties on opened_at go to the later insert.
pub fn list_videos(conn: &Connection) -> Result<Vec<VideoEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM videos ORDER BY opened_at DESC, id DESC",
        VIDEO_COLUMNS
    ))?;

    let videos = stmt.query_map([], map_video)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(videos)
}

pub fn get_most_recent_video(conn: &Connection) -> Result<Option<VideoEntry>> {
    let result = conn.query_row(
        &format!(
            "SELECT {} FROM videos ORDER BY opened_at DESC, id DESC LIMIT 1",
            VIDEO_COLUMNS
        ),
        [],
        map_video,
    ).optional()?;
    Ok(result)
}

pub fn get_videos_by_path(conn: &Connection, path: &str) -> Result<Vec<VideoEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM videos WHERE path = ?1 ORDER BY opened_at DESC, id DESC",
        VIDEO_COLUMNS
    ))?;

    let videos = stmt.query_map(params![path], map_video)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(videos)
}

pub fn count_videos(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
    Ok(count)
}

/// Returns the number of rows updated
pub fn update_rating_by_path(conn: &Connection, path: &str, rating: Option<f64>) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE videos SET rating = ?1 WHERE path = ?2",
        params![rating, path],
    )?;
    Ok(changed)
}

/// Returns the number of rows updated
pub fn update_name_and_path(conn: &Connection, old_path: &str, new_name: &str, new_path: &str) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE videos SET name = ?1, path = ?2 WHERE path = ?3",
        params![new_name, new_path, old_path],
    )?;
    Ok(changed)
}

/// Returns the number of rows deleted
pub fn delete_videos_by_path(conn: &Connection, path: &str) -> Result<usize> {
    let changed = conn.execute("DELETE FROM videos WHERE path = ?1", params![path])?;
    Ok(changed)
}

fn map_video(row: &rusqlite::Row) -> rusqlite::Result<VideoEntry> {
    Ok(VideoEntry {
        id: row.get(0)?,
        path: row.get(1)?,
        name: row.get(2)?,
        rating: row.get(3)?,
        opened_at: row.get(4)?,
    })
}

// ----- Settings -----

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        [key],
        |row| row.get(0),
    ).optional()?;
    Ok(value)
}

/// Set a setting value (upsert).
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn new_video(path: &str, opened_at: &str) -> NewVideoEntry {
        NewVideoEntry {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap().to_string(),
            rating: None,
            opened_at: opened_at.to_string(),
        }
    }

    #[test]
    fn test_list_orders_newest_first_with_id_tiebreak() {
        let conn = setup_db();
        let a = insert_video(&conn, &new_video("/v/a.mp4", "2024-01-01 10:00:00")).unwrap();
        let b = insert_video(&conn, &new_video("/v/b.mp4", "2024-01-02 10:00:00")).unwrap();
        let c = insert_video(&conn, &new_video("/v/c.mp4", "2024-01-01 10:00:00")).unwrap();

        let ids: Vec<i64> = list_videos(&conn).unwrap().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![b, c, a]);
        assert_eq!(get_most_recent_video(&conn).unwrap().unwrap().id, b);
    }

    #[test]
    fn test_duplicate_paths_all_updated() {
        let conn = setup_db();
        insert_video(&conn, &new_video("/v/dup.mkv", "2024-01-01 10:00:00")).unwrap();
        insert_video(&conn, &new_video("/v/dup.mkv", "2024-01-03 10:00:00")).unwrap();

        assert_eq!(update_rating_by_path(&conn, "/v/dup.mkv", Some(4.0)).unwrap(), 2);
        let rows = get_videos_by_path(&conn, "/v/dup.mkv").unwrap();
        assert!(rows.iter().all(|r| r.rating == Some(4.0)));
        assert_eq!(rows[0].opened_at, "2024-01-03 10:00:00");

        assert_eq!(delete_videos_by_path(&conn, "/v/dup.mkv").unwrap(), 2);
        assert_eq!(count_videos(&conn).unwrap(), 0);
    }

    #[test]
    fn test_settings_upsert() {
        let conn = setup_db();
        assert_eq!(get_setting(&conn, "last_directory").unwrap(), None);

        set_setting(&conn, "last_directory", "/a").unwrap();
        set_setting(&conn, "last_directory", "/b").unwrap();
        assert_eq!(get_setting(&conn, "last_directory").unwrap().as_deref(), Some("/b"));

        delete_setting(&conn, "last_directory").unwrap();
        assert_eq!(get_setting(&conn, "last_directory").unwrap(), None);
    }
}
