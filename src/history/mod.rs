// Video history store
// Durable record of opened/added videos with search, rating, rename-with-file-move,
// delete and a single-slot undo. Owns its connection; callers inject it.

pub mod rating;


use std::path::{Path, PathBuf};
use rusqlite::Connection;

use crate::constants::{OPENED_AT_FORMAT, SETTING_LAST_DIRECTORY, SETTING_UNDO_SLOT};
use crate::db::{self, migrations};
use crate::db::schema::{self, NewVideoEntry, VideoEntry};
use crate::error::{ReelPickError, Result};
use crate::selector::is_video_file;
pub use rating::{parse_rating, rating_color, RatingColor};

pub struct HistoryStore {
    conn: Connection,
    /// Last deleted entry. Mirrored to the `undo_slot` setting.
    undo_slot: Option<VideoEntry>,
}

impl HistoryStore {
    /// Wrap an existing connection. Runs pending migrations and restores the undo slot.
    pub fn new(conn: Connection) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        let undo_slot = load_undo_slot(&conn)?;
        Ok(Self { conn, undo_slot })
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        Self::new(db::open_db(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(db::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Record a video that was just opened.
    pub fn record_opened(&self, path: &Path) -> Result<VideoEntry> {
        let entry = self.insert_new(path)?;
        log::info!("Recorded opened video {}", entry.path);
        Ok(entry)
    }

    /// Add a video to history by hand. Only eligible video extensions are accepted.
    pub fn add_manually(&self, path: &Path) -> Result<VideoEntry> {
        if !is_video_file(path) {
            return Err(ReelPickError::InvalidPath(format!(
                "Not a supported video file: {}",
                path.display()
            )));
        }

        let entry = self.insert_new(path)?;
        log::info!("Added video {} to history", entry.path);
        Ok(entry)
    }

    /// Case-insensitive substring match on name, newest first. Empty term lists everything.
    /// Whitespace in the term is significant.
    pub fn search(&self, term: &str) -> Result<Vec<VideoEntry>> {
        let videos = schema::list_videos(&self.conn)?;

        let needle = term.to_lowercase();
        if needle.is_empty() {
            return Ok(videos);
        }

        Ok(videos
            .into_iter()
            .filter(|v| v.name.to_lowercase().contains(&needle))
            .collect())
    }

    pub fn most_recent(&self) -> Result<Option<VideoEntry>> {
        schema::get_most_recent_video(&self.conn)
    }

    pub fn get(&self, id: i64) -> Result<Option<VideoEntry>> {
        schema::get_video(&self.conn, id)
    }

    /// All rows recorded for `path`, newest first
    pub fn entries_for_path(&self, path: &Path) -> Result<Vec<VideoEntry>> {
        schema::get_videos_by_path(&self.conn, &path_key(path)?)
    }

    pub fn count(&self) -> Result<i64> {
        schema::count_videos(&self.conn)
    }

    /// Parse `rating_text` and apply it to every row for `path`.
    /// Empty text clears the rating.
    pub fn set_rating(&self, path: &Path, rating_text: &str) -> Result<Option<f64>> {
        let rating = parse_rating(rating_text)?;
        let key = path_key(path)?;

        let changed = schema::update_rating_by_path(&self.conn, &key, rating)?;
        if changed == 0 {
            return Err(ReelPickError::NotFound(key));
        }

        log::info!("Set rating of {} to {:?} ({} rows)", key, rating, changed);
        Ok(rating)
    }

    /// Rename the file on disk to `new_base_name` + its current extension, then
    /// point the history rows at it. Disk and history change together or not at all.
    pub fn rename(&mut self, path: &Path, new_base_name: &str) -> Result<PathBuf> {
        let old_key = path_key(path)?;
        let new_base = validate_base_name(new_base_name)?;

        if schema::get_videos_by_path(&self.conn, &old_key)?.is_empty() {
            return Err(ReelPickError::NotFound(old_key));
        }

        let new_name = match path.extension() {
            Some(ext) => format!("{}.{}", new_base, ext.to_string_lossy()),
            None => new_base.to_string(),
        };
        let new_path = match path.parent() {
            Some(dir) => dir.join(&new_name),
            None => PathBuf::from(&new_name),
        };

        if new_path == path {
            return Ok(new_path);
        }

        let new_key = path_key(&new_path)?;

        // On a case-insensitive filesystem a case-only rename "exists" as the same file
        let same_file = is_case_only_rename(path, &new_path);
        if !same_file && new_path.exists() {
            return Err(already_exists(&new_path));
        }

        let moved = if same_file {
            std::fs::rename(path, &new_path)
        } else {
            move_no_clobber(path, &new_path)
        };
        moved.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                already_exists(&new_path)
            } else {
                ReelPickError::RenameFailed(format!("Error renaming {}: {}", path.display(), e))
            }
        })?;

        match self.commit_rename(&old_key, &new_name, &new_key) {
            Ok(changed) => {
                log::info!("Renamed {} -> {} ({} rows)", old_key, new_key, changed);
                Ok(new_path)
            }
            Err(e) => {
                if let Err(restore_err) = std::fs::rename(&new_path, path) {
                    log::warn!(
                        "History update failed and {} could not be moved back: {}",
                        new_key,
                        restore_err
                    );
                }
                Err(e)
            }
        }
    }

    fn commit_rename(&mut self, old_key: &str, new_name: &str, new_key: &str) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let changed = schema::update_name_and_path(&tx, old_key, new_name, new_key)?;
        tx.commit()?;
        Ok(changed)
    }

    /// Remove every row for `path` from history. The file itself is never touched.
    /// The most recent removed row becomes the undo snapshot.
    pub fn delete(&mut self, path: &Path) -> Result<VideoEntry> {
        let key = path_key(path)?;

        let tx = self.conn.transaction()?;
        let snapshot = schema::get_videos_by_path(&tx, &key)?
            .into_iter()
            .next()
            .ok_or_else(|| ReelPickError::NotFound(key.clone()))?;

        let removed = schema::delete_videos_by_path(&tx, &key)?;
        schema::set_setting(&tx, SETTING_UNDO_SLOT, &serde_json::to_string(&snapshot)?)?;
        tx.commit()?;

        log::info!("Deleted {} from history ({} rows)", key, removed);
        self.undo_slot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Reinsert the last deleted entry as a new row.
    pub fn undo(&mut self) -> Result<VideoEntry> {
        let snapshot = self.undo_slot.clone().ok_or(ReelPickError::NothingToUndo)?;

        let tx = self.conn.transaction()?;
        let id = schema::insert_video(&tx, &NewVideoEntry::from(&snapshot))?;
        schema::delete_setting(&tx, SETTING_UNDO_SLOT)?;
        tx.commit()?;

        self.undo_slot = None;
        log::info!("Restored {} to history", snapshot.path);
        Ok(VideoEntry { id, ..snapshot })
    }

    pub fn pending_undo(&self) -> Option<&VideoEntry> {
        self.undo_slot.as_ref()
    }

    pub fn last_directory(&self) -> Result<Option<PathBuf>> {
        let value = schema::get_setting(&self.conn, SETTING_LAST_DIRECTORY)?;
        Ok(value.map(PathBuf::from))
    }

    pub fn set_last_directory(&self, dir: &Path) -> Result<()> {
        schema::set_setting(&self.conn, SETTING_LAST_DIRECTORY, &path_key(dir)?)
    }

    fn insert_new(&self, path: &Path) -> Result<VideoEntry> {
        let new = NewVideoEntry {
            path: path_key(path)?,
            name: display_name(path),
            rating: None,
            opened_at: now_timestamp(),
        };

        let id = schema::insert_video(&self.conn, &new)?;
        Ok(VideoEntry {
            id,
            path: new.path,
            name: new.name,
            rating: new.rating,
            opened_at: new.opened_at,
        })
    }
}

fn load_undo_slot(conn: &Connection) -> Result<Option<VideoEntry>> {
    let raw = match schema::get_setting(conn, SETTING_UNDO_SLOT)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    match serde_json::from_str(&raw) {
        Ok(entry) => Ok(Some(entry)),
        Err(e) => {
            log::warn!("Ignoring unreadable undo snapshot: {}", e);
            Ok(None)
        }
    }
}

fn validate_base_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ReelPickError::RenameFailed("New name is empty".to_string()));
    }
    if trimmed == "." || trimmed == ".." || trimmed.chars().any(std::path::is_separator) {
        return Err(ReelPickError::RenameFailed(format!(
            "'{}' is not a valid file name",
            trimmed
        )));
    }
    Ok(trimmed)
}

/// History keys are the exact path text. Non-UTF-8 paths can't be stored losslessly.
fn path_key(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        ReelPickError::InvalidPath(format!("Path is not valid UTF-8: {}", path.display()))
    })
}

/// True when `to` differs from `from` only by letter case and both resolve to
/// the same file (case-insensitive filesystems).
fn is_case_only_rename(from: &Path, to: &Path) -> bool {
    let names_match = match (from.file_name(), to.file_name()) {
        (Some(a), Some(b)) => a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase(),
        _ => false,
    };
    names_match && is_same_file(from, to)
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase(),
        _ => false,
    }
}

fn already_exists(path: &Path) -> ReelPickError {
    ReelPickError::RenameFailed(format!("{} already exists", path.display()))
}

/// Move `from` to `to`, failing with AlreadyExists instead of replacing `to`.
#[cfg(unix)]
fn move_no_clobber(from: &Path, to: &Path) -> std::io::Result<()> {
    // link(2) refuses an existing target atomically
    std::fs::hard_link(from, to)?;
    if let Err(e) = std::fs::remove_file(from) {
        let _ = std::fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}

#[cfg(not(unix))]
fn move_no_clobber(from: &Path, to: &Path) -> std::io::Result<()> {
    // Windows rename replaces existing files; the exists() check above guards it
    std::fs::rename(from, to)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn now_timestamp() -> String {
    chrono::Local::now().format(OPENED_AT_FORMAT).to_string()
}
