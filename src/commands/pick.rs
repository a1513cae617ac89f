// ReelPick - Random pick and open commands

use std::path::{Path, PathBuf};
use rand::Rng;

use crate::db::schema::VideoEntry;
use crate::error::{ReelPickError, Result};
use crate::launcher::Launcher;
use super::App;

impl<L: Launcher, R: Rng> App<L, R> {
    /// Pick a video from `dir` (or the remembered directory), record it, then launch it.
    /// The history row is written before launching; a launch failure is returned
    /// but the row stays.
    pub fn open_random(&mut self, bias: f64, dir: Option<&Path>) -> Result<VideoEntry> {
        let (chosen, entry) = self.pick_and_record(bias, dir)?;
        self.launcher.open(&chosen)?;
        Ok(entry)
    }

    /// Pick and record without launching anything
    pub fn pick_only(&mut self, bias: f64, dir: Option<&Path>) -> Result<VideoEntry> {
        self.pick_and_record(bias, dir).map(|(_, entry)| entry)
    }

    fn pick_and_record(&mut self, bias: f64, dir: Option<&Path>) -> Result<(PathBuf, VideoEntry)> {
        let root = match dir {
            Some(d) => d.to_path_buf(),
            None => self.store.last_directory()?.ok_or(ReelPickError::NoDirectorySelected)?,
        };

        let chosen = self.selector.pick_random_video(&root, bias)?;
        log::info!("Opening {}", chosen.display());

        let entry = self.store.record_opened(&chosen)?;
        Ok((chosen, entry))
    }

    /// Launch a video already in history without recording it again
    pub fn open_entry(&self, path: &Path) -> Result<()> {
        if self.store.entries_for_path(path)?.is_empty() {
            return Err(ReelPickError::NotFound(path.display().to_string()));
        }
        self.launcher.open(path)
    }
}
