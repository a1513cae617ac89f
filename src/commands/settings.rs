// ReelPick - Directory setting commands

use std::path::{Path, PathBuf};
use rand::Rng;

use crate::error::{ReelPickError, Result};
use crate::launcher::Launcher;
use super::App;

impl<L: Launcher, R: Rng> App<L, R> {
    /// Remember `dir` as the folder to pick from. Stored canonicalized.
    pub fn choose_directory(&self, dir: &Path) -> Result<PathBuf> {
        let dir = dir.canonicalize().map_err(|e| {
            ReelPickError::InvalidPath(format!("{}: {}", dir.display(), e))
        })?;

        if !dir.is_dir() {
            return Err(ReelPickError::InvalidPath(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        self.store.set_last_directory(&dir)?;
        log::info!("Selected directory {}", dir.display());
        Ok(dir)
    }

    pub fn current_directory(&self) -> Result<Option<PathBuf>> {
        self.store.last_directory()
    }
}
