// Video discovery for random selection

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::constants::VIDEO_EXTENSIONS;
use crate::error::{ReelPickError, Result};

/// Videos under a root, split by whether they sit directly in the root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoPool {
    pub top_level: Vec<PathBuf>,
    pub nested: Vec<PathBuf>,
}

impl VideoPool {
    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty() && self.nested.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top_level.len() + self.nested.len()
    }
}

/// Walk `root` and partition every eligible video into top-level and nested.
pub fn discover_videos(root: &Path) -> Result<VideoPool> {
    // A vanished or stale root simply has no videos
    if !root.is_dir() {
        return Err(ReelPickError::NoVideosFound(root.display().to_string()));
    }

    let mut pool = VideoPool::default();

    // Directory symlinks are not followed, so every pick stays inside `root`
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();
        // A symlink to a file counts as a file; a symlink to a directory does not
        let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
        if !is_file || !is_video_file(path) {
            continue;
        }

        // depth 1 means the parent is exactly the scan root
        if entry.depth() == 1 {
            pool.top_level.push(path.to_path_buf());
        } else {
            pool.nested.push(path.to_path_buf());
        }
    }

    // Stable order so a seeded RNG always draws the same file
    pool.top_level.sort();
    pool.nested.sort();

    log::debug!(
        "Discovered {} top-level and {} nested videos under {}",
        pool.top_level.len(),
        pool.nested.len(),
        root.display()
    );

    Ok(pool)
}

/// Check if a file is an eligible video based on extension (case-insensitive)
pub fn is_video_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_lowercase(),
        None => return false,
    };

    VIDEO_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("/a/clip.mp4")));
        assert!(is_video_file(Path::new("/a/CLIP.MKV")));
        assert!(is_video_file(Path::new("movie.Mov")));
        assert!(is_video_file(Path::new("old.avi")));
        assert!(!is_video_file(Path::new("song.mp3")));
        assert!(!is_video_file(Path::new("clip.webm")));
        assert!(!is_video_file(Path::new("mp4")));
    }
}
