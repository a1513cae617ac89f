// ReelPick Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelPickError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No videos found in {0}")]
    NoVideosFound(String),

    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    #[error("Rename failed: {0}")]
    RenameFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Bias must be between 0.0 and 1.0, got {0}")]
    InvalidBias(f64),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No directory selected")]
    NoDirectorySelected,

    #[error("Launch error: {0}")]
    Launch(String),

    #[error("{0}")]
    Other(String),
}

impl ReelPickError {
    /// Domain errors the caller can report and retry. Store and IO failures are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReelPickError::Database(_)
                | ReelPickError::Io(_)
                | ReelPickError::Json(_)
                | ReelPickError::Other(_)
        )
    }
}

impl From<anyhow::Error> for ReelPickError {
    fn from(err: anyhow::Error) -> Self {
        ReelPickError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReelPickError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_recoverable() {
        assert!(ReelPickError::NothingToUndo.is_recoverable());
        assert!(ReelPickError::InvalidRating("abc".into()).is_recoverable());
        assert!(ReelPickError::NoVideosFound("/tmp".into()).is_recoverable());
        assert!(ReelPickError::RenameFailed("exists".into()).is_recoverable());
    }

    #[test]
    fn test_store_errors_are_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!ReelPickError::from(io).is_recoverable());
        assert!(!ReelPickError::from(rusqlite::Error::InvalidQuery).is_recoverable());
    }
}
