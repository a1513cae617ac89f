// ReelPick - Library Entry Point

pub mod constants;
pub mod error;
pub mod db;
pub mod selector;
pub mod history;
pub mod launcher;
pub mod commands;

pub use commands::App;
pub use db::schema::VideoEntry;
pub use error::{ReelPickError, Result};
pub use history::{rating_color, HistoryStore, RatingColor};
pub use launcher::{Launcher, RecordingLauncher, SystemLauncher};
pub use selector::{pick_random_video, Selector};
