// ReelPick Constants

// Paths
pub const APP_DB_DIR: &str = ".reelpick";
pub const DB_FILENAME: &str = "history.db";

// Environment overrides
pub const ENV_DB_PATH: &str = "REELPICK_DB_PATH";
pub const ENV_OPENER: &str = "REELPICK_OPENER";

// Setting keys
pub const SETTING_LAST_DIRECTORY: &str = "last_directory";
pub const SETTING_UNDO_SLOT: &str = "undo_slot";

// Timestamp format for opened_at (sorts correctly as text)
pub const OPENED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Selection
pub const DEFAULT_BIAS_PERCENT: u8 = 50;

// Ratings
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;
pub const RATING_COLOR_STEP: f64 = 25.5; // 255 / 10
pub const UNRATED_GRAY: u8 = 128;

// Video extensions eligible for random selection and manual add
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mkv", "mov"];
