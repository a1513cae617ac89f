// Rating parsing and display color

use serde::Serialize;
use crate::constants::{RATING_COLOR_STEP, RATING_MAX, RATING_MIN, UNRATED_GRAY};
use crate::error::{ReelPickError, Result};

/// Parse user-entered rating text.
/// Empty text clears the rating. Anything else must be a finite number in [0, 10].
pub fn parse_rating(text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        ReelPickError::InvalidRating(format!("'{}' is not a number", trimmed))
    })?;

    if !value.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(ReelPickError::InvalidRating(format!(
            "{} is outside {:.1} - {:.1}",
            trimmed, RATING_MIN, RATING_MAX
        )));
    }

    Ok(Some(value))
}

/// Red-to-green color for a rating; gray when unrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RatingColor {
    pub const UNRATED: RatingColor = RatingColor {
        red: UNRATED_GRAY,
        green: UNRATED_GRAY,
        blue: UNRATED_GRAY,
    };

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

pub fn rating_color(rating: Option<f64>) -> RatingColor {
    match rating {
        Some(r) => RatingColor {
            red: to_channel((RATING_MAX - r) * RATING_COLOR_STEP),
            green: to_channel(r * RATING_COLOR_STEP),
            blue: 0,
        },
        None => RatingColor::UNRATED,
    }
}

fn to_channel(value: f64) -> u8 {
    // `as` saturates, and maps NaN to 0
    value.round().clamp(0.0, 255.0) as u8
}
