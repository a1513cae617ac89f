// Weighted random video selection
// bias is the probability of drawing from subfolders when both tiers have videos.
// 0.0 = only the chosen folder itself, 1.0 = only its subfolders.

pub mod discover;


use std::path::{Path, PathBuf};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{ReelPickError, Result};
pub use discover::{discover_videos, is_video_file, VideoPool};

/// Which part of the tree a pick came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    TopLevel,
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedVideo {
    pub path: PathBuf,
    pub tier: Tier,
}

pub struct Selector<R: Rng = StdRng> {
    rng: R,
}

impl Selector<StdRng> {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl Default for Selector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Selector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Walk `root` and draw one video according to `bias`.
    pub fn pick_random_video(&mut self, root: &Path, bias: f64) -> Result<PathBuf> {
        self.pick(root, bias).map(|picked| picked.path)
    }

    /// Same as `pick_random_video` but also reports the tier drawn from.
    pub fn pick(&mut self, root: &Path, bias: f64) -> Result<PickedVideo> {
        validate_bias(bias)?;

        let pool = discover_videos(root)?;
        if pool.is_empty() {
            return Err(ReelPickError::NoVideosFound(root.display().to_string()));
        }

        let picked = pick_from_pool(&pool, bias, &mut self.rng)
            .ok_or_else(|| ReelPickError::NoVideosFound(root.display().to_string()))?;

        log::debug!("Picked {:?} video {}", picked.tier, picked.path.display());
        Ok(picked)
    }
}

/// Draw from an already discovered pool. None when the pool is empty.
pub fn pick_from_pool<R: Rng + ?Sized>(pool: &VideoPool, bias: f64, rng: &mut R) -> Option<PickedVideo> {
    let p_top = 1.0 - bias;

    let tier = match (pool.top_level.is_empty(), pool.nested.is_empty()) {
        (true, true) => return None,
        (true, false) => Tier::Nested,
        (false, true) => Tier::TopLevel,
        (false, false) => {
            if rng.gen::<f64>() < p_top {
                Tier::TopLevel
            } else {
                Tier::Nested
            }
        }
    };

    let candidates = match tier {
        Tier::TopLevel => &pool.top_level,
        Tier::Nested => &pool.nested,
    };

    candidates.choose(rng).map(|path| PickedVideo {
        path: path.clone(),
        tier,
    })
}

/// Convenience wrapper using a fresh entropy-seeded RNG
pub fn pick_random_video(root: &Path, bias: f64) -> Result<PathBuf> {
    Selector::new().pick_random_video(root, bias)
}

fn validate_bias(bias: f64) -> Result<()> {
    // NaN fails the range check too
    if !(0.0..=1.0).contains(&bias) {
        return Err(ReelPickError::InvalidBias(bias));
    }
    Ok(())
}
