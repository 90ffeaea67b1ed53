// SPDX-License-Identifier: MPL-2.0
//! Page layout of the lightbox strip.

use serde::{Deserialize, Serialize};

/// How many images one slide holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One image per slide.
    #[default]
    Single,
    /// Two images per slide, paired `[0,1] [2,3] ...`.
    Spread,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Single => ViewMode::Spread,
            ViewMode::Spread => ViewMode::Single,
        }
    }

    /// Number of slides needed for `image_count` images.
    #[must_use]
    pub fn page_count(self, image_count: usize) -> usize {
        match self {
            ViewMode::Single => image_count,
            ViewMode::Spread => image_count.div_ceil(2),
        }
    }

    /// Maps a page index of `self` to the equivalent page of `target`.
    ///
    /// Flat index `i` belongs to pair `i / 2`; pair `p` starts at flat
    /// `min(2p, len - 1)`.
    #[must_use]
    pub fn convert_index(self, index: usize, target: ViewMode, image_count: usize) -> usize {
        match (self, target) {
            (ViewMode::Single, ViewMode::Spread) => index / 2,
            (ViewMode::Spread, ViewMode::Single) => {
                (index * 2).min(image_count.saturating_sub(1))
            }
            _ => index,
        }
    }
}

/// Order in which pages follow each other on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    /// Next page is to the right; swiping left advances.
    #[default]
    Ltr,
    /// Next page is to the left (row-reversed strip); swiping right advances.
    Rtl,
}

impl ReadingDirection {
    /// Sign of the strip's CSS `translateX` for a positive logical offset.
    #[must_use]
    pub fn translate_sign(self) -> f32 {
        match self {
            ReadingDirection::Ltr => -1.0,
            ReadingDirection::Rtl => 1.0,
        }
    }

    /// Page step implied by a horizontal finger displacement: `+1` for next,
    /// `-1` for previous, `0` for none.
    #[must_use]
    pub fn step_for_drag(self, dx: f32) -> isize {
        let forward = match self {
            ReadingDirection::Ltr => dx < 0.0,
            ReadingDirection::Rtl => dx > 0.0,
        };
        if dx == 0.0 {
            0
        } else if forward {
            1
        } else {
            -1
        }
    }
}
