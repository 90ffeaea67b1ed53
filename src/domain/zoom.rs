// SPDX-License-Identifier: MPL-2.0
//! Pinch zoom and pan of the centred slide.

use crate::config::NEUTRAL_SCALE;
use crate::domain::geometry::Point;

/// Zoom factor and pan offset of the centred image.
///
/// Reset to [`ZoomTransform::NEUTRAL`] whenever the centred slide changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f32,
    pub pan: Point,
}

impl ZoomTransform {
    pub const NEUTRAL: ZoomTransform = ZoomTransform {
        scale: NEUTRAL_SCALE,
        pan: Point::ORIGIN,
    };

    #[must_use]
    pub const fn new(scale: f32, pan: Point) -> Self {
        Self { scale, pan }
    }

    /// True while magnified; paging and dismiss are suppressed.
    #[must_use]
    pub fn is_zoomed(self) -> bool {
        self.scale > NEUTRAL_SCALE
    }

    /// True while shrunk below neutral; bounces back on release.
    #[must_use]
    pub fn is_shrunk(self) -> bool {
        self.scale < NEUTRAL_SCALE
    }

    #[must_use]
    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }

    /// Same zoom with a different pan offset.
    #[must_use]
    pub fn with_pan(self, pan: Point) -> Self {
        Self { pan, ..self }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
