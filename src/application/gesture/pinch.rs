// SPDX-License-Identifier: MPL-2.0
//! Two-finger pinch geometry.
//!
//! The point under the fingers' midpoint stays visually fixed while zooming:
//! `pan = mid - (mid0 - pan0) × (scale / scale0)`, with midpoints measured
//! from the viewport centre (the image's transform origin).

use crate::config::MIN_PINCH_DISTANCE_PX;
use crate::domain::geometry::{Point, Size};
use crate::domain::zoom::ZoomTransform;

/// Snapshot taken when the second finger lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    pub initial_distance: f32,
    pub initial_scale: f32,
    /// Midpoint relative to the viewport centre.
    pub initial_center: Point,
    pub initial_pan: Point,
}

impl PinchState {
    #[must_use]
    pub fn begin(a: Point, b: Point, zoom: ZoomTransform, viewport: Size) -> Self {
        Self {
            initial_distance: a.distance_to(b),
            initial_scale: zoom.scale,
            initial_center: a.midpoint(b) - viewport.center(),
            initial_pan: zoom.pan,
        }
    }

    /// Zoom for the current finger positions, scale clamped to `[min, max]`.
    ///
    /// Returns `None` when the fingers started at the same point; the frame
    /// is skipped.
    #[must_use]
    pub fn update(
        &self,
        a: Point,
        b: Point,
        viewport: Size,
        min_scale: f32,
        max_scale: f32,
    ) -> Option<ZoomTransform> {
        if self.initial_distance < MIN_PINCH_DISTANCE_PX || self.initial_scale <= 0.0 {
            return None;
        }
        let ratio = a.distance_to(b) / self.initial_distance;
        let scale = (self.initial_scale * ratio).clamp(min_scale, max_scale);
        let center = a.midpoint(b) - viewport.center();
        let factor = scale / self.initial_scale;
        let anchor = self.initial_center - self.initial_pan;
        let pan = Point::new(center.x - anchor.x * factor, center.y - anchor.y * factor);
        Some(ZoomTransform::new(scale, pan))
    }
}
