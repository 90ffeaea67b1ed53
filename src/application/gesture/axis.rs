// SPDX-License-Identifier: MPL-2.0
//! Single-finger axis lock and release decisions.

use super::GestureTuning;
use crate::config::{
    DISMISS_FADE_DISTANCE_PX, DISMISS_MIN_SLIDE_SCALE, DISMISS_SCALE_DISTANCE_PX, NEUTRAL_SCALE,
};
use crate::domain::geometry::Point;
use crate::domain::newtypes::Opacity;

/// Axis chosen for the rest of a single-finger gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl AxisLock {
    /// Locks an axis once movement passes `threshold`. A horizontal lock
    /// needs the horizontal component to dominate.
    #[must_use]
    pub fn resolve(delta: Point, threshold: f32) -> AxisLock {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax > ay && ax > threshold {
            AxisLock::Horizontal
        } else if ay > threshold {
            AxisLock::Vertical
        } else {
            AxisLock::None
        }
    }
}

/// Slide scale and backdrop opacity for a vertical pull of `dy`.
#[must_use]
pub fn dismiss_feedback(dy: f32) -> (f32, Opacity) {
    let distance = dy.abs();
    let scale = (NEUTRAL_SCALE - distance / DISMISS_SCALE_DISTANCE_PX).max(DISMISS_MIN_SLIDE_SCALE);
    let opacity = Opacity::new((1.0 - distance / DISMISS_FADE_DISTANCE_PX).max(0.0));
    (scale, opacity)
}

/// Strip displacement for a horizontal drag, damped past either end.
#[must_use]
pub fn resisted_offset(dx: f32, step: isize, index: usize, page_count: usize, tuning: &GestureTuning) -> f32 {
    let past_start = step < 0 && index == 0;
    let past_end = step > 0 && index + 1 >= page_count;
    if past_start || past_end {
        dx * tuning.edge_resistance
    } else {
        dx
    }
}

/// Whether a horizontal release commits to the adjacent page.
#[must_use]
pub fn commits_page(dx: f32, velocity: f32, tuning: &GestureTuning) -> bool {
    let distance = dx.abs();
    distance > tuning.page_commit_distance_px
        || (velocity > tuning.flick_velocity_px_per_ms && distance > tuning.page_commit_distance_px)
}

/// Whether a vertical release dismisses the viewer.
#[must_use]
pub fn commits_dismiss(dy: f32, velocity: f32, tuning: &GestureTuning) -> bool {
    let distance = dy.abs();
    distance > tuning.dismiss_distance_px
        || (velocity > tuning.flick_velocity_px_per_ms && distance > tuning.dismiss_flick_distance_px)
}

/// Speed in px/ms over the gesture, the duration floored at 1 ms.
#[must_use]
pub fn velocity(distance: f32, duration_ms: f64) -> f32 {
    // Gesture durations are short; f32 precision is plenty.
    #[allow(clippy::cast_possible_truncation)]
    let duration = duration_ms.max(1.0) as f32;
    distance.abs() / duration
}
