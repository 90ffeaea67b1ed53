// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gesture**: Axis lock, commit and dismiss thresholds
//! - **Zoom**: Pinch scale bounds and snap-back
//! - **Dismiss feedback**: How a vertical drag shrinks and fades the viewer
//! - **Controls**: Auto-hide delay bounds
//! - **Timing**: Fixed animation and proxy delays

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Movement (in px) a finger must travel before an axis is locked.
pub const DEFAULT_AXIS_LOCK_THRESHOLD_PX: f32 = 10.0;

/// Horizontal displacement (in px) that commits a page change.
pub const DEFAULT_PAGE_COMMIT_DISTANCE_PX: f32 = 50.0;

/// Release velocity (px/ms) above which a gesture counts as a flick.
pub const DEFAULT_FLICK_VELOCITY_PX_PER_MS: f32 = 0.5;

/// Vertical displacement (in px) that dismisses the viewer on its own.
pub const DEFAULT_DISMISS_DISTANCE_PX: f32 = 80.0;

/// Vertical displacement (in px) that dismisses the viewer when flicked.
pub const DEFAULT_DISMISS_FLICK_DISTANCE_PX: f32 = 60.0;

/// Multiplier applied to the drag delta past the first or last page.
pub const DEFAULT_EDGE_RESISTANCE: f32 = 0.4;

/// Lower bound accepted for any configured pixel threshold.
pub const MIN_THRESHOLD_PX: f32 = 1.0;

/// Upper bound accepted for any configured pixel threshold.
pub const MAX_THRESHOLD_PX: f32 = 1000.0;

/// Lower bound accepted for the flick velocity.
pub const MIN_FLICK_VELOCITY_PX_PER_MS: f32 = 0.05;

/// Upper bound accepted for the flick velocity.
pub const MAX_FLICK_VELOCITY_PX_PER_MS: f32 = 10.0;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Neutral zoom factor of a slide.
pub const NEUTRAL_SCALE: f32 = 1.0;

/// Smallest scale reachable while pinching (bounces back on release).
pub const DEFAULT_MIN_PINCH_SCALE: f32 = 0.5;

/// Largest scale reachable while pinching.
pub const DEFAULT_MAX_PINCH_SCALE: f32 = 8.0;

/// Scales at or below this value snap back to neutral when a pinch ends.
pub const DEFAULT_ZOOM_SNAP_BACK_SCALE: f32 = 1.05;

/// Pinch distances below this are treated as degenerate (fingers together).
pub const MIN_PINCH_DISTANCE_PX: f32 = 0.5;

// ==========================================================================
// Dismiss Feedback Defaults
// ==========================================================================

/// Smallest scale of the slide while it is pulled towards dismissal.
pub const DISMISS_MIN_SLIDE_SCALE: f32 = 0.6;

/// Pull distance over which the slide would shrink to zero.
pub const DISMISS_SCALE_DISTANCE_PX: f32 = 1000.0;

/// Pull distance over which the backdrop fades to transparent.
pub const DISMISS_FADE_DISTANCE_PX: f32 = 500.0;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default auto-hide delay for the lightbox controls (in milliseconds).
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u32 = 3000;

/// Minimum controls auto-hide delay (in milliseconds).
pub const MIN_CONTROLS_HIDE_DELAY_MS: u32 = 500;

/// Maximum controls auto-hide delay (in milliseconds).
pub const MAX_CONTROLS_HIDE_DELAY_MS: u32 = 30_000;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Delay between inserting the overlay and applying the entry transition.
pub const ENTRY_SETTLE_DELAY_MS: u64 = 10;

/// Duration of the exit animation; the overlay is removed afterwards.
pub const CLOSE_REMOVAL_DELAY_MS: u64 = 1000;

/// Delay before clicking the host reply button once the viewer closes.
pub const REPLY_CLICK_DELAY_MS: u64 = 100;

/// Delay before confirming a retweet in the host menu.
pub const RETWEET_CONFIRM_DELAY_MS: u64 = 200;

/// Delay before picking an item in the host share menu.
pub const SHARE_MENU_DELAY_MS: u64 = 200;

/// Delay before re-reading action state after a like or bookmark.
pub const TOGGLE_REFRESH_DELAY_MS: u64 = 100;

/// Delay before re-reading action state after a retweet.
pub const RETWEET_REFRESH_DELAY_MS: u64 = 400;

/// How long an action button shows its pressed feedback.
pub const BUTTON_PRESS_DURATION_MS: u64 = 200;

// ==========================================================================
// Close Animation Defaults
// ==========================================================================

/// Scale of the fallback exit animation when the origin image is gone.
pub const CLOSE_FALLBACK_SCALE: f32 = 0.8;

/// Smallest scale the slide shrinks to when flying back to its origin.
pub const CLOSE_MIN_TARGET_SCALE: f32 = 0.1;

// ==========================================================================
// Image Defaults
// ==========================================================================

/// Size token requesting the largest variant of a media image.
pub const DEFAULT_HIGH_RES_TOKEN: &str = "large";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Gesture validation
    assert!(DEFAULT_AXIS_LOCK_THRESHOLD_PX >= MIN_THRESHOLD_PX);
    assert!(DEFAULT_AXIS_LOCK_THRESHOLD_PX < DEFAULT_PAGE_COMMIT_DISTANCE_PX);
    assert!(DEFAULT_DISMISS_FLICK_DISTANCE_PX <= DEFAULT_DISMISS_DISTANCE_PX);
    assert!(DEFAULT_DISMISS_DISTANCE_PX <= MAX_THRESHOLD_PX);
    assert!(DEFAULT_EDGE_RESISTANCE > 0.0);
    assert!(DEFAULT_EDGE_RESISTANCE <= 1.0);
    assert!(DEFAULT_FLICK_VELOCITY_PX_PER_MS >= MIN_FLICK_VELOCITY_PX_PER_MS);
    assert!(DEFAULT_FLICK_VELOCITY_PX_PER_MS <= MAX_FLICK_VELOCITY_PX_PER_MS);

    // Zoom validation
    assert!(DEFAULT_MIN_PINCH_SCALE > 0.0);
    assert!(DEFAULT_MIN_PINCH_SCALE < NEUTRAL_SCALE);
    assert!(DEFAULT_MAX_PINCH_SCALE > NEUTRAL_SCALE);
    assert!(DEFAULT_ZOOM_SNAP_BACK_SCALE >= NEUTRAL_SCALE);
    assert!(DEFAULT_ZOOM_SNAP_BACK_SCALE < DEFAULT_MAX_PINCH_SCALE);

    // Dismiss feedback validation
    assert!(DISMISS_MIN_SLIDE_SCALE > 0.0);
    assert!(DISMISS_MIN_SLIDE_SCALE < NEUTRAL_SCALE);

    // Controls validation
    assert!(MIN_CONTROLS_HIDE_DELAY_MS > 0);
    assert!(MAX_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS <= MAX_CONTROLS_HIDE_DELAY_MS);

    // Close animation validation
    assert!(CLOSE_MIN_TARGET_SCALE > 0.0);
    assert!(CLOSE_FALLBACK_SCALE < NEUTRAL_SCALE);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_defaults_are_valid() {
        assert_eq!(DEFAULT_AXIS_LOCK_THRESHOLD_PX, 10.0);
        assert_eq!(DEFAULT_PAGE_COMMIT_DISTANCE_PX, 50.0);
        assert_eq!(DEFAULT_FLICK_VELOCITY_PX_PER_MS, 0.5);
    }

    #[test]
    fn dismiss_defaults_are_valid() {
        assert_eq!(DEFAULT_DISMISS_DISTANCE_PX, 80.0);
        assert_eq!(DEFAULT_DISMISS_FLICK_DISTANCE_PX, 60.0);
        assert!(DEFAULT_DISMISS_FLICK_DISTANCE_PX < DEFAULT_DISMISS_DISTANCE_PX);
    }

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(DEFAULT_MIN_PINCH_SCALE, 0.5);
        assert_eq!(DEFAULT_MAX_PINCH_SCALE, 8.0);
        assert!(DEFAULT_ZOOM_SNAP_BACK_SCALE > NEUTRAL_SCALE);
    }

    #[test]
    fn controls_defaults_are_valid() {
        assert_eq!(DEFAULT_CONTROLS_HIDE_DELAY_MS, 3000);
        assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
        assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS <= MAX_CONTROLS_HIDE_DELAY_MS);
    }
}
