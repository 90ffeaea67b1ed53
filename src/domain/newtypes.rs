// SPDX-License-Identifier: MPL-2.0
//! Lightbox newtypes.
//!
//! This module provides type-safe wrappers for values that must stay within a
//! valid range, so usage sites never clamp by hand.

use crate::config::{
    DEFAULT_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS, MIN_CONTROLS_HIDE_DELAY_MS,
};

// =============================================================================
// ControlsTimeout
// =============================================================================

/// Auto-hide delay of the lightbox controls in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (500–30000 ms).
///
/// # Example
///
/// ```
/// use x_lightbox::domain::newtypes::ControlsTimeout;
///
/// let timeout = ControlsTimeout::new(3000);
/// assert_eq!(timeout.value(), 3000);
///
/// // Values outside range are clamped
/// let too_low = ControlsTimeout::new(10);
/// assert_eq!(too_low.value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsTimeout(u32);

impl ControlsTimeout {
    /// Creates a new timeout value, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the value as a timer delay.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        u64::from(self.0)
    }
}

impl Default for ControlsTimeout {
    fn default() -> Self {
        Self(DEFAULT_CONTROLS_HIDE_DELAY_MS)
    }
}

// =============================================================================
// Opacity
// =============================================================================

/// CSS opacity, guaranteed to be within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity(f32);

impl Opacity {
    pub const OPAQUE: Opacity = Opacity(1.0);
    pub const TRANSPARENT: Opacity = Opacity(0.0);

    /// Creates an opacity, clamping to `[0, 1]`. NaN maps to opaque.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::OPAQUE;
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}
