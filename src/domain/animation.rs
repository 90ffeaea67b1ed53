// SPDX-License-Identifier: MPL-2.0
//! CSS transform and transition values written to the overlay.
//!
//! The engine does not animate anything itself. It sets target values plus
//! the transition the browser should interpolate them with.

use crate::domain::geometry::Point;
use smallvec::SmallVec;
use std::fmt;

/// Timing function of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Ease,
    EaseOut,
    CubicBezier(f32, f32, f32, f32),
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Ease => f.write_str("ease"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Decelerating curve used for paging and the exit animation.
pub const PAGE_EASING: Easing = Easing::CubicBezier(0.2, 0.8, 0.2, 1.0);

/// Springier curve used when a pulled slide returns to rest.
pub const SNAP_BACK_EASING: Easing = Easing::CubicBezier(0.15, 0.9, 0.3, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    Transform,
    Opacity,
}

impl fmt::Display for AnimatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatedProperty::Transform => f.write_str("transform"),
            AnimatedProperty::Opacity => f.write_str("opacity"),
        }
    }
}

/// A single `<property> <duration> <easing>` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub property: AnimatedProperty,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Durations here are a few hundred ms, exact in f32.
        #[allow(clippy::cast_precision_loss)]
        let secs = self.duration_ms as f32 / 1000.0;
        write!(f, "{} {secs}s {}", self.property, self.easing)
    }
}

/// Value of an element's `transition` style. Empty means `none`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionList(SmallVec<[Transition; 2]>);

impl TransitionList {
    /// Disabled transition; value changes apply immediately.
    #[must_use]
    pub fn none() -> Self {
        Self(SmallVec::new())
    }

    fn of(entries: &[Transition]) -> Self {
        Self(entries.iter().copied().collect())
    }

    /// Strip paging transition.
    #[must_use]
    pub fn page() -> Self {
        Self::of(&[Transition {
            property: AnimatedProperty::Transform,
            duration_ms: 300,
            easing: PAGE_EASING,
        }])
    }

    /// Slide returning to rest after an aborted dismiss.
    #[must_use]
    pub fn snap_back() -> Self {
        Self::of(&[Transition {
            property: AnimatedProperty::Transform,
            duration_ms: 350,
            easing: SNAP_BACK_EASING,
        }])
    }

    /// Image returning to neutral zoom.
    #[must_use]
    pub fn zoom_reset() -> Self {
        Self::of(&[Transition {
            property: AnimatedProperty::Transform,
            duration_ms: 300,
            easing: Easing::EaseOut,
        }])
    }

    /// Slide flying back to its origin while fading out.
    #[must_use]
    pub fn exit() -> Self {
        Self::of(&[
            Transition {
                property: AnimatedProperty::Transform,
                duration_ms: 1000,
                easing: PAGE_EASING,
            },
            Transition {
                property: AnimatedProperty::Opacity,
                duration_ms: 1000,
                easing: Easing::Ease,
            },
        ])
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Longest duration in the list, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.0.iter().map(|t| t.duration_ms).max().unwrap_or(0)
    }
}

impl fmt::Display for TransitionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, transition) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{transition}")?;
        }
        Ok(())
    }
}

/// `translate(x, y) scale(s)` applied to a slide or image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Point::ORIGIN,
        scale: 1.0,
    };

    #[must_use]
    pub const fn new(translate: Point, scale: f32) -> Self {
        Self { translate, scale }
    }

    #[must_use]
    pub const fn scale(scale: f32) -> Self {
        Self {
            translate: Point::ORIGIN,
            scale,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.translate == Point::ORIGIN {
            return write!(f, "scale({})", self.scale);
        }
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}
