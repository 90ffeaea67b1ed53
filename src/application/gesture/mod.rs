// SPDX-License-Identifier: MPL-2.0
//! Touch gesture interpretation.
//!
//! [`GestureInterpreter`] consumes raw touch events while a session is open
//! and turns them into [`GestureEffect`]s: live transform updates during the
//! gesture and one committed action when it ends. It never mutates the
//! session; the lifecycle controller applies the effects.
//!
//! # Single finger
//!
//! Movement below the lock threshold on both axes leaves the gesture
//! undetermined. Once an axis locks it stays locked until release:
//!
//! - horizontal: the strip follows the finger (damped past either end) and a
//!   release beyond the commit distance pages in the swipe direction;
//! - vertical: the slide follows and shrinks, the backdrop fades, and a
//!   release beyond the dismiss distance (or a flick) closes the viewer.
//!
//! A release that never locked and barely moved is a tap.
//!
//! # Two fingers
//!
//! While exactly two touches are down the gesture is a pinch. After the
//! pinch, a zoomed image is panned by the remaining finger and paging is
//! suppressed until the scale returns to neutral.

mod axis;
mod pinch;

pub use axis::AxisLock;
pub use pinch::PinchState;

use crate::config::{
    DEFAULT_AXIS_LOCK_THRESHOLD_PX, DEFAULT_DISMISS_DISTANCE_PX, DEFAULT_DISMISS_FLICK_DISTANCE_PX,
    DEFAULT_EDGE_RESISTANCE, DEFAULT_FLICK_VELOCITY_PX_PER_MS, DEFAULT_MAX_PINCH_SCALE,
    DEFAULT_MIN_PINCH_SCALE, DEFAULT_PAGE_COMMIT_DISTANCE_PX, DEFAULT_ZOOM_SNAP_BACK_SCALE,
};
use crate::domain::geometry::{Point, Size};
use crate::domain::layout::ReadingDirection;
use crate::domain::newtypes::Opacity;
use crate::domain::time::Timestamp;
use crate::domain::zoom::ZoomTransform;
use smallvec::SmallVec;

/// Empirical gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTuning {
    pub axis_lock_threshold_px: f32,
    pub page_commit_distance_px: f32,
    pub flick_velocity_px_per_ms: f32,
    pub dismiss_distance_px: f32,
    pub dismiss_flick_distance_px: f32,
    pub edge_resistance: f32,
    pub min_pinch_scale: f32,
    pub max_pinch_scale: f32,
    pub zoom_snap_back_scale: f32,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            axis_lock_threshold_px: DEFAULT_AXIS_LOCK_THRESHOLD_PX,
            page_commit_distance_px: DEFAULT_PAGE_COMMIT_DISTANCE_PX,
            flick_velocity_px_per_ms: DEFAULT_FLICK_VELOCITY_PX_PER_MS,
            dismiss_distance_px: DEFAULT_DISMISS_DISTANCE_PX,
            dismiss_flick_distance_px: DEFAULT_DISMISS_FLICK_DISTANCE_PX,
            edge_resistance: DEFAULT_EDGE_RESISTANCE,
            min_pinch_scale: DEFAULT_MIN_PINCH_SCALE,
            max_pinch_scale: DEFAULT_MAX_PINCH_SCALE,
            zoom_snap_back_scale: DEFAULT_ZOOM_SNAP_BACK_SCALE,
        }
    }
}

/// Touch points, usually one or two.
pub type TouchPoints = SmallVec<[Point; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Overlay region an event started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapTarget {
    /// The image area or backdrop.
    #[default]
    Content,
    /// Spread toggle and other top controls.
    Controls,
    ActionBar,
    NavButton,
}

impl TapTarget {
    /// Taps on interactive UI are left to that UI's own handler.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        !matches!(self, TapTarget::Content)
    }
}

/// One touch event as delivered by the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    /// Touches still on the surface after the event (`TouchEvent.touches`).
    pub touches: TouchPoints,
    /// Touches that changed in this event (`TouchEvent.changedTouches`).
    pub changed: TouchPoints,
    pub timestamp: Timestamp,
    pub target: TapTarget,
}

impl TouchInput {
    /// First finger (or fingers) landing.
    #[must_use]
    pub fn start(touches: &[Point], timestamp: Timestamp) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches: touches.iter().copied().collect(),
            changed: touches.iter().copied().collect(),
            timestamp,
            target: TapTarget::Content,
        }
    }

    #[must_use]
    pub fn moved(touches: &[Point], timestamp: Timestamp) -> Self {
        Self {
            phase: TouchPhase::Move,
            touches: touches.iter().copied().collect(),
            changed: touches.iter().copied().collect(),
            timestamp,
            target: TapTarget::Content,
        }
    }

    /// Fingers in `lifted` left the surface; `remaining` are still down.
    #[must_use]
    pub fn end(lifted: &[Point], remaining: &[Point], timestamp: Timestamp) -> Self {
        Self {
            phase: TouchPhase::End,
            touches: remaining.iter().copied().collect(),
            changed: lifted.iter().copied().collect(),
            timestamp,
            target: TapTarget::Content,
        }
    }

    #[must_use]
    pub fn cancel(timestamp: Timestamp) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            touches: TouchPoints::new(),
            changed: TouchPoints::new(),
            timestamp,
            target: TapTarget::Content,
        }
    }

    #[must_use]
    pub fn on(mut self, target: TapTarget) -> Self {
        self.target = target;
        self
    }
}

/// Session state the interpreter reads but does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub current_index: usize,
    pub page_count: usize,
    pub zoom: ZoomTransform,
    pub viewport: Size,
    pub direction: ReadingDirection,
}

/// What the controller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    /// A new gesture began: stop in-flight transitions.
    Interrupt,
    /// Strip follows the finger by `offset` px.
    StripDrag { offset: f32 },
    /// Current slide follows a vertical pull.
    DismissDrag {
        dy: f32,
        slide_scale: f32,
        backdrop_opacity: Opacity,
    },
    /// New pinch or pan transform, applied without transition.
    Zoom(ZoomTransform),
    /// Go to `target_index`.
    CommitPage { target_index: usize },
    /// Return the strip to the current page.
    SnapBack,
    /// Close the viewer.
    CommitDismiss,
    /// Return the slide to rest and restore the backdrop.
    CancelDismiss,
    /// Animate back to neutral zoom.
    ZoomReset,
    /// Released without moving.
    Tap(TapTarget),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOutcome {
    pub effect: GestureEffect,
    /// Whether the adapter should call `preventDefault` on the event.
    pub prevent_default: bool,
}

impl GestureOutcome {
    const IGNORED: GestureOutcome = GestureOutcome {
        effect: GestureEffect::None,
        prevent_default: false,
    };

    fn passive(effect: GestureEffect) -> Self {
        Self {
            effect,
            prevent_default: false,
        }
    }

    fn captured(effect: GestureEffect) -> Self {
        Self {
            effect,
            prevent_default: true,
        }
    }
}

/// Per-gesture state, reset at every first-finger touch start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub start: Point,
    pub start_time: Timestamp,
    pub axis: AxisLock,
    pub start_pan: Point,
    pub pinch: Option<PinchState>,
    /// A pinch happened during this touch sequence.
    pub pinched: bool,
}

impl GestureState {
    fn new(start: Point, start_time: Timestamp, zoom: ZoomTransform) -> Self {
        Self {
            start,
            start_time,
            axis: AxisLock::None,
            start_pan: zoom.pan,
            pinch: None,
            pinched: false,
        }
    }
}

/// Touch state machine of the open session.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    tuning: GestureTuning,
    state: Option<GestureState>,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(tuning: GestureTuning) -> Self {
        Self {
            tuning,
            state: None,
        }
    }

    #[must_use]
    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: GestureTuning) {
        self.tuning = tuning;
    }

    /// Current gesture, if a finger is down.
    #[must_use]
    pub fn state(&self) -> Option<&GestureState> {
        self.state.as_ref()
    }

    /// Drops any gesture in progress.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Handles one touch event.
    pub fn handle(&mut self, input: &TouchInput, ctx: &GestureContext) -> GestureOutcome {
        match input.phase {
            TouchPhase::Start => self.on_start(input, ctx),
            TouchPhase::Move => self.on_move(input, ctx),
            TouchPhase::End => self.on_end(input, ctx),
            TouchPhase::Cancel => self.on_cancel(ctx),
        }
    }

    fn on_start(&mut self, input: &TouchInput, ctx: &GestureContext) -> GestureOutcome {
        match input.touches.as_slice() {
            [finger] => {
                self.state = Some(GestureState::new(*finger, input.timestamp, ctx.zoom));
                GestureOutcome::passive(GestureEffect::Interrupt)
            }
            [a, b] => {
                let state = self
                    .state
                    .get_or_insert_with(|| GestureState::new(a.midpoint(*b), input.timestamp, ctx.zoom));
                // A drag in progress is abandoned and put back at rest.
                let effect = match std::mem::replace(&mut state.axis, AxisLock::None) {
                    AxisLock::Horizontal => GestureEffect::SnapBack,
                    AxisLock::Vertical => GestureEffect::CancelDismiss,
                    AxisLock::None => GestureEffect::Interrupt,
                };
                state.pinch = Some(PinchState::begin(*a, *b, ctx.zoom, ctx.viewport));
                state.pinched = true;
                tracing::trace!(scale = ctx.zoom.scale, ?effect, "pinch started");
                GestureOutcome::passive(effect)
            }
            _ => GestureOutcome::IGNORED,
        }
    }

    fn on_move(&mut self, input: &TouchInput, ctx: &GestureContext) -> GestureOutcome {
        let tuning = self.tuning;
        let Some(state) = self.state.as_mut() else {
            return GestureOutcome::IGNORED;
        };

        if let (Some(pinch), [a, b]) = (state.pinch, input.touches.as_slice()) {
            let effect = pinch
                .update(*a, *b, ctx.viewport, tuning.min_pinch_scale, tuning.max_pinch_scale)
                .map_or(GestureEffect::None, GestureEffect::Zoom);
            return GestureOutcome::captured(effect);
        }

        let [finger] = input.touches.as_slice() else {
            return GestureOutcome::IGNORED;
        };
        let delta = *finger - state.start;

        if ctx.zoom.is_zoomed() {
            let pan = state.start_pan + delta;
            return GestureOutcome::captured(GestureEffect::Zoom(ctx.zoom.with_pan(pan)));
        }
        if state.pinched {
            // Leftover finger of a pinch that snapped back: no paging.
            return GestureOutcome::captured(GestureEffect::None);
        }

        if state.axis == AxisLock::None {
            state.axis = AxisLock::resolve(delta, tuning.axis_lock_threshold_px);
            if state.axis != AxisLock::None {
                tracing::trace!(axis = ?state.axis, "axis locked");
            }
        }

        match state.axis {
            AxisLock::Horizontal => {
                let step = ctx.direction.step_for_drag(delta.x);
                let offset =
                    axis::resisted_offset(delta.x, step, ctx.current_index, ctx.page_count, &tuning);
                GestureOutcome::captured(GestureEffect::StripDrag { offset })
            }
            AxisLock::Vertical => {
                let (slide_scale, backdrop_opacity) = axis::dismiss_feedback(delta.y);
                GestureOutcome::captured(GestureEffect::DismissDrag {
                    dy: delta.y,
                    slide_scale,
                    backdrop_opacity,
                })
            }
            AxisLock::None => GestureOutcome::IGNORED,
        }
    }

    fn on_end(&mut self, input: &TouchInput, ctx: &GestureContext) -> GestureOutcome {
        let tuning = self.tuning;
        let Some(mut state) = self.state else {
            return GestureOutcome::IGNORED;
        };

        if state.pinch.is_some() {
            if input.touches.len() >= 2 {
                return GestureOutcome::IGNORED;
            }
            state.pinch = None;
            let snap_back = ctx.zoom.scale <= tuning.zoom_snap_back_scale;
            if let [finger] = input.touches.as_slice() {
                // Remaining finger pans from here.
                state.start = *finger;
                state.start_pan = ctx.zoom.pan;
                state.start_time = input.timestamp;
                self.state = Some(state);
            } else {
                self.state = None;
            }
            return if snap_back {
                tracing::trace!(scale = ctx.zoom.scale, "pinch released near neutral");
                GestureOutcome::passive(GestureEffect::ZoomReset)
            } else {
                GestureOutcome::IGNORED
            };
        }

        if !input.touches.is_empty() {
            return GestureOutcome::IGNORED;
        }
        self.state = None;

        if ctx.zoom.is_zoomed() {
            return GestureOutcome::IGNORED;
        }
        if ctx.zoom.is_shrunk() {
            return GestureOutcome::passive(GestureEffect::ZoomReset);
        }
        if state.pinched {
            return GestureOutcome::IGNORED;
        }

        let end = input.changed.first().copied().unwrap_or(state.start);
        let delta = end - state.start;
        let duration = input.timestamp.millis_since(state.start_time);

        let effect = match state.axis {
            AxisLock::Horizontal => {
                let velocity = axis::velocity(delta.x, duration);
                let step = ctx.direction.step_for_drag(delta.x);
                let target = ctx.current_index.checked_add_signed(step);
                match target {
                    Some(target_index)
                        if axis::commits_page(delta.x, velocity, &tuning)
                            && target_index < ctx.page_count =>
                    {
                        GestureEffect::CommitPage { target_index }
                    }
                    _ => GestureEffect::SnapBack,
                }
            }
            AxisLock::Vertical => {
                let velocity = axis::velocity(delta.y, duration);
                if axis::commits_dismiss(delta.y, velocity, &tuning) {
                    GestureEffect::CommitDismiss
                } else {
                    GestureEffect::CancelDismiss
                }
            }
            AxisLock::None => {
                let threshold = tuning.axis_lock_threshold_px;
                if delta.x.abs() < threshold && delta.y.abs() < threshold {
                    GestureEffect::Tap(input.target)
                } else {
                    GestureEffect::None
                }
            }
        };
        GestureOutcome::passive(effect)
    }

    fn on_cancel(&mut self, ctx: &GestureContext) -> GestureOutcome {
        let Some(state) = self.state.take() else {
            return GestureOutcome::IGNORED;
        };
        let effect = if state.pinch.is_some() {
            if ctx.zoom.scale <= self.tuning.zoom_snap_back_scale {
                GestureEffect::ZoomReset
            } else {
                GestureEffect::None
            }
        } else if ctx.zoom.is_shrunk() {
            GestureEffect::ZoomReset
        } else {
            match state.axis {
                AxisLock::Horizontal => GestureEffect::SnapBack,
                AxisLock::Vertical => GestureEffect::CancelDismiss,
                AxisLock::None => GestureEffect::None,
            }
        };
        GestureOutcome::passive(effect)
    }
}
