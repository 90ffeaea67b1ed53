// SPDX-License-Identifier: MPL-2.0
//! Lightbox session lifecycle.
//!
//! [`LightboxController`] owns the single [`LightboxSession`] and is the only
//! thing the browser adapter talks to. Each input class has one entry point:
//!
//! | Input                     | Entry point                              |
//! |---------------------------|------------------------------------------|
//! | click on the page         | [`on_click`](LightboxController::on_click) |
//! | touch on the overlay      | [`on_touch`](LightboxController::on_touch) |
//! | overlay buttons           | [`on_control`](LightboxController::on_control) |
//! | `popstate`                | [`on_history_pop`](LightboxController::on_history_pop) |
//! | viewport resize           | [`on_resize`](LightboxController::on_resize) |
//! | timer wake-up             | [`tick`](LightboxController::tick)       |
//! | settings change           | [`apply_config`](LightboxController::apply_config) |
//!
//! After each call the adapter re-renders [`Overlay`] and arms a wake-up for
//! [`next_deadline`](LightboxController::next_deadline).
//!
//! # Phases
//!
//! `Closed → Opening → Open → Closing → Closed`. Opening lasts until the
//! entry transition is applied; Closing until the exit animation is over
//! and the overlay is removed. Open and close requests in the wrong phase
//! are no-ops.

use crate::application::collector::{self, Scope};
use crate::application::controls::{self, ControlsState, NavButton};
use crate::application::gesture::{
    GestureContext, GestureEffect, GestureInterpreter, GestureOutcome, TouchInput,
};
use crate::application::history::HistoryCoordinator;
use crate::application::interaction_bar::{self, Action, ActionBarState};
use crate::application::overlay::{ActionBarView, Overlay};
use crate::application::port::{HostEnvironment, HostPage};
use crate::application::timers::{TimerKind, TimerQueue, TimerSlot};
use crate::application::viewport::Viewport;
use crate::config::{
    Config, CLOSE_FALLBACK_SCALE, CLOSE_MIN_TARGET_SCALE, CLOSE_REMOVAL_DELAY_MS,
    ENTRY_SETTLE_DELAY_MS,
};
use crate::domain::animation::{Transform, TransitionList};
use crate::domain::geometry::Point;
use crate::domain::image::ImageList;
use crate::domain::newtypes::Opacity;
use crate::domain::node::NodeId;
use crate::domain::time::Timestamp;
use crate::domain::zoom::ZoomTransform;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl LifecyclePhase {
    /// Whether the overlay takes input.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, LifecyclePhase::Opening | LifecyclePhase::Open)
    }
}

/// What the adapter does with a page click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Call `preventDefault` and `stopPropagation`: the lightbox handles it.
    Intercepted,
    /// Let the host handle the click.
    Ignored,
}

/// What the adapter does with a `popstate` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopDisposition {
    /// Our own `history.back()`; swallow it.
    Echo,
    /// The pop closed the lightbox; swallow it.
    ClosedLightbox,
    /// Not ours: hand it to the page navigation animator.
    Forward,
}

/// Buttons of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    Nav(NavButton),
    ToggleSpread,
    Action(Action),
}

/// State of one open lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxSession {
    images: ImageList,
    scope: Scope,
    viewport: Viewport,
    zoom: ZoomTransform,
    controls: ControlsState,
    /// A history entry was pushed and not yet popped.
    history_tag: bool,
    action_bar: Option<ActionBarState>,
    pressed: Option<Action>,
}

impl LightboxSession {
    #[must_use]
    pub fn images(&self) -> &ImageList {
        &self.images
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    #[must_use]
    pub fn controls(&self) -> &ControlsState {
        &self.controls
    }

    #[must_use]
    pub fn action_bar(&self) -> Option<ActionBarState> {
        self.action_bar
    }

    #[must_use]
    pub fn pressed_action(&self) -> Option<Action> {
        self.pressed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.viewport.current_index()
    }

    fn current_post(&self) -> Option<NodeId> {
        self.viewport
            .primary_entry(&self.images)
            .and_then(|entry| entry.post)
    }

    fn action_bar_view(&self) -> Option<ActionBarView> {
        self.action_bar.map(|state| ActionBarView {
            state,
            pressed: self.pressed,
        })
    }
}

/// Transform that sends the closing slide back to `origin`.
///
/// Aims at the origin image when it is attached, has a size and sits in a
/// plausible region around the viewport; else shrinks in place.
pub fn close_target(page: &impl HostPage, origin: NodeId) -> Transform {
    let viewport = page.viewport();
    match page.bounding_rect(origin) {
        Some(rect)
            if rect.has_area()
                && viewport.width > 0.0
                && rect.top > -viewport.height
                && rect.top < viewport.height * 2.0 =>
        {
            let translate = rect.center() - viewport.center();
            let scale = (rect.width / viewport.width).max(CLOSE_MIN_TARGET_SCALE);
            Transform::new(translate, scale)
        }
        _ => Transform::scale(CLOSE_FALLBACK_SCALE),
    }
}

/// Timers that die with the session. Post action follow-ups outlive it.
const SESSION_TIMERS: [TimerSlot; 4] = [
    TimerSlot::EntrySettle,
    TimerSlot::ControlsHide,
    TimerSlot::ActionRefresh,
    TimerSlot::PressRelease,
];

/// Owner of the lightbox session and its collaborators.
#[derive(Debug)]
pub struct LightboxController {
    config: Config,
    phase: LifecyclePhase,
    session: Option<LightboxSession>,
    overlay: Option<Overlay>,
    gesture: GestureInterpreter,
    timers: TimerQueue,
    history: HistoryCoordinator,
}

impl LightboxController {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let gesture = GestureInterpreter::new(config.gesture.tuning());
        Self {
            config,
            phase: LifecyclePhase::Closed,
            session: None,
            overlay: None,
            gesture,
            timers: TimerQueue::new(),
            history: HistoryCoordinator::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> Option<&LightboxSession> {
        self.session.as_ref()
    }

    /// Overlay to render, `None` when nothing is inserted.
    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// When the adapter should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    /// Capture-phase click handler for the host page.
    pub fn on_click(
        &mut self,
        host: &mut impl HostEnvironment,
        target: NodeId,
        now: Timestamp,
    ) -> ClickDisposition {
        if !self.config.features.enable_lightbox || !collector::qualifies_as_trigger(&*host, target) {
            return ClickDisposition::Ignored;
        }
        // Swallowed even while a session is up.
        self.open(host, target, now);
        ClickDisposition::Intercepted
    }

    /// Opens a session for `trigger`. Returns whether one was opened.
    pub fn open(&mut self, host: &mut impl HostEnvironment, trigger: NodeId, now: Timestamp) -> bool {
        if !self.config.features.enable_lightbox {
            tracing::debug!("lightbox disabled, open ignored");
            return false;
        }
        if self.phase == LifecyclePhase::Closing {
            self.teardown();
        }
        if self.phase != LifecyclePhase::Closed {
            tracing::debug!(phase = ?self.phase, "open ignored");
            return false;
        }

        let lightbox = &self.config.lightbox;
        let Some(collection) = collector::collect(&*host, trigger, lightbox.high_res_token()) else {
            tracing::warn!(%trigger, "trigger has no source, open ignored");
            return false;
        };

        self.history.push_session_entry(host);

        let viewport = Viewport::render(
            &collection.images,
            collection.initial_index,
            lightbox.default_view_mode(),
            lightbox.reading_direction(),
            host.viewport().width,
        );
        let controls = ControlsState::new(lightbox.controls_timeout());
        let overlay = Overlay::inserted(&viewport, collection.images.len(), controls.is_visible());

        tracing::info!(
            images = collection.images.len(),
            initial_index = collection.initial_index,
            scope = ?collection.scope,
            fell_back = collection.fell_back,
            "lightbox opening"
        );

        self.session = Some(LightboxSession {
            images: collection.images,
            scope: collection.scope,
            viewport,
            zoom: ZoomTransform::NEUTRAL,
            controls,
            history_tag: true,
            action_bar: None,
            pressed: None,
        });
        self.overlay = Some(overlay);
        self.refresh_action_bar(&*host);
        self.gesture.reset();
        self.phase = LifecyclePhase::Opening;
        self.timers
            .schedule(TimerKind::EntrySettle, now, ENTRY_SETTLE_DELAY_MS);
        true
    }

    /// Closes the session. Returns whether a close started.
    ///
    /// `caused_by_history` is set when the user already popped the session
    /// entry; otherwise the entry is popped here.
    pub fn close(
        &mut self,
        host: &mut impl HostEnvironment,
        caused_by_history: bool,
        now: Timestamp,
    ) -> bool {
        match self.phase {
            LifecyclePhase::Closed | LifecyclePhase::Closing => return false,
            LifecyclePhase::Opening if caused_by_history => {
                tracing::debug!("history pop during entry, removing overlay");
                self.teardown();
                return true;
            }
            LifecyclePhase::Opening | LifecyclePhase::Open => {}
        }

        let Some(session) = self.session.as_mut() else {
            self.teardown();
            return true;
        };

        let index = session.viewport.current_index();
        let target = session
            .viewport
            .primary_entry(&session.images)
            .map_or(Transform::scale(CLOSE_FALLBACK_SCALE), |entry| {
                close_target(&*host, entry.origin)
            });
        let pop_entry = !caused_by_history && session.history_tag;
        session.history_tag = false;
        session.zoom = ZoomTransform::NEUTRAL;

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.active = false;
            overlay.pointer_events = false;
            if let Some(slide) = overlay.slide_mut(index) {
                slide.transition = TransitionList::exit();
                slide.transform = target;
                slide.opacity = Opacity::TRANSPARENT;
            }
        }

        for slot in SESSION_TIMERS {
            self.timers.cancel(slot);
        }
        self.gesture.reset();

        if pop_entry {
            self.history.programmatic_back(host);
        }

        tracing::info!(caused_by_history, transform = %target, "lightbox closing");
        self.phase = LifecyclePhase::Closing;
        self.timers
            .schedule(TimerKind::OverlayRemoval, now, CLOSE_REMOVAL_DELAY_MS);
        true
    }

    /// `popstate` handler.
    pub fn on_history_pop(&mut self, host: &mut impl HostEnvironment, now: Timestamp) -> PopDisposition {
        if self.history.take_echo().is_some() {
            tracing::debug!("history pop is our own back");
            return PopDisposition::Echo;
        }
        if self.phase.is_interactive() {
            self.close(host, true, now);
            return PopDisposition::ClosedLightbox;
        }
        PopDisposition::Forward
    }

    /// Touch handler for the overlay. The outcome tells the adapter whether
    /// to `preventDefault`.
    pub fn on_touch(&mut self, host: &mut impl HostEnvironment, input: &TouchInput) -> GestureOutcome {
        let ignored = GestureOutcome {
            effect: GestureEffect::None,
            prevent_default: false,
        };
        if !self.phase.is_interactive() {
            return ignored;
        }
        let Some(session) = self.session.as_ref() else {
            return ignored;
        };
        let ctx = GestureContext {
            current_index: session.viewport.current_index(),
            page_count: session.viewport.page_count(),
            zoom: session.zoom,
            viewport: host.viewport(),
            direction: session.viewport.direction(),
        };
        let outcome = self.gesture.handle(input, &ctx);
        self.apply_gesture(host, outcome.effect, input.timestamp);
        outcome
    }

    /// Overlay button handler.
    pub fn on_control(&mut self, host: &mut impl HostEnvironment, input: ControlInput, now: Timestamp) {
        if !self.phase.is_interactive() {
            return;
        }
        match input {
            ControlInput::Nav(button) => {
                if let Some(session) = self.session.as_ref() {
                    let step = button.step(session.viewport.direction());
                    let target = session
                        .current_index()
                        .checked_add_signed(step)
                        .filter(|&target| target < session.viewport.page_count());
                    if let Some(target) = target {
                        self.go_to_index(&*host, target);
                    }
                }
                self.apply_controls(controls::Message::Show, now);
            }
            ControlInput::ToggleSpread => self.toggle_spread(&*host, now),
            ControlInput::Action(action) => self.proxy_action(host, action, now),
        }
    }

    /// Re-reads the viewport width after a resize.
    pub fn on_resize(&mut self, host: &impl HostPage) {
        let (Some(session), Some(overlay)) = (self.session.as_mut(), self.overlay.as_mut()) else {
            return;
        };
        session.viewport.set_width(host.viewport().width);
        overlay.strip.transition = TransitionList::none();
        overlay.sync_strip(&session.viewport);
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, host: &mut impl HostEnvironment, now: Timestamp) {
        for timer in self.timers.take_due(now) {
            tracing::trace!(?timer, "timer fired");
            match timer {
                TimerKind::EntrySettle => self.settle_entry(now),
                TimerKind::ControlsHide => {
                    self.apply_controls(controls::Message::HideTimerFired, now);
                }
                TimerKind::OverlayRemoval => self.teardown(),
                TimerKind::ReplyClick(button) => {
                    interaction_bar::click_reply(host, button);
                }
                TimerKind::RetweetConfirm { undo } => {
                    interaction_bar::confirm_retweet(host, undo);
                }
                TimerKind::ShareMenu => {
                    interaction_bar::pick_share_target(host);
                }
                TimerKind::ActionRefresh => {
                    self.refresh_action_bar(&*host);
                    let visible = self
                        .session
                        .as_ref()
                        .is_some_and(|session| session.controls.is_visible());
                    // Restarts the hide timer; hidden controls stay hidden.
                    if self.phase == LifecyclePhase::Open && visible {
                        self.apply_controls(controls::Message::Show, now);
                    }
                }
                TimerKind::PressRelease => self.set_pressed(None),
            }
        }
    }

    /// Applies new settings. Gesture tuning takes effect immediately; an
    /// open session stays open when the lightbox gets disabled.
    pub fn apply_config(&mut self, config: Config) {
        if config.features.enable_lightbox != self.config.features.enable_lightbox {
            tracing::info!(enabled = config.features.enable_lightbox, "lightbox toggled");
        }
        self.gesture.set_tuning(config.gesture.tuning());
        if let Some(session) = self.session.as_mut() {
            session.controls.set_timeout(config.lightbox.controls_timeout());
        }
        self.config = config;
    }

    fn settle_entry(&mut self, now: Timestamp) {
        if self.phase != LifecyclePhase::Opening {
            return;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.active = true;
            overlay.strip.transition = TransitionList::page();
        }
        self.phase = LifecyclePhase::Open;
        tracing::debug!("lightbox open");
        self.apply_controls(controls::Message::Show, now);
    }

    /// Drops the session and the overlay at once.
    fn teardown(&mut self) {
        for slot in SESSION_TIMERS {
            self.timers.cancel(slot);
        }
        self.timers.cancel(TimerSlot::OverlayRemoval);
        self.gesture.reset();
        self.session = None;
        self.overlay = None;
        self.phase = LifecyclePhase::Closed;
        tracing::debug!("lightbox overlay removed");
    }

    fn apply_controls(&mut self, msg: controls::Message, now: Timestamp) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.controls.handle(msg) {
            controls::Effect::RestartHideTimer(delay) => {
                self.timers.schedule(TimerKind::ControlsHide, now, delay);
            }
            controls::Effect::CancelHideTimer => {
                self.timers.cancel(TimerSlot::ControlsHide);
            }
            controls::Effect::None => {}
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.controls_visible = session.controls.is_visible();
        }
    }

    fn apply_gesture(&mut self, host: &mut impl HostEnvironment, effect: GestureEffect, now: Timestamp) {
        match effect {
            GestureEffect::CommitPage { target_index } => {
                self.go_to_index(&*host, target_index);
                self.apply_controls(controls::Message::Show, now);
                return;
            }
            GestureEffect::CommitDismiss => {
                self.close(host, false, now);
                return;
            }
            GestureEffect::Tap(target) => {
                if !target.is_interactive() {
                    self.apply_controls(controls::Message::Toggle, now);
                }
                return;
            }
            _ => {}
        }

        let (Some(session), Some(overlay)) = (self.session.as_mut(), self.overlay.as_mut()) else {
            return;
        };
        let index = session.viewport.current_index();
        match effect {
            GestureEffect::Interrupt => {
                overlay.strip.transition = TransitionList::none();
                if let Some(slide) = overlay.slide_mut(index) {
                    slide.transition = TransitionList::none();
                    slide.image_transition = TransitionList::none();
                }
            }
            GestureEffect::StripDrag { offset } => {
                session.viewport.drag_preview(offset);
                overlay.strip.transition = TransitionList::none();
                overlay.sync_strip(&session.viewport);
            }
            GestureEffect::DismissDrag {
                dy,
                slide_scale,
                backdrop_opacity,
            } => {
                session.viewport.clear_drag_preview();
                overlay.sync_strip(&session.viewport);
                overlay.backdrop_opacity = backdrop_opacity;
                if let Some(slide) = overlay.slide_mut(index) {
                    slide.transition = TransitionList::none();
                    slide.transform = Transform::new(Point::new(0.0, dy), slide_scale);
                }
            }
            GestureEffect::Zoom(zoom) => {
                session.zoom = zoom;
                overlay.set_zoom(index, zoom, TransitionList::none());
            }
            GestureEffect::SnapBack => {
                session.viewport.clear_drag_preview();
                overlay.strip.transition = TransitionList::page();
                overlay.sync_strip(&session.viewport);
            }
            GestureEffect::CancelDismiss => {
                overlay.backdrop_opacity = Opacity::OPAQUE;
                overlay.strip.transition = TransitionList::page();
                overlay.sync_strip(&session.viewport);
                if let Some(slide) = overlay.slide_mut(index) {
                    slide.transition = TransitionList::snap_back();
                    slide.transform = Transform::IDENTITY;
                }
            }
            GestureEffect::ZoomReset => {
                session.zoom = ZoomTransform::NEUTRAL;
                overlay.set_zoom(index, ZoomTransform::NEUTRAL, TransitionList::zoom_reset());
            }
            GestureEffect::None
            | GestureEffect::CommitPage { .. }
            | GestureEffect::CommitDismiss
            | GestureEffect::Tap(_) => {}
        }
    }

    /// Moves to page `target` with the page transition, resetting zoom.
    fn go_to_index(&mut self, host: &impl HostPage, target: usize) {
        let (Some(session), Some(overlay)) = (self.session.as_mut(), self.overlay.as_mut()) else {
            return;
        };
        let changed = session.viewport.set_index(target);
        session.zoom = ZoomTransform::NEUTRAL;
        overlay.strip.transition = TransitionList::page();
        overlay.sync_strip(&session.viewport);
        overlay.sync_sources(&session.viewport);
        overlay.reset_zoom();
        if changed {
            tracing::debug!(index = session.viewport.current_index(), "page changed");
            self.refresh_action_bar(host);
        }
    }

    fn toggle_spread(&mut self, host: &impl HostPage, now: Timestamp) {
        let (Some(session), Some(overlay)) = (self.session.as_mut(), self.overlay.as_mut()) else {
            return;
        };
        if !controls::has_navigation(session.images.len()) {
            return;
        }
        let mode = session.viewport.view_mode().toggled();
        session.viewport.set_view_mode(mode, &session.images);
        session.zoom = ZoomTransform::NEUTRAL;
        overlay.rebuild_slides(&session.viewport);
        overlay.strip.transition = TransitionList::none();
        tracing::debug!(?mode, index = session.viewport.current_index(), "view mode changed");
        self.refresh_action_bar(host);
        self.apply_controls(controls::Message::Show, now);
    }

    fn proxy_action(&mut self, host: &mut impl HostEnvironment, action: Action, now: Timestamp) {
        let Some(post) = self.session.as_ref().and_then(LightboxSession::current_post) else {
            tracing::debug!(?action, "no post behind the current image");
            return;
        };
        let outcome = interaction_bar::trigger(host, post, action);
        if outcome.close_viewer {
            self.close(host, false, now);
        }
        if outcome.pressed.is_some() {
            self.set_pressed(outcome.pressed);
        }
        for (kind, delay) in outcome.follow_ups {
            self.timers.schedule(kind, now, delay);
        }
    }

    fn refresh_action_bar(&mut self, host: &impl HostPage) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.action_bar = session
            .current_post()
            .and_then(|post| interaction_bar::read_state(host, post));
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.action_bar = session.action_bar_view();
        }
    }

    fn set_pressed(&mut self, pressed: Option<Action>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pressed = pressed;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.action_bar = session.action_bar_view();
        }
    }
}

impl Default for LightboxController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
