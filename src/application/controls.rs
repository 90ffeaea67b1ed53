// SPDX-License-Identifier: MPL-2.0
//! Controls visibility sub-component.
//!
//! Nav buttons, the spread toggle and the action bar share one visibility
//! flag that hides itself after a period without interaction.

use crate::domain::layout::ReadingDirection;
use crate::domain::newtypes::ControlsTimeout;

/// Visibility state of the lightbox controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsState {
    visible: bool,
    timeout: ControlsTimeout,
}

/// Messages for the controls sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Show controls and restart the hide countdown.
    Show,
    Hide,
    /// Tap on the content area.
    Toggle,
    /// The hide countdown elapsed.
    HideTimerFired,
}

/// Effects produced by controls visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// (Re)start the hide countdown with this delay in milliseconds.
    RestartHideTimer(u64),
    CancelHideTimer,
}

impl ControlsState {
    #[must_use]
    pub fn new(timeout: ControlsTimeout) -> Self {
        Self {
            visible: true,
            timeout,
        }
    }

    /// Handle a controls message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Show => {
                self.visible = true;
                Effect::RestartHideTimer(self.timeout.as_millis())
            }
            Message::Hide => {
                self.visible = false;
                Effect::CancelHideTimer
            }
            Message::Toggle => {
                if self.visible {
                    self.handle(Message::Hide)
                } else {
                    self.handle(Message::Show)
                }
            }
            Message::HideTimerFired => {
                if self.visible {
                    tracing::trace!("controls auto-hidden");
                }
                self.visible = false;
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn timeout(&self) -> ControlsTimeout {
        self.timeout
    }

    /// Applies a new hide delay from the next countdown on.
    pub fn set_timeout(&mut self, timeout: ControlsTimeout) {
        self.timeout = timeout;
    }
}

impl Default for ControlsState {
    fn default() -> Self {
        Self::new(ControlsTimeout::default())
    }
}

/// On-screen navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Left,
    Right,
}

impl NavButton {
    /// Page step of the button: the button on the "next" side advances.
    #[must_use]
    pub fn step(self, direction: ReadingDirection) -> isize {
        match (self, direction) {
            (NavButton::Right, ReadingDirection::Ltr) | (NavButton::Left, ReadingDirection::Rtl) => 1,
            (NavButton::Left, ReadingDirection::Ltr) | (NavButton::Right, ReadingDirection::Rtl) => -1,
        }
    }
}

/// Nav buttons and the spread toggle only exist for multi-image sessions.
#[must_use]
pub fn has_navigation(image_count: usize) -> bool {
    image_count > 1
}
