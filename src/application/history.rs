// SPDX-License-Identifier: MPL-2.0
//! Browser history integration.
//!
//! Each session pushes one entry so the platform back gesture closes the
//! viewer. Closing from inside the viewer walks history back itself, and the
//! pop that follows must not be treated as a user navigation. The
//! coordinator arms a [`SuppressToken`] before that programmatic back; the
//! next pop consumes it.

use crate::application::port::BrowserHistory;

/// State object pushed with the session's history entry.
pub const HISTORY_MARKER: &str = "x_lightbox";

/// Marks the next history pop as an echo of our own `back()`.
///
/// Not `Clone`: a token is consumed exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct SuppressToken(());

/// Owner of the echo-suppression token.
#[derive(Debug, Default)]
pub struct HistoryCoordinator {
    suppress: Option<SuppressToken>,
}

impl HistoryCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the session entry.
    pub fn push_session_entry(&mut self, history: &mut impl BrowserHistory) {
        history.push_state(HISTORY_MARKER);
        tracing::debug!("pushed lightbox history entry");
    }

    /// Walks back over the session entry, flagging the resulting pop.
    pub fn programmatic_back(&mut self, history: &mut impl BrowserHistory) {
        if self.suppress.replace(SuppressToken(())).is_some() {
            tracing::warn!("previous history back was never echoed");
        }
        history.back();
    }

    /// Consumes the token if armed. Returns the token when the pop is an echo.
    pub fn take_echo(&mut self) -> Option<SuppressToken> {
        self.suppress.take()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.suppress.is_some()
    }
}
