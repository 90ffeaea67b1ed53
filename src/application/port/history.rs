// SPDX-License-Identifier: MPL-2.0
//! Browser history port definition.

/// Session history as exposed by `window.history`.
///
/// The popstate notification travels the other way: the adapter forwards it
/// to [`LightboxController::on_history_pop`](crate::application::lifecycle::LightboxController::on_history_pop).
pub trait BrowserHistory {
    /// `history.pushState(marker, "", "")`: adds an entry without navigating.
    fn push_state(&mut self, marker: &str);

    /// `history.back()`: the resulting pop arrives asynchronously.
    fn back(&mut self);
}
