// SPDX-License-Identifier: MPL-2.0
//! Opaque host node handles.

use std::fmt;

/// Handle to a node of the host document, issued by a
/// [`HostPage`](crate::application::port::HostPage) adapter.
///
/// A handle is never assumed to be live. The host may detach or replace the
/// node at any time, so callers re-validate it with
/// [`HostPage::is_connected`](crate::application::port::HostPage::is_connected)
/// before every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
