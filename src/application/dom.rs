// SPDX-License-Identifier: MPL-2.0
//! Tree queries over a [`HostPage`].
//!
//! Equivalents of `closest`, `querySelector` and `querySelectorAll` for
//! [`HostRole`] matchers. Results are never cached: the host tree may change
//! between two events.

use crate::application::markers::HostRole;
use crate::application::port::HostPage;
use crate::domain::node::NodeId;

/// Nearest inclusive ancestor of `node` having `role`.
pub fn closest(page: &impl HostPage, node: NodeId, role: HostRole) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if role.matches(page, candidate) {
            return Some(candidate);
        }
        current = page.parent(candidate);
    }
    None
}

/// Descendants of `scope` (excluding `scope`) in document order.
pub fn descendants(page: &impl HostPage, scope: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = page.children(scope).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(page.children(node).into_iter().rev());
    }
    out
}

/// All descendants of `scope` having `role`, in document order.
pub fn query_all(page: &impl HostPage, scope: NodeId, role: HostRole) -> Vec<NodeId> {
    descendants(page, scope)
        .into_iter()
        .filter(|&node| role.matches(page, node))
        .collect()
}

/// First descendant of `scope` having `role`, in document order.
pub fn query_first(page: &impl HostPage, scope: NodeId, role: HostRole) -> Option<NodeId> {
    descendants(page, scope)
        .into_iter()
        .find(|&node| role.matches(page, node))
}

/// First descendant matching the earliest alternative of `role` that matches
/// anything. Used where the alternatives express a preference.
pub fn query_first_by_priority(
    page: &impl HostPage,
    scope: NodeId,
    role: HostRole,
) -> Option<NodeId> {
    let nodes = descendants(page, scope);
    role.matchers()
        .iter()
        .find_map(|matcher| nodes.iter().copied().find(|&node| matcher.matches(page, node)))
}

/// First descendant of the whole document having `role`.
pub fn document_query(page: &impl HostPage, role: HostRole) -> Option<NodeId> {
    query_first(page, page.document_root(), role)
}
