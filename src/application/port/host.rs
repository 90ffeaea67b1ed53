// SPDX-License-Identifier: MPL-2.0
//! Host document port definition.
//!
//! This module defines the [`HostPage`] trait. A browser adapter implements it
//! on top of the live DOM; [`MemoryPage`](crate::infrastructure::MemoryPage)
//! implements it on an in-memory tree for tests.

use crate::domain::geometry::{Rect, Size};
use crate::domain::node::NodeId;

/// Read-mostly view of the host document.
///
/// The document is volatile: nodes may disappear between two calls. Every
/// method therefore tolerates unknown or detached handles and answers with
/// `None`, an empty value or `false`.
pub trait HostPage {
    /// The document body, used as the scope of last resort.
    fn document_root(&self) -> NodeId;

    /// Parent element, `None` for the root or a detached node.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Lowercase tag name (`"img"`, `"a"`, ...).
    fn tag_name(&self, node: NodeId) -> Option<String>;

    /// Attribute value. For `src` and `href` adapters return the resolved URL.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Concatenated text of the node and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Whether the node is still attached to the document.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Viewport-relative bounding box, `None` for detached nodes.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// Size of the layout viewport (`innerWidth` x `innerHeight`).
    fn viewport(&self) -> Size;

    /// `location.pathname` of the current page.
    fn location_path(&self) -> String;

    /// Dispatches a synthetic `click()` on the node.
    ///
    /// Returns `false` if the node is gone.
    fn click(&mut self, node: NodeId) -> bool;
}
