// SPDX-License-Identifier: MPL-2.0
//! In-memory adapter implementing the [`HostPage`] and [`BrowserHistory`]
//! port traits.
//!
//! [`MemoryPage`] models just enough of a document for the engine: an
//! element tree with tag names, attributes, text and bounding boxes, a
//! viewport and a location. Clicks and history calls are recorded so tests
//! can assert on the side effects the engine produced.
//!
//! # Example
//!
//! ```
//! use x_lightbox::application::port::HostPage;
//! use x_lightbox::infrastructure::{ElementSpec, MemoryPage};
//!
//! let mut page = MemoryPage::new();
//! let root = page.document_root();
//! let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
//! assert_eq!(page.parent(post), Some(root));
//! ```
//!
//! [`HostPage`]: crate::application::port::HostPage
//! [`BrowserHistory`]: crate::application::port::BrowserHistory

use crate::application::port::{BrowserHistory, HostPage};
use crate::domain::geometry::{Rect, Size};
use crate::domain::node::NodeId;

/// Viewport of a freshly created page (a portrait phone).
pub const DEFAULT_VIEWPORT: Size = Size::new(400.0, 800.0);

/// Builder for an element appended with [`MemoryPage::append`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Option<Rect>,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            rect: None,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        set_attr(&mut self.attributes, name, value.into());
        self
    }

    /// Shorthand for `data-testid`.
    #[must_use]
    pub fn test_id(self, value: &str) -> Self {
        self.attr("data-testid", value)
    }

    /// Own text of the element, not counting children.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Option<Rect>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn from_spec(spec: ElementSpec, parent: Option<NodeId>) -> Self {
        Self {
            tag: spec.tag,
            attributes: spec.attributes,
            text: spec.text,
            rect: spec.rect,
            parent,
            children: Vec::new(),
        }
    }
}

/// In-memory document and history.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    elements: Vec<Element>,
    viewport: Size,
    location_path: String,
    clicks: Vec<NodeId>,
    pushed_states: Vec<String>,
    back_count: usize,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Creates a page holding only an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![Element::from_spec(ElementSpec::new("body"), None)],
            viewport: DEFAULT_VIEWPORT,
            location_path: "/home".to_string(),
            clicks: Vec::new(),
            pushed_states: Vec::new(),
            back_count: 0,
        }
    }

    /// Appends a new element as the last child of `parent`.
    ///
    /// Appending to an unknown node creates a detached element.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId::new(self.elements.len() as u64);
        let parent = self.element_mut(parent).map(|element| {
            element.children.push(id);
            parent
        });
        self.elements.push(Element::from_spec(spec, parent));
        id
    }

    /// Removes `node` (and its subtree) from the document.
    ///
    /// The node keeps its attributes, as a detached DOM element would.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.element(node).and_then(|e| e.parent) else {
            return;
        };
        if let Some(parent) = self.element_mut(parent) {
            parent.children.retain(|&child| child != node);
        }
        if let Some(element) = self.element_mut(node) {
            element.parent = None;
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            set_attr(&mut element.attributes, name, value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.retain(|(key, _)| key != name);
        }
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(element) = self.element_mut(node) {
            element.rect = Some(rect);
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_location_path(&mut self, path: &str) {
        self.location_path = path.to_string();
    }

    /// Nodes clicked so far, in order.
    #[must_use]
    pub fn clicks(&self) -> &[NodeId] {
        &self.clicks
    }

    /// Markers passed to `pushState`, in order.
    #[must_use]
    pub fn pushed_states(&self) -> &[String] {
        &self.pushed_states
    }

    /// Number of `history.back()` calls.
    #[must_use]
    pub fn back_count(&self) -> usize {
        self.back_count
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        usize::try_from(node.raw())
            .ok()
            .and_then(|index| self.elements.get(index))
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        usize::try_from(node.raw())
            .ok()
            .and_then(|index| self.elements.get_mut(index))
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(element) = self.element(node) {
            out.push_str(&element.text);
            for &child in &element.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl HostPage for MemoryPage {
    fn document_root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|e| e.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.element(node).map(|e| e.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).and_then(|e| {
            e.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let root = self.document_root();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        if !self.is_connected(node) {
            return None;
        }
        // Elements without layout report an empty box, like the DOM.
        Some(
            self.element(node)
                .and_then(|e| e.rect)
                .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        )
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn location_path(&self) -> String {
        self.location_path.clone()
    }

    fn click(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        self.clicks.push(node);
        true
    }
}

impl BrowserHistory for MemoryPage {
    fn push_state(&mut self, marker: &str) {
        self.pushed_states.push(marker.to_string());
    }

    fn back(&mut self) {
        self.back_count += 1;
    }
}

fn set_attr(attributes: &mut Vec<(String, String)>, name: &str, value: String) {
    match attributes.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value,
        None => attributes.push((name.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_subtree_is_disconnected() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let post = page.append(root, ElementSpec::new("article"));
        let img = page.append(post, ElementSpec::new("img").rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(page.is_connected(img));

        page.detach(post);
        assert!(!page.is_connected(img));
        assert_eq!(page.bounding_rect(img), None);
        assert!(!page.click(img));
        assert!(page.children(root).is_empty());
    }

    #[test]
    fn text_content_includes_descendants() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let item = page.append(root, ElementSpec::new("div").text("Share "));
        page.append(item, ElementSpec::new("span").text("via ..."));
        assert_eq!(page.text_content(item), "Share via ...");
    }

    #[test]
    fn attributes_can_be_replaced() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let like = page.append(root, ElementSpec::new("button").test_id("like"));
        page.set_attribute(like, "data-testid", "unlike");
        assert_eq!(page.attribute(like, "data-testid").as_deref(), Some("unlike"));
        page.remove_attribute(like, "data-testid");
        assert_eq!(page.attribute(like, "data-testid"), None);
    }

    #[test]
    fn unknown_nodes_are_tolerated() {
        let page = MemoryPage::new();
        let ghost = NodeId::new(999);
        assert_eq!(page.parent(ghost), None);
        assert_eq!(page.tag_name(ghost), None);
        assert!(page.children(ghost).is_empty());
        assert!(!page.is_connected(ghost));
    }

    #[test]
    fn history_calls_are_recorded() {
        let mut page = MemoryPage::new();
        page.push_state("x_lightbox");
        page.back();
        assert_eq!(page.pushed_states(), &["x_lightbox".to_string()]);
        assert_eq!(page.back_count(), 1);
    }
}
