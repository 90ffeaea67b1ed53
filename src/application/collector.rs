// SPDX-License-Identifier: MPL-2.0
//! Image collection for a new session.
//!
//! Given the image the user activated, determines which part of the page
//! belongs to the same viewing context and gathers its media images.

use crate::application::dom;
use crate::application::markers::{HostRole, STATUS_PATH_FRAGMENT};
use crate::application::port::HostPage;
use crate::domain::image::{ImageEntry, ImageList};
use crate::domain::node::NodeId;

/// Part of the page searched for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The modal overlay containing the trigger.
    Modal(NodeId),
    /// The reply thread of a status page.
    Conversation(NodeId),
    /// The main column of a status page without a labelled thread.
    PrimaryColumn(NodeId),
    /// The single post enclosing the trigger.
    Post(NodeId),
    /// Nothing more specific was found.
    Document(NodeId),
}

impl Scope {
    #[must_use]
    pub fn node(self) -> NodeId {
        match self {
            Scope::Modal(n)
            | Scope::Conversation(n)
            | Scope::PrimaryColumn(n)
            | Scope::Post(n)
            | Scope::Document(n) => n,
        }
    }
}

/// Images of a session plus where to start.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub images: ImageList,
    pub initial_index: usize,
    pub scope: Scope,
    /// True when the trigger was missing from the scope and the list holds
    /// only the trigger.
    pub fell_back: bool,
}

/// Whether an activation on `target` should open the lightbox.
///
/// The target must be a media image inside a photo link that is not itself
/// inside a host dialog.
pub fn qualifies_as_trigger(page: &impl HostPage, target: NodeId) -> bool {
    if !HostRole::MediaImage.matches(page, target) {
        return false;
    }
    match dom::closest(page, target, HostRole::PhotoLink) {
        Some(link) => dom::closest(page, link, HostRole::Dialog).is_none(),
        None => false,
    }
}

/// Resolves the collection scope of `trigger`. First match wins:
/// modal, status page thread or column, enclosing post, document.
pub fn resolve_scope(page: &impl HostPage, trigger: NodeId) -> Scope {
    if let Some(modal) = dom::closest(page, trigger, HostRole::ModalOverlay) {
        return Scope::Modal(modal);
    }
    if page.location_path().contains(STATUS_PATH_FRAGMENT) {
        if let Some(thread) = dom::document_query(page, HostRole::ConversationTimeline) {
            return Scope::Conversation(thread);
        }
        if let Some(column) = dom::document_query(page, HostRole::PrimaryColumn) {
            return Scope::PrimaryColumn(column);
        }
    } else if let Some(post) = dom::closest(page, trigger, HostRole::Post) {
        return Scope::Post(post);
    }
    Scope::Document(page.document_root())
}

/// Collects the images of the viewing context of `trigger`.
///
/// Returns `None` only when the trigger has no `src`.
pub fn collect(page: &impl HostPage, trigger: NodeId, high_res_token: &str) -> Option<Collection> {
    let trigger_src = page.attribute(trigger, "src")?;
    let scope = resolve_scope(page, trigger);

    let entries = dom::query_all(page, scope.node(), HostRole::MediaImage)
        .into_iter()
        .filter_map(|img| {
            // Only images that belong to a post; avatars and promos sit outside.
            let post = dom::closest(page, img, HostRole::Post)?;
            let src = page.attribute(img, "src")?;
            Some(ImageEntry::new(src, high_res_token, img, Some(post)))
        });

    if let Some(images) = ImageList::from_entries(entries) {
        if let Some(initial_index) = images.position_of(&trigger_src) {
            tracing::debug!(?scope, count = images.len(), initial_index, "collected images");
            return Some(Collection {
                images,
                initial_index,
                scope,
                fell_back: false,
            });
        }
    }

    tracing::debug!(?scope, "trigger not found in scope, opening it alone");
    let post = dom::closest(page, trigger, HostRole::Post);
    Some(Collection {
        images: ImageList::single(ImageEntry::new(trigger_src, high_res_token, trigger, post)),
        initial_index: 0,
        scope,
        fell_back: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_page::{ElementSpec, MemoryPage};

    fn media(page: &mut MemoryPage, parent: NodeId, id: &str) -> NodeId {
        let link = page.append(
            parent,
            ElementSpec::new("a").attr("href", &format!("/user/status/1/photo/{id}")),
        );
        page.append(
            link,
            ElementSpec::new("img").attr("src", &format!("https://pbs.twimg.com/media/{id}?format=jpg&name=small")),
        )
    }

    fn timeline() -> (MemoryPage, Vec<NodeId>, NodeId) {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let column = page.append(root, ElementSpec::new("main").test_id("primaryColumn"));
        let first = page.append(column, ElementSpec::new("article").test_id("tweet"));
        let imgs = vec![
            media(&mut page, first, "a1"),
            media(&mut page, first, "a2"),
            media(&mut page, first, "a3"),
        ];
        let sibling = page.append(column, ElementSpec::new("article").test_id("tweet"));
        media(&mut page, sibling, "b1");
        (page, imgs, first)
    }

    #[test]
    fn timeline_scope_is_the_enclosing_post() {
        let (page, imgs, post) = timeline();
        let collection = collect(&page, imgs[1], "large").expect("collected");

        assert_eq!(collection.scope, Scope::Post(post));
        assert_eq!(collection.images.len(), 3);
        assert_eq!(collection.initial_index, 1);
        let origins: Vec<NodeId> = collection.images.iter().map(|e| e.origin).collect();
        assert_eq!(origins, imgs);
        assert!(collection.images.iter().all(|e| e.post == Some(post)));
        assert!(collection.images.iter().all(|e| e.high_res_url.ends_with("name=large")));
    }

    #[test]
    fn status_page_uses_conversation_thread() {
        let mut page = MemoryPage::new();
        page.set_location_path("/user/status/123");
        let root = page.document_root();
        let column = page.append(root, ElementSpec::new("main").test_id("primaryColumn"));
        let thread = page.append(column, ElementSpec::new("section").attr("aria-label", "Timeline: Conversation"));
        let first = page.append(thread, ElementSpec::new("article").test_id("tweet"));
        let trigger = media(&mut page, first, "m1");
        let reply = page.append(thread, ElementSpec::new("article").test_id("tweet"));
        media(&mut page, reply, "m2");
        // Outside the thread but inside the column
        let aside = page.append(column, ElementSpec::new("article").test_id("tweet"));
        media(&mut page, aside, "m3");

        let collection = collect(&page, trigger, "large").expect("collected");
        assert_eq!(collection.scope, Scope::Conversation(thread));
        assert_eq!(collection.images.len(), 2);
    }

    #[test]
    fn status_page_without_thread_uses_primary_column() {
        let (mut page, imgs, _) = timeline();
        page.set_location_path("/user/status/123");
        let collection = collect(&page, imgs[0], "large").expect("collected");
        assert!(matches!(collection.scope, Scope::PrimaryColumn(_)));
        assert_eq!(collection.images.len(), 4);
    }

    #[test]
    fn modal_scope_wins_over_status_path() {
        let mut page = MemoryPage::new();
        page.set_location_path("/user/status/123");
        let root = page.document_root();
        let modal = page.append(root, ElementSpec::new("div").attr("aria-modal", "true"));
        let post = page.append(modal, ElementSpec::new("article").test_id("tweet"));
        let trigger = media(&mut page, post, "x");

        let collection = collect(&page, trigger, "large").expect("collected");
        assert_eq!(collection.scope, Scope::Modal(modal));
    }

    #[test]
    fn duplicate_sources_collapse_to_one_entry() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
        let trigger = media(&mut page, post, "same");
        media(&mut page, post, "same");

        let collection = collect(&page, trigger, "large").expect("collected");
        assert_eq!(collection.images.len(), 1);
        assert_eq!(collection.images.get(0).map(|e| e.origin), Some(trigger));
    }

    #[test]
    fn trigger_outside_any_post_falls_back_to_single_entry() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
        media(&mut page, post, "in-post");
        let stray = media(&mut page, root, "stray");

        let collection = collect(&page, stray, "large").expect("collected");
        assert!(collection.fell_back);
        assert_eq!(collection.images.len(), 1);
        assert_eq!(collection.initial_index, 0);
        assert_eq!(collection.images.get(0).and_then(|e| e.post), None);
        assert_eq!(collection.scope, Scope::Document(root));
    }

    #[test]
    fn trigger_qualification() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
        let good = media(&mut page, post, "ok");
        let bare = page.append(post, ElementSpec::new("img").attr("src", "https://pbs.twimg.com/media/nolink?name=small"));
        let dialog = page.append(root, ElementSpec::new("div").attr("role", "dialog"));
        let in_dialog = media(&mut page, dialog, "dlg");

        assert!(qualifies_as_trigger(&page, good));
        assert!(!qualifies_as_trigger(&page, bare));
        assert!(!qualifies_as_trigger(&page, in_dialog));
        assert!(!qualifies_as_trigger(&page, post));
    }

    #[test]
    fn trigger_without_src_is_not_collected() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let img = page.append(root, ElementSpec::new("img"));
        assert!(collect(&page, img, "large").is_none());
    }
}
