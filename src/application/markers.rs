// SPDX-License-Identifier: MPL-2.0
//! Host markup coupling.
//!
//! Every attribute, label or URL fragment the engine relies on to recognise
//! the host's UI lives in this table. When the host changes its markup only
//! this file needs updating.

use crate::application::port::HostPage;
use crate::domain::node::NodeId;

/// How an attribute value is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[name="value"]`
    Equals,
    /// `[name^="value"]`
    Prefix,
    /// `[name*="value"]`
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: &'static str,
    pub op: AttrOp,
    pub value: &'static str,
}

/// One alternative of a role: optional tag plus optional attribute test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    pub tag: Option<&'static str>,
    pub attr: Option<AttrMatch>,
}

impl Matcher {
    const fn attr(name: &'static str, op: AttrOp, value: &'static str) -> Self {
        Self {
            tag: None,
            attr: Some(AttrMatch { name, op, value }),
        }
    }

    const fn tagged(tag: &'static str, name: &'static str, op: AttrOp, value: &'static str) -> Self {
        Self {
            tag: Some(tag),
            attr: Some(AttrMatch { name, op, value }),
        }
    }

    const fn test_id(value: &'static str) -> Self {
        Self::attr("data-testid", AttrOp::Equals, value)
    }

    /// Tests a single node.
    pub fn matches(&self, page: &impl HostPage, node: NodeId) -> bool {
        if let Some(tag) = self.tag {
            if page.tag_name(node).as_deref() != Some(tag) {
                return false;
            }
        }
        match self.attr {
            None => true,
            Some(attr) => page.attribute(node, attr.name).is_some_and(|value| match attr.op {
                AttrOp::Equals => value == attr.value,
                AttrOp::Prefix => value.starts_with(attr.value),
                AttrOp::Contains => value.contains(attr.value),
            }),
        }
    }
}

/// Semantic roles of host elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostRole {
    /// Post opened as a modal overlay.
    ModalOverlay,
    /// Reply thread of a status page.
    ConversationTimeline,
    /// Main content column.
    PrimaryColumn,
    /// A post container.
    Post,
    /// Content image of a post.
    MediaImage,
    /// Link around a post image that opens the host's own viewer.
    PhotoLink,
    /// Any host dialog; images inside are left to the host.
    Dialog,
    LikeToggle,
    Liked,
    RetweetToggle,
    Retweeted,
    BookmarkToggle,
    Bookmarked,
    ReplyButton,
    ShareButton,
    RetweetConfirm,
    UnretweetConfirm,
    ShareMenu,
    MenuItem,
}

const MODAL_OVERLAY: &[Matcher] = &[Matcher::attr("aria-modal", AttrOp::Equals, "true")];
const CONVERSATION_TIMELINE: &[Matcher] = &[
    Matcher::attr("aria-label", AttrOp::Prefix, "Timeline: Conversation"),
    Matcher::attr("aria-label", AttrOp::Prefix, "タイムライン: 会話"),
];
const PRIMARY_COLUMN: &[Matcher] = &[Matcher::test_id("primaryColumn")];
const POST: &[Matcher] = &[Matcher::test_id("tweet")];
const MEDIA_IMAGE: &[Matcher] = &[Matcher::tagged(
    "img",
    "src",
    AttrOp::Contains,
    "pbs.twimg.com/media",
)];
const PHOTO_LINK: &[Matcher] = &[Matcher::tagged("a", "href", AttrOp::Contains, "/photo/")];
const DIALOG: &[Matcher] = &[Matcher::attr("role", AttrOp::Equals, "dialog")];
const LIKE_TOGGLE: &[Matcher] = &[Matcher::test_id("like"), Matcher::test_id("unlike")];
const LIKED: &[Matcher] = &[Matcher::test_id("unlike")];
const RETWEET_TOGGLE: &[Matcher] = &[Matcher::test_id("retweet"), Matcher::test_id("unretweet")];
const RETWEETED: &[Matcher] = &[Matcher::test_id("unretweet")];
const BOOKMARK_TOGGLE: &[Matcher] = &[
    Matcher::test_id("bookmark"),
    Matcher::test_id("removeBookmark"),
];
const BOOKMARKED: &[Matcher] = &[Matcher::test_id("removeBookmark")];
const REPLY_BUTTON: &[Matcher] = &[Matcher::test_id("reply")];
const SHARE_BUTTON: &[Matcher] = &[
    Matcher::attr("aria-label", AttrOp::Contains, "Share"),
    Matcher::attr("aria-label", AttrOp::Contains, "共有"),
];
const RETWEET_CONFIRM: &[Matcher] = &[Matcher::test_id("retweetConfirm")];
const UNRETWEET_CONFIRM: &[Matcher] = &[Matcher::test_id("unretweetConfirm")];
// Order is priority: the dedicated share menu wins over a generic menu.
const SHARE_MENU: &[Matcher] = &[
    Matcher::test_id("sharePostMenu"),
    Matcher::attr("role", AttrOp::Equals, "menu"),
];
const MENU_ITEM: &[Matcher] = &[Matcher::attr("role", AttrOp::Equals, "menuitem")];

/// Path fragment of single-post (conversation) pages.
pub const STATUS_PATH_FRAGMENT: &str = "/status/";

/// Menu item labels that designate the external "share via" entry.
pub const SHARE_VIA_LABELS: &[&str] = &["その他", "Share", "via"];

impl HostRole {
    /// Matcher alternatives; a node has the role if any alternative matches.
    #[must_use]
    pub fn matchers(self) -> &'static [Matcher] {
        match self {
            HostRole::ModalOverlay => MODAL_OVERLAY,
            HostRole::ConversationTimeline => CONVERSATION_TIMELINE,
            HostRole::PrimaryColumn => PRIMARY_COLUMN,
            HostRole::Post => POST,
            HostRole::MediaImage => MEDIA_IMAGE,
            HostRole::PhotoLink => PHOTO_LINK,
            HostRole::Dialog => DIALOG,
            HostRole::LikeToggle => LIKE_TOGGLE,
            HostRole::Liked => LIKED,
            HostRole::RetweetToggle => RETWEET_TOGGLE,
            HostRole::Retweeted => RETWEETED,
            HostRole::BookmarkToggle => BOOKMARK_TOGGLE,
            HostRole::Bookmarked => BOOKMARKED,
            HostRole::ReplyButton => REPLY_BUTTON,
            HostRole::ShareButton => SHARE_BUTTON,
            HostRole::RetweetConfirm => RETWEET_CONFIRM,
            HostRole::UnretweetConfirm => UNRETWEET_CONFIRM,
            HostRole::ShareMenu => SHARE_MENU,
            HostRole::MenuItem => MENU_ITEM,
        }
    }

    /// Whether `node` has this role.
    pub fn matches(self, page: &impl HostPage, node: NodeId) -> bool {
        self.matchers().iter().any(|m| m.matches(page, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_page::{ElementSpec, MemoryPage};

    #[test]
    fn prefix_matches_localised_conversation_labels() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let en = page.append(root, ElementSpec::new("div").attr("aria-label", "Timeline: Conversation"));
        let ja = page.append(root, ElementSpec::new("div").attr("aria-label", "タイムライン: 会話を表示"));
        let other = page.append(root, ElementSpec::new("div").attr("aria-label", "Timeline: Home"));

        assert!(HostRole::ConversationTimeline.matches(&page, en));
        assert!(HostRole::ConversationTimeline.matches(&page, ja));
        assert!(!HostRole::ConversationTimeline.matches(&page, other));
    }

    #[test]
    fn media_image_requires_img_tag() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let img = page.append(root, ElementSpec::new("img").attr("src", "https://pbs.twimg.com/media/a?name=small"));
        let div = page.append(root, ElementSpec::new("div").attr("src", "https://pbs.twimg.com/media/a?name=small"));
        let avatar = page.append(root, ElementSpec::new("img").attr("src", "https://pbs.twimg.com/profile_images/x.jpg"));

        assert!(HostRole::MediaImage.matches(&page, img));
        assert!(!HostRole::MediaImage.matches(&page, div));
        assert!(!HostRole::MediaImage.matches(&page, avatar));
    }

    #[test]
    fn toggles_match_both_states() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let like = page.append(root, ElementSpec::new("button").test_id("like"));
        let unlike = page.append(root, ElementSpec::new("button").test_id("unlike"));

        assert!(HostRole::LikeToggle.matches(&page, like));
        assert!(HostRole::LikeToggle.matches(&page, unlike));
        assert!(!HostRole::Liked.matches(&page, like));
        assert!(HostRole::Liked.matches(&page, unlike));
    }

    #[test]
    fn missing_attribute_never_matches() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let bare = page.append(root, ElementSpec::new("div"));
        assert!(!HostRole::Post.matches(&page, bare));
        assert!(!HostRole::ShareButton.matches(&page, bare));
    }
}
