// SPDX-License-Identifier: MPL-2.0
//! Post actions proxied to the host.
//!
//! The action bar mirrors the like, retweet and bookmark state of the current
//! image's post and forwards taps by clicking the post's own buttons. No
//! posting logic is reimplemented: whatever the host does on click happens.

use crate::application::dom;
use crate::application::markers::{HostRole, SHARE_VIA_LABELS};
use crate::application::port::HostPage;
use crate::application::timers::TimerKind;
use crate::config::{
    BUTTON_PRESS_DURATION_MS, REPLY_CLICK_DELAY_MS, RETWEET_CONFIRM_DELAY_MS,
    RETWEET_REFRESH_DELAY_MS, SHARE_MENU_DELAY_MS, TOGGLE_REFRESH_DELAY_MS,
};
use crate::domain::node::NodeId;
use smallvec::SmallVec;

/// Buttons of the action bar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Reply,
    Retweet,
    Like,
    Bookmark,
    Share,
}

/// Toggle state read from the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionBarState {
    pub liked: bool,
    pub retweeted: bool,
    pub bookmarked: bool,
}

impl ActionBarState {
    #[must_use]
    pub fn is_active(self, action: Action) -> bool {
        match action {
            Action::Like => self.liked,
            Action::Retweet => self.retweeted,
            Action::Bookmark => self.bookmarked,
            Action::Reply | Action::Share => false,
        }
    }
}

/// Reads the action state of `post`.
///
/// Returns `None` when the post is gone; the bar is hidden then.
pub fn read_state(page: &impl HostPage, post: NodeId) -> Option<ActionBarState> {
    if !page.is_connected(post) {
        tracing::debug!(%post, "post detached, hiding action bar");
        return None;
    }
    let is_on = |toggle: HostRole, on: HostRole| {
        dom::query_first(page, post, toggle).is_some_and(|button| on.matches(page, button))
    };
    Some(ActionBarState {
        liked: is_on(HostRole::LikeToggle, HostRole::Liked),
        retweeted: is_on(HostRole::RetweetToggle, HostRole::Retweeted),
        bookmarked: is_on(HostRole::BookmarkToggle, HostRole::Bookmarked),
    })
}

/// What the controller does after proxying an action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxyOutcome {
    /// Close the viewer (user-initiated) before the follow-ups run.
    pub close_viewer: bool,
    /// Button to show as pressed.
    pub pressed: Option<Action>,
    /// Timers to schedule: kind and delay in ms.
    pub follow_ups: SmallVec<[(TimerKind, u64); 2]>,
}

/// Forwards `action` to the post's native control.
pub fn trigger(page: &mut impl HostPage, post: NodeId, action: Action) -> ProxyOutcome {
    let mut outcome = ProxyOutcome::default();
    if !page.is_connected(post) {
        return outcome;
    }

    match action {
        Action::Reply => {
            // Close first, click after the delay.
            if let Some(reply) = dom::query_first(page, post, HostRole::ReplyButton) {
                outcome.close_viewer = true;
                outcome
                    .follow_ups
                    .push((TimerKind::ReplyClick(reply), REPLY_CLICK_DELAY_MS));
            }
        }
        Action::Retweet => {
            if let Some(toggle) = dom::query_first(page, post, HostRole::RetweetToggle) {
                let undo = HostRole::Retweeted.matches(page, toggle);
                page.click(toggle);
                outcome
                    .follow_ups
                    .push((TimerKind::RetweetConfirm { undo }, RETWEET_CONFIRM_DELAY_MS));
            }
            outcome.pressed = Some(Action::Retweet);
            outcome
                .follow_ups
                .push((TimerKind::ActionRefresh, RETWEET_REFRESH_DELAY_MS));
        }
        Action::Like | Action::Bookmark => {
            let role = if action == Action::Like {
                HostRole::LikeToggle
            } else {
                HostRole::BookmarkToggle
            };
            if let Some(toggle) = dom::query_first(page, post, role) {
                outcome.pressed = Some(action);
                page.click(toggle);
                outcome
                    .follow_ups
                    .push((TimerKind::ActionRefresh, TOGGLE_REFRESH_DELAY_MS));
            }
        }
        Action::Share => {
            if let Some(share) = dom::query_first(page, post, HostRole::ShareButton) {
                page.click(share);
                outcome
                    .follow_ups
                    .push((TimerKind::ShareMenu, SHARE_MENU_DELAY_MS));
            }
        }
    }

    if outcome.pressed.is_some() {
        outcome
            .follow_ups
            .push((TimerKind::PressRelease, BUTTON_PRESS_DURATION_MS));
    }
    tracing::debug!(?action, %post, follow_ups = outcome.follow_ups.len(), "proxied action");
    outcome
}

/// Clicks the confirm item of the retweet menu, if it opened.
pub fn confirm_retweet(page: &mut impl HostPage, undo: bool) -> bool {
    let role = if undo {
        HostRole::UnretweetConfirm
    } else {
        HostRole::RetweetConfirm
    };
    match dom::document_query(page, role) {
        Some(item) => page.click(item),
        None => {
            tracing::debug!(undo, "retweet menu did not appear");
            false
        }
    }
}

/// Clicks the external share entry of the share menu, or its last item.
pub fn pick_share_target(page: &mut impl HostPage) -> bool {
    let root = page.document_root();
    let Some(menu) = dom::query_first_by_priority(page, root, HostRole::ShareMenu) else {
        tracing::debug!("share menu did not appear");
        return false;
    };
    let items = dom::query_all(page, menu, HostRole::MenuItem);
    let preferred = items.iter().copied().find(|&item| {
        let text = page.text_content(item);
        SHARE_VIA_LABELS.iter().any(|label| text.contains(label))
    });
    match preferred.or_else(|| items.last().copied()) {
        Some(item) => page.click(item),
        None => false,
    }
}

/// Clicks the reply button saved when the viewer closed.
pub fn click_reply(page: &mut impl HostPage, button: NodeId) -> bool {
    if !page.is_connected(button) {
        tracing::debug!(%button, "reply button detached");
        return false;
    }
    page.click(button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_page::{ElementSpec, MemoryPage};

    struct Post {
        page: MemoryPage,
        post: NodeId,
        like: NodeId,
        retweet: NodeId,
        reply: NodeId,
        share: NodeId,
    }

    fn post(liked: bool, retweeted: bool) -> Post {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
        let bar = page.append(post, ElementSpec::new("div").attr("role", "group"));
        let reply = page.append(bar, ElementSpec::new("button").test_id("reply"));
        let retweet = page.append(
            bar,
            ElementSpec::new("button").test_id(if retweeted { "unretweet" } else { "retweet" }),
        );
        let like = page.append(
            bar,
            ElementSpec::new("button").test_id(if liked { "unlike" } else { "like" }),
        );
        page.append(bar, ElementSpec::new("button").test_id("bookmark"));
        let share = page.append(bar, ElementSpec::new("button").attr("aria-label", "Share post"));
        Post {
            page,
            post,
            like,
            retweet,
            reply,
            share,
        }
    }

    #[test]
    fn state_reflects_post_markers() {
        let fixture = post(true, false);
        let state = read_state(&fixture.page, fixture.post).expect("post attached");
        assert_eq!(
            state,
            ActionBarState {
                liked: true,
                retweeted: false,
                bookmarked: false,
            }
        );
        assert!(state.is_active(Action::Like));
    }

    #[test]
    fn detached_post_hides_bar() {
        let mut fixture = post(false, false);
        fixture.page.detach(fixture.post);
        assert!(read_state(&fixture.page, fixture.post).is_none());
        let outcome = trigger(&mut fixture.page, fixture.post, Action::Like);
        assert_eq!(outcome, ProxyOutcome::default());
        assert!(fixture.page.clicks().is_empty());
    }

    #[test]
    fn like_clicks_toggle_and_refreshes() {
        let mut fixture = post(false, false);
        let outcome = trigger(&mut fixture.page, fixture.post, Action::Like);
        assert_eq!(fixture.page.clicks(), &[fixture.like]);
        assert_eq!(outcome.pressed, Some(Action::Like));
        assert!(outcome
            .follow_ups
            .contains(&(TimerKind::ActionRefresh, TOGGLE_REFRESH_DELAY_MS)));
        assert!(outcome
            .follow_ups
            .contains(&(TimerKind::PressRelease, BUTTON_PRESS_DURATION_MS)));
    }

    #[test]
    fn reply_closes_then_clicks_later() {
        let mut fixture = post(false, false);
        let outcome = trigger(&mut fixture.page, fixture.post, Action::Reply);
        assert!(outcome.close_viewer);
        assert!(fixture.page.clicks().is_empty());
        assert_eq!(
            outcome.follow_ups.as_slice(),
            &[(TimerKind::ReplyClick(fixture.reply), REPLY_CLICK_DELAY_MS)]
        );
    }

    #[test]
    fn unretweet_confirms_with_undo_item() {
        let mut fixture = post(false, true);
        let outcome = trigger(&mut fixture.page, fixture.post, Action::Retweet);
        assert_eq!(fixture.page.clicks(), &[fixture.retweet]);
        assert!(outcome
            .follow_ups
            .contains(&(TimerKind::RetweetConfirm { undo: true }, RETWEET_CONFIRM_DELAY_MS)));
        assert!(outcome
            .follow_ups
            .contains(&(TimerKind::ActionRefresh, RETWEET_REFRESH_DELAY_MS)));

        let root = fixture.page.document_root();
        let confirm = fixture
            .page
            .append(root, ElementSpec::new("div").test_id("unretweetConfirm"));
        assert!(confirm_retweet(&mut fixture.page, true));
        assert_eq!(fixture.page.clicks().last(), Some(&confirm));
    }

    #[test]
    fn share_picks_labelled_item_or_last() {
        let mut fixture = post(false, false);
        trigger(&mut fixture.page, fixture.post, Action::Share);
        assert_eq!(fixture.page.clicks(), &[fixture.share]);

        let root = fixture.page.document_root();
        let menu = fixture
            .page
            .append(root, ElementSpec::new("div").test_id("sharePostMenu"));
        fixture
            .page
            .append(menu, ElementSpec::new("div").attr("role", "menuitem").text("Copy link"));
        let via = fixture
            .page
            .append(menu, ElementSpec::new("div").attr("role", "menuitem").text("Share post via ..."));
        fixture
            .page
            .append(menu, ElementSpec::new("div").attr("role", "menuitem").text("Bookmark"));

        assert!(pick_share_target(&mut fixture.page));
        assert_eq!(fixture.page.clicks().last(), Some(&via));
    }

    #[test]
    fn share_falls_back_to_last_item() {
        let mut page = MemoryPage::new();
        let root = page.document_root();
        let menu = page.append(root, ElementSpec::new("div").attr("role", "menu"));
        page.append(menu, ElementSpec::new("div").attr("role", "menuitem").text("Copy link"));
        let last = page.append(menu, ElementSpec::new("div").attr("role", "menuitem").text("Embed"));

        assert!(pick_share_target(&mut page));
        assert_eq!(page.clicks(), &[last]);
    }

    #[test]
    fn missing_menu_is_tolerated() {
        let mut page = MemoryPage::new();
        assert!(!pick_share_target(&mut page));
        assert!(!confirm_retweet(&mut page, false));
    }
}
