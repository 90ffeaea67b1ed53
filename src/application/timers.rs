// SPDX-License-Identifier: MPL-2.0
//! Fire-and-forget fixed-delay timers.
//!
//! The host calls [`LightboxController::tick`](crate::application::lifecycle::LightboxController::tick)
//! from `setTimeout`/`requestAnimationFrame` and the controller drains the
//! due entries. At most one timer of each [`TimerSlot`] is pending:
//! scheduling replaces the previous one.

use crate::domain::node::NodeId;
use crate::domain::time::Timestamp;

/// A pending timer together with the data it fires with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Apply the entry transition after the overlay was inserted.
    EntrySettle,
    ControlsHide,
    /// Remove the overlay once the exit animation finished.
    OverlayRemoval,
    /// Click the host reply button after the viewer closed.
    ReplyClick(NodeId),
    /// Confirm the host retweet menu (`undo` for unretweet).
    RetweetConfirm { undo: bool },
    /// Pick the external entry of the host share menu.
    ShareMenu,
    /// Re-read action state from the post.
    ActionRefresh,
    /// End the pressed feedback of an action button.
    PressRelease,
}

/// Identity of a timer, ignoring its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    EntrySettle,
    ControlsHide,
    OverlayRemoval,
    ReplyClick,
    RetweetConfirm,
    ShareMenu,
    ActionRefresh,
    PressRelease,
}

impl TimerKind {
    #[must_use]
    pub fn slot(self) -> TimerSlot {
        match self {
            TimerKind::EntrySettle => TimerSlot::EntrySettle,
            TimerKind::ControlsHide => TimerSlot::ControlsHide,
            TimerKind::OverlayRemoval => TimerSlot::OverlayRemoval,
            TimerKind::ReplyClick(_) => TimerSlot::ReplyClick,
            TimerKind::RetweetConfirm { .. } => TimerSlot::RetweetConfirm,
            TimerKind::ShareMenu => TimerSlot::ShareMenu,
            TimerKind::ActionRefresh => TimerSlot::ActionRefresh,
            TimerKind::PressRelease => TimerSlot::PressRelease,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    deadline: Timestamp,
    seq: u64,
    kind: TimerKind,
}

/// Pending timers keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire `delay_ms` after `now`, replacing any pending
    /// timer of the same slot.
    pub fn schedule(&mut self, kind: TimerKind, now: Timestamp, delay_ms: u64) {
        self.cancel(kind.slot());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            deadline: now.after(delay_ms),
            seq,
            kind,
        });
    }

    /// Cancels the pending timer of `slot`, returning whether one existed.
    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind.slot() != slot);
        self.entries.len() != before
    }

    #[must_use]
    pub fn is_scheduled(&self, slot: TimerSlot) -> bool {
        self.entries.iter().any(|e| e.kind.slot() == slot)
    }

    /// Deadline of the pending timer of `slot`.
    #[must_use]
    pub fn deadline_of(&self, slot: TimerSlot) -> Option<Timestamp> {
        self.entries
            .iter()
            .find(|e| e.kind.slot() == slot)
            .map(|e| e.deadline)
    }

    /// Removes and returns every timer due at `now`, earliest first. Timers
    /// with equal deadlines fire in scheduling order.
    pub fn take_due(&mut self, now: Timestamp) -> Vec<TimerKind> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.deadline, e.seq));
        due.into_iter().map(|e| e.kind).collect()
    }

    /// Earliest pending deadline, for the host to arm its next wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
