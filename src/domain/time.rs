// SPDX-License-Identifier: MPL-2.0
//! Event timestamps.
//!
//! The engine never reads a clock. Every input carries a [`Timestamp`] taken
//! from the host event (`Event.timeStamp` or `performance.now()`).

use std::cmp::Ordering;

/// Milliseconds on the host's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// Timestamp `delay_ms` after this one.
    #[must_use]
    pub fn after(self, delay_ms: u64) -> Self {
        // Delays in this crate are far below 2^53 ms.
        #[allow(clippy::cast_precision_loss)]
        Self(self.0 + delay_ms as f64)
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    #[must_use]
    pub fn millis_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_adds_delay() {
        let t = Timestamp::from_millis(100.0);
        assert_eq!(t.after(250), Timestamp::from_millis(350.0));
    }

    #[test]
    fn millis_since_is_clamped_to_zero() {
        let early = Timestamp::from_millis(10.0);
        let late = Timestamp::from_millis(110.0);
        assert_eq!(late.millis_since(early), 100.0);
        assert_eq!(early.millis_since(late), 0.0);
    }

    #[test]
    fn ordering_follows_time() {
        let mut stamps = vec![
            Timestamp::from_millis(30.0),
            Timestamp::from_millis(10.0),
            Timestamp::from_millis(20.0),
        ];
        stamps.sort();
        assert_eq!(stamps[0], Timestamp::from_millis(10.0));
        assert_eq!(stamps[2], Timestamp::from_millis(30.0));
    }
}
