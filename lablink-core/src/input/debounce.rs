//! Software debounce for active-low buttons
//!
//! Each channel tracks when the current press was first seen, whether that
//! press has been counted, and when a press was last counted. A press
//! counts once, on the first poll at least one debounce window after it was
//! first seen. Releasing re-arms the channel, even when the release and the
//! next press land on the same clock reading as the last count.
//!
//! State transitions per poll:
//!
//! ```text
//! released                          -> clear press_start, counted = false
//! pressed, no press_start           -> press_start = now
//! pressed, age <  window            -> nothing
//! pressed, age >= window, uncounted -> counted, last_counted = now, emit
//! pressed, age >= window, counted   -> nothing
//! ```

use alloc::collections::BTreeMap;
use core::time::Duration;

/// Debounce history for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelDebounceState {
    /// When the current press was first seen; `None` while released
    pub press_start: Option<Duration>,
    /// Whether the current press has already been counted
    pub counted: bool,
    /// When a press was last counted
    pub last_counted: Option<Duration>,
}

impl ChannelDebounceState {
    fn update(&mut self, pressed: bool, now: Duration, window: Duration) -> bool {
        if !pressed {
            self.press_start = None;
            self.counted = false;
            return false;
        }

        let Some(start) = self.press_start else {
            self.press_start = Some(now);
            return false;
        };

        let settled = now.saturating_sub(start) >= window;
        if settled && !self.counted {
            self.counted = true;
            self.last_counted = Some(now);
            return true;
        }
        false
    }
}

/// Per-channel debounce filter
///
/// Channels are created on first use and kept for the filter's lifetime.
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    window: Duration,
    channels: BTreeMap<u16, ChannelDebounceState>,
}

impl DebounceFilter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            channels: BTreeMap::new(),
        }
    }

    /// Feed one raw reading; returns true exactly once per press
    ///
    /// `level` is the raw digital value: `0` means pressed (active low),
    /// anything else means released.
    pub fn update(&mut self, channel: u16, level: i32, now: Duration) -> bool {
        self.channels
            .entry(channel)
            .or_default()
            .update(level == 0, now, self.window)
    }

    /// Current state of a channel, if it has been polled
    pub fn state(&self, channel: u16) -> Option<&ChannelDebounceState> {
        self.channels.get(&channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);
    const PRESSED: i32 = 0;
    const RELEASED: i32 = 1;

    fn filter() -> DebounceFilter {
        DebounceFilter::new(100 * MS)
    }

    #[test]
    fn test_first_detection_never_counts() {
        let mut f = filter();
        assert!(!f.update(33, PRESSED, Duration::ZERO));
        assert_eq!(f.state(33).unwrap().press_start, Some(Duration::ZERO));
    }

    #[test]
    fn test_counts_after_window() {
        let mut f = filter();
        assert!(!f.update(33, PRESSED, 0 * MS));
        assert!(!f.update(33, PRESSED, 60 * MS));
        assert!(f.update(33, PRESSED, 100 * MS));
    }

    #[test]
    fn test_counts_only_once_per_press() {
        let mut f = filter();
        f.update(33, PRESSED, 0 * MS);
        assert!(f.update(33, PRESSED, 120 * MS));
        for t in (140..1000u32).step_by(20) {
            assert!(!f.update(33, PRESSED, t * MS));
        }
    }

    #[test]
    fn test_release_rearms() {
        let mut f = filter();
        f.update(33, PRESSED, 0 * MS);
        assert!(f.update(33, PRESSED, 100 * MS));
        assert!(!f.update(33, RELEASED, 150 * MS));
        assert_eq!(f.state(33).unwrap().press_start, None);

        assert!(!f.update(33, PRESSED, 200 * MS));
        assert!(!f.update(33, PRESSED, 250 * MS));
        assert!(f.update(33, PRESSED, 300 * MS));
    }

    #[test]
    fn test_rearms_when_release_shares_tick_with_count() {
        let mut f = filter();
        f.update(33, PRESSED, 0 * MS);
        assert!(f.update(33, PRESSED, 100 * MS));
        assert!(!f.update(33, RELEASED, 100 * MS));

        // New press starts on the same reading as the last count
        let mut events = 0;
        for t in 100..400u32 {
            if f.update(33, PRESSED, t * MS) {
                events += 1;
                assert_eq!(t, 200);
            }
        }
        assert_eq!(events, 1);
        assert_eq!(f.state(33).unwrap().last_counted, Some(200 * MS));
    }

    #[test]
    fn test_short_bounce_never_counts() {
        let mut f = filter();
        for t in (0..500u32).step_by(20) {
            let level = if (t / 20) % 2 == 0 { PRESSED } else { RELEASED };
            assert!(!f.update(33, level, t * MS));
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let mut f = filter();
        f.update(32, PRESSED, 0 * MS);
        f.update(33, PRESSED, 50 * MS);

        assert!(f.update(32, PRESSED, 100 * MS));
        assert!(!f.update(33, PRESSED, 100 * MS));
        assert!(f.update(33, PRESSED, 150 * MS));
    }

    #[test]
    fn test_any_nonzero_level_is_released() {
        let mut f = filter();
        f.update(33, PRESSED, 0 * MS);
        f.update(33, -1, 50 * MS);
        assert_eq!(f.state(33).unwrap().press_start, None);
    }

    #[test]
    fn test_unpolled_channel_has_no_state() {
        let f = filter();
        assert!(f.state(7).is_none());
    }
}
