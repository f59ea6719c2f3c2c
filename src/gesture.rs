//! Tap timing for the list interaction shortcuts.
//!
//! Selecting a record twice in rapid succession opens the edit flow and a
//! sustained press opens the delete confirmation. The double-tap window is a
//! timing contract: the first tap arms a timer, a second tap strictly within
//! the window triggers the edit flow, and an armed timer clears itself once
//! the window lapses. The interaction layer owns the clock; this module owns
//! the state transitions.

use std::time::{Duration, Instant};

/// How close together two taps must be to count as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// What a tap amounted to.
#[derive(Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap of a potential pair; a timer is now armed.
    Armed,
    /// Second tap within the window; the edit flow should open.
    DoubleTap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapState {
    Idle,
    Armed(Instant),
}

/// Detects double taps as an explicit state machine.
///
/// The states are `Idle` and `Armed(timestamp)`; [DoubleTapDetector::tap]
/// drives the transitions and [DoubleTapDetector::expire] is the timeout
/// transition back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleTapDetector {
    state: TapState,
}

impl DoubleTapDetector {
    /// Create a detector in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: TapState::Idle,
        }
    }

    /// Register a tap at `now`.
    ///
    /// A tap while armed and within [DOUBLE_TAP_WINDOW] of the arming tap
    /// reports [TapOutcome::DoubleTap] and disarms. Any other tap, including
    /// one whose arming tap has gone stale, re-arms the detector.
    pub fn tap(&mut self, now: Instant) -> TapOutcome {
        match self.state {
            TapState::Armed(armed_at) if now.duration_since(armed_at) < DOUBLE_TAP_WINDOW => {
                self.state = TapState::Idle;
                TapOutcome::DoubleTap
            }
            _ => {
                self.state = TapState::Armed(now);
                TapOutcome::Armed
            }
        }
    }

    /// The timeout transition: clear an armed timer whose window has lapsed
    /// by `now`. Does nothing while the window is still open.
    pub fn expire(&mut self, now: Instant) {
        if let TapState::Armed(armed_at) = self.state
            && now.duration_since(armed_at) >= DOUBLE_TAP_WINDOW
        {
            self.state = TapState::Idle;
        }
    }

    /// Whether a first tap is waiting for its pair.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TapState::Armed(_))
    }
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod double_tap_tests {
    use std::time::{Duration, Instant};

    use super::{DOUBLE_TAP_WINDOW, DoubleTapDetector, TapOutcome};

    #[test]
    fn first_tap_arms() {
        let mut detector = DoubleTapDetector::new();

        let outcome = detector.tap(Instant::now());

        assert_eq!(TapOutcome::Armed, outcome);
        assert!(detector.is_armed());
    }

    #[test]
    fn second_tap_within_window_is_a_double_tap() {
        let mut detector = DoubleTapDetector::new();
        let first = Instant::now();

        detector.tap(first);
        let outcome = detector.tap(first + Duration::from_millis(100));

        assert_eq!(TapOutcome::DoubleTap, outcome);
        assert!(!detector.is_armed());
    }

    #[test]
    fn second_tap_at_the_window_boundary_re_arms() {
        let mut detector = DoubleTapDetector::new();
        let first = Instant::now();

        detector.tap(first);
        let outcome = detector.tap(first + DOUBLE_TAP_WINDOW);

        // The window is strict: exactly 300 ms later is too late.
        assert_eq!(TapOutcome::Armed, outcome);
        assert!(detector.is_armed());
    }

    #[test]
    fn double_tap_disarms_so_a_third_tap_starts_over() {
        let mut detector = DoubleTapDetector::new();
        let first = Instant::now();

        detector.tap(first);
        detector.tap(first + Duration::from_millis(100));
        let outcome = detector.tap(first + Duration::from_millis(200));

        assert_eq!(TapOutcome::Armed, outcome);
    }

    #[test]
    fn expire_clears_a_lapsed_timer() {
        let mut detector = DoubleTapDetector::new();
        let first = Instant::now();

        detector.tap(first);
        detector.expire(first + Duration::from_millis(350));

        assert!(!detector.is_armed());
    }

    #[test]
    fn expire_keeps_an_open_window_armed() {
        let mut detector = DoubleTapDetector::new();
        let first = Instant::now();

        detector.tap(first);
        detector.expire(first + Duration::from_millis(100));

        assert!(detector.is_armed());
    }

    #[test]
    fn expire_while_idle_does_nothing() {
        let mut detector = DoubleTapDetector::new();

        detector.expire(Instant::now());

        assert!(!detector.is_armed());
    }
}
