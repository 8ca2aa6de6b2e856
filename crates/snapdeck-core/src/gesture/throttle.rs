//! Adaptive throttle for navigation actions
//!
//! After a navigation is accepted, further gesture-driven navigation is held off
//! for a window. Intentional gestures use the short window; momentum samples use
//! the long one so that nothing from an inertia tail can get through.

use std::time::{Duration, Instant};

use crate::config::ThrottleConfig;

/// Time of the last accepted action (`None` = never, or reset)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottleState {
    pub last_accepted: Option<Instant>,
}

/// Snapshot of the gate for one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStatus {
    pub throttled: bool,
    /// Time left until the gate opens (zero when open)
    pub remaining: Duration,
    /// Window selected by the classification
    pub effective_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct AdaptiveThrottle {
    normal: Duration,
    momentum: Duration,
    state: ThrottleState,
}

impl Default for AdaptiveThrottle {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

impl AdaptiveThrottle {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self::with_durations(config.normal(), config.momentum())
    }

    pub fn with_durations(normal: Duration, momentum: Duration) -> Self {
        Self {
            normal,
            momentum,
            state: ThrottleState::default(),
        }
    }

    #[inline]
    pub fn effective_duration(&self, is_momentum: bool) -> Duration {
        if is_momentum {
            self.momentum
        } else {
            self.normal
        }
    }

    pub fn is_throttled(&self, is_momentum: bool, now: Instant) -> bool {
        self.status(is_momentum, now).throttled
    }

    pub fn status(&self, is_momentum: bool, now: Instant) -> ThrottleStatus {
        let effective_duration = self.effective_duration(is_momentum);
        let remaining = match self.state.last_accepted {
            Some(last) => effective_duration.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        };

        ThrottleStatus {
            throttled: !remaining.is_zero(),
            remaining,
            effective_duration,
        }
    }

    /// Record an accepted navigation action.
    ///
    /// Never moves the timestamp backwards.
    pub fn mark_accepted(&mut self, now: Instant) {
        let next = match self.state.last_accepted {
            Some(last) if last > now => last,
            _ => now,
        };
        self.state.last_accepted = Some(next);
    }

    /// Open the gate for every duration
    pub fn reset(&mut self) {
        self.state = ThrottleState::default();
    }

    pub fn state(&self) -> &ThrottleState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttle() -> AdaptiveThrottle {
        AdaptiveThrottle::with_durations(Duration::from_millis(600), Duration::from_millis(1800))
    }

    #[test]
    fn test_open_before_first_action() {
        let throttle = throttle();
        let now = Instant::now();
        assert!(!throttle.is_throttled(false, now));
        assert!(!throttle.is_throttled(true, now));
    }

    #[test]
    fn test_normal_window_boundary() {
        let mut throttle = throttle();
        let t0 = Instant::now();
        throttle.mark_accepted(t0);

        assert!(throttle.is_throttled(false, t0 + Duration::from_millis(599)));
        assert!(!throttle.is_throttled(false, t0 + Duration::from_millis(600)));
    }

    #[test]
    fn test_momentum_window_boundary() {
        let mut throttle = throttle();
        let t0 = Instant::now();
        throttle.mark_accepted(t0);

        assert!(throttle.is_throttled(true, t0 + Duration::from_millis(1799)));
        assert!(!throttle.is_throttled(true, t0 + Duration::from_millis(1800)));
    }

    #[test]
    fn test_status_reports_remaining() {
        let mut throttle = throttle();
        let t0 = Instant::now();
        throttle.mark_accepted(t0);

        let status = throttle.status(true, t0 + Duration::from_millis(800));
        assert!(status.throttled);
        assert_eq!(status.remaining, Duration::from_millis(1000));
        assert_eq!(status.effective_duration, Duration::from_millis(1800));

        let status = throttle.status(false, t0 + Duration::from_millis(800));
        assert!(!status.throttled);
        assert_eq!(status.remaining, Duration::ZERO);
    }

    #[test]
    fn test_mark_accepted_is_monotonic() {
        let mut throttle = throttle();
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(500);

        throttle.mark_accepted(later);
        throttle.mark_accepted(t0);
        assert_eq!(throttle.state().last_accepted, Some(later));
    }

    #[test]
    fn test_reset_opens_gate() {
        let mut throttle = throttle();
        let t0 = Instant::now();
        throttle.mark_accepted(t0);
        throttle.reset();

        assert!(!throttle.is_throttled(true, t0));
        assert_eq!(throttle.state().last_accepted, None);
    }
}
