//! Section navigation state machine
//!
//! The controller owns the active index and an `in_transition` flag. A
//! transition starts on every accepted jump and ends when the host confirms the
//! target is visible. Two independent backstops end it otherwise: the per
//! transition safety timeout and the coarser watchdog.

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::host::{MotionStyle, NavigationHost};
use crate::config::AppConfig;
use crate::gesture::AdaptiveThrottle;
use crate::input::Axis;

/// What asked for a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCause {
    /// Wheel or touch step; rejected while a transition is running
    Gesture,
    /// Direct programmatic call (keyboard shortcut, host API)
    Api,
    /// History back/forward
    PopState,
    /// Initial load or deep link
    UrlChange,
}

impl JumpCause {
    /// Gesture and API jumps update the location and arm the throttle
    #[inline]
    fn is_user_navigation(self) -> bool {
        matches!(self, JumpCause::Gesture | JumpCause::Api)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Started { from: usize, to: usize },
    /// Gesture jump while another transition is in flight
    Busy,
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted { from: usize, to: usize },
    Busy,
    Throttled { remaining: Duration },
    OutOfRange,
    /// Zero delta
    NoDirection,
}

impl StepOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Accepted { .. })
    }
}

/// Snapshot of the navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub total: usize,
    pub in_transition: bool,
    pub transition_started_at: Option<Instant>,
}

pub struct NavigationController<H: NavigationHost> {
    host: H,
    axis: Axis,
    state: NavigationState,
    throttle: AdaptiveThrottle,
    safety_timeout: Duration,
    stall_threshold: Duration,
}

impl<H: NavigationHost> NavigationController<H> {
    pub fn new(host: H, axis: Axis, total: usize, config: &AppConfig) -> Self {
        let total = total.max(1);
        Self {
            host,
            axis,
            state: NavigationState {
                current_index: config.navigation.initial_index.min(total - 1),
                total,
                in_transition: false,
                transition_started_at: None,
            },
            throttle: AdaptiveThrottle::new(&config.throttle),
            safety_timeout: config.navigation.safety_timeout(),
            stall_threshold: config.navigation.stall_threshold(),
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Horizontal decks call sections "items"
    #[inline]
    pub fn current_item(&self) -> usize {
        self.state.current_index
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.state.total
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.state.in_transition
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn throttle(&self) -> &AdaptiveThrottle {
        &self.throttle
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Start a transition to `target`. The only place `current_index` changes.
    pub fn jump_to(&mut self, target: usize, cause: JumpCause, now: Instant) -> JumpOutcome {
        self.start_transition(target, cause, MotionStyle::Smooth, now)
    }

    /// Programmatic jump along a horizontal deck
    pub fn scroll_to_item(&mut self, index: usize, now: Instant) -> JumpOutcome {
        self.jump_to(index, JumpCause::Api, now)
    }

    /// History navigation; honored even while a transition is running
    pub fn handle_pop_state_navigation(&mut self, index: usize, now: Instant) -> JumpOutcome {
        self.jump_to(index, JumpCause::PopState, now)
    }

    /// Initial load or deep link; honored even while a transition is running
    pub fn handle_url_section_change(
        &mut self,
        index: usize,
        motion: MotionStyle,
        now: Instant,
    ) -> JumpOutcome {
        self.start_transition(index, JumpCause::UrlChange, motion, now)
    }

    /// Move one section in the direction of `delta`.
    ///
    /// Entry point for wheel and touch input: the magnitude is ignored, a single
    /// call moves at most one section.
    pub fn step_by(&mut self, delta: i64, is_momentum: bool, now: Instant) -> StepOutcome {
        let step = delta.signum();
        if step == 0 {
            return StepOutcome::NoDirection;
        }

        if self.state.in_transition {
            trace!("Step ignored: transition in flight");
            return StepOutcome::Busy;
        }

        let status = self.throttle.status(is_momentum, now);
        if status.throttled {
            trace!(
                is_momentum,
                remaining_ms = status.remaining.as_millis() as u64,
                "Step throttled"
            );
            return StepOutcome::Throttled {
                remaining: status.remaining,
            };
        }

        let target = self.state.current_index as i64 + step;
        if target < 0 {
            return StepOutcome::OutOfRange;
        }

        match self.jump_to(target as usize, JumpCause::Gesture, now) {
            JumpOutcome::Started { from, to } => StepOutcome::Accepted { from, to },
            JumpOutcome::Busy => StepOutcome::Busy,
            JumpOutcome::OutOfRange => StepOutcome::OutOfRange,
        }
    }

    /// Completion signal from the visibility observer. Idempotent.
    pub fn confirm_arrived(&mut self) -> bool {
        if !self.state.in_transition {
            return false;
        }
        self.state.in_transition = false;
        debug!(index = self.state.current_index, "Transition confirmed");
        true
    }

    /// When the safety timeout releases the current transition
    pub fn transition_deadline(&self) -> Option<Instant> {
        if !self.state.in_transition {
            return None;
        }
        self.state
            .transition_started_at
            .map(|started| started + self.safety_timeout)
    }

    /// First-tier recovery: release the transition once the safety timeout passed
    pub fn expire_transition(&mut self, now: Instant) -> bool {
        match self.transition_deadline() {
            Some(deadline) if now >= deadline => {
                self.state.in_transition = false;
                debug!(
                    index = self.state.current_index,
                    timeout_ms = self.safety_timeout.as_millis() as u64,
                    "Transition released by safety timeout"
                );
                true
            }
            _ => false,
        }
    }

    /// Second-tier recovery, driven by a periodic scheduler
    pub fn watchdog_tick(&mut self, now: Instant) -> bool {
        if !self.state.in_transition {
            return false;
        }
        let Some(started) = self.state.transition_started_at else {
            return false;
        };

        let elapsed = now.saturating_duration_since(started);
        if elapsed > self.stall_threshold {
            self.state.in_transition = false;
            warn!(
                index = self.state.current_index,
                elapsed_ms = elapsed.as_millis() as u64,
                "Watchdog released stalled transition"
            );
            return true;
        }
        false
    }

    /// Release the lock and open the throttle; used when the deck is torn down or rebuilt
    pub fn teardown(&mut self) {
        self.state.in_transition = false;
        self.state.transition_started_at = None;
        self.throttle.reset();
    }

    fn start_transition(
        &mut self,
        target: usize,
        cause: JumpCause,
        motion: MotionStyle,
        now: Instant,
    ) -> JumpOutcome {
        if target >= self.state.total {
            trace!(target, total = self.state.total, ?cause, "Jump out of range");
            return JumpOutcome::OutOfRange;
        }

        if self.state.in_transition && cause == JumpCause::Gesture {
            return JumpOutcome::Busy;
        }

        let from = self.state.current_index;
        self.state.in_transition = true;
        self.state.transition_started_at = Some(now);

        if let Some(handle) = self.host.element(target) {
            self.host.scroll_into_view(handle, self.axis, motion);
        } else {
            debug!(target, "No element registered for section, skipping scroll");
        }

        self.state.current_index = target;

        if cause.is_user_navigation() {
            self.host.location_changed(target);
            self.throttle.mark_accepted(now);
        }

        debug!(from, to = target, ?cause, ?motion, "Transition started");
        JumpOutcome::Started { from, to: target }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum HostCall {
        Scroll(usize, Axis, MotionStyle),
        Location(usize),
    }

    /// Records every collaborator call; sections listed in `missing` have no element
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub calls: Vec<HostCall>,
        pub missing: Vec<usize>,
    }

    impl NavigationHost for RecordingHost {
        type Handle = usize;

        fn element(&self, index: usize) -> Option<usize> {
            (!self.missing.contains(&index)).then_some(index)
        }

        fn scroll_into_view(&mut self, handle: usize, axis: Axis, motion: MotionStyle) {
            self.calls.push(HostCall::Scroll(handle, axis, motion));
        }

        fn location_changed(&mut self, index: usize) {
            self.calls.push(HostCall::Location(index));
        }
    }

    pub(crate) fn controller(total: usize) -> NavigationController<RecordingHost> {
        NavigationController::new(
            RecordingHost::default(),
            Axis::Vertical,
            total,
            &AppConfig::default(),
        )
    }

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_initial_state() {
        let mut config = AppConfig::default();
        config.navigation.initial_index = 9;
        let nav = NavigationController::new(RecordingHost::default(), Axis::Vertical, 4, &config);

        assert_eq!(nav.current_index(), 3);
        assert!(!nav.is_transitioning());
        assert_eq!(nav.total(), 4);
    }

    #[test]
    fn test_step_at_lower_bound_is_ignored() {
        let base = Instant::now();
        let mut nav = controller(4);

        assert_eq!(nav.step_by(-1, false, base), StepOutcome::OutOfRange);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_transitioning());
        // Rejected step must not arm the throttle
        assert_eq!(nav.throttle().state().last_accepted, None);
        assert!(nav.host().calls.is_empty());
    }

    #[test]
    fn test_step_at_upper_bound_is_ignored() {
        let base = Instant::now();
        let mut config = AppConfig::default();
        config.navigation.initial_index = 3;
        let mut nav =
            NavigationController::new(RecordingHost::default(), Axis::Vertical, 4, &config);

        assert_eq!(nav.step_by(1, false, base), StepOutcome::OutOfRange);
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.throttle().is_throttled(false, base));
    }

    #[test]
    fn test_step_normalizes_magnitude() {
        let base = Instant::now();
        let mut nav = controller(10);

        assert_eq!(
            nav.step_by(250, false, base),
            StepOutcome::Accepted { from: 0, to: 1 }
        );
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_at_most_one_in_flight() {
        let base = Instant::now();
        let mut nav = controller(5);

        assert!(nav.step_by(1, false, base).is_accepted());
        assert_eq!(nav.step_by(1, false, at(base, 700)), StepOutcome::Busy);
        assert_eq!(nav.step_by(1, false, at(base, 900)), StepOutcome::Busy);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_throttle_blocks_after_confirm() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.step_by(1, false, base);
        nav.confirm_arrived();

        assert!(matches!(
            nav.step_by(1, false, at(base, 300)),
            StepOutcome::Throttled { .. }
        ));
        assert!(matches!(
            nav.step_by(1, true, at(base, 1000)),
            StepOutcome::Throttled { .. }
        ));
        assert!(nav.step_by(1, false, at(base, 1000)).is_accepted());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_gesture_jump_effects() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.step_by(1, false, base);

        assert_eq!(
            nav.host().calls,
            vec![
                HostCall::Scroll(1, Axis::Vertical, MotionStyle::Smooth),
                HostCall::Location(1),
            ]
        );
        assert_eq!(nav.state().transition_started_at, Some(base));
        assert_eq!(nav.throttle().state().last_accepted, Some(base));
    }

    #[test]
    fn test_programmatic_jump_overrides_lock() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.step_by(1, false, base);
        assert_eq!(
            nav.jump_to(4, JumpCause::Api, at(base, 100)),
            JumpOutcome::Started { from: 1, to: 4 }
        );
        assert_eq!(nav.current_index(), 4);
        assert!(nav.is_transitioning());
        assert_eq!(nav.state().transition_started_at, Some(at(base, 100)));
    }

    #[test]
    fn test_gesture_jump_rejected_while_busy() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.jump_to(2, JumpCause::Api, base);
        assert_eq!(nav.jump_to(3, JumpCause::Gesture, base), JumpOutcome::Busy);
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_pop_state_skips_location_and_throttle() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.handle_pop_state_navigation(3, base);

        assert_eq!(nav.current_index(), 3);
        assert_eq!(
            nav.host().calls,
            vec![HostCall::Scroll(3, Axis::Vertical, MotionStyle::Smooth)]
        );
        assert_eq!(nav.throttle().state().last_accepted, None);
    }

    #[test]
    fn test_url_change_uses_requested_motion() {
        let base = Instant::now();
        let mut nav = controller(5);

        nav.step_by(1, false, base);
        nav.handle_url_section_change(4, MotionStyle::Immediate, at(base, 10));

        assert_eq!(nav.current_index(), 4);
        assert_eq!(
            nav.host().calls.last(),
            Some(&HostCall::Scroll(4, Axis::Vertical, MotionStyle::Immediate))
        );
        assert!(!nav.host().calls.contains(&HostCall::Location(4)));
    }

    #[test]
    fn test_missing_element_still_moves_index() {
        let base = Instant::now();
        let mut nav = controller(5);
        nav.host_mut().missing.push(1);

        assert!(nav.step_by(1, false, base).is_accepted());
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.host().calls, vec![HostCall::Location(1)]);
    }

    #[test]
    fn test_out_of_range_jump_is_noop() {
        let base = Instant::now();
        let mut nav = controller(3);

        assert_eq!(nav.jump_to(3, JumpCause::Api, base), JumpOutcome::OutOfRange);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_transitioning());
        assert!(nav.host().calls.is_empty());
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let base = Instant::now();
        let mut nav = controller(3);

        assert!(!nav.confirm_arrived());
        assert!(!nav.confirm_arrived());
        assert!(!nav.state().in_transition);

        nav.step_by(1, false, base);
        assert!(nav.confirm_arrived());
        let snapshot = nav.state();
        assert!(!nav.confirm_arrived());
        assert_eq!(nav.state(), snapshot);
    }

    #[test]
    fn test_safety_timeout() {
        let base = Instant::now();
        let mut nav = controller(3);

        nav.step_by(1, false, base);
        assert_eq!(nav.transition_deadline(), Some(at(base, 2000)));
        assert!(!nav.expire_transition(at(base, 1999)));
        assert!(nav.expire_transition(at(base, 2000)));
        assert!(!nav.is_transitioning());
        assert_eq!(nav.transition_deadline(), None);
    }

    #[test]
    fn test_watchdog_recovers_stalled_transition() {
        let base = Instant::now();
        let mut nav = controller(3);

        nav.step_by(1, false, base);
        assert!(!nav.watchdog_tick(at(base, 1000)));
        assert!(!nav.watchdog_tick(at(base, 5000)));
        assert!(nav.is_transitioning());

        assert!(nav.watchdog_tick(at(base, 6000)));
        assert!(!nav.is_transitioning());
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_watchdog_ignores_idle() {
        let base = Instant::now();
        let mut nav = controller(3);
        assert!(!nav.watchdog_tick(at(base, 60_000)));
    }

    #[test]
    fn test_teardown_releases_everything() {
        let base = Instant::now();
        let mut nav = controller(5);
        nav.step_by(1, true, base);

        nav.teardown();
        assert!(!nav.is_transitioning());
        assert!(!nav.throttle().is_throttled(true, base));
    }

    #[test]
    fn test_horizontal_aliases() {
        let base = Instant::now();
        let mut nav = NavigationController::new(
            RecordingHost::default(),
            Axis::Horizontal,
            6,
            &AppConfig::default(),
        );

        nav.scroll_to_item(5, base);
        assert_eq!(nav.current_item(), 5);
        assert_eq!(
            nav.host().calls[0],
            HostCall::Scroll(5, Axis::Horizontal, MotionStyle::Smooth)
        );
    }
}
