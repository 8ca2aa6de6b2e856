//! Touch swipe adapter

use std::time::{Duration, Instant};

use tracing::trace;

use crate::config::TouchConfig;
use crate::navigation::{NavigationController, NavigationHost, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    pub timestamp: Instant,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64, timestamp: Instant) -> Self {
        Self { x, y, timestamp }
    }
}

/// Origin of the touch currently being tracked
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchGestureState {
    pub origin: f64,
    pub origin_timestamp: Option<Instant>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// No touch was being tracked
    Inactive,
    /// Too short or too slow to count as a swipe
    Discarded,
    Step(StepOutcome),
}

#[derive(Debug, Clone)]
pub struct TouchAdapter {
    min_swipe_distance: f64,
    max_swipe_duration: Duration,
    state: TouchGestureState,
}

impl Default for TouchAdapter {
    fn default() -> Self {
        Self::new(&TouchConfig::default())
    }
}

impl TouchAdapter {
    pub fn new(config: &TouchConfig) -> Self {
        Self {
            min_swipe_distance: config.min_swipe_distance,
            max_swipe_duration: config.max_swipe_duration(),
            state: TouchGestureState::default(),
        }
    }

    pub fn state(&self) -> &TouchGestureState {
        &self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start tracking unless a transition is running. Returns whether tracking started.
    pub fn touch_start<H: NavigationHost>(
        &mut self,
        point: TouchPoint,
        controller: &NavigationController<H>,
    ) -> bool {
        if controller.is_transitioning() {
            trace!("Touch start ignored: transition in flight");
            return false;
        }

        self.state = TouchGestureState {
            origin: controller.axis().project_point(point.x, point.y),
            origin_timestamp: Some(point.timestamp),
            active: true,
        };
        true
    }

    /// Whether the host should suppress its native scrolling for this move
    pub fn touch_move(&self, _point: TouchPoint) -> bool {
        self.state.active
    }

    pub fn touch_end<H: NavigationHost>(
        &mut self,
        point: TouchPoint,
        controller: &mut NavigationController<H>,
    ) -> TouchOutcome {
        if !self.state.active {
            return TouchOutcome::Inactive;
        }
        self.state.active = false;

        let end = controller.axis().project_point(point.x, point.y);
        let travel = self.state.origin - end;
        let distance = travel.abs();
        let elapsed = self
            .state
            .origin_timestamp
            .map(|start| point.timestamp.saturating_duration_since(start))
            .unwrap_or_default();

        if distance < self.min_swipe_distance || elapsed > self.max_swipe_duration {
            trace!(
                distance,
                elapsed_ms = elapsed.as_millis() as u64,
                "Touch discarded: not a deliberate swipe"
            );
            return TouchOutcome::Discarded;
        }

        // Finger moving up/left advances; touch has no inertia injection
        let step = if travel > 0.0 { 1 } else { -1 };
        TouchOutcome::Step(controller.step_by(step, false, point.timestamp))
    }

    pub fn touch_cancel(&mut self) {
        self.state.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::input::Axis;
    use crate::navigation::controller::tests::{controller, RecordingHost};

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_swipe_up_advances() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();

        assert!(touch.touch_start(TouchPoint::new(10.0, 400.0, base), &nav));
        assert!(touch.touch_move(TouchPoint::new(10.0, 300.0, at(base, 100))));
        let outcome = touch.touch_end(TouchPoint::new(10.0, 200.0, at(base, 200)), &mut nav);

        assert_eq!(
            outcome,
            TouchOutcome::Step(StepOutcome::Accepted { from: 0, to: 1 })
        );
        assert!(!touch.is_active());
    }

    #[test]
    fn test_swipe_down_goes_back() {
        let base = Instant::now();
        let mut config = AppConfig::default();
        config.navigation.initial_index = 2;
        let mut nav =
            NavigationController::new(RecordingHost::default(), Axis::Vertical, 4, &config);
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(0.0, 100.0, base), &nav);
        touch.touch_end(TouchPoint::new(0.0, 180.0, at(base, 150)), &mut nav);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_short_swipe_discarded() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(0.0, 100.0, base), &nav);
        let outcome = touch.touch_end(TouchPoint::new(0.0, 51.0, at(base, 100)), &mut nav);
        assert_eq!(outcome, TouchOutcome::Discarded);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_slow_swipe_discarded() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(0.0, 400.0, base), &nav);
        let outcome = touch.touch_end(TouchPoint::new(0.0, 100.0, at(base, 801)), &mut nav);
        assert_eq!(outcome, TouchOutcome::Discarded);
    }

    #[test]
    fn test_start_ignored_during_transition() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();
        nav.step_by(1, false, base);

        assert!(!touch.touch_start(TouchPoint::new(0.0, 400.0, at(base, 10)), &nav));
        assert!(!touch.touch_move(TouchPoint::new(0.0, 300.0, at(base, 20))));
        assert_eq!(
            touch.touch_end(TouchPoint::new(0.0, 100.0, at(base, 30)), &mut nav),
            TouchOutcome::Inactive
        );
    }

    #[test]
    fn test_cancel_clears_active() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(0.0, 400.0, base), &nav);
        touch.touch_cancel();
        assert_eq!(
            touch.touch_end(TouchPoint::new(0.0, 100.0, at(base, 100)), &mut nav),
            TouchOutcome::Inactive
        );
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_touch_uses_normal_throttle_tier() {
        let base = Instant::now();
        let mut nav = controller(4);
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(0.0, 400.0, base), &nav);
        touch.touch_end(TouchPoint::new(0.0, 100.0, at(base, 100)), &mut nav);
        nav.confirm_arrived();

        touch.touch_start(TouchPoint::new(0.0, 400.0, at(base, 600)), &nav);
        let outcome = touch.touch_end(TouchPoint::new(0.0, 100.0, at(base, 700)), &mut nav);
        assert_eq!(
            outcome,
            TouchOutcome::Step(StepOutcome::Accepted { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_horizontal_swipe_uses_x() {
        let base = Instant::now();
        let mut nav = NavigationController::new(
            RecordingHost::default(),
            Axis::Horizontal,
            3,
            &AppConfig::default(),
        );
        let mut touch = TouchAdapter::default();

        touch.touch_start(TouchPoint::new(300.0, 0.0, base), &nav);
        touch.touch_end(TouchPoint::new(100.0, 500.0, at(base, 100)), &mut nav);
        assert_eq!(nav.current_item(), 1);
    }
}
