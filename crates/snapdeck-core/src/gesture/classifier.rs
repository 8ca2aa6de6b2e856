//! Momentum classifier for continuous scroll input
//!
//! Trackpad drivers keep emitting scroll events after the finger lifts, simulating
//! inertia. Those events arrive in quick succession, keep the direction of the
//! original swipe and never grow in magnitude. A sample that matches all three
//! is a momentum continuation; anything else starts a new, intentional gesture.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::config::GestureConfig;

/// Sign of a scroll delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    /// Direction of a signed delta
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Forward
        } else if delta < 0.0 {
            Direction::Backward
        } else {
            Direction::None
        }
    }

    /// Index step for this direction: -1, 0 or +1
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }
}

/// One normalized input sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Absolute magnitude of the delta
    pub magnitude: f64,
    pub direction: Direction,
    pub timestamp: Instant,
}

impl GestureSample {
    pub fn new(magnitude: f64, direction: Direction, timestamp: Instant) -> Self {
        Self {
            magnitude: magnitude.abs(),
            direction,
            timestamp,
        }
    }

    /// Build a sample from a signed delta
    pub fn from_delta(delta: f64, timestamp: Instant) -> Self {
        Self::new(delta.abs(), Direction::of(delta), timestamp)
    }
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Intentional,
    Momentum,
}

impl GestureKind {
    #[inline]
    pub fn is_momentum(self) -> bool {
        self == GestureKind::Momentum
    }
}

/// Memory of the previous sample on one input stream
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierState {
    pub last_magnitude: f64,
    pub last_direction: Direction,
    pub last_timestamp: Option<Instant>,
}

/// Classify `sample` against the previous one and remember it.
///
/// The state always ends up holding `sample`, whatever the label.
pub fn classify(
    state: &mut ClassifierState,
    sample: GestureSample,
    min_time_gap: Duration,
) -> GestureKind {
    let rapid = state
        .last_timestamp
        .map(|last| sample.timestamp.saturating_duration_since(last) < min_time_gap)
        .unwrap_or(false);
    let same_direction =
        state.last_direction != Direction::None && sample.direction == state.last_direction;
    let decaying = sample.magnitude <= state.last_magnitude;

    let kind = if rapid && same_direction && decaying {
        GestureKind::Momentum
    } else {
        GestureKind::Intentional
    };

    trace!(
        magnitude = sample.magnitude,
        last_magnitude = state.last_magnitude,
        rapid,
        same_direction,
        decaying,
        ?kind,
        "Classified scroll sample"
    );

    state.last_magnitude = sample.magnitude;
    state.last_direction = sample.direction;
    state.last_timestamp = Some(sample.timestamp);

    kind
}

/// Classifier bound to one input stream
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    min_delta: f64,
    min_time_gap: Duration,
    state: ClassifierState,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_delta: config.min_delta,
            min_time_gap: config.min_time_gap(),
            state: ClassifierState::default(),
        }
    }

    /// Noise filter: false for deltas below `min_delta`
    #[inline]
    pub fn is_significant(&self, magnitude: f64) -> bool {
        magnitude.abs() >= self.min_delta
    }

    pub fn classify(&mut self, sample: GestureSample) -> GestureKind {
        classify(&mut self.state, sample, self.min_time_gap)
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Forget the previous sample
    pub fn reset(&mut self) {
        self.state = ClassifierState::default();
    }
}
