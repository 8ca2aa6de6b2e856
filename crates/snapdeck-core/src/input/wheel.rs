//! Wheel / trackpad adapter

use std::time::Instant;

use tracing::trace;

use crate::config::GestureConfig;
use crate::gesture::{GestureClassifier, GestureKind, GestureSample};
use crate::navigation::{NavigationController, NavigationHost, StepOutcome};

/// Raw wheel event as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Modifier asking for horizontal scrolling (usually Shift)
    pub horizontal_intent: bool,
    pub timestamp: Instant,
}

impl WheelEvent {
    pub fn vertical(delta_y: f64, timestamp: Instant) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            horizontal_intent: false,
            timestamp,
        }
    }

    pub fn horizontal(delta_x: f64, timestamp: Instant) -> Self {
        Self {
            delta_x,
            delta_y: 0.0,
            horizontal_intent: false,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDecision {
    /// Below the noise floor; the classifier never saw it
    Noise,
    Step { kind: GestureKind, outcome: StepOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelOutcome {
    /// The host must suppress its own scrolling for this event
    pub prevent_default: bool,
    pub decision: WheelDecision,
}

/// Owns the classifier for one wheel stream
#[derive(Debug, Clone, Default)]
pub struct WheelAdapter {
    classifier: GestureClassifier,
}

impl WheelAdapter {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(config),
        }
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Start the next wheel event as a fresh gesture
    pub fn reset(&mut self) {
        self.classifier.reset();
    }

    pub fn handle<H: NavigationHost>(
        &mut self,
        event: WheelEvent,
        controller: &mut NavigationController<H>,
    ) -> WheelOutcome {
        let delta = controller
            .axis()
            .project_wheel(event.delta_x, event.delta_y, event.horizontal_intent);

        if !self.classifier.is_significant(delta) {
            trace!(delta, "Wheel delta below noise floor");
            return WheelOutcome {
                prevent_default: true,
                decision: WheelDecision::Noise,
            };
        }

        let sample = GestureSample::from_delta(delta, event.timestamp);
        let kind = self.classifier.classify(sample);
        let outcome = controller.step_by(
            sample.direction.step(),
            kind.is_momentum(),
            event.timestamp,
        );

        WheelOutcome {
            prevent_default: true,
            decision: WheelDecision::Step { kind, outcome },
        }
    }
}
