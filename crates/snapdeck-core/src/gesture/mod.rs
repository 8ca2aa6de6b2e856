//! Gesture classification and adaptive throttling
//!
//! - `classifier` - labels raw wheel/trackpad samples as intentional or momentum
//! - `throttle` - gates navigation with a window chosen by that label

pub mod classifier;
pub mod throttle;

pub use classifier::{
    classify, ClassifierState, Direction, GestureClassifier, GestureKind, GestureSample,
};
pub use throttle::{AdaptiveThrottle, ThrottleState, ThrottleStatus};
