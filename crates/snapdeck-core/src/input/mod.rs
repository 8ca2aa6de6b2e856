//! Input adapters
//!
//! Translate platform wheel and touch events into navigation steps. Both axes
//! share the same adapters; [`Axis`] decides which delta or coordinate counts.

pub mod touch;
pub mod wheel;

use serde::{Deserialize, Serialize};

pub use touch::{TouchAdapter, TouchGestureState, TouchOutcome, TouchPoint};
pub use wheel::{WheelAdapter, WheelDecision, WheelEvent, WheelOutcome};

/// Navigation axis of a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Sections stacked top to bottom
    #[default]
    Vertical,
    /// Items laid out left to right
    Horizontal,
}

impl Axis {
    /// Signed wheel delta along this axis.
    ///
    /// A horizontal deck also accepts the vertical wheel when the host reports
    /// horizontal intent (typically Shift held).
    pub fn project_wheel(self, delta_x: f64, delta_y: f64, horizontal_intent: bool) -> f64 {
        match self {
            Axis::Vertical => delta_y,
            Axis::Horizontal if horizontal_intent => delta_y,
            Axis::Horizontal => delta_x,
        }
    }

    /// Coordinate of a point along this axis
    pub fn project_point(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_wheel() {
        assert_eq!(Axis::Vertical.project_wheel(7.0, -30.0, false), -30.0);
        assert_eq!(Axis::Vertical.project_wheel(7.0, -30.0, true), -30.0);
        assert_eq!(Axis::Horizontal.project_wheel(7.0, -30.0, false), 7.0);
        assert_eq!(Axis::Horizontal.project_wheel(7.0, -30.0, true), -30.0);
    }

    #[test]
    fn test_project_point() {
        assert_eq!(Axis::Vertical.project_point(3.0, 9.0), 9.0);
        assert_eq!(Axis::Horizontal.project_point(3.0, 9.0), 3.0);
    }
}
