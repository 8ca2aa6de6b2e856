//! Section navigation
//!
//! - `controller` - the navigation state machine (index, transition lock, recovery)
//! - `host` - capabilities the host provides (element registry, scrolling, location)
//! - `visibility` - completion detection from viewport overlap

pub mod controller;
pub mod host;
pub mod visibility;

pub use controller::{
    JumpCause, JumpOutcome, NavigationController, NavigationState, StepOutcome,
};
pub use host::{MotionStyle, NavigationHost, NullHost};
pub use visibility::{visibility_ratio, Span, VisibilityObserver};
