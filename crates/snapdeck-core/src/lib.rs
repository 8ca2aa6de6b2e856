pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod navigation;
pub mod scheduler;
pub mod trace;

pub use config::{AppConfig, Axis, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use gesture::{AdaptiveThrottle, GestureClassifier, GestureKind, GestureSample};
pub use navigation::{JumpCause, MotionStyle, NavigationController, NavigationHost};
