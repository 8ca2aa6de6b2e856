//! Smooth transition scrolling for the terminal deck
//!
//! This is the host-side "scroll to position" capability the navigation core
//! delegates to. The core only says which section to bring into view; the
//! animator moves the viewport there over a few frames.
//!
//! - `easing` - easing curves mapping [0, 1] progress to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `config` - duration helpers over `ScrollConfig` (defined in snapdeck-core)
//! - `animation` - the animator combining the three

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
