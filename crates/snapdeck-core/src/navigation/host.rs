//! Collaborators the navigation controller drives

use crate::input::Axis;

/// How the host should move to a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionStyle {
    #[default]
    Smooth,
    Immediate,
}

/// Host-side capabilities used by [`NavigationController`](super::NavigationController)
///
/// The host owns the registry of navigable elements, the scroll primitive and the
/// location (URL/history) side of navigation.
pub trait NavigationHost {
    /// Opaque reference to a navigable element
    type Handle;

    /// Element registered for `index`, if any
    fn element(&self, index: usize) -> Option<Self::Handle>;

    /// Bring `handle` into view along `axis`
    fn scroll_into_view(&mut self, handle: Self::Handle, axis: Axis, motion: MotionStyle);

    /// Called after gesture or API driven navigation, never for history-driven jumps
    fn location_changed(&mut self, _index: usize) {}
}

/// Host that scrolls nothing and records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl NavigationHost for NullHost {
    type Handle = usize;

    fn element(&self, index: usize) -> Option<usize> {
        Some(index)
    }

    fn scroll_into_view(&mut self, _handle: usize, _axis: Axis, _motion: MotionStyle) {}
}
