//! Completion detection from viewport overlap

use super::controller::NavigationController;
use super::host::NavigationHost;
use crate::config::NavigationConfig;

/// One-dimensional extent along the navigation axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub len: f64,
}

impl Span {
    pub fn new(start: f64, len: f64) -> Self {
        Self {
            start,
            len: len.max(0.0),
        }
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.len
    }
}

/// Fraction of `element` inside `viewport`, in [0, 1]
pub fn visibility_ratio(element: Span, viewport: Span) -> f64 {
    if element.len <= 0.0 {
        return 0.0;
    }
    let overlap = element.end().min(viewport.end()) - element.start.max(viewport.start);
    (overlap.max(0.0) / element.len).clamp(0.0, 1.0)
}

/// Confirms arrival once the targeted section is visible enough
#[derive(Debug, Clone, Copy)]
pub struct VisibilityObserver {
    threshold: f64,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}

impl VisibilityObserver {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            threshold: config.visibility_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Report the visible ratio of section `index`.
    ///
    /// Returns true when this observation ended the running transition.
    pub fn observe<H: NavigationHost>(
        &self,
        controller: &mut NavigationController<H>,
        index: usize,
        ratio: f64,
    ) -> bool {
        controller.is_transitioning()
            && index == controller.current_index()
            && ratio >= self.threshold
            && controller.confirm_arrived()
    }
}
