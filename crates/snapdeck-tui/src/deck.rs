//! Deck content and the terminal implementation of the navigation host

use std::time::Instant;

use snapdeck_core::navigation::{MotionStyle, NavigationHost, Span};
use snapdeck_core::{Axis, ScrollConfig};

use crate::history::History;
use crate::scroll::ScrollAnimator;

/// One navigable section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Generate placeholder sections for the demo deck
pub fn sample_sections(count: usize) -> Vec<Section> {
    (1..=count)
        .map(|n| {
            Section::new(
                format!("Section {}", n),
                format!(
                    "This is section {n} of {count}.\n\n\
                     Scroll with the wheel or trackpad, drag with the left mouse button \
                     to swipe, or use the keyboard. One gesture moves exactly one section, \
                     however long the trackpad keeps scrolling after you lift your fingers."
                ),
            )
        })
        .collect()
}

/// Element registry: every section is one viewport long along the deck axis
#[derive(Debug, Clone, Default)]
pub struct DeckLayout {
    spans: Vec<Span>,
    viewport_len: f64,
}

impl DeckLayout {
    pub fn new(count: usize, viewport_len: u16) -> Self {
        let viewport_len = f64::from(viewport_len.max(1));
        Self {
            spans: (0..count)
                .map(|i| Span::new(i as f64 * viewport_len, viewport_len))
                .collect(),
            viewport_len,
        }
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn viewport_len(&self) -> f64 {
        self.viewport_len
    }

    /// Viewport extent at `offset`
    pub fn viewport(&self, offset: f64) -> Span {
        Span::new(offset, self.viewport_len)
    }
}

/// Terminal host: layout, transition animator and history
#[derive(Debug, Clone)]
pub struct DeckHost {
    pub layout: DeckLayout,
    pub animator: ScrollAnimator,
    pub history: History,
    /// Time used for animations started by the next navigation call
    clock: Instant,
}

impl DeckHost {
    pub fn new(count: usize, viewport_len: u16, scroll: ScrollConfig) -> Self {
        Self {
            layout: DeckLayout::new(count, viewport_len),
            animator: ScrollAnimator::new(scroll),
            history: History::default(),
            clock: Instant::now(),
        }
    }

    /// Set the time for the navigation call about to be made
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = now;
    }

    /// Rebuild the layout for a new viewport, keeping `index` aligned
    pub fn resize(&mut self, viewport_len: u16, index: usize) {
        self.layout = DeckLayout::new(self.layout.len(), viewport_len);
        if let Some(span) = self.layout.span(index) {
            self.animator.set_offset(span.start);
        }
    }
}

impl NavigationHost for DeckHost {
    type Handle = Span;

    fn element(&self, index: usize) -> Option<Span> {
        self.layout.span(index)
    }

    fn scroll_into_view(&mut self, handle: Span, _axis: Axis, motion: MotionStyle) {
        self.animator.scroll_to(handle.start, motion, self.clock);
    }

    fn location_changed(&mut self, index: usize) {
        self.history.push(index);
    }
}
