use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::scroll::{ScrollConfig, ScrollConfigExt};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while a transition animates
    animation_tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, scroll: &ScrollConfig) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate: scroll.animation_tick_duration(),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        Self::poll(self.tick_rate)
    }

    /// Poll with the animation frame interval
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        Self::poll(self.animation_tick_rate)
    }

    fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Wheel, click or drag
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
