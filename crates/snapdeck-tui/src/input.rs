use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use snapdeck_core::input::{TouchPoint, WheelEvent};

/// Approximate pixel size of a terminal cell, so swipe thresholds keep their meaning
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PrevSection,
    FirstSection,
    LastSection,
    /// Digit shortcut, 0-based
    JumpTo(usize),
    HistoryBack,
    HistoryForward,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE)
        | (KeyCode::Char('l'), KeyModifiers::NONE)
        | (KeyCode::Char(' '), KeyModifiers::NONE)
        | (KeyCode::Down, _)
        | (KeyCode::Right, _)
        | (KeyCode::PageDown, _) => Action::NextSection,

        (KeyCode::Char('k'), KeyModifiers::NONE)
        | (KeyCode::Char('h'), KeyModifiers::NONE)
        | (KeyCode::Up, _)
        | (KeyCode::Left, _)
        | (KeyCode::PageUp, _) => Action::PrevSection,

        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::FirstSection,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::LastSection,

        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpTo(c as usize - '1' as usize)
        }

        // History navigation
        (KeyCode::Char('u'), KeyModifiers::NONE) | (KeyCode::Backspace, _) => Action::HistoryBack,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::HistoryForward,

        _ => Action::None,
    }
}

/// Mouse event translated for the input adapters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseInput {
    Wheel(WheelEvent),
    TouchStart(TouchPoint),
    TouchMove(TouchPoint),
    TouchEnd(TouchPoint),
    None,
}

/// Translate a terminal mouse event.
///
/// Terminal wheels report notches rather than deltas, so each notch carries
/// `line_delta`. A left-button drag is treated as a touch swipe.
pub fn translate_mouse(mouse: MouseEvent, line_delta: f64, now: Instant) -> MouseInput {
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let wheel = |delta_x: f64, delta_y: f64| {
        MouseInput::Wheel(WheelEvent {
            delta_x,
            delta_y,
            horizontal_intent: shift,
            timestamp: now,
        })
    };
    let point = TouchPoint::new(
        f64::from(mouse.column) * CELL_WIDTH_PX,
        f64::from(mouse.row) * CELL_HEIGHT_PX,
        now,
    );

    match mouse.kind {
        MouseEventKind::ScrollDown => wheel(0.0, line_delta),
        MouseEventKind::ScrollUp => wheel(0.0, -line_delta),
        MouseEventKind::ScrollRight => wheel(line_delta, 0.0),
        MouseEventKind::ScrollLeft => wheel(-line_delta, 0.0),
        MouseEventKind::Down(MouseButton::Left) => MouseInput::TouchStart(point),
        MouseEventKind::Drag(MouseButton::Left) => MouseInput::TouchMove(point),
        MouseEventKind::Up(MouseButton::Left) => MouseInput::TouchEnd(point),
        _ => MouseInput::None,
    }
}
