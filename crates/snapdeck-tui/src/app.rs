use std::time::Instant;

use crossterm::event::MouseEvent;
use snapdeck_core::input::{TouchAdapter, TouchOutcome, WheelAdapter, WheelDecision};
use snapdeck_core::navigation::{visibility_ratio, JumpOutcome, StepOutcome, VisibilityObserver};
use snapdeck_core::scheduler::TimerEvent;
use snapdeck_core::{AppConfig, Axis, JumpCause, MotionStyle, NavigationController};
use tracing::{debug, info, trace};

use crate::deck::{DeckHost, Section};
use crate::history::History;
use crate::input::{translate_mouse, Action, MouseInput};

/// Rows reserved below the deck for the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Length of the deck viewport along `axis` for a terminal of the given size
pub fn deck_viewport_len(axis: Axis, width: u16, height: u16) -> u16 {
    match axis {
        Axis::Vertical => height.saturating_sub(STATUS_BAR_HEIGHT).max(1),
        Axis::Horizontal => width.max(1),
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// Deck content, one entry per section
    pub sections: Vec<Section>,
    /// Navigation core driving the terminal host
    pub controller: NavigationController<DeckHost>,
    wheel: WheelAdapter,
    touch: TouchAdapter,
    observer: VisibilityObserver,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, sections: Vec<Section>, width: u16, height: u16) -> Self {
        let axis = config.ui.axis;
        let viewport_len = deck_viewport_len(axis, width, height);
        let host = DeckHost::new(sections.len(), viewport_len, config.ui.scroll.clone());
        let mut controller = NavigationController::new(host, axis, sections.len(), &config);

        // The controller clamps the configured start index; history follows it
        let index = controller.current_index();
        let host = controller.host_mut();
        host.history = History::new(index);
        host.resize(viewport_len, index);

        Self {
            wheel: WheelAdapter::new(&config.gesture),
            touch: TouchAdapter::new(&config.touch),
            observer: VisibilityObserver::new(&config.navigation),
            config,
            sections,
            controller,
            should_quit: false,
            status_message: None,
        }
    }

    /// Whether the viewport is still moving
    pub fn is_animating(&self) -> bool {
        self.controller.host().animator.is_animating()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Deep link: show `index` without animating
    pub fn open_section(&mut self, index: usize, now: Instant) -> JumpOutcome {
        self.controller.host_mut().set_clock(now);
        let outcome = self
            .controller
            .handle_url_section_change(index, MotionStyle::Immediate, now);
        match outcome {
            // Deep links never notify the location updater, but back must return here
            JumpOutcome::Started { to, .. } => {
                self.controller.host_mut().history.replace_current(to)
            }
            JumpOutcome::OutOfRange => self.set_status(format!("No section {}", index + 1)),
            JumpOutcome::Busy => {}
        }
        outcome
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match translate_mouse(mouse, self.config.ui.wheel_line_delta, now) {
            MouseInput::Wheel(event) => {
                self.controller.host_mut().set_clock(now);
                let outcome = self.wheel.handle(event, &mut self.controller);
                if let WheelDecision::Step { kind, outcome } = outcome.decision {
                    trace!(?kind, ?outcome, "Wheel step");
                    self.report_step(outcome);
                }
            }
            MouseInput::TouchStart(point) => {
                self.touch.touch_start(point, &self.controller);
            }
            MouseInput::TouchMove(point) => {
                self.touch.touch_move(point);
            }
            MouseInput::TouchEnd(point) => {
                self.controller.host_mut().set_clock(now);
                let outcome = self.touch.touch_end(point, &mut self.controller);
                if let TouchOutcome::Step(outcome) = outcome {
                    trace!(?outcome, "Swipe step");
                    self.report_step(outcome);
                }
            }
            MouseInput::None => {}
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        let current = self.controller.current_index();
        let last = self.controller.total() - 1;

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextSection => {
                if current < last {
                    self.navigate(current + 1, now);
                } else {
                    self.set_status("Already at the last section");
                }
            }
            Action::PrevSection => match current.checked_sub(1) {
                Some(target) => self.navigate(target, now),
                None => self.set_status("Already at the first section"),
            },
            Action::FirstSection => self.navigate(0, now),
            Action::LastSection => self.navigate(last, now),
            Action::JumpTo(index) => {
                if index <= last {
                    self.navigate(index, now);
                } else {
                    self.set_status(format!("No section {}", index + 1));
                }
            }
            Action::HistoryBack => match self.controller.host_mut().history.back() {
                Some(index) => self.pop_state(index, now),
                None => self.set_status("No previous section in history"),
            },
            Action::HistoryForward => match self.controller.host_mut().history.forward() {
                Some(index) => self.pop_state(index, now),
                None => self.set_status("No next section in history"),
            },
            Action::None => {}
        }
    }

    /// Apply an event from the timer service
    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Watchdog(at) => {
                if self.controller.watchdog_tick(at) {
                    self.set_status("Recovered from a stalled transition");
                }
            }
        }
    }

    /// Advance the animation and report visibility back to the controller
    pub fn update(&mut self, now: Instant) {
        let offset = self.controller.host_mut().animator.update(now);

        let index = self.controller.current_index();
        let layout = &self.controller.host().layout;
        if let Some(span) = layout.span(index) {
            let ratio = visibility_ratio(span, layout.viewport(offset));
            if self.observer.observe(&mut self.controller, index, ratio) {
                trace!(index, ratio, "Section reached visibility threshold");
            }
        }

        if self.controller.expire_transition(now) {
            debug!(index, "Transition lock expired before arrival");
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport_len = deck_viewport_len(self.controller.axis(), width, height);
        let index = self.controller.current_index();
        self.controller.host_mut().resize(viewport_len, index);
        debug!(width, height, viewport_len, "Deck resized");
    }

    /// Release navigation state before the terminal is restored
    pub fn teardown(&mut self) {
        self.controller.teardown();
        self.controller.host_mut().animator.cancel();
        self.wheel.reset();
        self.touch.touch_cancel();
        info!(index = self.controller.current_index(), "Deck torn down");
    }

    fn navigate(&mut self, target: usize, now: Instant) {
        self.controller.host_mut().set_clock(now);
        let outcome = match self.controller.axis() {
            Axis::Horizontal => self.controller.scroll_to_item(target, now),
            Axis::Vertical => self.controller.jump_to(target, JumpCause::Api, now),
        };
        if let JumpOutcome::Started { from, to } = outcome {
            if from != to {
                self.clear_status();
            }
        }
    }

    fn pop_state(&mut self, index: usize, now: Instant) {
        self.controller.host_mut().set_clock(now);
        if let JumpOutcome::Started { .. } =
            self.controller.handle_pop_state_navigation(index, now)
        {
            self.clear_status();
        }
    }

    fn report_step(&mut self, outcome: StepOutcome) {
        if outcome.is_accepted() {
            self.clear_status();
        }
    }
}
