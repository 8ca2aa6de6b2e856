use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::Backend,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use snapdeck_core::scheduler::{TimerEvent, TimerService};
use snapdeck_core::AppConfig;
use snapdeck_tui::{
    app::{App, STATUS_BAR_HEIGHT},
    deck::sample_sections,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{DeckWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: AppConfig, sections: usize, open_at: Option<usize>) -> Result<()> {
    // Watchdog ticks arrive over a channel; the controller stays on this task
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<TimerEvent>();
    let timer = TimerService::new(&config.navigation)
        .with_event_sender(timer_tx)
        .spawn(shutdown_rx);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            stop_timer(&shutdown_tx, timer).await;
            return Err(e);
        }
    };

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, &config.ui.scroll);
    let theme = Theme::default();

    let size = match terminal.size() {
        Ok(size) => size,
        Err(e) => {
            stop_timer(&shutdown_tx, timer).await;
            restore_terminal(&mut terminal)?;
            return Err(e.into());
        }
    };
    let mut app = App::new(config, sample_sections(sections.max(1)), size.width, size.height);
    info!(
        sections = app.sections.len(),
        axis = app.controller.axis().as_str(),
        "Deck opened"
    );

    if let Some(section) = open_at {
        app.open_section(section.saturating_sub(1), Instant::now());
    }

    let result = main_loop(&mut terminal, &mut app, &event_handler, &mut timer_rx, &theme);

    app.teardown();
    stop_timer(&shutdown_tx, timer).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Enter raw mode and the alternate screen, undoing both if a later step fails
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Snapdeck"));
    if let Err(e) = entered {
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        return Err(e.into());
    }

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            Err(e.into())
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Signal the timer service and wait for its task to finish
async fn stop_timer(shutdown_tx: &watch::Sender<bool>, timer: JoinHandle<()>) {
    let _ = shutdown_tx.send(true);
    if let Err(e) = timer.await {
        warn!("Timer service ended abnormally: {}", e);
    }
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    timer_rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
    theme: &Theme,
) -> Result<()> {
    // Track if we need high frame rate while a transition animates
    let mut needs_fast_update = false;

    loop {
        // Apply watchdog ticks (non-blocking)
        while let Ok(event) = timer_rx.try_recv() {
            app.on_timer(event);
        }

        let now = Instant::now();
        app.update(now);

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
                .split(frame.area());

            DeckWidget::render(frame, layout[0], app, theme);
            StatusBarWidget::render(frame, layout[1], app, theme, now);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key), now),
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        // Keep redrawing quickly until the viewport settles and the lock is released
        needs_fast_update = app.is_animating() || app.controller.is_transitioning();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
