use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, now: Instant) {
        let state = app.controller.state();
        let throttle = app.controller.throttle().status(false, now);

        let (phase, phase_color) = if state.in_transition {
            ("MOVING", theme.moving)
        } else if throttle.throttled {
            ("COOLDOWN", theme.throttled)
        } else {
            ("READY", theme.info)
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " SECTION {}/{} | {} ",
                state.current_index + 1,
                state.total,
                app.controller.axis().as_str(),
            ),
        };
        let phase_text = format!("| {} ", phase);

        let help_hint = " q:quit j/k:section u:back ^r:forward ";
        let used = status_text.len() + phase_text.len() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let bar = Style::default().bg(theme.bg2);
        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(theme.fg0)),
            Span::styled(phase_text, bar.fg(phase_color)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.grey2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
