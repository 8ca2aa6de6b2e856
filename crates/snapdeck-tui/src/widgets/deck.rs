use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use snapdeck_core::Axis;
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::deck::{DeckLayout, Section};
use crate::theme::Theme;

/// Horizontal padding inside a section
const MARGIN: u16 = 2;

/// Part of a section currently inside the viewport, in cells along the deck axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSlice {
    pub index: usize,
    /// Position on screen, relative to the deck area
    pub screen_start: u16,
    pub len: u16,
    /// Cells of the section scrolled past
    pub clip: u16,
}

/// Sections overlapping the viewport at `offset`
pub fn visible_slices(layout: &DeckLayout, offset: f64, viewport_len: u16) -> Vec<VisibleSlice> {
    let offset = offset.round().max(0.0) as i64;
    let viewport_end = offset + i64::from(viewport_len);

    (0..layout.len())
        .filter_map(|index| {
            let span = layout.span(index)?;
            let start = span.start.round() as i64;
            let end = span.end().round() as i64;
            let visible_start = start.max(offset);
            let visible_end = end.min(viewport_end);
            if visible_end <= visible_start {
                return None;
            }
            Some(VisibleSlice {
                index,
                screen_start: (visible_start - offset) as u16,
                len: (visible_end - visible_start) as u16,
                clip: (visible_start - start) as u16,
            })
        })
        .collect()
}

pub struct DeckWidget;

impl DeckWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let axis = app.controller.axis();
        let host = app.controller.host();
        let viewport_len = match axis {
            Axis::Vertical => area.height,
            Axis::Horizontal => area.width,
        };

        let total = app.sections.len();
        for slice in visible_slices(&host.layout, host.animator.offset(), viewport_len) {
            let Some(section) = app.sections.get(slice.index) else {
                continue;
            };

            let (rect, scroll) = match axis {
                Axis::Vertical => (
                    Rect::new(area.x, area.y + slice.screen_start, area.width, slice.len),
                    (slice.clip, 0),
                ),
                Axis::Horizontal => (
                    Rect::new(area.x + slice.screen_start, area.y, slice.len, area.height),
                    (0, slice.clip),
                ),
            };

            let content = Self::section_text(section, slice.index, total, area.width, theme);
            let paragraph = Paragraph::new(content)
                .style(Style::default().bg(theme.section_bg(slice.index)))
                .scroll(scroll);
            frame.render_widget(paragraph, rect);
        }
    }

    fn section_text<'a>(
        section: &Section,
        index: usize,
        total: usize,
        width: u16,
        theme: &Theme,
    ) -> Text<'a> {
        let pad = " ".repeat(MARGIN as usize);
        let wrap_width = width.saturating_sub(MARGIN * 2).max(1) as usize;

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(
                    format!("{}/{}  ", index + 1, total),
                    Style::default().fg(theme.grey1),
                ),
                Span::styled(
                    section.title.clone(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for line in wrap_text(&section.body, wrap_width) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", pad, line),
                Style::default().fg(theme.fg0),
            )));
        }

        Text::from(lines)
    }
}

/// Wrap text at word boundaries to fit within `max_width` display columns
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width: usize = word
                .chars()
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
                .sum();

            if current_width > 0 && current_width + 1 + word_width > max_width {
                result.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_offset_shows_one_section() {
        let layout = DeckLayout::new(3, 20);
        let slices = visible_slices(&layout, 20.0, 20);
        assert_eq!(
            slices,
            vec![VisibleSlice {
                index: 1,
                screen_start: 0,
                len: 20,
                clip: 0
            }]
        );
    }

    #[test]
    fn test_mid_transition_splits_viewport() {
        let layout = DeckLayout::new(3, 20);
        let slices = visible_slices(&layout, 27.4, 20);
        assert_eq!(slices.len(), 2);
        assert_eq!(
            slices[0],
            VisibleSlice {
                index: 1,
                screen_start: 0,
                len: 13,
                clip: 7
            }
        );
        assert_eq!(
            slices[1],
            VisibleSlice {
                index: 2,
                screen_start: 13,
                len: 7,
                clip: 0
            }
        );
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        // Words longer than the width get their own line
        assert_eq!(wrap_text("tiny enormousword", 6), vec!["tiny", "enormousword"]);
    }
}
