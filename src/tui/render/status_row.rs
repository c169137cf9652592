use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::push_right_aligned;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = Style::default().bg(app.theme.background);
    let dim = bg.fg(app.theme.dim);
    let width = area.width as usize;
    let count = Span::styled(format!("{} 个链接 ", app.visible_links().len()), dim);

    let mut spans = match app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    bg.fg(app.theme.text_bright),
                ),
                Span::styled("\u{258C}", bg.fg(app.theme.highlight)), // ▌ cursor
            ]
        }
        _ => {
            if let Some(message) = &app.status_message {
                vec![Span::styled(format!(" {message}"), bg.fg(app.theme.yellow))]
            } else if !app.search_input.is_empty() {
                // Kept search, shown dimmed
                vec![Span::styled(format!("/{}", app.search_input), dim)]
            } else {
                vec![Span::styled(" ? help  / search  a add  q quit", dim)]
            }
        }
    };

    let right = match app.mode {
        Mode::Search => vec![Span::styled("Enter keep  Esc clear  ", dim), count],
        _ => vec![count],
    };
    push_right_aligned(&mut spans, right, width, bg);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}
