use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::push_right_aligned;

const WEEKDAYS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];

/// App name on the left, local clock and date on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = Style::default().bg(app.theme.background);
    let mut spans = vec![
        Span::styled(" ", bg),
        Span::styled("\u{25C6}", Style::default().fg(app.theme.purple).bg(app.theme.background)),
        Span::styled(
            " NebulaNav",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if app.remote.is_some() {
        spans.push(Span::styled(
            "  同步中…",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
    }

    let weekday = WEEKDAYS[app.clock.weekday().num_days_from_monday() as usize];
    let right = vec![
        Span::styled(
            app.clock.format("%Y年%m月%d日 ").to_string(),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
        Span::styled(
            format!("{weekday}  "),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
        Span::styled(
            app.clock.format("%H:%M").to_string(),
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", bg),
    ];
    push_right_aligned(&mut spans, right, area.width as usize, bg);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}
