use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{ALL_LABEL, App};
use crate::util::unicode::display_width;

/// Render the category tabs with a separator line below
pub fn render_category_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = "\u{2500}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            sep,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )),
        chunks[1],
    );
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let names: Vec<&str> = std::iter::once(ALL_LABEL)
        .chain(app.store.categories().iter().map(|c| c.name.as_str()))
        .collect();
    let labels: Vec<String> = names.iter().map(|n| format!(" {n} ")).collect();

    // Drop tabs from the left until the selected one fits
    let width = area.width as usize;
    let mut first = 0;
    while first < app.category_cursor
        && tabs_width(&labels[first..=app.category_cursor]) + 3 > width
    {
        first += 1;
    }

    let bg_style = Style::default().bg(app.theme.background);
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );
    let mut spans: Vec<Span> = vec![Span::styled(" ", bg_style)];
    if first > 0 {
        spans.push(Span::styled("\u{2026}", Style::default().fg(app.theme.dim).bg(app.theme.background)));
        spans.push(sep.clone());
    }
    for (i, label) in labels.iter().enumerate().skip(first) {
        spans.push(Span::styled(label.clone(), tab_style(app, i == app.category_cursor)));
        spans.push(sep.clone());
    }
    spans.pop();

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn tabs_width(labels: &[String]) -> usize {
    labels.iter().map(|l| display_width(l) + 1).sum()
}

fn tab_style(app: &App, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
