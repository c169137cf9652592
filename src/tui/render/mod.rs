pub mod add_dialog;
pub mod category_bar;
pub mod confirm_popup;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod link_grid;
pub mod outbound_dialog;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};

/// Main render function; dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | category bar (2 rows) | grid | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(2), // categories + separator
            Constraint::Min(1),    // card grid
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    category_bar::render_category_bar(frame, app, chunks[1]);
    link_grid::render_link_grid(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Dialogs are drawn on top of everything
    match app.mode {
        Mode::AddLink => add_dialog::render_add_dialog(frame, app, area),
        Mode::ConfirmDelete => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Outbound => outbound_dialog::render_outbound_dialog(frame, app, area),
        Mode::Help => help_overlay::render_help_overlay(frame, app, area),
        Mode::Navigate | Mode::Search => {}
    }
}

/// Case-insensitive literal matcher for the search text; `None` when blank
pub(super) fn search_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
