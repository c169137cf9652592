use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Browse", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2192}\u{2191}\u{2193}/jk", "Move between cards", key_style, desc_style);
    add_binding(&mut lines, " Tab/l  S-Tab/h", "Next / previous category", key_style, desc_style);
    add_binding(&mut lines, " 0-9", "Jump to category (0 = all)", key_style, desc_style);
    add_binding(&mut lines, " /", "Search titles and descriptions", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Clear search", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Links", header_style)));
    add_binding(&mut lines, " Enter", "Open (after a 3 s countdown)", key_style, desc_style);
    add_binding(&mut lines, " a", "Add a link", key_style, desc_style);
    add_binding(&mut lines, " d", "Remove the selected link", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" General", header_style)));
    add_binding(&mut lines, " t", "Cycle colour theme", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 18;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::testing::seeded_app;
    use crate::tui::render::test_helpers::render_to_string;

    #[test]
    fn help_lists_core_bindings() {
        let app = seeded_app();
        let output = render_to_string(100, 40, |frame, area| render_help_overlay(frame, &app, area));
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Add a link"));
        assert!(output.contains("Open (after a 3 s countdown)"));
    }
}
