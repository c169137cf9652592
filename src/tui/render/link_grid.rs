use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::link::Link;
use crate::ops::normalize::url_host;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width, wrap_to_width};

use super::helpers::{push_right_aligned, spans_width};
use super::{push_highlighted_spans, search_regex};

/// Narrowest card; the grid uses as many columns as fit
pub const CARD_MIN_W: u16 = 26;
/// Card height including borders
pub const CARD_H: u16 = 7;

pub const EMPTY_TEXT: &str = "未找到链接";

/// Render the card grid and record the column count and scroll position on `app`
pub fn render_link_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = (area.width / CARD_MIN_W).max(1);
    let visible_rows = (area.height / CARD_H).max(1) as usize;
    app.grid_columns = columns as usize;

    let cursor_row = app.cursor / app.grid_columns;
    if cursor_row < app.scroll_row {
        app.scroll_row = cursor_row;
    } else if cursor_row >= app.scroll_row + visible_rows {
        app.scroll_row = cursor_row + 1 - visible_rows;
    }

    let app: &App = app;
    let links = app.visible_links();
    if links.is_empty() {
        render_empty(frame, app, area);
        return;
    }

    let search_re = search_regex(&app.search_input);
    let card_w = area.width / columns;
    let first = app.scroll_row * app.grid_columns;
    for (i, link) in links.iter().enumerate().skip(first) {
        let slot = i - first;
        let row = (slot / app.grid_columns) as u16;
        let col = (slot % app.grid_columns) as u16;
        let y = area.y + row * CARD_H;
        if y + CARD_H > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + col * card_w, y, card_w, CARD_H);
        render_card(frame, app, link, i == app.cursor, search_re.as_ref(), rect);
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    link: &Link,
    selected: bool,
    search_re: Option<&regex::Regex>,
    rect: Rect,
) {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.card_bg };
    let border_color = if selected { theme.selection_border } else { theme.dim };
    let base = Style::default().bg(bg);
    let inner_w = rect.width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();

    // Icon and title
    let icon = link.display_icon();
    let icon_w = display_width(icon) + 1;
    let title = truncate_to_width(&link.title, inner_w.saturating_sub(icon_w));
    let title_style = base.fg(theme.text_bright).add_modifier(Modifier::BOLD);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(format!("{icon} "), base)];
    push_highlighted_spans(&mut spans, &title, title_style, match_style, search_re);
    lines.push(Line::from(spans));

    // Host
    let host = url_host(&link.url).unwrap_or_else(|| link.url.clone());
    lines.push(Line::from(Span::styled(
        truncate_to_width(&host, inner_w),
        base.fg(theme.blue),
    )));

    // Description, two lines
    let mut desc = wrap_to_width(&link.description, inner_w, 2);
    desc.resize(2, String::new());
    for text in desc {
        lines.push(Line::from(Span::styled(text, base.fg(theme.text))));
    }

    // Category on the left, visit count on the right
    let visits = format!("\u{2197} {}", link.visits);
    let category = truncate_to_width(
        app.store.category_name(&link.category),
        inner_w.saturating_sub(display_width(&visits) + 1),
    );
    let mut footer = vec![Span::styled(category, base.fg(theme.purple))];
    push_right_aligned(
        &mut footer,
        vec![Span::styled(visits, base.fg(theme.dim))],
        inner_w,
        base,
    );
    if spans_width(&footer) < inner_w {
        let pad = inner_w - spans_width(&footer);
        footer.push(Span::styled(" ".repeat(pad), base));
    }
    lines.push(Line::from(footer));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).bg(theme.background))
        .style(base);
    let paragraph = Paragraph::new(lines)
        .block(block.padding(ratatui::widgets::Padding::horizontal(1)))
        .style(base);
    frame.render_widget(paragraph, rect);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        EMPTY_TEXT,
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}
