use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::centered_rect_fixed;

pub const DELETE_PROMPT: &str = "确定要移除此链接吗？";

/// Render the delete confirmation for the pending link
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(link) = app.pending_delete.as_deref().and_then(|id| app.store.find(id)) else {
        return;
    };
    let popup_w: u16 = 40.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let title = format!("{} {}", link.display_icon(), link.title);
    let lines = vec![
        Line::from(Span::styled(format!(" {DELETE_PROMPT}"), header_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&title, inner_w)),
            text_style,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" 移除  ", dim_style),
            Span::styled("n", key_style),
            Span::styled(" 取消", dim_style),
        ]),
    ];

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}
