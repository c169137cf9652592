use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph};

use crate::ops::normalize::url_host;
use crate::ops::outbound::COUNTDOWN_SECS;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::centered_rect_fixed;

/// The countdown shown before leaving for an external link
pub fn render_outbound_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(target) = app.gate.target() else {
        return;
    };
    let remaining = app.gate.remaining().unwrap_or(0);
    let ready = app.gate.is_ready();

    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let rect = centered_rect_fixed(52, 10, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(bg.fg(theme.highlight))
        .title(Span::styled(
            " 即将离开 NebulaNav ",
            bg.fg(theme.text_bright).add_modifier(Modifier::BOLD),
        ))
        .style(bg);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // title
            Constraint::Length(1), // host
            Constraint::Length(1), // spacer
            Constraint::Length(1), // gauge
            Constraint::Length(1), // spacer
            Constraint::Length(1), // hint
        ])
        .split(inner);
    let width = inner.width.saturating_sub(2) as usize;

    let title = format!("{} {}", target.icon, target.title);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ", bg),
            Span::styled(
                truncate_to_width(&title, width),
                bg.fg(theme.text_bright).add_modifier(Modifier::BOLD),
            ),
        ])),
        rows[1],
    );

    let host = url_host(&target.url).unwrap_or_else(|| target.url.clone());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ", bg),
            Span::styled(truncate_to_width(&host, width), bg.fg(theme.blue)),
        ])),
        rows[2],
    );

    let elapsed = COUNTDOWN_SECS.saturating_sub(remaining);
    let label = if ready {
        "可以继续".to_string()
    } else {
        format!("{remaining} 秒")
    };
    let gauge_area = Rect::new(rows[4].x + 1, rows[4].y, rows[4].width.saturating_sub(2), 1);
    frame.render_widget(
        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(if ready { theme.green } else { theme.highlight })
                    .bg(theme.card_bg),
            )
            .ratio(f64::from(elapsed) / f64::from(COUNTDOWN_SECS))
            .label(Span::styled(label, Style::default().fg(theme.text_bright))),
        gauge_area,
    );

    let hint = if ready {
        vec![
            Span::styled(" Enter", bg.fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(" 继续访问  ", bg.fg(theme.text)),
            Span::styled("Esc", bg.fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(" 取消", bg.fg(theme.text)),
        ]
    } else {
        vec![
            Span::styled(" 请稍候…  ", bg.fg(theme.dim)),
            Span::styled("Esc", bg.fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(" 取消", bg.fg(theme.text)),
        ]
    };
    frame.render_widget(Paragraph::new(Line::from(hint)), rows[6]);
}
