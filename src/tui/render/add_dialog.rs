use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{AddField, App};
use crate::util::unicode::{display_width, truncate_to_width};

use super::helpers::centered_rect_fixed;

const LABEL_W: usize = 8;

/// The add-link form
pub fn render_add_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.add_form.as_ref() else {
        return;
    };
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let label_style = bg.fg(theme.dim);
    let focus_label = bg.fg(theme.highlight).add_modifier(Modifier::BOLD);
    let value_style = bg.fg(theme.text_bright);
    let cursor = Span::styled("\u{258C}", bg.fg(theme.highlight));

    let rect = centered_rect_fixed(56, 12, area);
    let field_w = (rect.width as usize).saturating_sub(LABEL_W + 6);
    frame.render_widget(Clear, rect);

    let label = |text: &str, field: AddField| {
        let style = if form.focus == field { focus_label } else { label_style };
        let pad = LABEL_W.saturating_sub(display_width(text));
        Span::styled(format!(" {text}{}", " ".repeat(pad)), style)
    };

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (name, value, field) in [
        ("网站名称", &form.title, AddField::Title),
        ("网址", &form.url, AddField::Url),
    ] {
        let mut spans = vec![label(name, field)];
        // Keep the tail visible while typing
        let shown = tail_to_width(value, field_w);
        spans.push(Span::styled(shown, value_style));
        if form.focus == field {
            spans.push(cursor.clone());
        }
        lines.push(Line::from(spans));
    }

    let choices = app.category_choices();
    let category = choices
        .get(form.category_idx)
        .map(|c| c.name.as_str())
        .unwrap_or("");
    lines.push(Line::from(vec![
        label("分类", AddField::Category),
        Span::styled("\u{25C0} ", label_style),
        Span::styled(truncate_to_width(category, field_w.saturating_sub(4)), value_style),
        Span::styled(" \u{25B6}", label_style),
    ]));

    let check = if form.auto_https { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        label("https", AddField::AutoHttps),
        Span::styled(format!("{check} 自动补全 https://"), value_style),
    ]));

    lines.push(Line::from(""));
    match form.error {
        Some(error) => lines.push(Line::from(Span::styled(format!(" {error}"), bg.fg(theme.red)))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(vec![
        Span::styled(" Tab", focus_label),
        Span::styled(" 切换  ", label_style),
        Span::styled("Enter", focus_label),
        Span::styled(" 添加  ", label_style),
        Span::styled("Esc", focus_label),
        Span::styled(" 取消", label_style),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(bg.fg(theme.highlight))
        .title(Span::styled(
            " 添加新链接 ",
            bg.fg(theme.text_bright).add_modifier(Modifier::BOLD),
        ))
        .style(bg);
    frame.render_widget(Paragraph::new(lines).block(block).style(bg), rect);
}

/// The widest suffix of `s` that fits in `width` cells
fn tail_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let mut start = s.len();
    let mut used = 0;
    for (idx, c) in s.char_indices().rev() {
        let w = display_width(c.encode_utf8(&mut [0; 4]));
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::testing::seeded_app;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, render_to_string};

    #[test]
    fn form_shows_fields_and_category() {
        let mut app = seeded_app();
        app.open_add_form();
        app.add_form.as_mut().unwrap().title = "Example".into();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_dialog(frame, &app, area)
        });
        assert!(output.contains("添加新链接"));
        assert!(output.contains("Example\u{258C}"));
        assert!(output.contains("\u{25C0} 开发 \u{25B6}"));
        assert!(output.contains("[ ] 自动补全 https://"));
    }

    #[test]
    fn form_shows_validation_error() {
        let mut app = seeded_app();
        app.open_add_form();
        app.submit_add_form();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_dialog(frame, &app, area)
        });
        assert!(output.contains("请输入网站名称"));
    }

    #[test]
    fn tail_keeps_end_of_long_input() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("网址网址", 5), "网址");
    }
}
