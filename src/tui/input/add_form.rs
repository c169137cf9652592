use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{AddField, App};
use crate::util::unicode::pop_grapheme;

pub(super) fn handle_add_form(app: &mut App, key: KeyEvent) {
    let choice_count = app.category_choices().len();
    let Some(form) = app.add_form.as_mut() else {
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.close_add_form();
            return;
        }
        (_, KeyCode::Enter) => {
            app.submit_add_form();
            return;
        }
        (_, KeyCode::Tab) | (_, KeyCode::Down) => form.focus = form.focus.next(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => form.focus = form.focus.prev(),
        _ => match form.focus {
            AddField::Title | AddField::Url => edit_text(form.focused_text(), key),
            AddField::Category => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    form.category_idx = (form.category_idx + choice_count - 1) % choice_count;
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    form.category_idx = (form.category_idx + 1) % choice_count;
                }
                _ => {}
            },
            AddField::AutoHttps => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    form.auto_https = !form.auto_https;
                }
            }
        },
    }
    form.error = None;
}

fn edit_text(buffer: Option<&mut String>, key: KeyEvent) {
    let Some(buffer) = buffer else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Backspace) => pop_grapheme(buffer),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => buffer.clear(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => buffer.push(c),
        _ => {}
    }
}
