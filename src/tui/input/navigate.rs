use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent, now: Instant) {
    let columns = app.grid_columns.max(1) as isize;
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.mode = Mode::Help,
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,

        // Categories
        (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Char('l')) => app.shift_category(1),
        (_, KeyCode::BackTab) | (_, KeyCode::Char('h')) => app.shift_category(-1),
        (_, KeyCode::Char(c @ '0'..='9')) => {
            let idx = c as usize - '0' as usize;
            if idx <= app.store.categories().len() {
                app.category_cursor = idx;
                app.cursor = 0;
                app.scroll_row = 0;
            }
        }

        // Grid
        (_, KeyCode::Left) => app.move_cursor(-1),
        (_, KeyCode::Right) => app.move_cursor(1),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => app.move_cursor(-columns),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => app.move_cursor(columns),
        (_, KeyCode::Home) | (_, KeyCode::Char('g')) => app.cursor = 0,
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => {
            app.cursor = app.visible_links().len().saturating_sub(1);
        }

        // Actions
        (_, KeyCode::Enter) => app.stage_selected(now),
        (_, KeyCode::Char('a')) => app.open_add_form(),
        (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.request_delete(),
        (_, KeyCode::Char('t')) => app.cycle_theme(),
        (_, KeyCode::Esc) => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.clamp_cursor();
            }
        }
        _ => {}
    }
}
