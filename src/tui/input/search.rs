use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::pop_grapheme;

/// Live search: every edit refilters the grid
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            pop_grapheme(&mut app.search_input);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.search_input.clear();
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
        }
        _ => return,
    }
    app.cursor = 0;
    app.scroll_row = 0;
}
