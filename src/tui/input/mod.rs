mod add_form;
mod confirm;
mod navigate;
mod search;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use add_form::handle_add_form;
use confirm::{handle_confirm_delete, handle_outbound};
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.status_message = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key, now),
        Mode::Search => handle_search(app, key),
        Mode::AddLink => handle_add_form(app, key),
        Mode::ConfirmDelete => handle_confirm_delete(app, key),
        Mode::Outbound => handle_outbound(app, key),
        // Any key closes the help overlay
        Mode::Help => app.mode = Mode::Navigate,
    }
}

#[cfg(test)]
pub(crate) fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
}

#[cfg(test)]
pub(crate) fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}
