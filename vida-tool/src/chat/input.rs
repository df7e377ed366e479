use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{AppMode, ChatApp};

pub fn handle_event(app: &mut ChatApp, event: Event) {
    if let Event::Key(key) = event {
        handle_key(app, key);
    }
}

fn handle_key(app: &mut ChatApp, key: KeyEvent) {
    match app.mode {
        AppMode::Chat => handle_chat_key(app, key),
        AppMode::Waiting => handle_waiting_key(app, key),
    }
}

fn handle_chat_key(app: &mut ChatApp, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            app.should_quit = true;
        }
        (KeyCode::F(n @ 1..=9), _) => {
            app.send_suggestion(usize::from(n - 1));
        }
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
            app.clear_conversation();
        }
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            app.toggle_suggestions();
        }
        (KeyCode::Enter, KeyModifiers::NONE) => {
            app.send_message();
        }
        (KeyCode::Up, KeyModifiers::CONTROL) => {
            app.scroll_up();
        }
        (KeyCode::Down, KeyModifiers::CONTROL) => {
            app.scroll_down();
        }
        _ => handle_edit_key(app, key),
    }
}

/// Typing stays possible while waiting; sending does not.
fn handle_waiting_key(app: &mut ChatApp, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            app.should_quit = true;
        }
        (KeyCode::Up, KeyModifiers::CONTROL) => {
            app.scroll_up();
        }
        (KeyCode::Down, KeyModifiers::CONTROL) => {
            app.scroll_down();
        }
        (KeyCode::Enter, _) | (KeyCode::F(_), _) => {}
        _ => handle_edit_key(app, key),
    }
}

fn handle_edit_key(app: &mut ChatApp, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => app.input_backspace(),
        (KeyCode::Delete, _) => app.input_delete(),
        (KeyCode::Left, _) => app.input_left(),
        (KeyCode::Right, _) => app.input_right(),
        (KeyCode::Home, _) => app.input_home(),
        (KeyCode::End, _) => app.input_end(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => app.input_char(c),
        _ => {}
    }
}
