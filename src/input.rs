use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Press,        // Enter / Space: run the button's operation
    DismissMessage,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Enter, _)
        | (KeyCode::Char(' '), _) => Action::Press,

        (KeyCode::Esc, _)       => Action::DismissMessage,

        _ => Action::None,
    }
}
