use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Refresh,
    Help,
    Quit,
}

/// Decode a key event into a command. Pure mapping; keys with no binding
/// yield `None` and the control loop drops them.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        KeyCode::Home => Some(Command::Home),
        KeyCode::End => Some(Command::End),
        KeyCode::Enter => Some(Command::Enter),
        KeyCode::Esc => Some(Command::Escape),
        KeyCode::Char('r') => Some(Command::Refresh),
        KeyCode::Char('?') => Some(Command::Help),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
