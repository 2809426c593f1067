use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    ToggleHelp,
    Back,
    Select,
    NextTab,
    PrevTab,
    Refresh,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    MoveToTop,
    MoveToBottom,
    StartFilter,
    FilterInput(char),
    FilterBackspace,
    FilterSubmit,
    FilterCancel,
    None,
}

impl Action {
    /// Keys that only move a cursor or scroll position.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Self::MoveUp
                | Self::MoveDown
                | Self::PageUp
                | Self::PageDown
                | Self::MoveToTop
                | Self::MoveToBottom
        )
    }
}

/// Maps a key press to an action. `filtering` is true while the active view
/// is editing a filter query, which turns printable keys into query input.
pub fn handle_key(key: &KeyEvent, filtering: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::ForceQuit;
    }

    if filtering {
        handle_filter_key(key)
    } else {
        handle_normal_key(key)
    }
}

fn handle_normal_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter => Action::Select,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::MoveToTop,
        KeyCode::Char('G') | KeyCode::End => Action::MoveToBottom,
        _ => Action::None,
    }
}

fn handle_filter_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::FilterCancel,
        KeyCode::Enter => Action::FilterSubmit,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_keys() {
        assert_eq!(handle_key(&press(KeyCode::Char('q')), false), Action::Quit);
        assert_eq!(handle_key(&press(KeyCode::Tab), false), Action::NextTab);
        assert_eq!(handle_key(&press(KeyCode::BackTab), false), Action::PrevTab);
        assert_eq!(handle_key(&press(KeyCode::Esc), false), Action::Back);
    }

    #[test]
    fn test_filter_mode_captures_printable_keys() {
        assert_eq!(
            handle_key(&press(KeyCode::Char('q')), true),
            Action::FilterInput('q')
        );
        assert_eq!(
            handle_key(&press(KeyCode::Char('?')), true),
            Action::FilterInput('?')
        );
        assert_eq!(handle_key(&press(KeyCode::Esc), true), Action::FilterCancel);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&key, true), Action::ForceQuit);
        assert_eq!(handle_key(&key, false), Action::ForceQuit);
    }
}
