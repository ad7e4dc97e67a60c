use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    RemindLater, // l: hide now, due again after the re-arm delay
    Dismiss,     // d: hide until tomorrow
    CycleTheme,
    ShowHelp,
    Back,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('l'), _) | (KeyCode::Char('L'), _) => Action::RemindLater,
        (KeyCode::Char('d'), _) | (KeyCode::Char('D'), _) => Action::Dismiss,

        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,

        (KeyCode::Esc, _) => Action::Back,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn popup_buttons_have_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('l'))), Action::RemindLater);
        assert_eq!(handle_key(key(KeyCode::Char('D'))), Action::Dismiss);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_does_not() {
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key(key(KeyCode::Char('c'))), Action::None);
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn help_and_back() {
        assert_eq!(handle_key(key(KeyCode::F(1))), Action::ShowHelp);
        assert_eq!(handle_key(key(KeyCode::Char('?'))), Action::ShowHelp);
        assert_eq!(handle_key(key(KeyCode::Esc)), Action::Back);
    }
}
