use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    ShowHelp,
    DismissPopup,

    // Name editing
    EditName,
    TypeChar(char),
    Backspace,
    SaveName,

    // Setup
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Select,
    FindGame,

    // Waiting room
    Ready,
    Back,

    // Game
    Answer(usize),
    TogglePlayers,
}

pub fn map_key(key: KeyEvent, screen: &Screen, editing: bool, popup_open: bool) -> Option<Action> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Alerts and help block everything else
    if popup_open {
        return Some(Action::DismissPopup);
    }

    if editing {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::SaveName),
            KeyCode::Char(c) => Some(Action::TypeChar(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            _ => None,
        };
    }

    match screen {
        Screen::Setup(_) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('e') => Some(Action::EditName),
            KeyCode::Char('g') => Some(Action::FindGame),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::NavigateUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NavigateDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::NavigateLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NavigateRight),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            _ => None,
        },

        Screen::Waiting(_) => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Enter | KeyCode::Char('r') => Some(Action::Ready),
            KeyCode::Esc | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            _ => None,
        },

        Screen::Playing(_) => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('1') => Some(Action::Answer(0)),
            KeyCode::Char('2') => Some(Action::Answer(1)),
            KeyCode::Char('3') => Some(Action::Answer(2)),
            KeyCode::Char('4') => Some(Action::Answer(3)),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePlayers),
            KeyCode::Esc | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::setup::SetupScreen;
    use guess_common::setup::SetupState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> Screen {
        Screen::Setup(SetupScreen::new(SetupState::default()))
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, &setup(), true, true), Some(Action::Quit));
    }

    #[test]
    fn test_popup_swallows_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('g')), &setup(), false, true),
            Some(Action::DismissPopup)
        );
    }

    #[test]
    fn test_editing_captures_chars() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), &setup(), true, false),
            Some(Action::TypeChar('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), &setup(), true, false),
            Some(Action::SaveName)
        );
    }

    #[test]
    fn test_setup_keys() {
        assert_eq!(map_key(key(KeyCode::Char('g')), &setup(), false, false), Some(Action::FindGame));
        assert_eq!(map_key(key(KeyCode::Char('e')), &setup(), false, false), Some(Action::EditName));
        assert_eq!(map_key(key(KeyCode::Enter), &setup(), false, false), Some(Action::Select));
    }
}
