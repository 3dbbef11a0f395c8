//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Field navigation
    NextField,
    PrevField,

    // Input editing
    StartEditing,
    /// Leave editing mode; commits the token field
    StopEditing,
    CharInput(char),
    Backspace,
    Paste(String),
    ClearField,

    // Funds actions
    FetchBalance,
    SubmitDeposit,

    // Display
    ToggleReveal,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input field focused in the UI
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Field {
    #[default]
    Token,
    Amount,
}

impl Field {
    pub fn next(&self) -> Field {
        match self {
            Field::Token => Field::Amount,
            Field::Amount => Field::Token,
        }
    }

    pub fn prev(&self) -> Field {
        // Two fields: previous is next
        self.next()
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: Field,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('u') if input_mode == InputMode::Editing => {
                return Some(UiEvent::ClearField)
            }
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('r') | KeyCode::Char('f') => Some(UiEvent::FetchBalance),
            KeyCode::Char('d') | KeyCode::Char('s') => Some(UiEvent::SubmitDeposit),
            KeyCode::Char('v') => Some(UiEvent::ToggleReveal),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Enter => match focus {
                // Enter on the amount field submits right away
                Field::Amount => Some(UiEvent::SubmitDeposit),
                Field::Token => Some(UiEvent::StopEditing),
            },
            KeyCode::Tab => Some(UiEvent::NextField),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_shortcuts() {
        let ev = |c| key_to_ui_event(press(KeyCode::Char(c)), Field::Token, InputMode::Normal, false);
        assert_eq!(ev('r'), Some(UiEvent::FetchBalance));
        assert_eq!(ev('d'), Some(UiEvent::SubmitDeposit));
        assert_eq!(ev('q'), Some(UiEvent::Quit));
    }

    #[test]
    fn test_editing_mode_types_characters() {
        let ev = key_to_ui_event(press(KeyCode::Char('q')), Field::Token, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::CharInput('q')));
    }

    #[test]
    fn test_enter_on_amount_submits() {
        let ev = key_to_ui_event(press(KeyCode::Enter), Field::Amount, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::SubmitDeposit));
        let ev = key_to_ui_event(press(KeyCode::Enter), Field::Token, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::StopEditing));
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let ev = key_to_ui_event(press(KeyCode::Char('d')), Field::Amount, InputMode::Normal, true);
        assert_eq!(ev, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Char('r'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, Field::Token, InputMode::Normal, false), None);
    }
}
