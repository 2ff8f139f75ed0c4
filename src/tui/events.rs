use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Esc: clear the query, or close the date prompt, or quit
    Cancel,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    NewerPage,
    OlderPage,
    OpenDatePrompt,
    Submit,
    ToggleTheme,
    ToggleAutoscroll,
    CopyMessage,
    InputChar(char),
    DeleteChar,
    Resize,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)? {
        return Ok(match event::read()? {
            Event::Key(key) => key_to_action(key),
            Event::Resize(_, _) => Action::Resize,
            _ => Action::None,
        });
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Scrolling (arrows or Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::ScrollUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::ScrollDown,
        (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Home, _) => Action::ScrollTop,
        (KeyCode::End, _) => Action::ScrollBottom,

        // Pages: "prev" is newer, "next" is older
        (KeyCode::Left, _) | (KeyCode::PageUp, _) => Action::NewerPage,
        (KeyCode::Right, _) | (KeyCode::PageDown, _) => Action::OlderPage,

        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Action::OpenDatePrompt,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::ToggleTheme,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::ToggleAutoscroll,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyMessage,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
