use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Submit,
    Insert(char),
    Backspace,
    ToggleDetails,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToLatest,
}

pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let quit = matches!(key.code, KeyCode::Char('c' | 'd'));
        return quit.then_some(UiAction::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Enter => Some(UiAction::Submit),
        KeyCode::Tab => Some(UiAction::ToggleDetails),
        KeyCode::Backspace => Some(UiAction::Backspace),
        KeyCode::Up => Some(UiAction::ScrollUp),
        KeyCode::Down => Some(UiAction::ScrollDown),
        KeyCode::PageUp => Some(UiAction::PageUp),
        KeyCode::PageDown => Some(UiAction::PageDown),
        KeyCode::End => Some(UiAction::ScrollToLatest),
        KeyCode::Char(c) => Some(UiAction::Insert(c)),
        _ => None,
    }
}
