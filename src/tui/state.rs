use super::input::UiAction;
use crate::render::RenderOptions;
use crate::runtime::SessionSnapshot;

const PAGE_LINES: u16 = 10;

/// Result of the startup reachability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Checking,
    Online(String),
    Unreachable(String),
}

/// What the event loop should do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    None,
    Submit(String),
    Quit,
}

/// Display-only state; the conversation itself lives in the session runtime
#[derive(Debug, Clone)]
pub struct UiState {
    pub input: String,
    pub expand_details: bool,
    /// Lines scrolled up from the latest output
    pub scroll_back: u16,
    pub endpoint: String,
    pub service: ServiceStatus,
    seen_turns: usize,
}

impl UiState {
    pub fn new(endpoint: impl Into<String>, expand_details: bool) -> Self {
        Self {
            input: String::new(),
            expand_details,
            scroll_back: 0,
            endpoint: endpoint.into(),
            service: ServiceStatus::Checking,
            seen_turns: 0,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            expand_details: self.expand_details,
            show_timestamps: true,
        }
    }

    /// Jump back to the latest output whenever the transcript grows
    pub fn observe(&mut self, snapshot: &SessionSnapshot) {
        let turns = snapshot.transcript.len();
        if turns > self.seen_turns {
            self.scroll_back = 0;
        }
        self.seen_turns = turns;
    }

    /// Input is disabled while a reply is outstanding
    pub fn apply(&mut self, action: UiAction, busy: bool) -> UiCommand {
        match action {
            UiAction::Quit => return UiCommand::Quit,
            UiAction::Submit => {
                if !busy && !self.input.trim().is_empty() {
                    return UiCommand::Submit(std::mem::take(&mut self.input));
                }
            }
            UiAction::Insert(c) => {
                if !busy {
                    self.input.push(c);
                }
            }
            UiAction::Backspace => {
                if !busy {
                    self.input.pop();
                }
            }
            UiAction::ToggleDetails => self.expand_details = !self.expand_details,
            UiAction::ScrollUp => self.scroll_back = self.scroll_back.saturating_add(1),
            UiAction::ScrollDown => self.scroll_back = self.scroll_back.saturating_sub(1),
            UiAction::PageUp => self.scroll_back = self.scroll_back.saturating_add(PAGE_LINES),
            UiAction::PageDown => self.scroll_back = self.scroll_back.saturating_sub(PAGE_LINES),
            UiAction::ScrollToLatest => self.scroll_back = 0,
        }
        UiCommand::None
    }
}
