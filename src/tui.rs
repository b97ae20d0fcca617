//! Interactive terminal surface
//!
//! Redraws on every snapshot the session publishes, on terminal events and
//! when the startup probe finishes. Keys become [`input::UiAction`]s; submissions
//! go to the session handle, which owns the busy gate.

mod draw;
mod input;
mod state;

pub use state::{ServiceStatus, UiState};

use input::map_key;
use state::UiCommand;

use crate::runtime::SessionHandle;
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use tokio::sync::oneshot;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interface until the user quits or the session stops.
///
/// `probe` delivers the reachability check result whenever it completes;
/// the interface is usable before that.
pub async fn run(
    handle: SessionHandle,
    mut state: UiState,
    probe: oneshot::Receiver<ServiceStatus>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &handle, &mut state, probe).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Term,
    handle: &SessionHandle,
    state: &mut UiState,
    mut probe: oneshot::Receiver<ServiceStatus>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut snapshots = handle.subscribe();
    let mut probe_done = false;

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        state.observe(&snapshot);
        terminal.draw(|frame| draw::draw(frame, state, &snapshot))?;

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::info!("Session stopped, closing interface");
                    return Ok(());
                }
            }

            status = &mut probe, if !probe_done => {
                probe_done = true;
                if let Ok(status) = status {
                    state.service = status;
                }
            }

            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    let Some(action) = map_key(key) else { continue };
                    match state.apply(action, handle.is_busy()) {
                        UiCommand::None => {}
                        UiCommand::Quit => return Ok(()),
                        UiCommand::Submit(query) => {
                            if let Err(e) = handle.submit(query).await {
                                tracing::error!(error = %e, "Submission failed");
                                return Ok(());
                            }
                        }
                    }
                }
                // Resize and the rest only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
        }
    }
}
