//! Main rendering logic for TUI.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{PopupState, UiState};
use super::widgets::{
    render_footer, render_header, render_help, render_quit_confirm, render_sensors,
};
use crate::table::LiveTable;

/// Main render function. `pulse` is how long a changed value stays marked.
pub fn render(
    frame: &mut Frame,
    state: &mut UiState,
    table: &LiveTable,
    now: Instant,
    pulse: Duration,
) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Sensor table
        Constraint::Length(2), // Inspection line + controls
    ])
    .split(area);

    render_header(frame, chunks[0], state, table);
    render_sensors(frame, chunks[1], state, table, now, pulse);
    render_footer(frame, chunks[2], state, table, now);

    // Popups are rendered last to overlay everything
    match &mut state.popup {
        PopupState::Help { scroll } => render_help(frame, area, scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }
}
