//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::state::{InputMode, PopupState, UiState};
use crate::table::{LiveTable, RowAction};

/// Rows moved by PgUp/PgDn.
const PAGE: usize = 20;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Copy the last snapshot as JSON.
    CopyJson,
    /// Copy the unsuppressed rows as CSV.
    CopyCsv,
}

/// Navigation action for unified scroll/selection dispatch.
enum NavAction {
    Up,
    Down,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// Dispatches a navigation action to the help scroll or the row selection.
fn dispatch_navigation(state: &mut UiState, table: &LiveTable, action: NavAction) {
    if let PopupState::Help { scroll } = &mut state.popup {
        match action {
            NavAction::Up => *scroll = scroll.saturating_sub(1),
            NavAction::Down => *scroll = scroll.saturating_add(1),
            NavAction::PageUp(n) => *scroll = scroll.saturating_sub(n),
            NavAction::PageDown(n) => *scroll = scroll.saturating_add(n),
            NavAction::Home => *scroll = 0,
            NavAction::End => {}
        }
        return;
    }
    let len = table.visible_rows().count();
    match action {
        NavAction::Up => state.select_up(),
        NavAction::Down => state.select_down(len),
        NavAction::PageUp(n) => state.page_up(n),
        NavAction::PageDown(n) => state.page_down(n, len),
        NavAction::Home => state.selected = 0,
        NavAction::End => state.selected = len.saturating_sub(1),
    }
}

/// Handles key input and updates the UI state and the table.
pub fn handle_key(state: &mut UiState, table: &mut LiveTable, key: KeyEvent) -> KeyAction {
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    state.status_message = None;
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, table, key),
        InputMode::Filter => handle_filter_mode(state, table, key),
    }
}

fn handle_quit_confirm(state: &mut UiState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut UiState, table: &mut LiveTable, key: KeyEvent) -> KeyAction {
    // Help popup swallows everything except scrolling and closing
    if matches!(state.popup, PopupState::Help { .. }) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => state.popup = PopupState::None,
            KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
            KeyCode::Up | KeyCode::Char('k') => dispatch_navigation(state, table, NavAction::Up),
            KeyCode::Down | KeyCode::Char('j') => {
                dispatch_navigation(state, table, NavAction::Down)
            }
            KeyCode::PageUp => dispatch_navigation(state, table, NavAction::PageUp(PAGE)),
            KeyCode::PageDown => dispatch_navigation(state, table, NavAction::PageDown(PAGE)),
            KeyCode::Home => dispatch_navigation(state, table, NavAction::Home),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit;
            }
            _ => {}
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('?') => {
            state.popup = PopupState::Help { scroll: 0 };
            KeyAction::None
        }

        // Row navigation
        KeyCode::Up | KeyCode::Char('k') => {
            dispatch_navigation(state, table, NavAction::Up);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            dispatch_navigation(state, table, NavAction::Down);
            KeyAction::None
        }
        KeyCode::PageUp => {
            dispatch_navigation(state, table, NavAction::PageUp(PAGE));
            KeyAction::None
        }
        KeyCode::PageDown => {
            dispatch_navigation(state, table, NavAction::PageDown(PAGE));
            KeyAction::None
        }
        KeyCode::Home => {
            dispatch_navigation(state, table, NavAction::Home);
            KeyAction::None
        }
        KeyCode::End => {
            dispatch_navigation(state, table, NavAction::End);
            KeyAction::None
        }

        // Filter input, continuing from the current filter
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input = table.view().filter.clone();
            KeyAction::None
        }
        KeyCode::Esc => {
            if !table.view().filter.is_empty() {
                table.set_filter("");
                state.filter_input.clear();
            }
            KeyAction::None
        }

        // View toggles
        KeyCode::Char('H') => {
            let on = !table.view().show_hidden;
            table.set_show_hidden(on);
            KeyAction::None
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            let on = !table.view().pin_important;
            table.set_pin(on);
            KeyAction::None
        }
        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char(' ') => {
            let on = !table.view().frozen;
            table.set_freeze(on);
            KeyAction::None
        }

        // Row actions on the selected row
        KeyCode::Char('-') => {
            run_row_action(state, table, Some(RowAction::Hide));
            KeyAction::None
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            run_row_action(state, table, Some(RowAction::Unhide));
            KeyAction::None
        }
        KeyCode::Enter => {
            run_row_action(state, table, None);
            KeyAction::None
        }

        // Copy buttons
        KeyCode::Char('y') => KeyAction::CopyJson,
        KeyCode::Char('Y') => KeyAction::CopyCsv,

        _ => KeyAction::None,
    }
}

/// Applies `action` (or the row's available action) to the selected row.
fn run_row_action(state: &mut UiState, table: &mut LiveTable, action: Option<RowAction>) {
    let Some(key) = table
        .visible_keys()
        .get(state.selected)
        .map(|k| k.to_string())
    else {
        return;
    };
    let action = action.unwrap_or_else(|| table.row_action(&key));
    if let Err(e) = table.apply_row_action(&key, action) {
        warn!(key = %key, action = action.name(), error = %e, "row action failed");
        state.status_message = Some(e.to_string());
    }
    state.clamp_selection(table.visible_rows().count());
}

fn handle_filter_mode(state: &mut UiState, table: &mut LiveTable, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            table.set_filter("");
            KeyAction::None
        }
        KeyCode::Enter => {
            // Filter is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            table.set_filter(&state.filter_input);
            state.selected = 0;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            table.set_filter(&state.filter_input);
            state.selected = 0;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
