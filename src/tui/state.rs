//! UI state owned by the main loop, next to the [`LiveTable`](crate::table::LiveTable).

use std::time::{Duration, Instant};

use ratatui::widgets::TableState as RatatuiTableState;

/// Transient label after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";
/// Transient label after a failed copy.
pub const COPY_FAILED_LABEL: &str = "Copy failed";

/// Input mode for the footer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the filter.
    Filter,
}

/// Currently open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    QuitConfirm,
}

/// Button label that temporarily shows a result, then reverts.
///
/// A new flash replaces the pending one, so the latest copy wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashLabel {
    idle: &'static str,
    flash: Option<(&'static str, Instant)>,
}

impl FlashLabel {
    pub fn new(idle: &'static str) -> Self {
        Self { idle, flash: None }
    }

    /// Shows `text` until `now + duration`.
    pub fn flash(&mut self, text: &'static str, now: Instant, duration: Duration) {
        self.flash = Some((text, now + duration));
    }

    /// Label to draw at `now`.
    pub fn text(&self, now: Instant) -> &'static str {
        match self.flash {
            Some((text, until)) if now < until => text,
            _ => self.idle,
        }
    }
}

/// Dashboard state that is not part of the table itself.
#[derive(Debug)]
pub struct UiState {
    pub input_mode: InputMode,
    /// Filter text being edited.
    pub filter_input: String,
    pub popup: PopupState,
    /// One-shot message shown in the header until the next key press.
    pub status_message: Option<String>,
    /// Index into the displayed rows.
    pub selected: usize,
    /// Ratatui table state (enables auto-scrolling).
    pub ratatui_state: RatatuiTableState,
    pub copy_json: FlashLabel,
    pub copy_csv: FlashLabel,
    /// Provider name for the header.
    pub source: String,
    /// Last provider error.
    pub source_error: Option<String>,
    /// Provider reached the end of its input.
    pub source_ended: bool,
}

impl UiState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            popup: PopupState::None,
            status_message: None,
            selected: 0,
            ratatui_state: RatatuiTableState::default(),
            copy_json: FlashLabel::new("Copy JSON"),
            copy_csv: FlashLabel::new("Copy CSV"),
            source: source.into(),
            source_error: None,
            source_ended: false,
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn page_down(&mut self, n: usize, len: usize) {
        self.selected = (self.selected + n).min(len.saturating_sub(1));
    }

    /// Keeps the selection inside `len` displayed rows.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_label_reverts_after_duration() {
        let t0 = Instant::now();
        let mut label = FlashLabel::new("Copy JSON");
        label.flash(COPIED_LABEL, t0, Duration::from_millis(900));
        assert_eq!(label.text(t0 + Duration::from_millis(899)), COPIED_LABEL);
        assert_eq!(label.text(t0 + Duration::from_millis(900)), "Copy JSON");
    }

    #[test]
    fn latest_flash_wins() {
        let t0 = Instant::now();
        let mut label = FlashLabel::new("Copy CSV");
        label.flash(COPY_FAILED_LABEL, t0, Duration::from_millis(1200));
        label.flash(COPIED_LABEL, t0 + Duration::from_millis(100), Duration::from_millis(900));
        assert_eq!(label.text(t0 + Duration::from_millis(500)), COPIED_LABEL);
        // The earlier, longer flash does not outlive the newer one
        assert_eq!(label.text(t0 + Duration::from_millis(1100)), "Copy CSV");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = UiState::new("test");
        state.select_down(3);
        state.select_down(3);
        state.select_down(3);
        assert_eq!(state.selected, 2);
        state.page_up(10);
        assert_eq!(state.selected, 0);
        state.page_down(10, 3);
        assert_eq!(state.selected, 2);
        state.clamp_selection(1);
        assert_eq!(state.selected, 0);
        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
    }
}
