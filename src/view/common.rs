//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles.

use crate::table::Severity;

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow).
    Warning,
    /// Critical level (TUI: red + bold).
    Critical,
    /// Hidden row shown because show-hidden is on (TUI: dark gray).
    Dimmed,
    /// Just-changed value (TUI: reversed).
    Pulse,
    /// Row action marker (TUI: cyan).
    Accent,
}

impl From<Option<Severity>> for RowStyleClass {
    fn from(severity: Option<Severity>) -> Self {
        match severity {
            None => RowStyleClass::Normal,
            Some(Severity::Warn) => RowStyleClass::Warning,
            Some(Severity::Crit) => RowStyleClass::Critical,
        }
    }
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
}
