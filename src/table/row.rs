//! Row registry: one stable, update-in-place entry per sensor key.

use std::collections::HashMap;
use std::time::Instant;

use crate::model::Value;

use super::classify::Severity;

/// Stable handle to a row. Valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Transient change cue. Every retrigger bumps the generation, so a renderer
/// can tell a fresh pulse from one still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pulse {
    pub generation: u64,
    pub started: Option<Instant>,
}

impl Pulse {
    pub fn retrigger(&mut self, now: Instant) {
        self.generation += 1;
        self.started = Some(now);
    }

    /// True while `now` is within `duration` of the last trigger.
    pub fn is_active(&self, now: Instant, duration: std::time::Duration) -> bool {
        self.started
            .is_some_and(|t| now.saturating_duration_since(t) < duration)
    }
}

/// Per-key table state.
#[derive(Debug, Clone)]
pub struct Row {
    pub key: String,
    /// Displayed value; `None` until the first reading arrives.
    pub value: Option<Value>,
    /// Displayed value before the last change.
    pub previous: Option<Value>,
    pub severity: Option<Severity>,
    /// Key is base-hidden or user-hidden.
    pub hidden_key: bool,
    /// Excluded from the visible rows by the visibility rules.
    pub suppressed: bool,
    /// Excluded by the text filter.
    pub filtered_out: bool,
    pub pulse: Pulse,
    /// Bumped on every visual change.
    pub revision: u64,
}

impl Row {
    fn new(key: String) -> Self {
        Self {
            key,
            value: None,
            previous: None,
            severity: None,
            hidden_key: false,
            suppressed: false,
            filtered_out: false,
            pulse: Pulse::default(),
            revision: 0,
        }
    }

    /// Row is shown: not suppressed and matching the filter.
    pub fn is_displayed(&self) -> bool {
        !self.suppressed && !self.filtered_out
    }

    /// Text of the displayed value.
    pub fn display_text(&self) -> String {
        self.value.as_ref().map(Value::to_string).unwrap_or_default()
    }

    pub(super) fn set_suppressed(&mut self, hidden_key: bool, suppressed: bool) {
        if self.hidden_key != hidden_key || self.suppressed != suppressed {
            self.hidden_key = hidden_key;
            self.suppressed = suppressed;
            self.revision += 1;
        }
    }

    pub(super) fn set_filtered_out(&mut self, filtered_out: bool) {
        if self.filtered_out != filtered_out {
            self.filtered_out = filtered_out;
            self.revision += 1;
        }
    }
}

/// Arena of rows indexed by key.
#[derive(Debug, Clone, Default)]
pub struct RowRegistry {
    rows: Vec<Row>,
    index: HashMap<String, RowId>,
}

impl RowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row for `key`, creating an empty one if needed.
    /// The flag is true when the row was created by this call.
    pub fn ensure_row(&mut self, key: &str) -> (RowId, bool) {
        if let Some(&id) = self.index.get(key) {
            return (id, false);
        }
        let id = RowId(self.rows.len());
        self.rows.push(Row::new(key.to_string()));
        self.index.insert(key.to_string(), id);
        (id, true)
    }

    pub fn id_of(&self, key: &str) -> Option<RowId> {
        self.index.get(key).copied()
    }

    pub fn get(&self, id: RowId) -> &Row {
        &self.rows[id.0]
    }

    pub fn get_mut(&mut self, id: RowId) -> &mut Row {
        &mut self.rows[id.0]
    }

    pub fn by_key(&self, key: &str) -> Option<&Row> {
        self.id_of(key).map(|id| self.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
