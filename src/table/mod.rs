//! Live table state: row registry, visibility, ordering, filtering and
//! incremental reconciliation of incoming snapshots.
//!
//! [`LiveTable`] is UI-agnostic. Rows are created once and updated in place;
//! a row whose displayed value did not change is not touched at all, so a
//! renderer can skip it. Each mutator notes which derived views it
//! recomputes.

mod classify;
mod export;
mod filter;
mod order;
mod row;

pub use classify::{Direction, Rule, RuleSet, Severity, SuffixRule, ThresholdRule};
pub use export::{CSV_HEADER, csv_field, to_csv, to_json};
pub use filter::Query;
pub use order::{Importance, SortMode};
pub use row::{Pulse, Row, RowId, RowRegistry};

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::model::Snapshot;
use crate::store::{PreferenceStore, StoreError, load_hidden, save_hidden};

/// Error types for table construction and operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// No render target to attach to.
    MissingMount(String),
    /// Configuration rejected at construction.
    InvalidConfig(String),
    /// Classification rule rejected at registration.
    InvalidRule { key: String, reason: String },
    /// Row action not available for the row's current hidden status.
    ActionUnavailable { key: String, action: RowAction },
    /// Preference store failure.
    Store(StoreError),
    /// Export serialization failure.
    Serialize(String),
    /// Nothing to export yet.
    NoSnapshot,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::MissingMount(msg) => write!(f, "mount point not found: {}", msg),
            TableError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TableError::InvalidRule { key, reason } => {
                write!(f, "invalid rule for '{}': {}", key, reason)
            }
            TableError::ActionUnavailable { key, action } => {
                write!(f, "cannot {} '{}'", action.name(), key)
            }
            TableError::Store(e) => write!(f, "preference store: {}", e),
            TableError::Serialize(msg) => write!(f, "export failed: {}", msg),
            TableError::NoSnapshot => write!(f, "no snapshot received yet"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<StoreError> for TableError {
    fn from(e: StoreError) -> Self {
        TableError::Store(e)
    }
}

/// Per-row action. Exactly one is available for a row at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Hide,
    Unhide,
}

impl RowAction {
    pub fn name(&self) -> &'static str {
        match self {
            RowAction::Hide => "hide",
            RowAction::Unhide => "unhide",
        }
    }
}

/// User-controlled view toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub show_hidden: bool,
    pub pin_important: bool,
    pub frozen: bool,
    /// Filter text as typed.
    pub filter: String,
}

/// What a call to [`LiveTable::update`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Snapshot discarded because the view is frozen.
    pub frozen: bool,
    /// Rows created by this call.
    pub created: usize,
    /// Rows whose displayed value was written.
    pub changed: usize,
    /// Snapshot keys without a row.
    pub ignored_keys: usize,
}

/// Live telemetry table state.
pub struct LiveTable {
    registry: RowRegistry,
    /// Render order of all rows.
    order: Vec<RowId>,
    base_hidden: HashSet<String>,
    user_hidden: BTreeSet<String>,
    importance: Importance,
    rules: RuleSet,
    view: ViewState,
    query: Query,
    last_snapshot: Option<Snapshot>,
    store: Box<dyn PreferenceStore>,
    persistence_key: String,
}

impl LiveTable {
    /// Creates a table with the rules from `config`.
    pub fn new(config: &TableConfig, store: Box<dyn PreferenceStore>) -> Result<Self, TableError> {
        Self::with_rules(config, RuleSet::new(), store)
    }

    /// Creates a table with programmatic `rules` plus the rules from
    /// `config`. A key with rules in both is rejected.
    pub fn with_rules(
        config: &TableConfig,
        mut rules: RuleSet,
        store: Box<dyn PreferenceStore>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        config.compile_rules(&mut rules)?;

        let user_hidden = load_hidden(store.as_ref(), &config.persistence_key);
        debug!(
            key = %config.persistence_key,
            count = user_hidden.len(),
            "user-hidden keys loaded"
        );

        Ok(Self {
            registry: RowRegistry::new(),
            order: Vec::new(),
            base_hidden: config.base_hidden.iter().cloned().collect(),
            user_hidden,
            importance: Importance::new(&config.important_order),
            rules,
            view: ViewState::default(),
            query: Query::default(),
            last_snapshot: None,
            store,
            persistence_key: config.persistence_key.clone(),
        })
    }

    /// Applies a snapshot at the current time. See [`Self::update_at`].
    pub fn update(&mut self, snapshot: Snapshot) -> UpdateOutcome {
        self.update_at(snapshot, Instant::now())
    }

    /// Reconciles rows with a new snapshot.
    ///
    /// Frozen tables discard the snapshot. The first non-empty snapshot
    /// creates one row per key; later snapshots only update those rows, and
    /// keys missing from a snapshot keep their previous value. A row whose
    /// displayed value is unchanged is skipped entirely.
    ///
    /// Recomputes: order, visibility and filter when rows are created;
    /// filter when values change.
    pub fn update_at(&mut self, snapshot: Snapshot, now: Instant) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        if self.view.frozen {
            debug!(keys = snapshot.len(), "frozen, snapshot discarded");
            outcome.frozen = true;
            return outcome;
        }

        if self.registry.is_empty() && !snapshot.is_empty() {
            for key in snapshot.keys() {
                let (id, created) = self.registry.ensure_row(key);
                if created {
                    self.order.push(id);
                    outcome.created += 1;
                }
            }
            self.resort();
            info!(rows = outcome.created, "rows created");
        }

        for row in self.registry.iter_mut() {
            let Some(raw) = snapshot.get(&row.key) else {
                continue;
            };
            let display = raw.to_display();
            if row.value.as_ref().is_some_and(|v| v.same_as(&display)) {
                continue;
            }
            let had_value = row.value.is_some();
            row.previous = row.value.replace(display);
            row.severity = self.rules.classify(&row.key, raw);
            row.revision += 1;
            if had_value {
                row.pulse.retrigger(now);
            }
            outcome.changed += 1;
        }

        outcome.ignored_keys = snapshot
            .keys()
            .filter(|k| self.registry.id_of(k).is_none())
            .count();
        if outcome.ignored_keys > 0 {
            debug!(count = outcome.ignored_keys, "keys without rows ignored");
        }

        self.last_snapshot = Some(snapshot);

        if outcome.created > 0 {
            self.apply_visibility();
        } else if outcome.changed > 0 && !self.query.is_empty() {
            self.apply_filter();
        }
        outcome
    }

    /// Adds `key` to the user-hidden set and persists it.
    ///
    /// Recomputes: visibility, filter. The in-memory change stays even if
    /// persisting fails.
    pub fn hide(&mut self, key: &str) -> Result<(), TableError> {
        if !self.user_hidden.insert(key.to_string()) {
            return Ok(());
        }
        let saved = self.persist_hidden();
        self.apply_visibility();
        info!(key, "row hidden");
        saved
    }

    /// Removes `key` from the user-hidden set and persists it.
    ///
    /// Recomputes: visibility, filter. A base-hidden key stays hidden.
    pub fn unhide(&mut self, key: &str) -> Result<(), TableError> {
        if !self.user_hidden.remove(key) {
            return Ok(());
        }
        let saved = self.persist_hidden();
        self.apply_visibility();
        info!(key, "row unhidden");
        saved
    }

    /// The single action available for `key`: unhide when the key is hidden,
    /// hide otherwise.
    pub fn row_action(&self, key: &str) -> RowAction {
        if self.is_hidden_key(key) {
            RowAction::Unhide
        } else {
            RowAction::Hide
        }
    }

    /// Performs `action` on `key` if it is the available one.
    pub fn apply_row_action(&mut self, key: &str, action: RowAction) -> Result<(), TableError> {
        if self.row_action(key) != action {
            return Err(TableError::ActionUnavailable {
                key: key.to_string(),
                action,
            });
        }
        match action {
            RowAction::Hide => self.hide(key),
            RowAction::Unhide => self.unhide(key),
        }
    }

    /// Sets the filter text. Recomputes: filter.
    pub fn set_filter(&mut self, text: &str) {
        self.view.filter = text.to_string();
        let query = Query::new(text);
        if query != self.query {
            self.query = query;
            self.apply_filter();
        }
    }

    /// Shows or suppresses hidden rows. Recomputes: visibility, filter.
    pub fn set_show_hidden(&mut self, on: bool) {
        if self.view.show_hidden != on {
            self.view.show_hidden = on;
            self.apply_visibility();
        }
    }

    /// Switches pin-important ordering. Recomputes: order.
    pub fn set_pin(&mut self, on: bool) {
        if self.view.pin_important != on {
            self.view.pin_important = on;
            self.resort();
        }
    }

    /// Freezes or resumes updates. Recomputes nothing; a resumed table
    /// waits for the next snapshot.
    pub fn set_freeze(&mut self, on: bool) {
        if self.view.frozen != on {
            self.view.frozen = on;
            info!(frozen = on, "freeze toggled");
        }
    }

    /// Recomputes the suppressed flag of every row, then the filter.
    pub fn apply_visibility(&mut self) {
        let show_hidden = self.view.show_hidden;
        for row in self.registry.iter_mut() {
            let hidden_key =
                self.base_hidden.contains(&row.key) || self.user_hidden.contains(&row.key);
            row.set_suppressed(hidden_key, hidden_key && !show_hidden);
        }
        self.apply_filter();
    }

    /// Recomputes the filtered-out flag of every row.
    pub fn apply_filter(&mut self) {
        for row in self.registry.iter_mut() {
            let matches = self.query.matches(&row.key, &row.display_text());
            row.set_filtered_out(!matches);
        }
    }

    fn resort(&mut self) {
        let mode = self.sort_mode();
        order::sort_rows(&mut self.order, &self.registry, mode, &self.importance);
    }

    fn persist_hidden(&mut self) -> Result<(), TableError> {
        save_hidden(self.store.as_mut(), &self.persistence_key, &self.user_hidden).map_err(|e| {
            warn!(error = %e, "failed to persist hidden keys");
            TableError::Store(e)
        })
    }

    pub fn sort_mode(&self) -> SortMode {
        if self.view.pin_important {
            SortMode::Pinned
        } else {
            SortMode::Alphabetical
        }
    }

    /// Base-hidden or user-hidden.
    pub fn is_hidden_key(&self, key: &str) -> bool {
        self.base_hidden.contains(key) || self.user_hidden.contains(key)
    }

    pub fn is_user_hidden(&self, key: &str) -> bool {
        self.user_hidden.contains(key)
    }

    pub fn user_hidden(&self) -> &BTreeSet<String> {
        &self.user_hidden
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.registry.by_key(key)
    }

    pub fn row_by_id(&self, id: RowId) -> &Row {
        self.registry.get(id)
    }

    pub fn row_count(&self) -> usize {
        self.registry.len()
    }

    /// All rows in render order, displayed or not.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.order.iter().map(|&id| self.registry.get(id))
    }

    /// Row handles in render order.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// Displayed rows in render order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows().filter(|r| r.is_displayed())
    }

    /// Keys of the displayed rows in render order.
    pub fn visible_keys(&self) -> Vec<&str> {
        self.visible_rows().map(|r| r.key.as_str()).collect()
    }

    /// Pretty-printed JSON of the last full snapshot.
    pub fn export_json(&self) -> Result<String, TableError> {
        let snapshot = self.last_snapshot.as_ref().ok_or(TableError::NoSnapshot)?;
        to_json(snapshot)
    }

    /// CSV of the rows not suppressed by visibility, in render order.
    /// The text filter does not apply.
    pub fn export_csv(&self) -> String {
        to_csv(
            self.rows()
                .filter(|r| !r.suppressed)
                .map(|r| (r.key.as_str(), r.display_text())),
        )
    }

    /// Gives back the preference store.
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store
    }
}

impl std::fmt::Debug for LiveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveTable")
            .field("rows", &self.registry.len())
            .field("view", &self.view)
            .field("user_hidden", &self.user_hidden)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn snap(pairs: &[(&str, Value)]) -> Snapshot {
        pairs.iter().cloned().collect()
    }

    fn config() -> TableConfig {
        TableConfig {
            base_hidden: vec!["lat".to_string()],
            important_order: vec!["RPM".to_string(), "CLT_C".to_string()],
            ..TableConfig::default()
        }
    }

    fn table() -> LiveTable {
        LiveTable::new(&config(), Box::new(MemoryStore::new())).unwrap()
    }

    fn engine(rpm: f64, clt: f64) -> Snapshot {
        snap(&[
            ("RPM", Value::Number(rpm)),
            ("CLT_C", Value::Number(clt)),
            ("Gear", Value::Number(3.0)),
        ])
    }

    #[test]
    fn displayed_value_rounds_non_integral_numbers() {
        let mut t = table();
        t.update(snap(&[
            ("Batt_V", Value::Number(13.56789)),
            ("RPM", Value::Number(5000.0)),
            ("Note", Value::from("1.23456")),
        ]));
        assert_eq!(t.row("Batt_V").unwrap().value, Some(Value::Number(13.568)));
        assert_eq!(t.row("RPM").unwrap().value, Some(Value::Number(5000.0)));
        assert_eq!(t.row("Note").unwrap().value, Some(Value::from("1.23456")));
    }

    #[test]
    fn first_update_creates_rows_without_pulse() {
        let mut t = table();
        let outcome = t.update(engine(5000.0, 90.0));
        assert_eq!(outcome.created, 3);
        assert_eq!(outcome.changed, 3);
        assert!(t.rows().all(|r| r.pulse.generation == 0 && r.previous.is_none()));
        assert_eq!(t.visible_keys(), ["CLT_C", "Gear", "RPM"]);
    }

    #[test]
    fn identical_snapshot_is_a_no_op() {
        let mut t = table();
        let t0 = Instant::now();
        t.update_at(engine(5000.0, 90.0), t0);
        t.update_at(engine(5100.0, 90.0), t0 + Duration::from_millis(100));
        let before: Vec<Row> = t.rows().cloned().collect();

        let outcome = t.update_at(engine(5100.0, 90.0), t0 + Duration::from_millis(200));
        assert_eq!(outcome.changed, 0);
        for (a, b) in before.iter().zip(t.rows()) {
            assert_eq!(a.revision, b.revision);
            assert_eq!(a.pulse, b.pulse);
            assert_eq!(a.previous, b.previous);
        }
    }

    #[test]
    fn change_records_previous_value_and_retriggers_pulse() {
        let mut t = table();
        let t0 = Instant::now();
        t.update_at(engine(5000.0, 90.0), t0);
        t.update_at(engine(5100.0, 90.0), t0 + Duration::from_millis(10));
        t.update_at(engine(5000.0, 90.0), t0 + Duration::from_millis(20));

        let rpm = t.row("RPM").unwrap();
        assert_eq!(rpm.pulse.generation, 2);
        assert_eq!(rpm.pulse.started, Some(t0 + Duration::from_millis(20)));
        assert_eq!(rpm.previous, Some(Value::Number(5100.0)));
        assert_eq!(t.row("Gear").unwrap().pulse.generation, 0);
    }

    #[test]
    fn rounding_hides_sub_display_changes() {
        let mut t = table();
        t.update(snap(&[("Batt_V", Value::Number(13.5671))]));
        let outcome = t.update(snap(&[("Batt_V", Value::Number(13.5674))]));
        assert_eq!(outcome.changed, 0);
    }

    #[test]
    fn severity_uses_raw_value() {
        let mut rules = RuleSet::new();
        rules
            .register("Boost", |v| (v > 1.0).then_some(Severity::Warn))
            .unwrap();
        let mut t = LiveTable::with_rules(&config(), rules, Box::new(MemoryStore::new())).unwrap();

        // 1.0004 displays as 1 but the raw value is above the threshold
        t.update(snap(&[("Boost", Value::Number(1.0004))]));
        let row = t.row("Boost").unwrap();
        assert_eq!(row.value, Some(Value::Number(1.0)));
        assert_eq!(row.severity, Some(Severity::Warn));
    }

    #[test]
    fn default_suffix_rule_flags_hot_temperatures() {
        let mut t = table();
        t.update(engine(5000.0, 115.0));
        assert_eq!(t.row("CLT_C").unwrap().severity, Some(Severity::Warn));
        t.update(engine(5000.0, 131.0));
        assert_eq!(t.row("CLT_C").unwrap().severity, Some(Severity::Crit));
        t.update(engine(5000.0, 80.0));
        assert_eq!(t.row("CLT_C").unwrap().severity, None);
    }

    #[test]
    fn absent_keys_keep_last_value() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        t.update(snap(&[("RPM", Value::Number(6000.0))]));
        assert_eq!(t.row("CLT_C").unwrap().value, Some(Value::Number(90.0)));
        assert_eq!(t.row("RPM").unwrap().value, Some(Value::Number(6000.0)));
    }

    #[test]
    fn keys_after_first_snapshot_are_ignored() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        let outcome = t.update(snap(&[("Boost", Value::Number(1.2))]));
        assert_eq!(outcome.ignored_keys, 1);
        assert!(t.row("Boost").is_none());
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn empty_first_snapshot_does_not_lock_registry() {
        let mut t = table();
        t.update(Snapshot::new());
        assert_eq!(t.row_count(), 0);
        t.update(engine(5000.0, 90.0));
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn freeze_discards_snapshots() {
        let mut t = table();
        t.update(engine(4000.0, 90.0));
        t.set_freeze(true);
        let outcome = t.update(snap(&[("RPM", Value::Number(5000.0))]));
        assert!(outcome.frozen);
        assert_eq!(t.row("RPM").unwrap().value, Some(Value::Number(4000.0)));
        assert_eq!(
            t.last_snapshot().unwrap().get("RPM"),
            Some(&Value::Number(4000.0))
        );

        t.set_freeze(false);
        assert_eq!(t.row("RPM").unwrap().value, Some(Value::Number(4000.0)));
    }

    #[test]
    fn pin_mode_orders_important_keys_first() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        let ids_before: Vec<RowId> = t.order().to_vec();

        t.set_pin(true);
        assert_eq!(t.visible_keys(), ["RPM", "CLT_C", "Gear"]);
        t.set_pin(false);
        assert_eq!(t.visible_keys(), ["CLT_C", "Gear", "RPM"]);

        let mut a = ids_before.clone();
        let mut b = t.order().to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn pin_before_first_update_applies_to_created_rows() {
        let mut t = table();
        t.set_pin(true);
        t.update(engine(5000.0, 90.0));
        assert_eq!(t.visible_keys(), ["RPM", "CLT_C", "Gear"]);
    }

    #[test]
    fn hide_and_unhide_toggle_visibility() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));

        assert_eq!(t.row_action("Gear"), RowAction::Hide);
        t.hide("Gear").unwrap();
        assert_eq!(t.visible_keys(), ["CLT_C", "RPM"]);
        assert_eq!(t.row_action("Gear"), RowAction::Unhide);

        t.unhide("Gear").unwrap();
        assert_eq!(t.visible_keys(), ["CLT_C", "Gear", "RPM"]);
    }

    #[test]
    fn unavailable_row_action_is_rejected() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        assert!(matches!(
            t.apply_row_action("Gear", RowAction::Unhide),
            Err(TableError::ActionUnavailable { .. })
        ));
        t.apply_row_action("Gear", RowAction::Hide).unwrap();
        assert!(t.is_user_hidden("Gear"));
    }

    #[test]
    fn show_hidden_overrides_suppression_without_touching_sets() {
        let mut t = table();
        let mut s = engine(5000.0, 90.0);
        s.insert("lat", 37.5);
        t.update(s);
        t.hide("Gear").unwrap();
        assert_eq!(t.visible_keys(), ["CLT_C", "RPM"]);

        t.set_show_hidden(true);
        assert_eq!(t.visible_keys(), ["CLT_C", "Gear", "RPM", "lat"]);
        assert!(t.row("lat").unwrap().hidden_key);
        assert_eq!(t.row_action("lat"), RowAction::Unhide);
        assert!(t.is_user_hidden("Gear"));

        t.set_show_hidden(false);
        assert_eq!(t.visible_keys(), ["CLT_C", "RPM"]);
    }

    #[test]
    fn unhiding_base_hidden_key_keeps_it_hidden() {
        let mut t = table();
        t.update(snap(&[("lat", Value::Number(37.5)), ("RPM", Value::Number(1.0))]));
        t.unhide("lat").unwrap();
        assert_eq!(t.visible_keys(), ["RPM"]);
    }

    #[test]
    fn filter_matches_key_or_value_and_respects_visibility() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        t.set_filter(" rp ");
        assert_eq!(t.visible_keys(), ["RPM"]);

        t.set_filter("90");
        assert_eq!(t.visible_keys(), ["CLT_C"]);

        t.hide("CLT_C").unwrap();
        assert!(t.visible_keys().is_empty());

        t.set_filter("");
        assert_eq!(t.visible_keys(), ["Gear", "RPM"]);
        assert!(t.is_user_hidden("CLT_C"));
    }

    #[test]
    fn filter_follows_value_changes() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        t.set_filter("6000");
        assert!(t.visible_keys().is_empty());
        t.update(engine(6000.0, 90.0));
        assert_eq!(t.visible_keys(), ["RPM"]);
    }

    #[test]
    fn csv_ignores_filter_but_respects_visibility() {
        let mut t = table();
        t.update(snap(&[("RPM", Value::Number(5000.0)), ("Note", Value::from("a\"b"))]));
        t.set_filter("rpm");
        assert_eq!(
            t.export_csv(),
            "Parameter,Value\n\"Note\",\"a\"\"b\"\n\"RPM\",\"5000\""
        );
        t.hide("Note").unwrap();
        assert_eq!(t.export_csv(), "Parameter,Value\n\"RPM\",\"5000\"");

        // Hidden rows shown with show-hidden are not suppressed
        t.set_show_hidden(true);
        assert_eq!(
            t.export_csv(),
            "Parameter,Value\n\"Note\",\"a\"\"b\"\n\"RPM\",\"5000\""
        );
    }

    #[test]
    fn json_export_uses_raw_snapshot() {
        let mut t = table();
        assert_eq!(t.export_json(), Err(TableError::NoSnapshot));
        t.update(snap(&[("Batt_V", Value::Number(13.56789))]));
        assert_eq!(t.export_json().unwrap(), "{\n  \"Batt_V\": 13.56789\n}");
    }

    #[test]
    fn json_export_keeps_object_as_received() {
        let mut t = table();
        let input = r#"{"zeta": 1, "gps_fix": true, "alt": null, "RPM": 5000}"#;
        t.update(Snapshot::from_json_str(input).unwrap());
        assert_eq!(
            t.export_json().unwrap(),
            "{\n  \"zeta\": 1,\n  \"gps_fix\": true,\n  \"alt\": null,\n  \"RPM\": 5000\n}"
        );
        // Rows only for keys with a reading
        assert!(t.row("alt").is_none());
        assert_eq!(t.row("gps_fix").unwrap().display_text(), "true");
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn unchanged_rows_keep_revision_across_filter_reapply() {
        let mut t = table();
        t.update(engine(5000.0, 90.0));
        let rev = t.row("Gear").unwrap().revision;
        t.set_filter("");
        t.apply_visibility();
        assert_eq!(t.row("Gear").unwrap().revision, rev);
    }
}
