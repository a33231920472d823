//! Sensor table view model.

use std::time::{Duration, Instant};

use crate::table::{LiveTable, Row, RowAction, RowId};
use crate::view::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

const HEADERS: &[&str] = &["", "PARAMETER", "VALUE"];

const ACTION_WIDTH: u16 = 1;
const MIN_KEY_WIDTH: u16 = 9;
const MAX_KEY_WIDTH: u16 = 40;

/// Marker of the row action: `-` hides, `+` unhides.
pub fn action_marker(action: RowAction) -> &'static str {
    match action {
        RowAction::Hide => "-",
        RowAction::Unhide => "+",
    }
}

fn view_row(
    table: &LiveTable,
    row: &Row,
    id: RowId,
    now: Instant,
    pulse: Duration,
) -> ViewRow<RowId> {
    let style = if row.hidden_key {
        RowStyleClass::Dimmed
    } else {
        RowStyleClass::from(row.severity)
    };
    let value = if row.pulse.is_active(now, pulse) {
        ViewCell::styled(row.display_text(), RowStyleClass::Pulse)
    } else {
        ViewCell::plain(row.display_text())
    };
    ViewRow {
        id,
        cells: vec![
            ViewCell::styled(
                action_marker(table.row_action(&row.key)).to_string(),
                RowStyleClass::Accent,
            ),
            ViewCell::plain(row.key.clone()),
            value,
        ],
        style,
    }
}

/// Builds the view model of the displayed rows, in render order.
/// Values whose pulse started less than `pulse` before `now` are marked.
pub fn build_sensor_view(
    table: &LiveTable,
    now: Instant,
    pulse: Duration,
) -> TableViewModel<RowId> {
    let rows: Vec<ViewRow<RowId>> = table
        .order()
        .iter()
        .map(|&id| (id, table.row_by_id(id)))
        .filter(|(_, row)| row.is_displayed())
        .map(|(id, row)| view_row(table, row, id, now, pulse))
        .collect();

    let key_width = rows
        .iter()
        .map(|r| r.cells[1].text.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .clamp(MIN_KEY_WIDTH, MAX_KEY_WIDTH);

    let view = table.view();
    let mut flags = Vec::new();
    if view.pin_important {
        flags.push("pinned");
    }
    if view.show_hidden {
        flags.push("showing hidden");
    }
    if view.frozen {
        flags.push("frozen");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    TableViewModel {
        title: format!(" Sensors ({}/{}){} ", rows.len(), table.row_count(), flags),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        widths: vec![ACTION_WIDTH, key_width],
        rows,
    }
}
