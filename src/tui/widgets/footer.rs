//! Footer: inspection line for the selected row and the control bar.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::table::{LiveTable, Row};
use crate::tui::state::{COPIED_LABEL, COPY_FAILED_LABEL, FlashLabel, UiState};
use crate::tui::style::Styles;

/// Text of the inspection line: current and previous value of `row`.
fn inspect_text(row: &Row) -> String {
    let prev = row
        .previous
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{} = {}  prev: {}", row.key, row.display_text(), prev)
}

fn toggle<'a>(key: &'a str, name: &'a str, on: bool) -> Vec<Span<'a>> {
    let state_style = if on { Styles::toggle_on() } else { Styles::help() };
    vec![
        Span::styled(key, Styles::help_key()),
        Span::styled(format!(" {}:", name), Styles::help()),
        Span::styled(if on { "on " } else { "off" }, state_style),
        Span::raw("  "),
    ]
}

fn button<'a>(key: &'a str, label: &FlashLabel, now: Instant) -> Vec<Span<'a>> {
    let text = label.text(now);
    let style = match text {
        COPIED_LABEL => Styles::toggle_on(),
        COPY_FAILED_LABEL => Styles::critical(),
        _ => Styles::help(),
    };
    vec![
        Span::styled(key, Styles::help_key()),
        Span::styled(format!(" [{}]", text), style),
        Span::raw("  "),
    ]
}

/// Renders the two footer lines.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    table: &LiveTable,
    now: Instant,
) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    let inspect = table
        .visible_rows()
        .nth(state.selected)
        .map(inspect_text)
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(inspect).style(Styles::dim()), chunks[0]);

    let view = table.view();
    let mut spans = Vec::new();
    spans.extend(toggle("/", "filter", !view.filter.is_empty()));
    spans.extend(toggle("H", "hidden", view.show_hidden));
    spans.extend(toggle("p", "pin", view.pin_important));
    spans.extend(toggle("f", "freeze", view.frozen));
    spans.extend(button("y", &state.copy_json, now));
    spans.extend(button("Y", &state.copy_csv, now));
    spans.push(Span::styled("?", Styles::help_key()));
    spans.push(Span::styled(" help", Styles::help()));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default()),
        chunks[1],
    );
}
