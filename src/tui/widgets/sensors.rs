//! Sensor table widget.
//! Thin TUI wrapper over [`crate::view::sensors::build_sensor_view`].

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::table::LiveTable;
use crate::tui::state::UiState;
use crate::tui::style::Styles;
use crate::view::sensors::build_sensor_view;

pub fn render_sensors(
    frame: &mut Frame,
    area: Rect,
    state: &mut UiState,
    table: &LiveTable,
    now: Instant,
    pulse: Duration,
) {
    if table.row_count() == 0 {
        let block = Block::default()
            .title(" Sensors ")
            .borders(Borders::ALL)
            .style(Styles::default());
        frame.render_widget(Paragraph::new("Waiting for data...").block(block), area);
        return;
    }

    let vm = build_sensor_view(table, now, pulse);
    state.clamp_selection(vm.rows.len());
    let selected = (!vm.rows.is_empty()).then_some(state.selected);
    state.ratatui_state.select(selected);

    let headers: Vec<Span> = vm
        .headers
        .iter()
        .map(|h| Span::styled(h.clone(), Styles::table_header()))
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let table_widget = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title)
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table_widget, area, &mut state.ratatui_state);
}
