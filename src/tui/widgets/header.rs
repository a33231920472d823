//! Header widget showing clock, mode, source, and filter or status.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::table::LiveTable;
use crate::tui::state::{InputMode, UiState};
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &UiState, table: &LiveTable) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Clock
        Constraint::Length(9),  // Mode
        Constraint::Min(20),    // Source
        Constraint::Length(42), // Filter/Status
    ])
    .split(area);

    let time_str = Local::now().format(" %Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let (mode_str, mode_style) = if table.view().frozen {
        (" FROZEN ", Styles::warning().bg(Theme::HEADER_BG))
    } else if state.source_ended {
        (" ENDED ", Styles::header())
    } else {
        (" LIVE ", Styles::header())
    };
    frame.render_widget(Paragraph::new(mode_str).style(mode_style), chunks[1]);

    let mut source = vec![Span::styled(format!("src: {}", state.source), Styles::header())];
    if let Some(err) = &state.source_error {
        source.push(Span::styled(format!("  {}", err), Styles::critical()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(source)).style(Styles::header()),
        chunks[2],
    );

    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::warning())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("Filter: {}█", state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal => {
                let filter = &table.view().filter;
                let text = if filter.is_empty() {
                    String::new()
                } else {
                    format!("/{}", filter)
                };
                (text, Styles::header())
            }
        }
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[3]);
}
