//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width / 2).clamp(36, 50).min(area.width);
    let popup_height = 6.min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(area.x + popup_x, area.y + popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit livetab ")
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from("Quit the dashboard?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::warning()),
            Span::styled("/", Styles::dim()),
            Span::styled("q", Styles::warning()),
            Span::styled(" quit   ", Styles::dim()),
            Span::styled("Esc", Styles::warning()),
            Span::styled("/", Styles::dim()),
            Span::styled("n", Styles::warning()),
            Span::styled(" cancel", Styles::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Styles::default());
    frame.render_widget(paragraph, inner);
}
