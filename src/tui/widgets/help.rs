//! Help popup widget with the key bindings.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::style::Styles;

const BINDINGS: &[(&str, &str)] = &[
    ("↑/k ↓/j", "select row"),
    ("PgUp PgDn", "move by page"),
    ("Home End", "first / last row"),
    ("/", "filter by parameter or value"),
    ("Esc", "clear filter"),
    ("H", "show hidden rows"),
    ("p", "pin important parameters first"),
    ("f Space", "freeze updates"),
    ("-", "hide selected parameter"),
    ("+", "unhide selected parameter"),
    ("Enter", "run the row action (- or +)"),
    ("y", "copy last snapshot as JSON"),
    ("Y", "copy visible table as CSV"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Keys", Styles::warning())),
        Line::from(""),
    ];
    lines.extend(BINDINGS.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("  {:<11}", keys), Styles::help_key()),
            Span::styled(*what, Styles::default()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Colors", Styles::warning())));
    lines.push(Line::from(vec![
        Span::styled("  yellow", Styles::warning()),
        Span::raw(" warning   "),
        Span::styled("red", Styles::critical()),
        Span::raw(" critical   "),
        Span::styled("gray", Styles::dim()),
        Span::raw(" hidden"),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("reversed", Styles::pulse()),
        Span::raw(" value changed just now"),
    ]));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 70).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 28).min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(area.x + popup_x, area.y + popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_lines();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::default());
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Styles::warning()),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Styles::warning()),
        Span::styled(" to close", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]));
    frame.render_widget(footer, chunks[1]);
}
