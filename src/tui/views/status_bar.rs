//! Status bar view
//!
//! Session, budget month, loading marker and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.query.month),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        format!("{} transactions ", app.transactions().len()),
        Style::default().fg(Color::White),
    ));

    if !app.query.filter.is_empty() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled("filtered ", Style::default().fg(Color::Yellow)));
    }

    if app.loading {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled("loading… ", Style::default().fg(Color::Magenta)));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        "?:Help  /:Filter  [ ]:Month  e:Export  L:Logout  q:Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
