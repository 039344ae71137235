//! Help dialog
//!
//! Shows keyboard shortcuts for the current view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow),
    ))
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1/2/3", "Dashboard / Transactions / Budgets"),
        key_line("Tab", "Next view"),
        key_line("/ or f", "Filter transactions"),
        key_line("Ctrl-u", "Clear the filter"),
        key_line("[ ]", "Previous / next budget month"),
        key_line("r", "Reload"),
        key_line("e", "Export the filtered list as PDF"),
        key_line("L", "Log out"),
        Line::from(""),
    ];

    match view {
        ActiveView::Dashboard => {}
        ActiveView::Transactions => {
            lines.push(heading("Transactions"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("d/Del", "Delete the selected transaction"));
        }
        ActiveView::Budgets => {
            lines.push(heading("Budgets"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
