//! Budgets view
//!
//! Spend against limit for the selected month, colored by status.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::budget::gauge;
use crate::tui::app::App;

use super::status_color;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Budgets {}  [ / ] change month ", app.query.month))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let statuses = app
        .data
        .as_ref()
        .map(|d| d.budget_status.as_slice())
        .unwrap_or_default();
    if statuses.is_empty() {
        frame.render_widget(
            Paragraph::new("No budget for this month.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let currency = app.currency();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Category").style(bold),
        Cell::from("Wallet").style(bold),
        Cell::from("Limit").style(bold),
        Cell::from("Spent").style(bold),
        Cell::from("Left").style(bold),
        Cell::from("Usage").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = statuses
        .iter()
        .map(|status| {
            let remaining = status.remaining();
            let remaining_style = if remaining.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(status.category_name.clone()),
                Cell::from(status.wallet_name.clone()),
                Cell::from(status.limit_amount.format_with_currency(currency)),
                Cell::from(status.spent_amount.format_with_currency(currency)),
                Cell::from(remaining.format_with_currency(currency)).style(remaining_style),
                Cell::from(gauge(status)).style(Style::default().fg(status_color(status.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(30),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    state.select(Some(app.selected_budget_index));
    frame.render_stateful_widget(table, area, &mut state);
}
