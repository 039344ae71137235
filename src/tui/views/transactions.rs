//! Transactions view
//!
//! The filtered transaction list with a selectable row.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::transaction::truncate;
use crate::models::Preferences;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Transactions ({}) ", app.filter_form.summary());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let transactions = app.transactions();
    if transactions.is_empty() {
        let text = if app.loading {
            "Loading..."
        } else {
            "No transactions match the filter."
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let fallback = Preferences::default();
    let preferences = app
        .data
        .as_ref()
        .map(|d| &d.profile.preferences)
        .unwrap_or(&fallback);
    let currency = app.currency();

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Wallet").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = transactions
        .iter()
        .map(|txn| {
            let amount_style = if txn.amount.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(preferences.format_date(txn.date)),
                Cell::from(truncate(&txn.description, 30)),
                Cell::from(truncate(txn.category_label(), 18)),
                Cell::from(truncate(txn.wallet_name.as_deref().unwrap_or("-"), 14)),
                Cell::from(txn.amount.format_with_currency(currency)).style(amount_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_transaction_index));
    frame.render_stateful_widget(table, area, &mut state);
}
