//! Delete confirmation dialog

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Transaction;
use crate::tui::layout::centered_rect_fixed;

/// Question shown before a transaction is deleted
pub fn delete_prompt(transaction: Option<&Transaction>, currency: &str) -> String {
    match transaction {
        Some(t) if !t.description.is_empty() => format!(
            "Delete \"{}\" ({}, {})?",
            t.description,
            t.amount.format_with_currency(currency),
            t.date
        ),
        Some(t) => format!(
            "Delete the {} transaction of {}?",
            t.amount.format_with_currency(currency),
            t.date
        ),
        None => "Delete this transaction?".to_string(),
    }
}

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(54, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green)),
            Span::raw(" Delete  "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};
    use chrono::NaiveDate;

    #[test]
    fn test_delete_prompt() {
        let mut txn = Transaction {
            id: TransactionId::new(1),
            amount: Money::from_cents(-4500),
            description: "Marche".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            category: None,
            category_name: None,
            category_icon: None,
            category_color: None,
            wallet: None,
            wallet_name: None,
            wallet_color: None,
        };
        let prompt = delete_prompt(Some(&txn), "FCFA");
        assert!(prompt.starts_with("Delete \"Marche\""));
        assert!(prompt.contains("2025-03-04"));

        txn.description.clear();
        assert!(delete_prompt(Some(&txn), "FCFA").starts_with("Delete the"));
        assert_eq!(delete_prompt(None, "FCFA"), "Delete this transaction?");
    }
}
