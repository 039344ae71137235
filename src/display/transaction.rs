//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Preferences, Transaction, TransactionSummary};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Truncate a string to a maximum display width
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_list(transactions: &[Transaction], preferences: &Preferences) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: preferences.format_date(txn.date),
        description: truncate(&txn.description, 32),
        category: txn.category_label().to_string(),
        wallet: txn.wallet_name.clone().unwrap_or_default(),
        amount: txn.amount.format_with_currency(&preferences.currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, preferences: &Preferences) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", preferences.format_date(txn.date)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_currency(&preferences.currency)
    ));
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    output.push_str(&format!("Category:    {}\n", txn.category_label()));
    if let Some(wallet) = &txn.wallet_name {
        output.push_str(&format!("Wallet:      {}\n", wallet));
    }

    output
}

/// Format the totals of a filtered list
pub fn format_summary(summary: &TransactionSummary, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transactions: {}\n", summary.count));
    output.push_str(&format!(
        "Income:       {:>16}\n",
        summary.income.format_with_currency(currency)
    ));
    output.push_str(&format!(
        "Expenses:     {:>16}\n",
        summary.expenses.format_with_currency(currency)
    ));
    output.push_str(&format!(
        "Balance:      {:>16}\n",
        summary.balance.format_with_currency(currency)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};
    use chrono::NaiveDate;

    fn txn() -> Transaction {
        Transaction {
            id: TransactionId::new(7),
            amount: Money::from_cents(-4000),
            description: "Marche".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            category: None,
            category_name: None,
            category_icon: None,
            category_color: None,
            wallet: None,
            wallet_name: Some("Principal".into()),
            wallet_color: None,
        }
    }

    #[test]
    fn test_list_uses_preferences() {
        let output = format_transaction_list(&[txn()], &Preferences::default());
        assert!(output.contains("02/03/2025"));
        assert!(output.contains("-40.00 FCFA"));
        assert!(output.contains("Sans categorie"));
        assert!(output.contains("Principal"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_transaction_list(&[], &Preferences::default()),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 8), "a longe…");
    }
}
