//! Budget display formatting
//!
//! Budget definitions as a plain table, and the server-computed status as
//! a table with a text gauge per budget.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetStatus, Month, StatusLevel};

const GAUGE_WIDTH: usize = 20;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Usage")]
    gauge: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Text progress bar for a budget
pub fn gauge(status: &BudgetStatus) -> String {
    let filled = usize::from(status.gauge_percent()) * GAUGE_WIDTH / 100;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        ".".repeat(GAUGE_WIDTH - filled),
        status.ratio
    )
}

fn status_marker(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Ok => "ok",
        StatusLevel::Warning => "! warning",
        StatusLevel::Danger => "!! over",
    }
}

/// Format budget definitions for a month
pub fn format_budget_list(budgets: &[Budget], month: Month, currency: &str) -> String {
    if budgets.is_empty() {
        return format!("No budgets for {}.\n", month);
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        category: b
            .category_name
            .clone()
            .unwrap_or_else(|| b.category.label()),
        wallet: b.wallet_label().to_string(),
        limit: b.limit_amount.format_with_currency(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));
    format!("Budgets for {}\n{}\n", month, table)
}

/// Format spend-vs-limit for a month
pub fn format_budget_status(statuses: &[BudgetStatus], month: Month, currency: &str) -> String {
    if statuses.is_empty() {
        return format!("No budgets for {}.\n", month);
    }

    let rows = statuses.iter().map(|s| StatusRow {
        category: s.category_name.clone(),
        wallet: s.wallet_name.clone(),
        spent: s.spent_amount.format_with_currency(currency),
        limit: s.limit_amount.format_with_currency(currency),
        gauge: gauge(s),
        status: status_marker(s.status).to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("Budget status for {}\n{}\n", month, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Money};

    fn status(ratio: f64) -> BudgetStatus {
        BudgetStatus {
            id: BudgetId::new(1),
            category_name: "Courses".into(),
            wallet_name: "Tous".into(),
            limit_amount: Money::from_cents(10000),
            spent_amount: Money::from_cents((ratio * 100.0) as i64),
            ratio,
            status: StatusLevel::from_ratio(ratio),
        }
    }

    #[test]
    fn test_gauge_clamps() {
        assert_eq!(gauge(&status(50.0)), "[##########..........]  50.0%");
        assert!(gauge(&status(140.0)).starts_with("[####################]"));
    }

    #[test]
    fn test_status_table() {
        let month = Month::new(2025, 3).unwrap();
        let output = format_budget_status(&[status(85.0)], month, "FCFA");
        assert!(output.contains("Budget status for 2025-03"));
        assert!(output.contains("! warning"));
        assert!(output.contains("85.00 FCFA"));
    }
}
