//! Dashboard display formatting
//!
//! The one-shot text rendition of the dashboard: greeting, monthly
//! insights, the spending chart as horizontal bars, budget status and the
//! latest transactions.

use chrono::NaiveDate;

use crate::dashboard::DashboardData;
use crate::models::Month;
use crate::reports::chart::shares;
use crate::reports::ChartSlice;

use super::budget::format_budget_status;
use super::transaction::format_transaction_list;

const BAR_WIDTH: usize = 30;

/// Number of transactions shown under the dashboard
pub const RECENT_TRANSACTIONS: usize = 10;

/// Render the chart series as text bars
pub fn format_chart(slices: &[ChartSlice], currency: &str) -> String {
    if slices.is_empty() {
        return "No spending this period.\n".to_string();
    }

    let percents = shares(slices);
    let mut output = String::new();
    for (slice, percent) in slices.iter().zip(percents) {
        let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        output.push_str(&format!(
            "{:<22} {:<width$} {:>5.1}% {:>18}\n",
            slice.label,
            "█".repeat(filled.min(BAR_WIDTH)),
            percent,
            slice.value.format_with_currency(currency),
            width = BAR_WIDTH
        ));
    }
    output
}

/// Render the full dashboard
pub fn format_dashboard(data: &DashboardData, month: Month, today: NaiveDate) -> String {
    let currency = data.currency();
    let insights = data.insights(today);
    let mut output = String::new();

    output.push_str(&format!("Hello, {}\n\n", data.user_name()));
    output.push_str(&insights.format_terminal(currency));

    output.push_str("\nSpending by category\n");
    output.push_str(&"-".repeat(48));
    output.push('\n');
    output.push_str(&format_chart(&data.chart(), currency));

    output.push('\n');
    output.push_str(&format_budget_status(&data.budget_status, month, currency));

    output.push_str("\nRecent transactions\n");
    let recent = &data.transactions[..data.transactions.len().min(RECENT_TRANSACTIONS)];
    output.push_str(&format_transaction_list(recent, &data.profile.preferences));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_chart_bars() {
        let slices = vec![
            ChartSlice {
                label: "🏠 Loyer".into(),
                value: Money::from_cents(7500),
                color: "#2AA3FF",
            },
            ChartSlice {
                label: "🛒 Courses".into(),
                value: Money::from_cents(2500),
                color: "#24C289",
            },
        ];

        let output = format_chart(&slices, "EUR");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("75.0%"));
        assert!(lines[1].contains("25.00 EUR"));
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(format_chart(&[], "EUR"), "No spending this period.\n");
    }
}
