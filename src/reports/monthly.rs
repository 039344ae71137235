//! Monthly insights
//!
//! Derives the dashboard figures from an in-memory transaction list: this
//! month's income, expenses and balance, the average daily expense, the
//! change in spending versus last month, and the biggest spending
//! categories.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::models::{Money, Month, Transaction};

/// Number of categories kept in the top spending list
pub const TOP_CATEGORY_LIMIT: usize = 3;

/// Spending for one category label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpending {
    /// Category name, or the uncategorized placeholder
    pub label: String,
    /// Absolute amount spent
    pub total: Money,
}

/// Figures for the month containing `today`
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyInsights {
    pub month: Month,
    pub income: Money,
    /// Absolute value of the spending
    pub expenses: Money,
    pub balance: Money,
    pub avg_daily_expense: Money,
    pub previous_expenses: Money,
    /// Percent change in spending versus last month; `None` when last month
    /// had no spending to compare against
    pub month_over_month: Option<f64>,
    pub top_categories: Vec<CategorySpending>,
}

fn spent(transactions: &[&Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}

impl MonthlyInsights {
    /// Compute insights for the month of `today`
    pub fn compute(transactions: &[Transaction], today: NaiveDate) -> Self {
        let month = Month::of(today);
        let previous = month.prev();

        let current: Vec<&Transaction> =
            transactions.iter().filter(|t| month.contains(t.date)).collect();
        let before: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| previous.contains(t.date))
            .collect();

        let income: Money = current
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expenses = spent(&current);
        let previous_expenses = spent(&before);

        let days_elapsed = i64::from(today.day().max(1));
        let avg_daily_expense = expenses.div_round(days_elapsed);

        let month_over_month = if previous_expenses.is_zero() {
            None
        } else {
            let delta = (expenses - previous_expenses).cents() as f64;
            Some(delta / previous_expenses.cents() as f64 * 100.0)
        };

        Self {
            month,
            income,
            expenses,
            balance: income - expenses,
            avg_daily_expense,
            previous_expenses,
            month_over_month,
            top_categories: top_categories(&current, TOP_CATEGORY_LIMIT),
        }
    }

    /// Month-over-month change with one decimal; "0.0" without a baseline
    pub fn delta_pct_label(&self) -> String {
        match self.month_over_month {
            Some(delta) => format!("{:.1}", delta),
            None => "0.0".to_string(),
        }
    }

    /// Format the insights for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Insights for {}\n", self.month));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        for (label, amount) in [
            ("Balance", self.balance),
            ("Income", self.income),
            ("Expenses", self.expenses),
            ("Avg daily expense", self.avg_daily_expense),
        ] {
            output.push_str(&format!(
                "{:<20} {:>27}\n",
                label,
                amount.format_with_currency(currency)
            ));
        }
        output.push_str(&format!(
            "{:<20} {:>26}%\n",
            "vs last month",
            self.delta_pct_label()
        ));

        if !self.top_categories.is_empty() {
            output.push_str("\nTop categories\n");
            output.push_str(&"-".repeat(48));
            output.push('\n');
            for (rank, category) in self.top_categories.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {:<24} {:>20}\n",
                    rank + 1,
                    category.label,
                    category.total.format_with_currency(currency)
                ));
            }
        }

        output
    }
}

/// Largest spending categories, biggest first, ties broken by label
fn top_categories(transactions: &[&Transaction], limit: usize) -> Vec<CategorySpending> {
    let mut by_label: HashMap<&str, Money> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *by_label.entry(txn.category_label()).or_default() += txn.amount.abs();
    }

    let mut ranked: Vec<CategorySpending> = by_label
        .into_iter()
        .map(|(label, total)| CategorySpending {
            label: label.to_string(),
            total,
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::UNCATEGORIZED_LABEL;
    use crate::models::TransactionId;

    fn txn(id: i64, cents: i64, date: NaiveDate, category: Option<&str>) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            amount: Money::from_cents(cents),
            description: String::new(),
            date,
            category: None,
            category_name: category.map(str::to_string),
            category_icon: None,
            category_color: None,
            wallet: None,
            wallet_name: None,
            wallet_color: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_basic_insights() {
        let today = date(2025, 3, 10);
        let transactions = vec![
            txn(1, 10000, date(2025, 3, 2), None),
            txn(2, -4000, date(2025, 3, 4), Some("Courses")),
            txn(3, -2000, date(2025, 2, 20), Some("Courses")),
        ];

        let insights = MonthlyInsights::compute(&transactions, today);

        assert_eq!(insights.income, Money::from_cents(10000));
        assert_eq!(insights.expenses, Money::from_cents(4000));
        assert_eq!(insights.balance, Money::from_cents(6000));
        assert_eq!(insights.previous_expenses, Money::from_cents(2000));
        assert_eq!(insights.delta_pct_label(), "100.0");
        assert_eq!(insights.avg_daily_expense, Money::from_cents(400));
    }

    #[test]
    fn test_no_previous_spending_reports_zero_delta() {
        let today = date(2025, 3, 10);
        let transactions = vec![txn(1, -4000, date(2025, 3, 4), None)];

        let insights = MonthlyInsights::compute(&transactions, today);

        assert_eq!(insights.month_over_month, None);
        assert_eq!(insights.delta_pct_label(), "0.0");
    }

    #[test]
    fn test_january_compares_with_previous_december() {
        let today = date(2025, 1, 5);
        let transactions = vec![
            txn(1, -3000, date(2025, 1, 2), None),
            txn(2, -6000, date(2024, 12, 30), None),
            // Same month, wrong year
            txn(3, -9900, date(2024, 1, 3), None),
        ];

        let insights = MonthlyInsights::compute(&transactions, today);

        assert_eq!(insights.expenses, Money::from_cents(3000));
        assert_eq!(insights.previous_expenses, Money::from_cents(6000));
        assert_eq!(insights.delta_pct_label(), "-50.0");
    }

    #[test]
    fn test_top_categories_capped_and_sorted() {
        let today = date(2025, 3, 28);
        let d = date(2025, 3, 3);
        let transactions = vec![
            txn(1, -1000, d, Some("Loisirs")),
            txn(2, -5000, d, Some("Loyer")),
            txn(3, -2000, d, None),
            txn(4, -2000, d, Some("Courses")),
            txn(5, -500, d, Some("Transport")),
            txn(6, 9000, d, Some("Salaire")),
            txn(7, -1500, d, Some("Loisirs")),
        ];

        let top = MonthlyInsights::compute(&transactions, today).top_categories;

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].label, "Loyer");
        assert_eq!(top[1].label, "Loisirs");
        assert_eq!(top[1].total, Money::from_cents(2500));
        // Courses ties with the uncategorized bucket and wins on label
        assert_eq!(top[2].label, "Courses");
        assert!(top.windows(2).all(|w| w[0].total >= w[1].total));
        assert!(!top.iter().any(|c| c.label == UNCATEGORIZED_LABEL));
    }

    #[test]
    fn test_uncategorized_placeholder() {
        let today = date(2025, 3, 28);
        let transactions = vec![txn(1, -1000, date(2025, 3, 1), None)];
        let top = MonthlyInsights::compute(&transactions, today).top_categories;
        assert_eq!(top[0].label, UNCATEGORIZED_LABEL);
    }

    #[test]
    fn test_format_terminal() {
        let insights = MonthlyInsights::compute(&[], date(2025, 3, 1));
        let output = insights.format_terminal("FCFA");
        assert!(output.contains("Insights for 2025-03"));
        assert!(output.contains("0.00 FCFA"));
        assert!(!output.contains("Top categories"));
    }
}
