//! Spending-by-category chart series

use crate::models::{Category, Money, Transaction};

/// Colors assigned to expense categories, cycled by position
pub const PALETTE: [&str; 8] = [
    "#2AA3FF", "#24C289", "#F3B33D", "#F37BA4", "#8F7BFF", "#FF7E6B", "#2ED3D3", "#9BCF3A",
];

/// One slice of the spending chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    /// "<icon> <name>"
    pub label: String,
    /// Absolute amount spent
    pub value: Money,
    /// Hex color from [`PALETTE`]
    pub color: &'static str,
}

impl ChartSlice {
    /// Parse the slice color into RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.color[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

/// Build the chart series
///
/// Every expense category, in list order, gets the palette color of its
/// position among expense categories. Its value is the absolute sum of the
/// negative transactions pointing at it. Categories with nothing spent are
/// left out after colors are assigned, so a category keeps its color when
/// others drop out.
pub fn spending_by_category(categories: &[Category], transactions: &[Transaction]) -> Vec<ChartSlice> {
    categories
        .iter()
        .filter(|c| c.is_expense())
        .enumerate()
        .map(|(index, category)| {
            let value: Money = transactions
                .iter()
                .filter(|t| t.category == Some(category.id) && t.is_expense())
                .map(|t| t.amount.abs())
                .sum();
            ChartSlice {
                label: category.label(),
                value,
                color: PALETTE[index % PALETTE.len()],
            }
        })
        .filter(|slice| !slice.value.is_zero())
        .collect()
}

/// Share of each slice in percent
pub fn shares(slices: &[ChartSlice]) -> Vec<f64> {
    let total: Money = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| {
            if total.is_zero() {
                0.0
            } else {
                s.value.cents() as f64 / total.cents() as f64 * 100.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, TransactionId};
    use chrono::NaiveDate;

    fn category(id: i64, name: &str, kind: CategoryType, icon: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.into(),
            category_type: kind,
            icon: icon.into(),
            color: String::new(),
        }
    }

    fn txn(id: i64, cents: i64, category: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            amount: Money::from_cents(cents),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            category: Some(CategoryId::new(category)),
            category_name: None,
            category_icon: None,
            category_color: None,
            wallet: None,
            wallet_name: None,
            wallet_color: None,
        }
    }

    #[test]
    fn test_series_skips_empty_and_income_categories() {
        let categories = vec![
            category(1, "Loyer", CategoryType::Expense, "🏠"),
            category(2, "Salaire", CategoryType::Income, "💼"),
            category(3, "Loisirs", CategoryType::Expense, ""),
            category(4, "Courses", CategoryType::Expense, "🛒"),
        ];
        let transactions = vec![
            txn(1, -50000, 1),
            txn(2, 200000, 2),
            txn(3, -1200, 4),
            txn(4, -800, 4),
            // Refund on an expense category is not spending
            txn(5, 500, 4),
        ];

        let slices = spending_by_category(&categories, &transactions);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "🏠 Loyer");
        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[1].label, "🛒 Courses");
        assert_eq!(slices[1].value, Money::from_cents(2000));
        // Loisirs was skipped but still consumed the second color
        assert_eq!(slices[1].color, PALETTE[2]);
    }

    #[test]
    fn test_palette_cycles() {
        let categories: Vec<Category> = (0..10)
            .map(|i| category(i, "c", CategoryType::Expense, "x"))
            .collect();
        let transactions: Vec<Transaction> = (0..10).map(|i| txn(i, -100, i)).collect();

        let slices = spending_by_category(&categories, &transactions);

        assert_eq!(slices[8].color, PALETTE[0]);
        assert_eq!(slices[9].color, PALETTE[1]);
    }

    #[test]
    fn test_shares_and_rgb() {
        let categories = vec![
            category(1, "a", CategoryType::Expense, "x"),
            category(2, "b", CategoryType::Expense, "x"),
        ];
        let slices = spending_by_category(&categories, &[txn(1, -300, 1), txn(2, -100, 2)]);

        assert_eq!(shares(&slices), vec![75.0, 25.0]);
        assert_eq!(slices[0].rgb(), (0x2A, 0xA3, 0xFF));
    }
}
