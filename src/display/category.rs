//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format categories as a table, expenses first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| !c.is_expense());

    let rows = sorted.into_iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        label: c.label(),
        kind: c.category_type.to_string(),
        color: c.color.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format category details for display
pub fn format_category_details(category: &Category) -> String {
    format!(
        "Category: {}\nID:       {}\nType:     {}\nColor:    {}\n",
        category.label(),
        category.id,
        category.category_type,
        category.color
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType};

    #[test]
    fn test_expenses_listed_first() {
        let categories = vec![
            Category {
                id: CategoryId::new(1),
                name: "Salaire".into(),
                category_type: CategoryType::Income,
                icon: "💼".into(),
                color: "#24C289".into(),
            },
            Category {
                id: CategoryId::new(2),
                name: "Loyer".into(),
                category_type: CategoryType::Expense,
                icon: "🏠".into(),
                color: "#2AA3FF".into(),
            },
        ];

        let output = format_category_list(&categories);
        let loyer = output.find("Loyer").unwrap();
        let salaire = output.find("Salaire").unwrap();
        assert!(loyer < salaire);
    }
}
