//! Category service
//!
//! Validates category forms before they reach the API and resolves the
//! names or ids users type on the command line.

use crate::client::ApiClient;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Category, CategoryId, CategoryInput};

/// Service for category management
pub struct CategoryService<'a> {
    client: &'a ApiClient,
}

/// Find a category in a list by name (case-insensitive) or id
pub fn find_in<'c>(categories: &'c [Category], identifier: &str) -> Option<&'c Category> {
    let identifier = identifier.trim();

    // Try by name first
    if let Some(category) = categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(identifier))
    {
        return Some(category);
    }

    // Try parsing as ID
    let id = identifier.parse::<CategoryId>().ok()?;
    categories.iter().find(|c| c.id == id)
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List all categories
    pub async fn list(&self) -> NexoraResult<Vec<Category>> {
        Ok(self.client.list_categories().await?)
    }

    /// Find a category by name or ID string
    pub async fn find(&self, identifier: &str) -> NexoraResult<Category> {
        let categories = self.list().await?;
        find_in(&categories, identifier)
            .cloned()
            .ok_or_else(|| NexoraError::category_not_found(identifier))
    }

    /// Create a new category
    pub async fn create(&self, input: CategoryInput) -> NexoraResult<Category> {
        let mut input = input;
        input.name = input.name.trim().to_string();
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;

        let category = self.client.create_category(&input).await?;
        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Replace a category
    pub async fn update(&self, id: CategoryId, input: CategoryInput) -> NexoraResult<Category> {
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;
        Ok(self.client.update_category(id, &input).await?)
    }

    /// Delete a category
    pub async fn delete(&self, id: CategoryId) -> NexoraResult<()> {
        self.client.delete_category(id).await?;
        tracing::info!(%id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(3),
                name: "Courses".into(),
                category_type: CategoryType::Expense,
                icon: String::new(),
                color: String::new(),
            },
            Category {
                id: CategoryId::new(8),
                name: "Salaire".into(),
                category_type: CategoryType::Income,
                icon: String::new(),
                color: String::new(),
            },
        ]
    }

    #[test]
    fn test_find_by_name_or_id() {
        let list = categories();
        assert_eq!(find_in(&list, "courses").map(|c| c.id.get()), Some(3));
        assert_eq!(find_in(&list, "8").map(|c| c.name.as_str()), Some("Salaire"));
        assert_eq!(find_in(&list, "cat-8").map(|c| c.id.get()), Some(8));
        assert!(find_in(&list, "Loyer").is_none());
    }
}
