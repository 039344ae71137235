//! Category API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::models::{Category, CategoryId, CategoryInput};

impl ApiClient {
    /// List the user's categories plus the shared defaults, sorted by name
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.execute(ApiRequest::get("categories/")).await
    }

    /// Create a category
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ClientError> {
        self.execute(ApiRequest::post("categories/").json(input)?)
            .await
    }

    /// Replace a category
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ClientError> {
        self.execute(ApiRequest::put(format!("categories/{id}/")).json(input)?)
            .await
    }

    /// Delete a category
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("categories/{id}/")))
            .await
    }
}
