//! Transaction API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::models::{
    ImportResult, Transaction, TransactionFilter, TransactionId, TransactionInput,
    TransactionSummary,
};

impl ApiClient {
    /// List transactions matching a filter, newest first
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ClientError> {
        self.execute(ApiRequest::get("transactions/").query(filter.to_query()))
            .await
    }

    /// Fetch a single transaction
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, ClientError> {
        self.execute(ApiRequest::get(format!("transactions/{id}/")))
            .await
    }

    /// Create a transaction
    pub async fn create_transaction(
        &self,
        input: &TransactionInput,
    ) -> Result<Transaction, ClientError> {
        self.execute(ApiRequest::post("transactions/").json(input)?)
            .await
    }

    /// Replace a transaction
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> Result<Transaction, ClientError> {
        self.execute(ApiRequest::put(format!("transactions/{id}/")).json(input)?)
            .await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("transactions/{id}/")))
            .await
    }

    /// Income, expenses, balance and count for a filter
    pub async fn transaction_summary(
        &self,
        filter: &TransactionFilter,
    ) -> Result<TransactionSummary, ClientError> {
        self.execute(ApiRequest::get("transactions/summary/").query(filter.to_query()))
            .await
    }

    /// Upload a CSV file (`date,description,category,amount`)
    ///
    /// Rows the server cannot read are skipped; the result counts the
    /// transactions actually created.
    pub async fn import_transactions_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ImportResult, ClientError> {
        let request =
            ApiRequest::post("transactions/import_csv/").file(file_name, "text/csv", contents);
        self.execute(request).await
    }
}
