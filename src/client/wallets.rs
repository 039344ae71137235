//! Wallet API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::models::{Wallet, WalletId, WalletInput};

impl ApiClient {
    /// List wallets, default first
    pub async fn list_wallets(&self) -> Result<Vec<Wallet>, ClientError> {
        self.execute(ApiRequest::get("wallets/")).await
    }

    /// Create a wallet
    pub async fn create_wallet(&self, input: &WalletInput) -> Result<Wallet, ClientError> {
        self.execute(ApiRequest::post("wallets/").json(input)?).await
    }

    /// Replace a wallet
    pub async fn update_wallet(
        &self,
        id: WalletId,
        input: &WalletInput,
    ) -> Result<Wallet, ClientError> {
        self.execute(ApiRequest::put(format!("wallets/{id}/")).json(input)?)
            .await
    }

    /// Delete a wallet
    pub async fn delete_wallet(&self, id: WalletId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("wallets/{id}/")))
            .await
    }

    /// Make a wallet the default one
    pub async fn make_default_wallet(&self, id: WalletId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::post(format!("wallets/{id}/make_default/")))
            .await
    }
}
