//! Wallet service

use crate::client::ApiClient;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Wallet, WalletId, WalletInput};

/// Service for wallet management
pub struct WalletService<'a> {
    client: &'a ApiClient,
}

/// Find a wallet in a list by name (case-insensitive) or id
pub fn find_in<'w>(wallets: &'w [Wallet], identifier: &str) -> Option<&'w Wallet> {
    let identifier = identifier.trim();
    if let Some(wallet) = wallets
        .iter()
        .find(|w| w.name.eq_ignore_ascii_case(identifier))
    {
        return Some(wallet);
    }
    let id = identifier.parse::<WalletId>().ok()?;
    wallets.iter().find(|w| w.id == id)
}

impl<'a> WalletService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> NexoraResult<Vec<Wallet>> {
        Ok(self.client.list_wallets().await?)
    }

    /// Find a wallet by name or ID string
    pub async fn find(&self, identifier: &str) -> NexoraResult<Wallet> {
        let wallets = self.list().await?;
        find_in(&wallets, identifier)
            .cloned()
            .ok_or_else(|| NexoraError::wallet_not_found(identifier))
    }

    pub async fn create(&self, mut input: WalletInput) -> NexoraResult<Wallet> {
        input.name = input.name.trim().to_string();
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;

        let wallet = self.client.create_wallet(&input).await?;
        tracing::info!(id = %wallet.id, name = %wallet.name, "wallet created");
        Ok(wallet)
    }

    pub async fn update(&self, id: WalletId, input: WalletInput) -> NexoraResult<Wallet> {
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;
        Ok(self.client.update_wallet(id, &input).await?)
    }

    pub async fn delete(&self, id: WalletId) -> NexoraResult<()> {
        self.client.delete_wallet(id).await?;
        tracing::info!(%id, "wallet deleted");
        Ok(())
    }

    /// Make a wallet the default, returning the refreshed list
    pub async fn make_default(&self, id: WalletId) -> NexoraResult<Vec<Wallet>> {
        self.client.make_default_wallet(id).await?;
        self.list().await
    }
}
