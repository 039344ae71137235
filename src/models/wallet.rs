//! Wallet model
//!
//! Wallets group transactions by where the money sits. Exactly one wallet
//! per user is the default; new transactions without a wallet land there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::is_hex_color;
use super::ids::WalletId;

/// Color used when a wallet has none
pub const DEFAULT_WALLET_COLOR: &str = "#24C289";

/// A wallet as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,

    pub name: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub is_default: bool,

    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default {
            write!(f, "{} (default)", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Payload for creating or replacing a wallet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletInput {
    pub name: String,
    pub color: String,
}

impl WalletInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_WALLET_COLOR.to_string(),
        }
    }

    /// Validate the form before sending it
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }
        if !is_hex_color(&self.color) {
            return Err(WalletValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    InvalidColor(String),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::InvalidColor(color) => write!(f, "Invalid color '{}', expected #RRGGBB", color),
        }
    }
}

impl std::error::Error for WalletValidationError {}
