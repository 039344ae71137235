//! Profile API client methods

use serde::Deserialize;

use super::{ApiClient, ApiRequest, ClientError};
use crate::models::{Profile, ProfileUpdate};

/// Word the server expects before wiping the account's data
pub const RESET_CONFIRMATION: &str = "RESET";

#[derive(Debug, Deserialize)]
struct Detail {
    #[serde(default)]
    detail: String,
}

impl ApiClient {
    /// Fetch the signed-in user's profile
    pub async fn get_profile(&self) -> Result<Profile, ClientError> {
        self.execute(ApiRequest::get("profile/")).await
    }

    /// Partially update the profile and its preferences
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ClientError> {
        self.execute(ApiRequest::patch("profile/").json(update)?)
            .await
    }

    /// Delete every transaction, budget, wallet and custom category
    ///
    /// Preferences return to their defaults and a fresh default wallet is
    /// created. Returns the server's confirmation message.
    pub async fn reset_data(&self) -> Result<String, ClientError> {
        let request = ApiRequest::post("reset-data/")
            .json(&serde_json::json!({ "confirm": RESET_CONFIRMATION }))?;
        let detail: Detail = self.execute(request).await?;
        Ok(detail.detail)
    }
}
