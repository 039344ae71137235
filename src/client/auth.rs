//! Authentication API client methods

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiRequest, ClientError};

/// Credentials posted to `token/`
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Token pair returned by `token/`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Body of `register/`
///
/// Borrows the password so the caller's zeroized buffer stays the only copy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

/// Account echoed back by `register/`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl ApiClient {
    /// Exchange credentials for a token pair and open the session
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember: bool,
    ) -> Result<(), ClientError> {
        let request = ApiRequest::post("token/").json(&Credentials { username, password })?;
        let pair: TokenPair = self.execute(request).await?;

        self.session().login(&pair.access, &pair.refresh, remember)?;
        Ok(())
    }

    /// Create an account; it stays inactive until the email is verified
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<RegisteredUser, ClientError> {
        let request = ApiRequest::post("register/").json(request)?;
        self.execute(request).await
    }

    /// Revoke the refresh token server-side and clear the local session
    ///
    /// The local session is cleared even when the server call fails.
    /// Returns whether the server accepted the revocation.
    pub async fn logout(&self) -> Result<bool, ClientError> {
        let refresh = self
            .session()
            .tokens()
            .get_refresh_token()
            .ok()
            .flatten()
            .filter(|t| !t.is_empty());

        let revoked = match refresh {
            Some(refresh) => {
                let request =
                    ApiRequest::post("logout/").json(&serde_json::json!({ "refresh": refresh }))?;
                match self.execute_empty(request).await {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(error = %err, "server-side logout failed");
                        false
                    }
                }
            }
            None => false,
        };

        self.session().close()?;
        Ok(revoked)
    }
}
