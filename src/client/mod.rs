//! Nexora HTTP client
//!
//! Every call to the API goes through [`ApiClient::send`], which attaches the
//! bearer token and, when a protected endpoint answers 401, refreshes the
//! access token once and replays the request.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod error;
pub mod export;
pub mod profile;
pub mod request;
pub mod transactions;
pub mod wallets;

pub use error::ClientError;
pub use export::{ExportFile, ExportFormat};
pub use request::{ApiRequest, Body};

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Settings;
use crate::session::SessionContext;

use request::REFRESH_ENDPOINT;

/// Correlation header sent with every request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Nexora API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionContext>,
    ) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).session(session).build()
    }

    /// Create a client from the user's settings
    pub fn from_settings(
        settings: &Settings,
        session: Arc<SessionContext>,
    ) -> Result<Self, ClientError> {
        Self::builder()
            .base_url(settings.api_base_url.clone())
            .timeout(settings.request_timeout())
            .session(session)
            .build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL (always ends with a slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client reads tokens from
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build and send one attempt of a request
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(request.relative_path()))
            .header(REQUEST_ID_HEADER, &request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart {
                file_name,
                mime,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)?;
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        tracing::debug!(
            method = %request.method,
            path = request.relative_path(),
            %request_id,
            authenticated = token.is_some(),
            "sending request"
        );
        let response = builder.send().await?;
        tracing::debug!(%request_id, status = response.status().as_u16(), "received response");

        Ok(response)
    }

    /// Send a request, refreshing the session once on 401
    ///
    /// Returns the raw response whatever its status, except that a failed
    /// or impossible refresh yields [`ClientError::SessionExpired`] and a
    /// second 401 after the replay yields
    /// [`ClientError::AuthenticationFailed`].
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        if request.is_public() {
            return self.dispatch(request, None).await;
        }

        let token = self
            .session
            .tokens()
            .get_access_token()?
            .filter(|t| !t.is_empty());
        let response = self.dispatch(request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::info!(path = request.relative_path(), "access token rejected, refreshing");
        let fresh = self.refresh_access_token(token.as_deref()).await?;

        let retried = self.dispatch(request, Some(&fresh)).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = request.relative_path(), "request rejected after refresh");
            let body = Self::error_body(retried).await;
            return Err(ClientError::from_body(StatusCode::UNAUTHORIZED, &body));
        }

        Ok(retried)
    }

    /// Obtain a usable access token after `failed` was rejected
    ///
    /// Refreshes are serialized. A caller that waited behind another
    /// refresh picks up the token that refresh stored.
    async fn refresh_access_token(&self, failed: Option<&str>) -> Result<String, ClientError> {
        let _guard = self.session.refresh_lock().lock().await;
        let tokens = self.session.tokens();

        if let Some(current) = tokens.get_access_token()?.filter(|t| !t.is_empty()) {
            if failed != Some(current.as_str()) {
                tracing::debug!("reusing token from a concurrent refresh");
                return Ok(current);
            }
        }

        let Some(refresh) = tokens.get_refresh_token()?.filter(|t| !t.is_empty()) else {
            tracing::warn!("no refresh token available");
            return Err(self.expire());
        };

        self.session.begin_refresh()?;
        match self.request_refresh(&refresh).await {
            Ok(access) => match self.session.finish_refresh(&access) {
                Ok(()) => Ok(access),
                Err(err) => {
                    tracing::warn!(error = %err, "refreshed token could not be stored");
                    Err(self.expire())
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed");
                Err(self.expire())
            }
        }
    }

    /// Post the refresh token directly, outside the 401 handling
    async fn request_refresh(&self, refresh: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url(REFRESH_ENDPOINT))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_body(status, &body));
        }

        let parsed: RefreshResponse = serde_json::from_slice(&body)?;
        Ok(parsed.access)
    }

    /// Clear the session and describe where the user should go
    fn expire(&self) -> ClientError {
        match self.session.expire() {
            Ok(redirect) => ClientError::SessionExpired { redirect },
            Err(err) => err.into(),
        }
    }

    /// Body of an error response, empty when it cannot be read
    async fn error_body(response: Response) -> Vec<u8> {
        let status = response.status();
        match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(err) => {
                tracing::debug!(%status, error = %err, "could not read error response body");
                Vec::new()
            }
        }
    }

    /// Turn a non-success response into an error
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = Self::error_body(response).await;
        Err(ClientError::from_body(status, &body))
    }

    /// Execute a request and decode the JSON response
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = Self::check(self.send(&request).await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose response body is irrelevant
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        Self::check(self.send(&request).await?).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    session: Option<Arc<SessionContext>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the session tokens are read from
    pub fn session(mut self, session: Arc<SessionContext>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session is required".into()))?;

        // Paths are relative, so the base must end with exactly one slash
        let base_url = format!("{}/", base_url.trim().trim_end_matches('/'));

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder =
                client_builder.user_agent(concat!("nexora-cli/", env!("CARGO_PKG_VERSION")));
        }

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            session,
        })
    }
}
