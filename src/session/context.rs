//! Session context shared by the HTTP client and the views
//!
//! A `SessionContext` is opened once per process and handed around as an
//! `Arc`. It owns the token store, tracks the session state machine and
//! serializes refresh attempts so concurrent 401s trigger a single refresh.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::Mutex as AsyncMutex;

use crate::config::NexoraPaths;
use crate::error::{NexoraError, NexoraResult};

use super::route::Route;
use super::state::{SessionEvent, SessionState};
use super::token_store::{StorageMode, TokenStore};

/// Process-wide session handle
#[derive(Debug)]
pub struct SessionContext {
    tokens: TokenStore,
    state: Mutex<SessionState>,
    refresh_lock: AsyncMutex<()>,
}

impl SessionContext {
    /// Open a session over an existing token store
    ///
    /// The session starts authenticated when either token is present: an
    /// access token may have expired while the refresh token is still good.
    pub fn open(tokens: TokenStore) -> Arc<Self> {
        let initial = if Self::store_has_tokens(&tokens) {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        tracing::debug!(state = %initial, "session opened");

        Arc::new(Self {
            tokens,
            state: Mutex::new(initial),
            refresh_lock: AsyncMutex::new(()),
        })
    }

    /// Open a session backed by the files under the configured paths
    pub fn from_paths(paths: &NexoraPaths) -> Arc<Self> {
        Self::open(TokenStore::from_paths(paths))
    }

    /// Session that keeps tokens in memory only
    pub fn in_memory() -> Arc<Self> {
        Self::open(TokenStore::in_memory())
    }

    fn store_has_tokens(tokens: &TokenStore) -> bool {
        let present = |t: NexoraResult<Option<String>>| matches!(t, Ok(Some(v)) if !v.is_empty());
        present(tokens.get_access_token()) || present(tokens.get_refresh_token())
    }

    fn lock_state(&self) -> NexoraResult<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|_| NexoraError::Session("session state lock poisoned".into()))
    }

    fn apply(&self, event: SessionEvent) -> NexoraResult<SessionState> {
        let mut state = self.lock_state()?;
        let next = state.transition(event)?;
        tracing::trace!(from = %*state, to = %next, ?event, "session transition");
        *state = next;
        Ok(next)
    }

    /// The underlying token store
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(SessionState::Unauthenticated)
    }

    /// Whether an access token is present (no expiry check)
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Storage mode of the current token pair
    pub fn storage_mode(&self) -> NexoraResult<StorageMode> {
        self.tokens.storage_mode()
    }

    /// Record a successful login
    pub fn login(&self, access: &str, refresh: &str, remember: bool) -> NexoraResult<()> {
        self.tokens.set_tokens(access, refresh, remember)?;
        self.apply(SessionEvent::LoggedIn)?;
        tracing::info!(mode = %StorageMode::from_remember(remember), "logged in");
        Ok(())
    }

    /// End the session locally
    pub fn close(&self) -> NexoraResult<()> {
        self.tokens.clear_tokens()?;
        self.apply(SessionEvent::LoggedOut)?;
        tracing::info!("session closed");
        Ok(())
    }

    /// Serializes refresh attempts
    pub fn refresh_lock(&self) -> &AsyncMutex<()> {
        &self.refresh_lock
    }

    /// Mark a refresh as in flight
    pub fn begin_refresh(&self) -> NexoraResult<()> {
        let mut state = self.lock_state()?;
        // Another process may have logged in through the shared session file
        if matches!(*state, SessionState::Unauthenticated | SessionState::Expired)
            && Self::store_has_tokens(&self.tokens)
        {
            *state = SessionState::Authenticated;
        }
        *state = state.transition(SessionEvent::RefreshStarted)?;
        Ok(())
    }

    /// Store the refreshed access token and return to `Authenticated`
    ///
    /// A token that cannot be stored ends the refresh as failed, so the
    /// session never stays in `Refreshing`.
    pub fn finish_refresh(&self, access: &str) -> NexoraResult<()> {
        if let Err(err) = self.tokens.replace_access_token(access) {
            tracing::warn!(error = %err, "could not store refreshed access token");
            self.apply(SessionEvent::RefreshFailed)?;
            return Err(err);
        }
        self.apply(SessionEvent::RefreshSucceeded)?;
        tracing::debug!("access token refreshed");
        Ok(())
    }

    /// Drop the tokens after a refresh that failed or could not start
    ///
    /// Returns the route the user should be sent to.
    pub fn expire(&self) -> NexoraResult<Route> {
        self.apply(SessionEvent::RefreshFailed)?;
        self.tokens.clear_tokens()?;
        tracing::warn!("session expired, login required");
        Ok(Route::login_expired())
    }

    /// Where a navigation to `route` lands given the current session
    pub fn guard(&self, route: Route) -> Route {
        route.resolve(self.is_authenticated())
    }
}
