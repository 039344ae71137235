//! Session lifecycle state machine
//!
//! ```text
//!                   LoggedIn
//!  Unauthenticated ─────────▶ Authenticated ◀──────────┐
//!        ▲                     │                       │ RefreshSucceeded
//!        │ LoggedOut           │ RefreshStarted        │
//!        │                     ▼                       │
//!        └──────────────── Refreshing ─────────────────┘
//!                              │ RefreshFailed
//!                              ▼
//!                           Expired ── LoggedIn ──▶ Authenticated
//! ```
//!
//! `LoggedOut` is accepted from every state.

use std::fmt;

use crate::error::{NexoraError, NexoraResult};

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No token pair
    #[default]
    Unauthenticated,
    /// A token pair is stored
    Authenticated,
    /// A refresh call is in flight
    Refreshing,
    /// Refresh failed or was impossible; the user must log in again
    Expired,
}

/// Things that move the session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    RefreshStarted,
    RefreshSucceeded,
    RefreshFailed,
    LoggedOut,
}

impl SessionState {
    /// Apply an event, rejecting transitions the diagram does not allow
    pub fn transition(self, event: SessionEvent) -> NexoraResult<Self> {
        use SessionEvent::*;
        use SessionState::*;

        let next = match (self, event) {
            (_, LoggedOut) => Unauthenticated,
            (Unauthenticated | Expired | Authenticated, LoggedIn) => Authenticated,
            (Authenticated, RefreshStarted) => Refreshing,
            (Refreshing, RefreshSucceeded) => Authenticated,
            // A request sent without a refresh token fails from any state
            (_, RefreshFailed) => Expired,
            (state, event) => {
                return Err(NexoraError::Session(format!(
                    "cannot apply {:?} while {}",
                    event, state
                )))
            }
        };

        Ok(next)
    }

    /// Whether requests may carry credentials in this state
    pub fn has_credentials(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Refreshing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::Refreshing => "refreshing",
            Self::Expired => "expired",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent::*;
    use super::SessionState::*;
    use super::*;

    #[test]
    fn test_happy_refresh_cycle() {
        let state = Unauthenticated.transition(LoggedIn).unwrap();
        let state = state.transition(RefreshStarted).unwrap();
        assert_eq!(state, Refreshing);
        assert_eq!(state.transition(RefreshSucceeded).unwrap(), Authenticated);
    }

    #[test]
    fn test_failed_refresh_expires_session() {
        let state = Authenticated.transition(RefreshStarted).unwrap();
        let state = state.transition(RefreshFailed).unwrap();
        assert_eq!(state, Expired);
        assert!(!state.has_credentials());
        assert_eq!(state.transition(LoggedIn).unwrap(), Authenticated);
    }

    #[test]
    fn test_logout_from_anywhere() {
        for state in [Unauthenticated, Authenticated, Refreshing, Expired] {
            assert_eq!(state.transition(LoggedOut).unwrap(), Unauthenticated);
        }
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(Unauthenticated.transition(RefreshStarted).is_err());
        assert!(Authenticated.transition(RefreshSucceeded).is_err());
        assert!(Refreshing.transition(RefreshStarted).is_err());
        assert!(Expired.transition(RefreshSucceeded).is_err());
    }
}
