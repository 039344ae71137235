//! Client-visible routes and their session gate
//!
//! The terminal client keeps the route vocabulary of the web dashboard so
//! redirects ("log in again, your session expired") have one shape
//! everywhere.

use std::fmt;

use crate::config::Locale;

/// Why the user landed on the login route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginReason {
    /// The session could not be refreshed
    Expired,
}

impl LoginReason {
    fn as_query(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
        }
    }

    /// Notice shown on the login screen
    pub fn notice(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Expired, Locale::En) => "Session expired. Please log in again.",
            (Self::Expired, Locale::Fr) => "Session expiree. Veuillez vous reconnecter.",
        }
    }
}

/// State of the email verification that follows signup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Pending,
    Success,
    Invalid,
    Missing,
}

impl Verification {
    fn as_query(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Invalid => "invalid",
            Self::Missing => "missing",
        }
    }

    /// Parse the `verified=` marker
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "invalid" => Some(Self::Invalid),
            "missing" => Some(Self::Missing),
            _ => None,
        }
    }

    /// Notice shown on the login screen
    pub fn notice(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::En) => {
                "Signup successful. Check your email to activate the account."
            }
            (Self::Pending, Locale::Fr) => {
                "Inscription reussie. Verifiez votre email pour activer le compte."
            }
            (Self::Success, Locale::En) => "Email verified. You can now log in.",
            (Self::Success, Locale::Fr) => "Email verifie. Vous pouvez maintenant vous connecter.",
            (Self::Invalid, Locale::En) => "Verification link invalid or expired.",
            (Self::Invalid, Locale::Fr) => "Lien de verification invalide ou expire.",
            (Self::Missing, Locale::En) => "Verification token missing.",
            (Self::Missing, Locale::Fr) => "Token de verification manquant.",
        }
    }
}

/// A client route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login {
        reason: Option<LoginReason>,
        verified: Option<Verification>,
    },
    Signup,
    Dashboard,
    Profile,
}

impl Route {
    /// Plain login route
    pub fn login() -> Self {
        Self::Login {
            reason: None,
            verified: None,
        }
    }

    /// Login route carrying the "session expired" marker
    pub fn login_expired() -> Self {
        Self::Login {
            reason: Some(LoginReason::Expired),
            verified: None,
        }
    }

    /// Login route shown right after signup
    pub fn login_pending_verification() -> Self {
        Self::Login {
            reason: None,
            verified: Some(Verification::Pending),
        }
    }

    /// Parse a path such as `/login?reason=expired`
    pub fn parse(path: &str) -> Option<Self> {
        let (base, query) = path.split_once('?').unwrap_or((path, ""));

        match base.trim_end_matches('/') {
            "/login" => {
                let mut reason = None;
                let mut verified = None;
                for pair in query.split('&').filter(|p| !p.is_empty()) {
                    match pair.split_once('=') {
                        Some(("reason", "expired")) => reason = Some(LoginReason::Expired),
                        Some(("verified", value)) => verified = Verification::from_query(value),
                        _ => {}
                    }
                }
                Some(Self::Login { reason, verified })
            }
            "/signup" => Some(Self::Signup),
            "/dashboard" => Some(Self::Dashboard),
            "/profile" => Some(Self::Profile),
            // The root redirects to login
            "" => Some(Self::login()),
            _ => None,
        }
    }

    /// Whether this route needs a session
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile)
    }

    /// Resolve where a navigation to this route actually lands
    pub fn resolve(self, authenticated: bool) -> Self {
        match self {
            route if route.requires_session() && !authenticated => Self::login(),
            Self::Login { .. } if authenticated => Self::Dashboard,
            route => route,
        }
    }

    /// Notices attached to this route, if any
    pub fn notices(&self, locale: Locale) -> Vec<&'static str> {
        match self {
            Self::Login { reason, verified } => reason
                .map(|r| r.notice(locale))
                .into_iter()
                .chain(verified.map(|v| v.notice(locale)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { reason, verified } => {
                write!(f, "/login")?;
                let mut params = Vec::new();
                if let Some(reason) = reason {
                    params.push(format!("reason={}", reason.as_query()));
                }
                if let Some(verified) = verified {
                    params.push(format!("verified={}", verified.as_query()));
                }
                if !params.is_empty() {
                    write!(f, "?{}", params.join("&"))?;
                }
                Ok(())
            }
            Self::Signup => write!(f, "/signup"),
            Self::Dashboard => write!(f, "/dashboard"),
            Self::Profile => write!(f, "/profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gated_routes_redirect_to_login() {
        assert_eq!(Route::Dashboard.resolve(false), Route::login());
        assert_eq!(Route::Profile.resolve(false), Route::login());
        assert_eq!(Route::Dashboard.resolve(true), Route::Dashboard);
        assert_eq!(Route::Signup.resolve(false), Route::Signup);
    }

    #[test]
    fn test_login_with_session_goes_to_dashboard() {
        assert_eq!(Route::login_expired().resolve(true), Route::Dashboard);
        assert_eq!(Route::login().resolve(false), Route::login());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Route::login_expired().to_string(), "/login?reason=expired");
        assert_eq!(
            Route::login_pending_verification().to_string(),
            "/login?verified=pending"
        );
        assert_eq!(
            Route::parse("/login?reason=expired"),
            Some(Route::login_expired())
        );
        assert_eq!(Route::parse("/"), Some(Route::login()));
        assert_eq!(Route::parse("/profile/"), Some(Route::Profile));
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn test_notices() {
        let notices = Route::login_expired().notices(Locale::En);
        assert_eq!(notices, vec!["Session expired. Please log in again."]);
        assert!(Route::Dashboard.notices(Locale::Fr).is_empty());
    }
}
