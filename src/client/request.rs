//! Replayable request descriptions
//!
//! An `ApiRequest` holds everything needed to build the HTTP request again,
//! so a request rejected with 401 can be replayed verbatim after a token
//! refresh.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::ClientError;

/// Endpoints that never carry a bearer token and never trigger a refresh
pub const PUBLIC_ENDPOINTS: &[&str] = &["token/", "token/refresh/", "register/"];

/// Refresh endpoint, called directly on the inner HTTP client
pub const REFRESH_ENDPOINT: &str = "token/refresh/";

/// Whether a path targets one of the public endpoints
pub fn is_public_endpoint(path: &str) -> bool {
    let path = normalize_path(path);
    PUBLIC_ENDPOINTS.contains(&path)
}

/// Strip leading slashes and any inline query string
fn normalize_path(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// A single uploaded file under the `file` form field
    Multipart {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// A request against the API, relative to the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query pairs
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a file upload
    pub fn file(
        mut self,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.body = Body::Multipart {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        };
        self
    }

    pub fn is_public(&self) -> bool {
        is_public_endpoint(&self.path)
    }

    /// Path relative to the base URL, without leading slashes
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_endpoints_match_exactly() {
        assert!(is_public_endpoint("token/"));
        assert!(is_public_endpoint("/token/refresh/"));
        assert!(is_public_endpoint("register/?next=1"));
        assert!(!is_public_endpoint("transactions/"));
        // Substring matches do not count
        assert!(!is_public_endpoint("tokens/token/"));
    }

    #[test]
    fn test_builder() {
        let request = ApiRequest::get("transactions/")
            .query([("type", "EXP"), ("q", "taxi")])
            .json(&serde_json::json!({"a": 1}))
            .unwrap();

        assert_eq!(request.query.len(), 2);
        assert!(matches!(request.body, Body::Json(_)));
        assert!(!request.is_public());
        assert_eq!(ApiRequest::post("/logout/").relative_path(), "logout/");
    }
}
