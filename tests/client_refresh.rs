//! Integration tests for the API client against a mock server

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nexora_cli::client::auth::RegisterRequest;
use nexora_cli::client::{ApiClient, ClientError, ExportFormat};
use nexora_cli::dashboard::{load, DashboardQuery};
use nexora_cli::models::{Month, TransactionFilter};
use nexora_cli::session::{Route, SessionContext, SessionState, StorageMode, TokenStore};
use nexora_cli::storage::{KeyValueStore, MemoryStore};
use nexora_cli::{NexoraError, NexoraResult};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_with(access: Option<&str>, refresh: Option<&str>, remember: bool) -> (TokenStore, Arc<SessionContext>) {
    let tokens = TokenStore::in_memory();
    if let (Some(access), Some(refresh)) = (access, refresh) {
        tokens.set_tokens(access, refresh, remember).unwrap();
    } else if let Some(refresh) = refresh {
        tokens.set_tokens("", refresh, remember).unwrap();
    }
    let session = SessionContext::open(tokens.clone());
    (tokens, session)
}

fn client(server: &MockServer, session: Arc<SessionContext>) -> ApiClient {
    ApiClient::new(format!("{}/api", server.uri()), session).unwrap()
}

fn wallet_json() -> serde_json::Value {
    json!([{ "id": 1, "name": "Principal", "color": "#24C289", "is_default": true, "created_at": null }])
}

#[tokio::test]
async fn test_bearer_attached_when_token_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let wallets = client(&server, session).list_wallets().await.unwrap();

    assert_eq!(wallets.len(), 1);
    assert!(wallets[0].is_default);
}

#[tokio::test]
async fn test_no_bearer_without_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (_, session) = session_with(None, None, true);
    client(&server, session).list_wallets().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_no_bearer_on_public_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({ "username": "awa", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "a-2", "refresh": "r-2" })),
        )
        .mount(&server)
        .await;

    let (tokens, session) = session_with(Some("stale"), Some("stale-refresh"), true);
    let api = client(&server, session.clone());
    api.login("awa", "secret", false).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));

    assert_eq!(tokens.get_access_token().unwrap().as_deref(), Some("a-2"));
    assert_eq!(session.storage_mode().unwrap(), StorageMode::Ephemeral);
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_register_posts_borrowed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_json(json!({ "username": "awa", "password": "s3cret!", "email": "awa@example.com" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "username": "awa", "email": "awa@example.com" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let password = zeroize::Zeroizing::new(String::from("s3cret!"));
    let request = RegisterRequest {
        username: "awa",
        password: password.as_str(),
        email: "awa@example.com",
    };
    let (_, session) = session_with(None, None, true);
    let user = client(&server, session).register(&request).await.unwrap();

    assert_eq!(user.username, "awa");
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_failed_login_is_not_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "No active account found" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let (_, session) = session_with(None, None, true);
    let err = client(&server, session).login("awa", "wrong", true).await.unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(ref m) if m == "No active account found"));
}

#[tokio::test]
async fn test_401_refreshes_once_and_replays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (tokens, session) = session_with(Some("expired"), Some("refresh-1"), false);
    let wallets = client(&server, session.clone()).list_wallets().await.unwrap();

    assert_eq!(wallets[0].name, "Principal");
    assert_eq!(tokens.get_access_token().unwrap().as_deref(), Some("fresh"));
    assert_eq!(tokens.get_refresh_token().unwrap().as_deref(), Some("refresh-1"));
    // The refreshed token stays where the session was stored
    assert_eq!(session.storage_mode().unwrap(), StorageMode::Ephemeral);
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_second_401_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "nope" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let (tokens, session) = session_with(Some("expired"), Some("refresh-1"), true);
    let err = client(&server, session).get_profile().await.unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    assert!(!err.is_session_expired());
    assert_eq!(tokens.get_refresh_token().unwrap().as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Token is blacklisted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (tokens, session) = session_with(Some("expired"), Some("revoked"), true);
    let err = client(&server, session.clone()).list_categories().await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(err.redirect(), Some(Route::login_expired()));
    assert_eq!(tokens.get_access_token().unwrap(), None);
    assert_eq!(tokens.get_refresh_token().unwrap(), None);
    assert!(!session.is_authenticated());
    assert_eq!(session.guard(Route::Dashboard), Route::login());
}

/// Durable store whose next access token write fails
#[derive(Default)]
struct FailingAccessWrite {
    inner: MemoryStore,
    armed: AtomicBool,
}

impl KeyValueStore for FailingAccessWrite {
    fn get(&self, key: &str) -> NexoraResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> NexoraResult<()> {
        if key == "access_token" && self.armed.swap(false, Ordering::SeqCst) {
            return Err(NexoraError::Storage("disk full".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> NexoraResult<()> {
        self.inner.remove(key)
    }
}

#[tokio::test]
async fn test_unstorable_refreshed_token_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let durable = Arc::new(FailingAccessWrite::default());
    let tokens = TokenStore::new(durable.clone(), Arc::new(MemoryStore::new()));
    tokens.set_tokens("expired", "refresh-1", true).unwrap();
    durable.armed.store(true, Ordering::SeqCst);
    let session = SessionContext::open(tokens.clone());
    let api = client(&server, session.clone());

    let err = api.list_wallets().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired { ref redirect } if *redirect == Route::login_expired()));
    assert_eq!(session.state(), SessionState::Expired);
    assert_eq!(tokens.get_refresh_token().unwrap(), None);

    // The session is not wedged: the next 401 expires cleanly again
    let err = api.list_wallets().await.unwrap_err();
    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_missing_refresh_token_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let (tokens, session) = session_with(Some("expired"), Some(""), true);
    let err = client(&server, session).list_wallets().await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(tokens.get_access_token().unwrap(), None);
}

#[tokio::test]
async fn test_refresh_token_alone_is_enough() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, session) = session_with(None, Some("refresh-1"), true);
    assert_eq!(session.state(), SessionState::Authenticated);

    let wallets = client(&server, session).list_wallets().await.unwrap();
    assert_eq!(wallets.len(), 1);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    for endpoint in ["/api/wallets/", "/api/categories/"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, session) = session_with(Some("expired"), Some("refresh-1"), true);
    let api = client(&server, session);

    let (wallets, categories) = tokio::join!(api.list_wallets(), api.list_categories());

    assert!(wallets.unwrap().is_empty());
    assert!(categories.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_error_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions/export/"))
        .and(query_param("format", "pdf"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "PDF export is not available" })),
        )
        .mount(&server)
        .await;

    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let err = client(&server, session)
        .export_transactions(&TransactionFilter::default(), ExportFormat::Pdf)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Export(ref m) if m == "PDF export is not available"));
}

#[tokio::test]
async fn test_export_uses_server_file_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions/export/"))
        .and(query_param("format", "csv"))
        .and(query_param("type", "EXP"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"march.csv\"")
                .set_body_bytes(b"date,amount\n".to_vec()),
        )
        .mount(&server)
        .await;

    let filter = TransactionFilter {
        kind: Some(nexora_cli::models::TransactionKind::Expense),
        ..TransactionFilter::default()
    };
    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let file = client(&server, session)
        .export_transactions(&filter, ExportFormat::Csv)
        .await
        .unwrap();

    assert_eq!(file.file_name, "march.csv");
    assert_eq!(file.bytes, b"date,amount\n");
}

#[tokio::test]
async fn test_csv_import_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transactions/import_csv/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "created": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let csv = b"date,description,category,amount\n2025-03-01,Pain,,-1.50\n2025-03-02,Bus,,-0.80\n";
    let result = client(&server, session)
        .import_transactions_csv("march.csv", csv.to_vec())
        .await
        .unwrap();

    assert_eq!(result.created, 2);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"march.csv\""));
}

#[tokio::test]
async fn test_dashboard_load_fails_as_a_whole() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "awa", "first_name": "Awa",
            "date_joined": null, "last_login": null,
            "preferences": { "currency": "EUR" }
        })))
        .mount(&server)
        .await;
    for endpoint in ["/api/categories/", "/api/wallets/", "/api/transactions/", "/api/budgets/"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/budgets/status/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let api = client(&server, session);
    let query = DashboardQuery::new(Month::new(2025, 3).unwrap());

    let err = load(&api, &query).await.unwrap_err();
    assert!(!err.is_session_expired());
    assert!(matches!(
        err,
        nexora_cli::NexoraError::Api(ClientError::ServerError { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_dashboard_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "awa", "first_name": "",
            "date_joined": null, "last_login": null,
            "preferences": { "currency": "EUR" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Courses", "type": "EXP", "icon": "🛒", "color": "" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/transactions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "amount": "-12.50", "description": "Marche", "date": "2025-03-04",
              "category": 7, "category_name": "Courses", "wallet": 1, "wallet_name": "Principal" }
        ])))
        .mount(&server)
        .await;
    for endpoint in ["/api/budgets/", "/api/budgets/status/"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("month", "2025-03-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }

    let (_, session) = session_with(Some("access-1"), Some("refresh-1"), true);
    let api = client(&server, session);
    let data = load(&api, &DashboardQuery::new(Month::new(2025, 3).unwrap()))
        .await
        .unwrap();

    assert_eq!(data.user_name(), "awa");
    assert_eq!(data.currency(), "EUR");
    assert_eq!(data.default_wallet().map(|w| w.name.as_str()), Some("Principal"));
    let chart = data.chart();
    assert_eq!(chart.len(), 1);
    assert_eq!(chart[0].label, "🛒 Courses");
}

#[tokio::test]
async fn test_truncated_error_body_falls_back_to_status_reason() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        // Promise more body than is sent, then hang up
        socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 64\r\nConnection: close\r\n\r\n{\"detail\"")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let (_, session) = session_with(None, None, true);
    let api = ApiClient::new(format!("http://{}/api", addr), session).unwrap();
    let err = api.list_wallets().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::ServerError { status: 503, ref message } if message == "Service Unavailable"
    ));
    server.await.unwrap();
}
