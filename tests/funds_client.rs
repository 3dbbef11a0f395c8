//! FundsClient against an in-process HTTP server

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fundsdesk_tui::{AccountSnapshot, Config, Credential, DepositRequest, FundsClient, FundsError, PaymentMode};

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client_for(base_url: String) -> FundsClient {
    let config = Config::default().with_overrides(Some(base_url), Some(5));
    FundsClient::new(&config)
}

fn headers_ok(headers: &HeaderMap) -> bool {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some("Bearer abc")
        && headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) == Some("application/json")
}

fn funds_app() -> Router {
    Router::new()
        .route(
            "/api/funds",
            get(|headers: HeaderMap| async move {
                if !headers_ok(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad token"})));
                }
                (StatusCode::OK, Json(json!({"type": "savings", "balance": 500})))
            }),
        )
        .route(
            "/api/funds/deposit",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if !headers_ok(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                if body == json!({"amount": 100.0, "mode": "NB"}) {
                    (StatusCode::OK, Json(json!({"data": {"url": "https://pay.example/x"}})))
                } else if body == json!({"amount": 50.0, "mode": "NB"}) {
                    (StatusCode::OK, Json(json!({"success": true, "balance": 550})))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"message": "unexpected body"})))
                }
            }),
        )
}

#[tokio::test]
async fn test_fetch_sends_bearer_and_parses_snapshot() {
    let client = client_for(spawn_server(funds_app()).await);

    let snapshot = client.fetch_funds(&Credential::new("abc")).await.unwrap();
    assert_eq!(
        snapshot,
        AccountSnapshot {
            account_type: Some("savings".into()),
            email: None,
            balance: Some(500.0),
        }
    );
}

#[tokio::test]
async fn test_non_success_status_is_request_failed() {
    let client = client_for(spawn_server(funds_app()).await);

    let err = client.fetch_funds(&Credential::new("wrong")).await.unwrap_err();
    assert_eq!(err, FundsError::RequestFailed { status: 401 });
}

#[tokio::test]
async fn test_deposit_redirect_and_direct_outcomes() {
    let client = client_for(spawn_server(funds_app()).await);
    let cred = Credential::new("abc");

    let redirect = client
        .submit_deposit(&cred, &DepositRequest { amount: 100.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap();
    assert_eq!(redirect.redirect_url.as_deref(), Some("https://pay.example/x"));

    let direct = client
        .submit_deposit(&cred, &DepositRequest { amount: 50.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap();
    assert_eq!(direct.redirect_url, None);
    assert_eq!(direct.success, Some(true));
    assert_eq!(direct.balance, Some(550.0));
}

#[tokio::test]
async fn test_empty_token_fails_without_request() {
    // Nothing listens here; reaching the network would be a transport error
    let client = client_for("http://127.0.0.1:9".into());
    let err = client.fetch_funds(&Credential::default()).await.unwrap_err();
    assert_eq!(err, FundsError::MissingCredential);
}

#[tokio::test]
async fn test_unparseable_body_is_transport_error() {
    let app = Router::new().route("/api/funds", get(|| async { "definitely not json" }));
    let client = client_for(spawn_server(app).await);

    let err = client.fetch_funds(&Credential::new("abc")).await.unwrap_err();
    assert!(matches!(err, FundsError::TransportError(ref d) if d.starts_with("Invalid response body")));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/api", addr));
    let err = client.fetch_funds(&Credential::new("abc")).await.unwrap_err();
    assert!(matches!(err, FundsError::TransportError(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_deposit_rejected_by_server_is_request_failed() {
    let client = client_for(spawn_server(funds_app()).await);

    let err = client
        .submit_deposit(&Credential::new("abc"), &DepositRequest { amount: 7.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap_err();
    assert_eq!(err, FundsError::RequestFailed { status: 400 });

    let err = client
        .submit_deposit(&Credential::new("wrong"), &DepositRequest { amount: 50.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap_err();
    assert_eq!(err, FundsError::RequestFailed { status: 401 });
}

#[tokio::test]
async fn test_deposit_unparseable_body_is_transport_error() {
    let app = Router::new().route("/api/funds/deposit", post(|| async { "<html>gateway</html>" }));
    let client = client_for(spawn_server(app).await);

    let err = client
        .submit_deposit(&Credential::new("abc"), &DepositRequest { amount: 50.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap_err();
    assert!(matches!(err, FundsError::TransportError(ref d) if d.starts_with("Invalid response body")), "got {:?}", err);
}

#[tokio::test]
async fn test_deposit_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/api", addr));
    let err = client
        .submit_deposit(&Credential::new("abc"), &DepositRequest { amount: 50.0, mode: PaymentMode::NetBanking })
        .await
        .unwrap_err();
    assert!(matches!(err, FundsError::TransportError(ref d) if d.starts_with("Connection failed")), "got {:?}", err);
}
