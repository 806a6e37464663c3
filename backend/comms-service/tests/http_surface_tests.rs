/// HTTP-surface tests for the comms-service router.
///
/// These drive the real router with in-memory requests. The database pool is
/// created lazily and never connects: every path exercised here resolves
/// before any query is issued (auth gating, input validation, grant signing,
/// call-control documents).
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use comms_service::{
    config::{Config, TwilioConfig},
    routes,
    security::jwt,
    services::twilio::TwilioClient,
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

const JWT_SECRET: &str = "test-session-secret";
const API_SECRET: &str = "test-api-secret";

fn test_config() -> Config {
    Config {
        port: 3000,
        database_url: "postgres://localhost/unused".into(),
        jwt_secret: JWT_SECRET.into(),
        twilio: TwilioConfig {
            account_sid: "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            auth_token: "auth-token".into(),
            api_key: "SKxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            api_secret: API_SECRET.into(),
            conversations_service_sid: "ISxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            twiml_app_sid: "APxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".into(),
            caller_number: "+15550100".into(),
            voice_url: "http://demo.twilio.com/docs/voice.xml".into(),
        },
        fcm: None,
    }
}

fn test_app() -> Router {
    let config = Arc::new(test_config());
    let db = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let twilio = Arc::new(TwilioClient::new(&config.twilio));

    routes::build_router(AppState {
        db,
        config,
        twilio,
        fcm: None,
    })
}

fn bearer_token() -> String {
    jwt::issue_session_token(JWT_SECRET, Uuid::new_v4(), "alice").unwrap()
}

fn json_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_session() {
    for (method, uri) in [
        ("POST", "/token"),
        ("POST", "/voice-token"),
        ("GET", "/users"),
        ("POST", "/messages"),
        ("GET", "/messages/CH123"),
        ("POST", "/save-fcm-token"),
    ] {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} must be gated"
        );

        let json = body_json(response).await;
        assert_eq!(json["error"], "unauthorized");
    }
}

#[tokio::test]
async fn malformed_bearer_rejected() {
    let response = test_app()
        .oneshot(json_request("/token", Some("not_a_jwt"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_session_rejected() {
    // A token that was valid once upon a time, signed with the right secret.
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let claims = jwt::SessionClaims {
        sub: Uuid::new_v4().to_string(),
        identity: "alice".to_string(),
        iat: (now - Duration::days(8)).timestamp(),
        exp: (now - Duration::days(1)).timestamp(),
    };
    let stale = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = test_app()
        .oneshot(json_request("/token", Some(&stale), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn chat_token_grants_conversation_access() {
    let response = test_app()
        .oneshot(json_request("/token", Some(&bearer_token()), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token field");

    let claims = jsonwebtoken::decode::<comms_service::services::grants::AccessTokenClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(API_SECRET.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )
    .unwrap()
    .claims;

    assert_eq!(claims.grants.identity, "alice");
    assert_eq!(
        claims.grants.chat.unwrap().service_sid,
        "ISxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
    );
    assert!(claims.grants.voice.is_none());
}

#[tokio::test]
async fn voice_token_grants_two_way_calling() {
    let response = test_app()
        .oneshot(json_request("/voice-token", Some(&bearer_token()), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token field");

    let claims = jsonwebtoken::decode::<comms_service::services::grants::AccessTokenClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(API_SECRET.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )
    .unwrap()
    .claims;

    let voice = claims.grants.voice.unwrap();
    assert_eq!(
        voice.outgoing.application_sid,
        "APxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
    );
    assert!(voice.incoming.allow);
}

#[tokio::test]
async fn signup_rejects_missing_fields() {
    let response = test_app()
        .oneshot(json_request(
            "/signup",
            None,
            r#"{"username": "alice", "email": "a@x.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let response = test_app()
        .oneshot(json_request(
            "/signup",
            None,
            r#"{"username": "alice", "email": "not-an-email", "password": "pw", "phone": "+15550001"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_message_rejected_before_persistence() {
    for body in [
        r#"{"conversationSid": "", "body": "hi"}"#,
        r#"{"conversationSid": "CH123", "body": ""}"#,
        r#"{}"#,
    ] {
        let response = test_app()
            .oneshot(json_request("/messages", Some(&bearer_token()), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn empty_fcm_token_rejected() {
    let response = test_app()
        .oneshot(json_request("/save-fcm-token", Some(&bearer_token()), "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn call_requires_destination() {
    let response = test_app()
        .oneshot(json_request("/call", None, r#"{"to": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voice_webhook_without_target_speaks_rejection() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("From=client%3Abob"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/xml"));

    let body = body_text(response).await;
    assert!(body.contains("<Say>No recipient specified</Say>"));
    assert!(!body.contains("<Dial>"));
}

#[tokio::test]
async fn voice_webhook_with_target_connects_client() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("To=alice&From=client%3Abob"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<Dial><Client>alice</Client></Dial>"));
}

#[tokio::test]
async fn voice_webhook_with_empty_target_still_rejects() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("To="))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("No recipient specified"));
}
