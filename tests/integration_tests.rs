//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: Client → HttpClient → Authenticator →
//! transport → decoded user or structured error.

use coinbase_client::auth::FixedClock;
use coinbase_client::http::HttpClient;
use coinbase_client::{
    ApiKeyAuthenticator, AuthorizationCode, Client, ClientConfig, Error, OAuth,
    OAuthAuthenticator, OAuthTokens, UserData,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder().base_url(server.uri()).build()
}

fn user_body() -> serde_json::Value {
    json!({
        "data": {
            "id": "9da7a204-544e-5fd1-9a12-61176c5d4cd8",
            "name": "User One",
            "username": "user1",
            "profile_location": null,
            "profile_bio": null,
            "profile_url": "https://coinbase.com/user1",
            "avatar_url": "https://images.coinbase.com/avatar?h=vR%2FY8igBoPwuwGren5JMwvDNGpURAY%2F0nRIOgH%2FY2Qh%2BQ6nomR3qusA%2Bh6o2%0Af9rH&s=128",
            "resource": "user",
            "resource_path": "/v2/user",
            "email": "user1@example.com"
        }
    })
}

// ============================================================================
// Client Facade
// ============================================================================

#[tokio::test]
async fn test_current_user_with_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(header("CB-ACCESS-KEY", "my-key"))
        .and(header("CB-ACCESS-TIMESTAMP", "1500000000"))
        .and(header_exists("CB-ACCESS-SIGN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = ApiKeyAuthenticator::with_clock(
        "my-key",
        "my-secret",
        Arc::new(FixedClock(1_500_000_000)),
    );
    let client = Client::with_config(config_for(&mock_server), Some(Arc::new(auth))).unwrap();

    let user = client.current_user().await.unwrap();

    assert_eq!(
        user.data,
        UserData {
            id: "9da7a204-544e-5fd1-9a12-61176c5d4cd8".to_string(),
            name: "User One".to_string(),
            username: "user1".to_string(),
            profile_location: String::new(),
            profile_bio: String::new(),
            profile_url: "https://coinbase.com/user1".to_string(),
            avatar_url: user_body()["data"]["avatar_url"].as_str().unwrap().to_string(),
            resource: "user".to_string(),
            resource_path: "/v2/user".to_string(),
            email: "user1@example.com".to_string(),
        }
    );
}

#[tokio::test]
async fn test_current_user_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "authentication_error",
            "error_description": "invalid signature"
        })))
        .mount(&mock_server)
        .await;

    let auth = ApiKeyAuthenticator::new("my-key", "wrong-secret");
    let client = Client::with_config(config_for(&mock_server), Some(Arc::new(auth))).unwrap();

    let err = client.current_user().await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 401);
            assert_eq!(api.error, "authentication_error");
            assert_eq!(api.error_description, "invalid signature");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_by_id_unauthenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/users/9da7a204"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "9da7a204", "name": "User One", "resource": "user"}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_config(config_for(&mock_server), None).unwrap();
    assert!(!client.http().has_authenticator());

    let user = client.user("9da7a204").await.unwrap();
    assert_eq!(user.data.name, "User One");
}

#[tokio::test]
async fn test_user_id_stays_in_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/users/%2E%2E%2Fuser%3Fx%3D1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "../user?x=1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::with_config(config_for(&mock_server), None).unwrap();

    let user = client.user("../user?x=1").await.unwrap();
    assert_eq!(user.data.id, "../user?x=1");

    let err = client.user("..").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[tokio::test]
async fn test_current_user_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let client = Client::with_config(config_for(&mock_server), None).unwrap();
    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_empty_api_key_fails_before_request() {
    let client = Client::api_key("", "").unwrap();
    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, Error::Credential { .. }));
}

// ============================================================================
// OAuth2 Flow → Client
// ============================================================================

#[tokio::test]
async fn test_oauth_flow_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("code=XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a",
            "token_type": "bearer",
            "refresh_token": "r",
            "scope": "wallet:user:read",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(header("Authorization", "Bearer a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let oauth = OAuth::new("my-client", "my-secret")
        .unwrap()
        .with_config(config.clone())
        .unwrap();

    let consent = oauth
        .authorization_url(Some("abc123"), &["wallet:user:read"])
        .unwrap();
    assert!(consent.as_str().starts_with(&mock_server.uri()));

    let callback = AuthorizationCode::from_query("code=XYZ&state=abc123").unwrap();
    assert_eq!(callback.state, "abc123");

    let tokens: OAuthTokens = oauth.exchange_code(&callback.code).await.unwrap();
    assert_eq!(tokens.access_token, "a");
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.refresh_token, "r");
    assert_eq!(tokens.scope, "wallet:user:read");
    assert_eq!(tokens.expires_in, 7200);

    let http = HttpClient::with_config(config)
        .unwrap()
        .with_authenticator(Arc::new(OAuthAuthenticator::new(tokens.access_token.clone())));
    let client = Client::from_http(http);
    let user = client.current_user().await.unwrap();
    assert_eq!(user.data.username, "user1");
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(8)
        .mount(&mock_server)
        .await;

    let auth = ApiKeyAuthenticator::new("my-key", "my-secret");
    let client = Client::with_config(config_for(&mock_server), Some(Arc::new(auth))).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.current_user().await })
        })
        .collect();

    for handle in handles {
        let user = handle.await.unwrap().unwrap();
        assert_eq!(user.data.resource, "user");
    }
}
