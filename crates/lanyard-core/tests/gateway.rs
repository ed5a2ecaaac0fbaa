//! Integration tests for the API gateway: envelope unwrapping, bearer
//! header injection, and 401 credential invalidation.

use std::sync::Arc;

use lanyard_core::api::ApiClient;
use lanyard_core::api::errors::ApiError;
use lanyard_core::api::types::Section;
use lanyard_core::config::Config;
use lanyard_core::session::TokenCell;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: server.uri(),
        request_timeout_secs: 5,
        maps_api_key: None,
    }
}

fn client(server: &MockServer) -> (ApiClient, Arc<TokenCell>) {
    let tokens = Arc::new(TokenCell::new());
    let api = ApiClient::new(&test_config(server), Arc::clone(&tokens)).unwrap();
    (api, tokens)
}

fn envelope_ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_set() {
    let server = MockServer::start().await;
    let (api, tokens) = client(&server);
    tokens.set("tok123");

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("content-type", "application/json"))
        .respond_with(envelope_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let events = api.list_events().await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(envelope_ok(json!([])))
        .mount(&server)
        .await;

    api.list_events().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_envelope_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events/ev1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Evento não encontrado"
        })))
        .mount(&server)
        .await;

    let err = api.get_event("ev1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed("Evento não encontrado".to_string())
    );
}

#[tokio::test]
async fn test_envelope_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = api.list_events().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed("Failed to fetch events".to_string())
    );
}

/// success=true with no data is still a failure (per-operation fallback).
#[tokio::test]
async fn test_success_without_data_is_request_failed() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events/ev1/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let err = api.schedule("ev1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed("Failed to fetch schedule".to_string())
    );
}

#[tokio::test]
async fn test_401_clears_bearer_for_subsequent_requests() {
    let server = MockServer::start().await;
    let (api, tokens) = client(&server);
    tokens.set("stale-token-1234567890");

    Mock::given(method("GET"))
        .and(path("/user/registrations/ev1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(envelope_ok(json!([])))
        .mount(&server)
        .await;

    let err = api.user_registration("ev1").await.unwrap_err();
    assert_eq!(err, ApiError::AuthExpired);
    assert!(tokens.get().is_none());

    // The next outgoing request must carry no Authorization header.
    api.list_events().await.unwrap();
    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.path(), "/events");
    assert!(!last.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_non_401_http_error_is_transport() {
    let server = MockServer::start().await;
    let (api, tokens) = client(&server);
    tokens.set("tok123");

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api.list_events().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    // Only 401 invalidates the credential.
    assert!(tokens.get().is_some());
}

#[tokio::test]
async fn test_undecodable_body_is_transport() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = api.list_events().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_login_returns_user_and_token() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(envelope_ok(json!({
            "user": {
                "_id": "1",
                "email": "a@b.com",
                "role": "attendee",
                "profile": {
                    "name": "Ana", "company": "Acme", "position": "Dev",
                    "phone": "+55 11 99999-0000", "cpf": "123.456.789-09"
                }
            },
            "token": "tok123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = api.login("a@b.com", "secret").await.unwrap();
    assert_eq!(auth.token, "tok123");
    assert_eq!(auth.user.email, "a@b.com");

    // Request body carries exactly the credentials.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "email": "a@b.com", "password": "secret" }));
}

#[tokio::test]
async fn test_register_ack_prefers_server_message() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Conta criada com sucesso"
        })))
        .mount(&server)
        .await;

    let profile = lanyard_core::api::types::UserProfile {
        name: "Ana".to_string(),
        company: "Acme".to_string(),
        position: "Dev".to_string(),
        phone: "+55 11 99999-0000".to_string(),
        cpf: "123.456.789-09".to_string(),
    };
    let ack = api
        .register(&lanyard_core::api::types::RegisterPayload {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            profile,
        })
        .await
        .unwrap();
    assert_eq!(ack, "Conta criada com sucesso");
}

#[tokio::test]
async fn test_drive_link_unwraps_url() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events/ev1/google-drive"))
        .respond_with(envelope_ok(json!({
            "googleDriveURL": "https://drive.google.com/drive/folders/abc"
        })))
        .mount(&server)
        .await;

    let url = api.drive_link("ev1").await.unwrap();
    assert_eq!(url, "https://drive.google.com/drive/folders/abc");
}

#[tokio::test]
async fn test_section_paths_hit_expected_endpoints() {
    let server = MockServer::start().await;
    let (api, _tokens) = client(&server);

    Mock::given(method("GET"))
        .and(path("/events/ev1/general-info"))
        .respond_with(envelope_ok(json!({
            "_id": "g1",
            "title": "Informações Gerais",
            "sections": [{"content": "Credenciamento a partir das 8h"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info: lanyard_core::api::types::GeneralInfo =
        api.event_section("ev1", Section::GeneralInfo).await.unwrap();
    assert_eq!(info.sections.len(), 1);
}
