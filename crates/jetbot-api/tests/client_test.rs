#![allow(clippy::unwrap_used)]
// Integration tests for `SmartThingsClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jetbot_api::{Credential, Error, OauthSession, SmartThingsClient};

// ── Helpers ─────────────────────────────────────────────────────────

const DEVICE_ID: &str = "3a9f6b2e-robot";

fn token_client(server: &MockServer, token: &str) -> SmartThingsClient {
    let secret: SecretString = token.to_owned().into();
    SmartThingsClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Credential::PersonalToken(secret),
    )
    .unwrap()
}

async fn setup() -> (MockServer, SmartThingsClient) {
    let server = MockServer::start().await;
    let client = token_client(&server, "test-token");
    (server, client)
}

// ── Status tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_device_status() {
    let (server, client) = setup().await;

    let payload = json!({
        "components": {
            "main": {
                "battery": { "battery": { "value": 57, "unit": "%" } },
                "samsungce.robotCleanerOperatingState": {
                    "operatingState": { "value": "cleaning" }
                }
            },
            "station": {
                "samsungce.robotCleanerDustBag": { "status": { "value": "full" } }
            }
        }
    });

    Mock::given(method("GET"))
        .and(path(format!("/devices/{DEVICE_ID}/status")))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let status = client.device_status(DEVICE_ID).await.unwrap();

    let battery = &status.components["main"]["battery"]["battery"];
    assert_eq!(battery["value"], json!(57));
    assert!(status.components.contains_key("station"));
}

#[tokio::test]
async fn test_device_detail() {
    let (server, client) = setup().await;

    let payload = json!({
        "deviceId": DEVICE_ID,
        "name": "robot-vacuum",
        "label": "Jet Bot Combo",
        "components": [
            {
                "id": "main",
                "capabilities": [
                    { "id": "battery", "version": 1 },
                    { "id": "samsungce.robotCleanerOperatingState", "version": 1 }
                ]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(format!("/devices/{DEVICE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let device = client.device(DEVICE_ID).await.unwrap();

    assert_eq!(device.device_id, DEVICE_ID);
    assert_eq!(device.display_label(), "Jet Bot Combo");
    assert!(device.is_robot_cleaner());
}

// ── Listing tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_follows_pagination() {
    let (server, client) = setup().await;

    let page_one = json!({
        "items": [{ "deviceId": "dev-1", "label": "First" }],
        "_links": { "next": { "href": format!("{}/devices?page=1", server.uri()) } }
    });
    let page_two = json!({
        "items": [{ "deviceId": "dev-2", "label": "Second" }]
    });

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(wiremock::matchers::query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_two))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_one))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].device_id, "dev-1");
    assert_eq!(devices[1].device_id, "dev-2");
}

#[tokio::test]
async fn test_list_robot_cleaners_filters_by_capability() {
    let (server, client) = setup().await;

    let payload = json!({
        "items": [
            {
                "deviceId": "bot-1",
                "label": "Jet Bot",
                "components": [{
                    "id": "main",
                    "capabilities": [{ "id": "samsungce.robotCleanerOperatingState" }]
                }]
            },
            {
                "deviceId": "bulb-1",
                "label": "Hallway Bulb",
                "components": [{
                    "id": "main",
                    "capabilities": [{ "id": "switchLevel" }]
                }]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let bots = client.list_robot_cleaners().await.unwrap();

    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].device_id, "bot-1");
}

// ── Command tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_commands_sends_envelope() {
    let (server, client) = setup().await;

    let expected_body = json!({
        "commands": [{
            "component": "main",
            "capability": "samsungce.robotCleanerCleaningType",
            "command": "setCleaningType",
            "arguments": ["vacuumAndMopTogether"]
        }]
    });

    Mock::given(method("POST"))
        .and(path(format!("/devices/{DEVICE_ID}/commands")))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let command = jetbot_api::CommandRequest::main(
        "samsungce.robotCleanerCleaningType",
        "setCleaningType",
    )
    .with_arguments(vec![json!("vacuumAndMopTogether")]);

    client.execute_commands(DEVICE_ID, &[command]).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_is_auth_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.device_status(DEVICE_ID).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("401"), "expected status in message, got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_is_auth_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let command = jetbot_api::CommandRequest::main("samsungce.robotCleanerOperatingState", "start");
    let result = client.execute_commands(DEVICE_ID, &[command]).await;

    assert!(
        result.as_ref().err().is_some_and(Error::is_auth_failure),
        "expected auth failure, got: {result:?}"
    );
}

#[tokio::test]
async fn test_api_error_envelope() {
    let (server, client) = setup().await;

    let envelope = json!({
        "requestId": "req-123",
        "error": {
            "code": "ConstraintViolationError",
            "message": "commands[0].command is not supported",
            "details": []
        }
    });

    Mock::given(method("POST"))
        .and(path(format!("/devices/{DEVICE_ID}/commands")))
        .respond_with(ResponseTemplate::new(422).set_body_json(&envelope))
        .mount(&server)
        .await;

    let command = jetbot_api::CommandRequest::main("samsungce.robotCleanerOperatingState", "hover");
    let result = client.execute_commands(DEVICE_ID, &[command]).await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref code,
        }) => {
            assert_eq!(status, 422);
            assert!(message.contains("not supported"), "got: {message}");
            assert_eq!(code.as_deref(), Some("ConstraintViolationError"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── OAuth tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_oauth_refresh_then_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "refresh_token": "rotated-refresh",
            "expires_in": 86400,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/devices/{DEVICE_ID}/status")))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "components": {} })))
        .expect(2)
        .mount(&server)
        .await;

    let token_url = Url::parse(&format!("{}/oauth/token", server.uri())).unwrap();
    let session = OauthSession::new(
        token_url,
        "client-id",
        SecretString::from("client-secret".to_owned()),
        SecretString::from("initial-refresh".to_owned()),
    );
    let client = SmartThingsClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Credential::OAuth(session),
    )
    .unwrap();

    // Two consecutive fetches reuse the cached access token: the token
    // endpoint's expect(1) verifies no second refresh round-trip.
    client.device_status(DEVICE_ID).await.unwrap();
    client.device_status(DEVICE_ID).await.unwrap();
}

#[tokio::test]
async fn test_oauth_refresh_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "refresh token revoked"
        })))
        .mount(&server)
        .await;

    let token_url = Url::parse(&format!("{}/oauth/token", server.uri())).unwrap();
    let session = OauthSession::new(
        token_url,
        "client-id",
        SecretString::from("client-secret".to_owned()),
        SecretString::from("revoked-refresh".to_owned()),
    );
    let client = SmartThingsClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Credential::OAuth(session),
    )
    .unwrap();

    let result = client.device_status(DEVICE_ID).await;

    assert!(
        matches!(result, Err(Error::TokenRefresh { .. })),
        "expected TokenRefresh error, got: {result:?}"
    );
}
