//! Integration tests for the PushbulletClient using mockito for HTTP mocking.

use mockito::{Matcher, Server};
use pushbullet_sms::domain::{PhoneFormat, PhoneNumber};
use pushbullet_sms::{ApiVariant, PushbulletClient, TransportError};
use serde_json::json;

fn ten_digit(values: &[&str]) -> Vec<PhoneNumber> {
    values
        .iter()
        .map(|v| PhoneNumber::parse(*v, PhoneFormat::TenDigit).unwrap())
        .collect()
}

fn client_for(server: &Server, variant: ApiVariant) -> PushbulletClient {
    PushbulletClient::with_base_url(
        server.url(),
        "test-api-key".to_string(),
        "device-1".to_string(),
        variant,
    )
}

#[test]
fn test_send_sms_create_text() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .match_header("authorization", "Basic test-api-key")
        .match_header("api-version", "2014-05-07")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "data": {
                "target_device_iden": "device-1",
                "addresses": ["5555555551", "5555555552"],
                "message": "meeting moved to 3pm"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"iden": "ujxPklLhvyKsjAvkMyTVh2"}"#)
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    let id = client
        .send_sms(
            &ten_digit(&["5555555551", "5555555552"]),
            "meeting moved to 3pm",
        )
        .unwrap();

    mock.assert();
    assert_eq!(id.as_str(), "ujxPklLhvyKsjAvkMyTVh2");
}

#[test]
fn test_send_sms_includes_request_guid() {
    let mut server = Server::new();

    // the guid is a 22-char hex idempotency token, fresh per request
    let mock = server
        .mock("POST", "/v3/create-text")
        .match_body(Matcher::Regex(r#""guid":"[0-9a-f]{22}""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"iden": "iden-1"}"#)
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    client.send_sms(&ten_digit(&["5555555551"]), "hi").unwrap();

    mock.assert();
}

#[test]
fn test_send_sms_texts_v2() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v2/texts")
        .match_header("access-token", "test-api-key")
        .match_body(Matcher::PartialJson(json!({
            "data": {
                "target_device_iden": "device-1",
                "addresses": ["+15555555551"],
                "message": "hi"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"iden": "iden-2"}"#)
        .create();

    let client = client_for(&server, ApiVariant::TextsV2);
    let number = PhoneNumber::parse("+15555555551", PhoneFormat::E164).unwrap();
    let id = client.send_sms(&[number], "hi").unwrap();

    mock.assert();
    assert_eq!(id.as_str(), "iden-2");
}

#[test]
fn test_send_sms_web_client() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .match_header("authorization", "Basic test-api-key")
        .match_header("x-user-agent", "Pushbullet Website 162")
        .match_header("origin", "https://www.pushbullet.com")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"iden": "iden-3"}"#)
        .create();

    let client = client_for(&server, ApiVariant::WebClient);
    let id = client.send_sms(&ten_digit(&["5555555551"]), "hi").unwrap();

    mock.assert();
    assert_eq!(id.as_str(), "iden-3");
}

#[test]
fn test_send_sms_unauthorized() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .with_status(401)
        .with_body(r#"{"error": {"message": "invalid access token"}}"#)
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    let result = client.send_sms(&ten_digit(&["5555555551"]), "hi");

    mock.assert();
    match result {
        Err(TransportError::Unauthorized) => {}
        other => panic!("Expected Unauthorized error, got: {:?}", other),
    }
}

#[test]
fn test_send_sms_server_error_captures_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    let result = client.send_sms(&ten_digit(&["5555555551"]), "hi");

    mock.assert();
    match result {
        Err(TransportError::ApiError { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[test]
fn test_send_sms_malformed_response() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    let result = client.send_sms(&ten_digit(&["5555555551"]), "hi");

    mock.assert();
    match result {
        Err(TransportError::JsonError(_)) => {}
        other => panic!("Expected JsonError, got: {:?}", other),
    }
}

#[test]
fn test_send_sms_empty_iden_rejected() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v3/create-text")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"iden": ""}"#)
        .create();

    let client = client_for(&server, ApiVariant::CreateText);
    let result = client.send_sms(&ten_digit(&["5555555551"]), "hi");

    mock.assert();
    assert!(result.is_err());
}
