//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// Envelope-wrapped success response.
pub fn envelope_ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

/// Envelope-wrapped failure response.
pub fn envelope_fail(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": message }))
}

pub fn sample_user(email: &str) -> Value {
    json!({
        "_id": "1",
        "email": email,
        "role": "attendee",
        "profile": {
            "name": "Ana Lima",
            "company": "Acme",
            "position": "Dev",
            "phone": "+55 11 99999-0000",
            "cpf": "123.456.789-09"
        }
    })
}

/// Successful login response carrying user + token.
pub fn login_ok(email: &str, token: &str) -> ResponseTemplate {
    envelope_ok(json!({ "user": sample_user(email), "token": token }))
}

/// Seeds a stored credential into the given LANYARD_HOME.
pub fn seed_credentials(home: &Path, email: &str, token: &str) {
    std::fs::create_dir_all(home).unwrap();
    let contents = json!({ "token": token, "user": sample_user(email) });
    std::fs::write(
        home.join("credentials.json"),
        serde_json::to_string_pretty(&contents).unwrap(),
    )
    .unwrap();
}

/// A `lanyard` command isolated to a temp home and pointed at a mock API.
pub fn lanyard(home: &Path, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("lanyard").unwrap();
    cmd.env("LANYARD_HOME", home).env("LANYARD_API_URL", api_url);
    cmd
}
