// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! wiremock-backed stand-in for the Ninebot check-in gateway.
//!
//! Mocks are keyed by the `Authorization` header so several accounts can
//! share one server. wiremock gives precedence to the mock mounted first, so
//! a one-shot status mounted before a persistent one models "status changes
//! after check-in".

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PATH: &str = "/portal/api/user-sign/v2/status";
const SIGN_PATH: &str = "/portal/api/user-sign/v2/sign";

/// Successful status envelope. `None` omits `consecutiveDays` entirely.
pub fn status_body(current_sign_status: i64, consecutive_days: Option<i64>) -> Value {
    let mut data = json!({ "currentSignStatus": current_sign_status });
    if let Some(days) = consecutive_days {
        data["consecutiveDays"] = json!(days);
    }
    json!({ "code": 0, "msg": "success", "data": data })
}

pub struct FakeGateway {
    server: MockServer,
}

impl FakeGateway {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `api.base_url`.
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Every status query for `authorization` answers with this status.
    pub async fn status(&self, authorization: &str, sign_status: i64, days: Option<i64>) {
        self.status_mock(authorization)
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body(sign_status, days)))
            .mount(&self.server)
            .await;
    }

    /// The next status query for `authorization` answers with this status.
    pub async fn status_once(&self, authorization: &str, sign_status: i64, days: Option<i64>) {
        self.status_mock(authorization)
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body(sign_status, days)))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    /// Status queries answer with a logical failure.
    pub async fn status_rejected(&self, authorization: &str, code: i64, msg: &str) {
        self.status_mock(authorization)
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": code, "msg": msg })),
            )
            .mount(&self.server)
            .await;
    }

    /// Status queries answer with an HTTP error status.
    pub async fn status_http_error(&self, authorization: &str, status: u16) {
        self.status_mock(authorization)
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Check-in requests succeed.
    pub async fn sign_ok(&self, authorization: &str) {
        self.sign_mock(authorization)
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "msg": "success" })),
            )
            .mount(&self.server)
            .await;
    }

    /// Check-in requests answer with a logical failure.
    pub async fn sign_rejected(&self, authorization: &str, code: i64, msg: &str) {
        self.sign_mock(authorization)
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": code, "msg": msg })),
            )
            .mount(&self.server)
            .await;
    }

    /// Check-in requests answer with an HTTP error status.
    pub async fn sign_http_error(&self, authorization: &str, status: u16) {
        self.sign_mock(authorization)
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Check-in requests answer 200 with a body that has no result code or message.
    pub async fn sign_without_code(&self, authorization: &str) {
        self.sign_mock(authorization)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&self.server)
            .await;
    }

    /// Number of status queries received for `authorization`.
    pub async fn status_calls(&self, authorization: &str) -> usize {
        self.count(STATUS_PATH, authorization).await
    }

    /// Number of check-in requests received for `authorization`.
    pub async fn sign_calls(&self, authorization: &str) -> usize {
        self.count(SIGN_PATH, authorization).await
    }

    /// JSON bodies of the check-in requests received for `authorization`.
    pub async fn sign_bodies(&self, authorization: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == SIGN_PATH && has_authorization(r, authorization))
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }

    fn status_mock(&self, authorization: &str) -> wiremock::MockBuilder {
        Mock::given(method("GET"))
            .and(path(STATUS_PATH))
            .and(header("authorization", authorization))
    }

    fn sign_mock(&self, authorization: &str) -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path(SIGN_PATH))
            .and(header("authorization", authorization))
    }

    async fn count(&self, route: &str, authorization: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == route && has_authorization(r, authorization))
            .count()
    }
}

fn has_authorization(request: &wiremock::Request, authorization: &str) -> bool {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(authorization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_omits_missing_days() {
        let body = status_body(0, None);
        assert_eq!(body["code"], 0);
        assert!(body["data"].get("consecutiveDays").is_none());
    }

    #[tokio::test]
    async fn one_shot_status_takes_precedence_then_falls_through() {
        let gateway = FakeGateway::start().await;
        gateway.status_once("tok", 0, Some(2)).await;
        gateway.status("tok", 1, Some(3)).await;

        let client = reqwest::Client::new();
        let url = format!("{}{STATUS_PATH}", gateway.base_url());
        let first: Value = client
            .get(&url)
            .header("authorization", "tok")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let second: Value = client
            .get(&url)
            .header("authorization", "tok")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(first["data"]["consecutiveDays"], 2);
        assert_eq!(second["data"]["consecutiveDays"], 3);
        assert_eq!(gateway.status_calls("tok").await, 2);
        assert_eq!(gateway.sign_calls("tok").await, 0);
    }
}
