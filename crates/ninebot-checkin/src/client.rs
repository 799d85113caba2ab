// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ninebot check-in gateway.
//!
//! Provides [`GatewayClient`], which sends every request with the same
//! app-impersonation header set and retries transport-level failures on a
//! fixed schedule. A response that arrives with a 2xx status is returned as
//! parsed JSON even when its body encodes a logical failure.

use std::time::Duration;

use ninebot_core::NinebotError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_1 like Mac OS X) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 Segway v6 C 609033420";
const H5_ORIGIN: &str = "https://h5-bj.ninebot.com";
const H5_REFERER: &str = "https://h5-bj.ninebot.com/";

/// Attempt budget, pause between attempts, and per-attempt timeout.
///
/// There is no backoff growth and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(2000),
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// HTTP client bound to one account's credentials.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    policy: RetryPolicy,
    account: String,
}

impl GatewayClient {
    /// Creates a client whose every request carries `authorization`.
    ///
    /// `account` is used only to label log lines.
    pub fn new(account: &str, authorization: &SecretString) -> Result<Self, NinebotError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(authorization)?)
            .build()
            .map_err(|e| NinebotError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            policy: RetryPolicy::default(),
            account: account.to_string(),
        })
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends one logical request, retrying failed attempts.
    ///
    /// Returns the last attempt's error once the budget is spent.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, NinebotError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!(
                account = %self.account,
                attempt,
                max_attempts,
                %method,
                url,
                "sending gateway request"
            );

            match self.attempt(method.clone(), url, body).await {
                Ok(value) => {
                    debug!(account = %self.account, attempt, url, "gateway request succeeded");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(
                        account = %self.account,
                        attempt,
                        max_attempts,
                        url,
                        error = %err,
                        "gateway request failed"
                    );
                    if attempt >= max_attempts {
                        return Err(err);
                    }
                }
            }

            attempt += 1;
            tokio::time::sleep(self.policy.retry_delay).await;
        }
    }

    async fn attempt(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, NinebotError> {
        let mut request = self
            .client
            .request(method, url)
            .timeout(self.policy.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, self.policy.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NinebotError::Request {
                message: status_message(status, &text),
                source: None,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| transport_error(e, self.policy.timeout))
    }
}

fn default_headers(authorization: &SecretString) -> Result<HeaderMap, NinebotError> {
    let mut auth = HeaderValue::from_str(authorization.expose_secret()).map_err(|_| {
        NinebotError::Config("authorization is not a valid HTTP header value".into())
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::AUTHORIZATION, auth);
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh-Hans;q=0.9"),
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(reqwest::header::ORIGIN, HeaderValue::from_static(H5_ORIGIN));
    headers.insert(reqwest::header::REFERER, HeaderValue::from_static(H5_REFERER));
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        HeaderName::from_static("from_platform_1"),
        HeaderValue::from_static("1"),
    );
    headers.insert(HeaderName::from_static("language"), HeaderValue::from_static("zh"));
    Ok(headers)
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> NinebotError {
    let message = if err.is_timeout() {
        format!("timeout of {}ms exceeded", timeout.as_millis())
    } else {
        err.to_string()
    };
    NinebotError::Request {
        message,
        source: Some(Box::new(err)),
    }
}

/// `状态码: <code>, 信息: <msg>`, preferring the body's `msg` field.
fn status_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "Request failed with status code {}",
                status.as_u16()
            )
        });
    format!("状态码: {}, 信息: {detail}", status.as_u16())
}
