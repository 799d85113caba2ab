// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP plumbing shared by the push senders.

use std::time::Duration;

use ninebot_core::NinebotError;
use reqwest::Url;
use serde_json::Value;

/// Per-request timeout for every push service.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

pub fn build_client(channel: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(SEND_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(channel, error = %e, "falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Parses `base` and appends `segments` as percent-encoded path segments.
pub fn endpoint(channel: &str, base: &str, segments: &[&str]) -> Result<Url, NinebotError> {
    let mut url = Url::parse(base)
        .map_err(|e| NinebotError::notify(channel, format!("invalid server URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| NinebotError::notify(channel, "server URL cannot have a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends `request` and reads the response body as JSON, whatever the status.
pub async fn send_json(
    channel: &str,
    request: reqwest::RequestBuilder,
) -> Result<Value, NinebotError> {
    let response = request
        .send()
        .await
        .map_err(|e| NinebotError::notify(channel, e.to_string()))?;
    let status = response.status();
    response.json::<Value>().await.map_err(|e| {
        NinebotError::notify(channel, format!("unreadable response (HTTP {status}): {e}"))
    })
}

/// `url` as a string with every occurrence of `secret` masked.
pub fn redact(url: &Url, secret: &str) -> String {
    let rendered = url.to_string();
    if secret.is_empty() {
        return rendered;
    }
    rendered.replace(secret, "***")
}
