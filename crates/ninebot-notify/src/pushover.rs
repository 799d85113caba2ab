// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pushover sender: `POST <server>/1/messages.json`.

use async_trait::async_trait;
use ninebot_config::model::PushoverConfig;
use ninebot_core::{NinebotError, Notifier};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::http;

const CHANNEL: &str = "Pushover";

#[derive(Debug, Serialize)]
struct PushoverMessage<'a> {
    token: &'a str,
    user: &'a str,
    title: &'a str,
    message: &'a str,
    priority: i8,
    sound: &'a str,
    timestamp: i64,
}

pub struct PushoverNotifier {
    config: PushoverConfig,
    client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(config: PushoverConfig) -> Self {
        Self {
            config,
            client: http::build_client(CHANNEL),
        }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.config.token.as_deref()?, self.config.user.as_deref()?))
    }

    async fn deliver(
        &self,
        (token, user): (&str, &str),
        title: &str,
        message: &str,
    ) -> Result<(), NinebotError> {
        let url = http::endpoint(CHANNEL, &self.config.url, &["1", "messages.json"])?;
        debug!(channel = CHANNEL, %url, "sending notification");

        let payload = PushoverMessage {
            token,
            user,
            title,
            message,
            priority: 0,
            sound: "pushover",
            timestamp: chrono::Utc::now().timestamp(),
        };
        let body = http::send_json(CHANNEL, self.client.post(url).json(&payload)).await?;
        match body.get("status").and_then(|s| s.as_i64()) {
            Some(1) => Ok(()),
            _ => Err(NinebotError::notify(CHANNEL, body.to_string())),
        }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        let Some(credentials) = self.credentials() else {
            info!(channel = CHANNEL, "PUSHOVER_TOKEN or PUSHOVER_USER not set, skipping");
            return false;
        };
        match self.deliver(credentials, title, message).await {
            Ok(()) => {
                info!(channel = CHANNEL, "notification sent");
                true
            }
            Err(e) => {
                warn!(channel = CHANNEL, error = %e, "notification failed");
                false
            }
        }
    }
}
