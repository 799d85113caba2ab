// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ServerChan (Server酱 Turbo) sender: `POST <server>/<sendkey>.send`.

use async_trait::async_trait;
use ninebot_config::model::ServerChanConfig;
use ninebot_core::{NinebotError, Notifier};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::http;

const CHANNEL: &str = "ServerChan";

pub struct ServerChanNotifier {
    config: ServerChanConfig,
    client: reqwest::Client,
}

impl ServerChanNotifier {
    pub fn new(config: ServerChanConfig) -> Self {
        Self {
            config,
            client: http::build_client(CHANNEL),
        }
    }

    async fn deliver(&self, sendkey: &str, title: &str, message: &str) -> Result<(), NinebotError> {
        let segment = format!("{sendkey}.send");
        let url = http::endpoint(CHANNEL, &self.config.url, &[segment.as_str()])?;
        debug!(channel = CHANNEL, url = %http::redact(&url, sendkey), "sending notification");

        let request = self
            .client
            .post(url)
            .json(&json!({ "title": title, "desp": message }));
        let body = http::send_json(CHANNEL, request).await?;
        match body.get("code").and_then(|c| c.as_i64()) {
            Some(0) => Ok(()),
            _ => Err(NinebotError::notify(CHANNEL, body.to_string())),
        }
    }
}

#[async_trait]
impl Notifier for ServerChanNotifier {
    fn name(&self) -> &str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.config.sendkey.is_some()
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        let Some(sendkey) = self.config.sendkey.as_deref() else {
            info!(channel = CHANNEL, "SERVERCHAN_SENDKEY not set, skipping");
            return false;
        };
        match self.deliver(sendkey, title, message).await {
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
