// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PushDeer sender: `GET <server>/message/push?pushkey=..&text=..&desp=..&type=..`.

use async_trait::async_trait;
use ninebot_config::model::PushDeerConfig;
use ninebot_core::{NinebotError, Notifier};
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::http;

const CHANNEL: &str = "PushDeer";

pub struct PushDeerNotifier {
    config: PushDeerConfig,
    client: reqwest::Client,
}

impl PushDeerNotifier {
    pub fn new(config: PushDeerConfig) -> Self {
        Self {
            config,
            client: http::build_client(CHANNEL),
        }
    }

    pub fn request_url(&self, key: &str, title: &str, message: &str) -> Result<Url, NinebotError> {
        let mut url = http::endpoint(CHANNEL, &self.config.url, &["message", "push"])?;
        url.query_pairs_mut()
            .append_pair("pushkey", key)
            .append_pair("text", title)
            .append_pair("desp", message)
            .append_pair("type", &self.config.msg_type);
        Ok(url)
    }

    async fn deliver(&self, key: &str, title: &str, message: &str) -> Result<(), NinebotError> {
        let url = self.request_url(key, title, message)?;
        debug!(channel = CHANNEL, url = %http::redact(&url, key), "sending notification");

        let body = http::send_json(CHANNEL, self.client.get(url)).await?;
        match body.get("code").and_then(|c| c.as_i64()) {
            Some(0) => Ok(()),
            _ => Err(NinebotError::notify(CHANNEL, body.to_string())),
        }
    }
}

#[async_trait]
impl Notifier for PushDeerNotifier {
    fn name(&self) -> &str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.config.key.is_some()
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        let Some(key) = self.config.key.as_deref() else {
            info!(channel = CHANNEL, "PUSHDEER_KEY not set, skipping");
            return false;
        };
        match self.deliver(key, title, message).await {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_defaults_to_markdown() {
        let notifier = PushDeerNotifier::new(PushDeerConfig::default());
        let url = notifier.request_url("PDU1", "t", "m").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api2.pushdeer.com/message/push?pushkey=PDU1&text=t&desp=m&type=markdown"
        );
    }
}
