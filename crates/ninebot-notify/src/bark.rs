// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bark push (iOS) sender.
//!
//! Title and message travel as path segments:
//! `GET <server>/<key>/<title>/<message>?group=..&icon=..&sound=..&url=..&copy=..&autoCopy=1`.

use std::sync::LazyLock;

use async_trait::async_trait;
use ninebot_config::model::BarkConfig;
use ninebot_core::{NinebotError, Notifier};
use regex::Regex;
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::http;

const CHANNEL: &str = "Bark";

static STREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"连续签到天数: (\d+)天").expect("valid streak pattern"));

pub struct BarkNotifier {
    config: BarkConfig,
    client: reqwest::Client,
}

impl BarkNotifier {
    pub fn new(config: BarkConfig) -> Self {
        Self {
            config,
            client: http::build_client(CHANNEL),
        }
    }

    fn key(&self) -> Option<&str> {
        self.config.key.as_deref()
    }

    /// Full request URL for one message.
    pub fn request_url(&self, title: &str, message: &str) -> Result<Url, NinebotError> {
        let key = self
            .key()
            .ok_or_else(|| NinebotError::notify(CHANNEL, "BARK_KEY not set"))?;
        let mut url = http::endpoint(CHANNEL, &self.config.url, &[key, title, message])?;

        let copy = self
            .config
            .copy
            .as_deref()
            .map(|template| copy_text(template, message));
        let params = [
            ("group", self.config.group.as_deref()),
            ("icon", self.config.icon.as_deref()),
            ("sound", self.config.sound.as_deref()),
            ("url", self.config.url_jump.as_deref()),
            ("copy", copy.as_deref()),
            ("autoCopy", self.config.auto_copy_enabled().then_some("1")),
        ];
        if params.iter().any(|(_, v)| v.is_some()) {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
        }
        Ok(url)
    }

    async fn deliver(&self, title: &str, message: &str) -> Result<(), NinebotError> {
        let url = self.request_url(title, message)?;
        debug!(
            channel = CHANNEL,
            url = %http::redact(&url, self.key().unwrap_or_default()),
            "sending notification"
        );

        let body = http::send_json(CHANNEL, self.client.get(url)).await?;
        match body.get("code").and_then(|c| c.as_i64()) {
            Some(200) => Ok(()),
            _ => Err(NinebotError::notify(CHANNEL, body.to_string())),
        }
    }
}

/// Replaces the first `%day%` with the streak length found in `message`, or `未知`.
pub fn copy_text(template: &str, message: &str) -> String {
    let day = STREAK
        .captures(message)
        .and_then(|c| c.get(1))
        .map_or("未知", |m| m.as_str());
    template.replacen("%day%", day, 1)
}

#[async_trait]
impl Notifier for BarkNotifier {
    fn name(&self) -> &str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.key().is_some()
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        if !self.is_configured() {
            info!(channel = CHANNEL, "BARK_KEY not set, skipping");
            return false;
        }
        match self.deliver(title, message).await {
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

    fn config(key: Option<&str>) -> BarkConfig {
        BarkConfig {
            key: key.map(str::to_string),
            ..BarkConfig::default()
        }
    }

    #[test]
    fn copy_text_substitutes_streak() {
        assert_eq!(
            copy_text("已连续签到%day%天", "✅ A\n连续签到天数: 12天\n  今日签到状态: 已签到🎉"),
            "已连续签到12天"
        );
    }

    #[test]
    fn copy_text_without_streak_uses_placeholder() {
        assert_eq!(copy_text("第%day%天", "❌ A\n验证结果: 验证失败"), "第未知天");
    }

    #[test]
    fn copy_text_substitutes_first_placeholder_only() {
        assert_eq!(
            copy_text("%day%天 / %day%", "连续签到天数: 3天"),
            "3天 / %day%"
        );
    }

    #[test]
    fn url_without_options_has_no_query() {
        let notifier = BarkNotifier::new(config(Some("k")));
        let url = notifier.request_url("t", "m").unwrap();
        assert_eq!(url.as_str(), "https://api.day.app/k/t/m");
    }

    #[test]
    fn query_params_follow_fixed_order() {
        let notifier = BarkNotifier::new(BarkConfig {
            key: Some("k".into()),
            group: Some("ninebot".into()),
            icon: Some("https://icon.example/i.png".into()),
            sound: Some("bell".into()),
            url_jump: Some("https://jump.example".into()),
            copy: Some("%day%".into()),
            auto_copy: Some("1".into()),
            ..BarkConfig::default()
        });
        let url = notifier
            .request_url("标题", "连续签到天数: 3天")
            .unwrap();

        let names: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(names, ["group", "icon", "sound", "url", "copy", "autoCopy"]);
        let copy = url.query_pairs().find(|(k, _)| k == "copy").unwrap().1;
        assert_eq!(copy, "3");
    }

    #[test]
    fn unconfigured_without_key() {
        assert!(!BarkNotifier::new(config(None)).is_configured());
        assert!(BarkNotifier::new(config(Some("k"))).is_configured());
    }
}
