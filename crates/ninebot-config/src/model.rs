// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for ninebot-checkin.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Optional fields go through [`crate::de::opt_string`]
//! so that numeric TOML values are still read as strings. Blank values of
//! defaulted fields fall back to the default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::de::{opt_string, string_or};

/// Top-level configuration, assembled once at startup.
///
/// Loaded from defaults, an optional TOML file, `.env` and the process
/// environment. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CheckinConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level", deserialize_with = "log_level_or_default")]
    pub log_level: String,

    /// Ninebot gateway settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Multi-account form (`[[accounts]]`).
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Single-account form (`[account]` / `NINEBOT_DEVICE_ID` and friends).
    #[serde(default)]
    pub account: AccountConfig,

    /// Bark push settings.
    #[serde(default)]
    pub bark: BarkConfig,

    /// ServerChan push settings.
    #[serde(default)]
    pub serverchan: ServerChanConfig,

    /// Pushover push settings.
    #[serde(default)]
    pub pushover: PushoverConfig,

    /// PushDeer push settings.
    #[serde(default)]
    pub pushdeer: PushDeerConfig,

    /// Raw value of `NINEBOT_ACCOUNTS`, parsed lazily by
    /// [`CheckinConfig::resolve_accounts`](crate::accounts).
    #[serde(skip)]
    pub accounts_json: Option<String>,
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            accounts: Vec::new(),
            account: AccountConfig::default(),
            bark: BarkConfig::default(),
            serverchan: ServerChanConfig::default(),
            pushover: PushoverConfig::default(),
            pushdeer: PushDeerConfig::default(),
            accounts_json: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn log_level_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_log_level)
}

/// Ninebot gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme and host of the check-in gateway.
    #[serde(default = "default_api_base_url", deserialize_with = "api_base_url_or_default")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://cn-cbu-gateway.ninebot.com".to_string()
}

fn api_base_url_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_api_base_url)
}

/// One account entry. Missing fields are resolved later; see `accounts.rs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Display name used in logs and the notification body.
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,

    /// Device identifier sent with the check-in request.
    #[serde(default, alias = "deviceId", deserialize_with = "opt_string")]
    pub device_id: Option<String>,

    /// Value of the `Authorization` header captured from the app.
    #[serde(default, deserialize_with = "opt_string")]
    pub authorization: Option<String>,
}

/// Bark configuration. `key` unset disables the channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BarkConfig {
    /// Bark server root.
    #[serde(default = "default_bark_url", deserialize_with = "bark_url_or_default")]
    pub url: String,

    #[serde(default, deserialize_with = "opt_string")]
    pub key: Option<String>,

    /// Notification group.
    #[serde(default, deserialize_with = "opt_string")]
    pub group: Option<String>,

    /// Notification icon URL.
    #[serde(default, deserialize_with = "opt_string")]
    pub icon: Option<String>,

    /// Notification sound name.
    #[serde(default, deserialize_with = "opt_string")]
    pub sound: Option<String>,

    /// URL opened when the notification is tapped.
    #[serde(default, deserialize_with = "opt_string")]
    pub url_jump: Option<String>,

    /// Copyable text. `%day%` is replaced with the streak length.
    #[serde(default, deserialize_with = "opt_string")]
    pub copy: Option<String>,

    /// `1` copies the text automatically.
    #[serde(default, deserialize_with = "opt_string")]
    pub auto_copy: Option<String>,
}

impl Default for BarkConfig {
    fn default() -> Self {
        Self {
            url: default_bark_url(),
            key: None,
            group: None,
            icon: None,
            sound: None,
            url_jump: None,
            copy: None,
            auto_copy: None,
        }
    }
}

impl BarkConfig {
    pub fn auto_copy_enabled(&self) -> bool {
        matches!(self.auto_copy.as_deref(), Some("1") | Some("true"))
    }
}

fn default_bark_url() -> String {
    "https://api.day.app".to_string()
}

fn bark_url_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_bark_url)
}

/// ServerChan configuration. `sendkey` unset disables the channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerChanConfig {
    #[serde(default = "default_serverchan_url", deserialize_with = "serverchan_url_or_default")]
    pub url: String,

    #[serde(default, deserialize_with = "opt_string")]
    pub sendkey: Option<String>,
}

impl Default for ServerChanConfig {
    fn default() -> Self {
        Self {
            url: default_serverchan_url(),
            sendkey: None,
        }
    }
}

fn default_serverchan_url() -> String {
    "https://sctapi.ftqq.com".to_string()
}

fn serverchan_url_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_serverchan_url)
}

/// Pushover configuration. Both `token` and `user` are required.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PushoverConfig {
    #[serde(default = "default_pushover_url", deserialize_with = "pushover_url_or_default")]
    pub url: String,

    /// Application API token.
    #[serde(default, deserialize_with = "opt_string")]
    pub token: Option<String>,

    /// User or group key.
    #[serde(default, deserialize_with = "opt_string")]
    pub user: Option<String>,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            url: default_pushover_url(),
            token: None,
            user: None,
        }
    }
}

fn default_pushover_url() -> String {
    "https://api.pushover.net".to_string()
}

fn pushover_url_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_pushover_url)
}

/// PushDeer configuration. `key` unset disables the channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PushDeerConfig {
    /// PushDeer server root (self-hosted servers are supported).
    #[serde(default = "default_pushdeer_url", deserialize_with = "pushdeer_url_or_default")]
    pub url: String,

    #[serde(default, deserialize_with = "opt_string")]
    pub key: Option<String>,

    /// Message format: `markdown`, `text` or `image`.
    #[serde(default = "default_pushdeer_type", deserialize_with = "pushdeer_type_or_default")]
    pub msg_type: String,
}

impl Default for PushDeerConfig {
    fn default() -> Self {
        Self {
            url: default_pushdeer_url(),
            key: None,
            msg_type: default_pushdeer_type(),
        }
    }
}

fn default_pushdeer_url() -> String {
    "https://api2.pushdeer.com".to_string()
}

fn pushdeer_url_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_pushdeer_url)
}

fn default_pushdeer_type() -> String {
    "markdown".to_string()
}

fn pushdeer_type_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or(deserializer, default_pushdeer_type)
}
