// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `~/.config/ninebot/ninebot.toml` (user XDG config)
//! 3. `./ninebot.toml`, or the file given with `--config`
//! 4. Environment variables (`NINEBOT_*`, `BARK_*`, `SERVERCHAN_*`,
//!    `PUSHOVER_*`, `PUSHDEER_*`)
//!
//! `NINEBOT_ACCOUNTS` is not merged here: it carries JSON and is kept raw
//! until [`CheckinConfig::resolve_accounts`] parses it.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};

use crate::accounts::ACCOUNTS_ENV;
use crate::model::CheckinConfig;

/// Local config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ninebot.toml";

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ninebot").join(CONFIG_FILE_NAME))
}

/// Builds the Figment before extraction.
///
/// With `explicit` set, that file replaces `./ninebot.toml`.
pub fn build_figment(explicit: Option<&Path>) -> Figment {
    let local = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    Figment::new()
        .merge(Serialized::defaults(CheckinConfig::default()))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(local))
        .merge(env_providers())
}

/// Loads configuration from files and the environment.
pub fn load_config(explicit: Option<&Path>) -> Result<CheckinConfig, figment::Error> {
    let mut config: CheckinConfig = build_figment(explicit).extract()?;
    config.accounts_json = env_value(ACCOUNTS_ENV);
    Ok(config)
}

/// Loads configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<CheckinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CheckinConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Environment variables and the config key each one sets.
///
/// The list is explicit so unrelated variables such as `BARK_HOME` never trip
/// `deny_unknown_fields`, and because keys contain underscores
/// (`BARK_URL_JUMP` -> `bark.url_jump`).
const ENV_KEYS: &[(&str, &str)] = &[
    ("NINEBOT_DEVICE_ID", "account.device_id"),
    ("NINEBOT_AUTHORIZATION", "account.authorization"),
    ("NINEBOT_NAME", "account.name"),
    ("NINEBOT_LOG_LEVEL", "log_level"),
    ("NINEBOT_API_BASE_URL", "api.base_url"),
    ("BARK_URL", "bark.url"),
    ("BARK_KEY", "bark.key"),
    ("BARK_GROUP", "bark.group"),
    ("BARK_ICON", "bark.icon"),
    ("BARK_SOUND", "bark.sound"),
    ("BARK_URL_JUMP", "bark.url_jump"),
    ("BARK_COPY", "bark.copy"),
    ("BARK_AUTO_COPY", "bark.auto_copy"),
    ("SERVERCHAN_SENDKEY", "serverchan.sendkey"),
    ("SERVERCHAN_URL", "serverchan.url"),
    ("PUSHOVER_TOKEN", "pushover.token"),
    ("PUSHOVER_USER", "pushover.user"),
    ("PUSHOVER_URL", "pushover.url"),
    ("PUSHDEER_KEY", "pushdeer.key"),
    ("PUSHDEER_URL", "pushdeer.url"),
    ("PUSHDEER_TYPE", "pushdeer.msg_type"),
];

/// Reads a variable verbatim. Blank values count as unset.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Environment overrides for every section, merged in one Figment.
///
/// Values are merged as plain strings. Figment's `Env` provider would parse
/// `NINEBOT_DEVICE_ID=00123` as the integer 123.
fn env_providers() -> Figment {
    ENV_KEYS
        .iter()
        .filter_map(|(name, key)| env_value(name).map(|value| (*key, value)))
        .fold(Figment::new(), |figment, (key, value)| {
            figment.merge(Serialized::default(key, value))
        })
}
