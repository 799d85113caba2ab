// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CheckinConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const PUSHDEER_TYPES: &[&str] = &["markdown", "text", "image"];

/// Validates a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &CheckinConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let urls = [
        ("api.base_url", &config.api.base_url),
        ("bark.url", &config.bark.url),
        ("serverchan.url", &config.serverchan.url),
        ("pushover.url", &config.pushover.url),
        ("pushdeer.url", &config.pushdeer.url),
    ];
    for (key, url) in urls {
        if !is_http_url(url) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must be an http(s) URL with a host"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log_level `{}` must be one of {}",
                config.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !PUSHDEER_TYPES.contains(&config.pushdeer.msg_type.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "pushdeer.msg_type `{}` must be one of {}",
                config.pushdeer.msg_type,
                PUSHDEER_TYPES.join(", ")
            ),
        });
    }

    let mut seen = HashSet::new();
    for name in config.accounts.iter().filter_map(|a| a.name.as_deref()) {
        if !seen.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate account name `{name}` in [[accounts]]"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountConfig;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&CheckinConfig::default()).is_ok());
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = CheckinConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("api.base_url"))
        ));
    }

    #[test]
    fn url_without_host_fails() {
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("https://?q=1"));
        assert!(is_http_url("http://127.0.0.1:8080"));
        assert!(is_http_url("https://api.day.app/"));
    }

    #[test]
    fn malformed_url_fails() {
        assert!(!is_http_url("https://[gateway"));
        assert!(!is_http_url("https://bad host"));
        assert!(!is_http_url("https://example.com:99999"));

        let mut config = CheckinConfig::default();
        config.api.base_url = "https://[gateway".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = CheckinConfig::default();
        config.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_pushdeer_type_fails() {
        let mut config = CheckinConfig::default();
        config.pushdeer.msg_type = "html".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("pushdeer.msg_type"))
        ));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = CheckinConfig::default();
        config.bark.url = "day.app".to_string();
        config.log_level = "loud".to_string();
        config.pushdeer.msg_type = "html".to_string();
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }

    #[test]
    fn duplicate_account_names_fail() {
        let account = |name: &str| AccountConfig {
            name: Some(name.to_string()),
            device_id: Some("d".to_string()),
            authorization: Some("a".to_string()),
        };
        let mut config = CheckinConfig::default();
        config.accounts = vec![account("main"), account("main")];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate account name"))
        ));
    }
}
