// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration errors and the figment-to-miette bridge.
//!
//! Figment extraction errors become [`ConfigError`] diagnostics that point at
//! the offending key in `ninebot.toml` when possible, and suggest the closest
//! valid key for typos.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic information for miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in a TOML file.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(ninebot::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted in the same section.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value has the wrong type.
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(ninebot::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A semantic check failed after deserialization.
    #[error("validation error: {message}")]
    #[diagnostic(code(ninebot::config::validation))]
    Validation { message: String },

    /// Neither the multi-account nor the single-account form is configured.
    #[error("未配置任何账号信息")]
    #[diagnostic(
        code(ninebot::config::no_accounts),
        help("set NINEBOT_ACCOUNTS, or both NINEBOT_DEVICE_ID and NINEBOT_AUTHORIZATION")
    )]
    NoAccounts,

    /// `NINEBOT_ACCOUNTS` is not a JSON array of account objects.
    #[error("NINEBOT_ACCOUNTS 格式错误: {message}")]
    #[diagnostic(
        code(ninebot::config::accounts_json),
        help("expected a JSON array of objects with `deviceId`, `authorization` and an optional `name`")
    )]
    AccountsJson { message: String },

    /// Anything figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(ninebot::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Converts every error inside a `figment::Error` into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` pairs of the files that were merged,
/// used to attach a source span to unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let key = error.path.join(".");
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let valid: Vec<&str> = expected.to_vec();
                    let (span, src) = locate_in_sources(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, &valid),
                        valid_keys: valid.join(", "),
                        span,
                        src,
                    }
                }
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}"),
                    expected: expected.to_string(),
                },
                Kind::MissingField(field) => ConfigError::Validation {
                    message: format!("missing required key `{field}`"),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn locate_in_sources(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(path)) = error.metadata.as_ref().and_then(|m| m.source.as_ref())
    else {
        return (None, None);
    };
    let path = path.display().to_string();

    let Some((name, content)) = toml_sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    let section = error.path.first().map(String::as_str);
    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` in TOML `content`, searched after the `[section]` or
/// `[[section]]` header when one is given.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let start = match section {
        None => 0,
        Some(section) => {
            let table = format!("[{section}]");
            let array = format!("[[{section}]]");
            content
                .find(&array)
                .map(|pos| pos + array.len())
                .or_else(|| content.find(&table).map(|pos| pos + table.len()))?
        }
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Best Jaro-Winkler match for `unknown` among `valid_keys`, if close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Renders errors to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_sendkey_for_typo() {
        let valid = &["url", "sendkey"];
        assert_eq!(suggest_key("sendkye", valid), Some("sendkey".to_string()));
    }

    #[test]
    fn suggests_device_id_for_typo() {
        let valid = &["name", "device_id", "authorization"];
        assert_eq!(
            suggest_key("devce_id", valid),
            Some("device_id".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["url", "key", "group"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_in_table_section() {
        let content = "[bark]\nkee = \"x\"\n";
        let offset = find_key_offset(content, Some("bark"), "kee").unwrap();
        assert_eq!(&content[offset..offset + 3], "kee");
    }

    #[test]
    fn finds_key_in_array_of_tables() {
        let content = "log_level = \"info\"\n\n[[accounts]]\n  devce_id = \"x\"\n";
        let offset = find_key_offset(content, Some("accounts"), "devce_id").unwrap();
        assert_eq!(&content[offset..offset + 8], "devce_id");
    }

    #[test]
    fn key_prefix_does_not_match_longer_key() {
        let content = "[bark]\nurl_jump = \"x\"\n";
        assert_eq!(find_key_offset(content, Some("bark"), "url"), None);
    }
}
