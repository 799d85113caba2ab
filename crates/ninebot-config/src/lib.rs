// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for ninebot-checkin.
//!
//! Everything the program reads from its environment is assembled once into a
//! [`CheckinConfig`] and passed explicitly to the runner and the notifiers.
//! Sources are layered with Figment (defaults, TOML files, `.env`, process
//! environment), checked with `deny_unknown_fields`, validated, and reported
//! through miette diagnostics.
//!
//! # Usage
//!
//! ```no_run
//! use ninebot_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! let accounts = config.resolve_accounts().expect("no accounts");
//! println!("{} account(s)", accounts.len());
//! ```

pub mod accounts;
pub mod de;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use accounts::{ACCOUNTS_ENV, parse_accounts_json};
pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_str};
pub use model::CheckinConfig;

/// Loads `.env`, then configuration from files and the environment, and validates it.
///
/// `explicit` replaces `./ninebot.toml` when given (the `--config` flag).
pub fn load_and_validate(explicit: Option<&Path>) -> Result<CheckinConfig, Vec<ConfigError>> {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    match loader::load_config(explicit) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = collect_toml_sources(explicit);
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Loads configuration from a TOML string and validates it.
pub fn load_and_validate_str(toml_content: &str) -> Result<CheckinConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Reads the TOML files that may have been merged, for error spans.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let local = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .map(|d| d.join(loader::CONFIG_FILE_NAME))
            .unwrap_or_else(|_| loader::CONFIG_FILE_NAME.into()),
    };

    [Some(local), loader::user_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
