// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of configured accounts into [`ninebot_core::Account`] values.
//!
//! Precedence: `NINEBOT_ACCOUNTS` JSON, then `[[accounts]]` from TOML, then the
//! single-account form. Multi-account entries without a name become `账号N`;
//! the single account defaults to `默认账号`.

use ninebot_core::Account;
use serde::Deserialize;

use crate::diagnostic::ConfigError;
use crate::model::{AccountConfig, CheckinConfig};

/// Environment variable holding the multi-account JSON array.
pub const ACCOUNTS_ENV: &str = "NINEBOT_ACCOUNTS";

const SINGLE_ACCOUNT_NAME: &str = "默认账号";

/// Shape of one element of `NINEBOT_ACCOUNTS`. Extra fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonAccount {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    device_id: Option<String>,
    #[serde(default)]
    authorization: Option<String>,
}

impl From<JsonAccount> for AccountConfig {
    fn from(raw: JsonAccount) -> Self {
        Self {
            name: raw.name,
            device_id: raw.device_id,
            authorization: raw.authorization,
        }
    }
}

/// Parses the `NINEBOT_ACCOUNTS` JSON array.
pub fn parse_accounts_json(raw: &str) -> Result<Vec<AccountConfig>, ConfigError> {
    serde_json::from_str::<Vec<JsonAccount>>(raw)
        .map(|accounts| accounts.into_iter().map(AccountConfig::from).collect())
        .map_err(|e| ConfigError::AccountsJson {
            message: e.to_string(),
        })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl CheckinConfig {
    /// Builds the list of accounts to check in, in configuration order.
    ///
    /// Entries of the multi-account form are returned even when they lack a
    /// device id or token; the session rejects them individually so one bad
    /// entry does not hide the others.
    pub fn resolve_accounts(&self) -> Result<Vec<Account>, ConfigError> {
        let multi = match self.accounts_json.as_deref() {
            Some(raw) => parse_accounts_json(raw)?,
            None => self.accounts.clone(),
        };

        if !multi.is_empty() {
            return Ok(multi
                .iter()
                .enumerate()
                .map(|(index, acc)| {
                    let name = non_empty(&acc.name)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("账号{}", index + 1));
                    Account::new(
                        name,
                        acc.device_id.clone().unwrap_or_default(),
                        acc.authorization.clone().unwrap_or_default(),
                    )
                })
                .collect());
        }

        match (
            non_empty(&self.account.device_id),
            non_empty(&self.account.authorization),
        ) {
            (Some(device_id), Some(authorization)) => Ok(vec![Account::new(
                non_empty(&self.account.name).unwrap_or(SINGLE_ACCOUNT_NAME),
                device_id,
                authorization,
            )]),
            _ => Err(ConfigError::NoAccounts),
        }
    }
}
