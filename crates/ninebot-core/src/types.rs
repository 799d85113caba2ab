// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the check-in session, the runner and the notifiers.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Credentials identifying one end-user session on the Ninebot gateway.
///
/// The authorization token is kept behind [`SecretString`] so it never shows up
/// in `Debug` output or logs.
#[derive(Debug)]
pub struct Account {
    pub name: String,
    pub device_id: String,
    pub authorization: SecretString,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        device_id: impl Into<String>,
        authorization: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            authorization: SecretString::from(authorization.into()),
        }
    }
}

/// Today's check-in state as reported by the status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinStatus {
    /// `1` once today's check-in is done, `0` otherwise.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_sign_status: i64,

    /// Length of the current check-in streak. Missing or `null` reads as zero.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub consecutive_days: i64,
}

impl CheckinStatus {
    /// Returns true when today's check-in has already been recorded remotely.
    pub fn is_checked_in(&self) -> bool {
        self.current_sign_status == 1
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured result of one check-in run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Check-in performed during this run.
    Success,
    /// Today's check-in had already been done; nothing was sent.
    AlreadyDone,
    /// The run did not end in a checked-in state.
    Failed(String),
}

impl CheckinOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CheckinOutcome::Failed(_))
    }
}

/// Snapshot of a finished session, consumed by the report builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub name: String,
    pub outcome: CheckinOutcome,
    pub logs: String,
}

impl SessionResult {
    /// A result for an account whose session could not even be set up.
    pub fn init_failed(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let reason = reason.to_string();
        Self {
            name: name.into(),
            logs: format!("初始化失败: {reason}"),
            outcome: CheckinOutcome::Failed(reason),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }
}
