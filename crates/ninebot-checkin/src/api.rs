// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway endpoints and the response envelope they share.

use ninebot_core::{CheckinStatus, NinebotError};
use serde::Deserialize;
use serde_json::Value;

pub const SIGN_PATH: &str = "/portal/api/user-sign/v2/sign";
pub const STATUS_PATH: &str = "/portal/api/user-sign/v2/status";

/// `{code, msg, data}` wrapper around every gateway response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Result code. Anything but the integer `0` is a rejection.
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn decode(body: Value) -> Result<Self, NinebotError> {
        serde_json::from_value(body).map_err(|e| NinebotError::Decode(e.to_string()))
    }

    pub fn is_ok(&self) -> bool {
        self.code.as_i64() == Some(0)
    }

    /// The `msg` field, or `fallback` when it is absent or blank.
    pub fn message_or(&self, fallback: &str) -> String {
        self.msg
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Reads `data` as a check-in status.
    pub fn status(self) -> Result<CheckinStatus, NinebotError> {
        let data = self
            .data
            .filter(Value::is_object)
            .ok_or_else(|| NinebotError::Decode("missing data object".into()))?;
        serde_json::from_value(data).map_err(|e| NinebotError::Decode(e.to_string()))
    }
}

/// Absolute endpoint URLs for one gateway base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn sign(&self) -> String {
        format!("{}{SIGN_PATH}", self.base)
    }

    /// Status URL with the `t` cache-buster set to `now_ms`.
    pub fn status(&self, now_ms: i64) -> String {
        format!("{}{STATUS_PATH}?t={now_ms}", self.base)
    }
}
