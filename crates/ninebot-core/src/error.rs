// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for ninebot-checkin.

use thiserror::Error;

/// The primary error type shared by the gateway client, check-in sessions and notifiers.
#[derive(Debug, Error)]
pub enum NinebotError {
    /// Configuration errors (missing credentials, invalid header values, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// An account lacks its device id or authorization token.
    #[error("缺少必要的参数: deviceId 或 authorization")]
    MissingCredentials,

    /// Transport-level failure after the retry budget was exhausted.
    ///
    /// The message is user-facing and ends up verbatim in the session log.
    #[error("{message}")]
    Request {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A notification channel rejected or failed to deliver a message.
    #[error("{channel} notification failed: {message}")]
    Notify { channel: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NinebotError {
    /// Builds a [`NinebotError::Notify`] for the given channel name.
    pub fn notify(channel: &str, message: impl Into<String>) -> Self {
        Self::Notify {
            channel: channel.to_string(),
            message: message.into(),
        }
    }
}
