// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for ninebot-checkin.
//!
//! Provides the shared error type, account and status types, the ordered
//! session log, and the [`Notifier`] trait implemented by every push channel.

pub mod error;
pub mod session_log;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NinebotError;
pub use session_log::{LogField, SessionLog};
pub use traits::Notifier;
pub use types::{Account, CheckinOutcome, CheckinStatus, SessionResult};
