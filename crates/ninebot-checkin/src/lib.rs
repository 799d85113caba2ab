// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily check-in against the Ninebot gateway.
//!
//! [`GatewayClient`] wraps reqwest with the app's header set and a fixed retry
//! schedule. [`CheckinSession`] runs the status/sign/refresh workflow for one
//! account, and [`Runner`] drives every configured account into a
//! [`RunReport`] ready to be pushed to the notifiers.

pub mod api;
pub mod client;
pub mod report;
pub mod runner;
pub mod session;

pub use client::{GatewayClient, RetryPolicy};
pub use report::{REPORT_TITLE, RunReport};
pub use runner::Runner;
pub use session::CheckinSession;
