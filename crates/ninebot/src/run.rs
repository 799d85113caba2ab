// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ninebot run` command implementation.
//!
//! Resolves the configured accounts, checks each one in, and hands the
//! aggregated report to the notifiers.

use ninebot_checkin::{RetryPolicy, RunReport, Runner};
use ninebot_config::{CheckinConfig, ConfigError};
use ninebot_core::Notifier;
use ninebot_notify::{DeliveryReport, notify_all};
use tracing::info;

/// Everything a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub deliveries: Vec<DeliveryReport>,
}

/// Runs every account, then sends the report through `notifiers` in order.
///
/// Fails before any network activity when no usable account is configured.
pub async fn execute(
    config: &CheckinConfig,
    notifiers: &[Box<dyn Notifier>],
    policy: RetryPolicy,
) -> Result<RunOutcome, ConfigError> {
    let accounts = config.resolve_accounts()?;
    info!(count = accounts.len(), "accounts loaded");

    let report = Runner::new(accounts, &config.api)
        .with_retry_policy(policy)
        .run()
        .await;

    let deliveries = if notifiers.is_empty() {
        Vec::new()
    } else {
        notify_all(notifiers, report.title(), &report.body()).await
    };

    Ok(RunOutcome { report, deliveries })
}
