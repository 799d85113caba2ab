// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs every configured account one after another.

use ninebot_config::model::ApiConfig;
use ninebot_core::{Account, SessionResult};
use tracing::{info, warn};

use crate::client::RetryPolicy;
use crate::report::RunReport;
use crate::session::CheckinSession;

pub struct Runner {
    accounts: Vec<Account>,
    base_url: String,
    policy: RetryPolicy,
}

impl Runner {
    pub fn new(accounts: Vec<Account>, api: &ApiConfig) -> Self {
        Self {
            accounts,
            base_url: api.base_url.clone(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks in every account sequentially, in configuration order.
    ///
    /// An account whose session cannot be built gets a failed result and the
    /// run moves on to the next one.
    pub async fn run(&self) -> RunReport {
        let mut results = Vec::with_capacity(self.accounts.len());

        for (index, account) in self.accounts.iter().enumerate() {
            info!(
                account = %account.name,
                position = index + 1,
                total = self.accounts.len(),
                "processing account"
            );
            results.push(self.run_account(account).await);
        }

        let report = RunReport::new(results);
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "all accounts processed"
        );
        report
    }

    async fn run_account(&self, account: &Account) -> SessionResult {
        match CheckinSession::new(account, &self.base_url) {
            Ok(session) => {
                let mut session = session.with_retry_policy(self.policy);
                let outcome = session.run().await;
                session.into_result(outcome)
            }
            Err(err) => {
                warn!(account = %account.name, error = %err, "session initialization failed");
                SessionResult::init_failed(&account.name, err)
            }
        }
    }
}
