// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One account's check-in attempt.
//!
//! A session queries today's status, signs in when the account is still
//! unchecked, and re-reads the status to refresh the streak count. Every step
//! writes to the session log that ends up in the notification body. Nothing
//! escapes [`CheckinSession::run`]: remote failures become log entries, and a
//! panic inside the workflow is caught at the session boundary.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use ninebot_core::{
    Account, CheckinOutcome, CheckinStatus, LogField, NinebotError, SessionLog, SessionResult,
};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{error, info, warn};

use crate::api::{Endpoints, Envelope};
use crate::client::{GatewayClient, RetryPolicy};

const CHECKED: &str = "已签到🎉";
const UNCHECKED: &str = "未签到❌";

pub struct CheckinSession {
    name: String,
    device_id: String,
    client: GatewayClient,
    endpoints: Endpoints,
    log: SessionLog,
}

impl CheckinSession {
    /// Binds a session to `account` against the gateway at `base_url`.
    ///
    /// Fails when the device id or authorization is blank, or when the
    /// authorization cannot be sent as a header.
    pub fn new(account: &Account, base_url: &str) -> Result<Self, NinebotError> {
        if account.device_id.trim().is_empty()
            || account.authorization.expose_secret().trim().is_empty()
        {
            return Err(NinebotError::MissingCredentials);
        }

        let client = GatewayClient::new(&account.name, &account.authorization)?;
        Ok(Self {
            name: account.name.clone(),
            device_id: account.device_id.clone(),
            client,
            endpoints: Endpoints::new(base_url),
            log: SessionLog::new(),
        })
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.client = self.client.with_retry_policy(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queries today's check-in status.
    ///
    /// The error is the user-facing reason: the gateway's own message for a
    /// rejected query, or `登录验证异常: ...` when the request never succeeded.
    pub async fn valid(&self) -> Result<CheckinStatus, String> {
        let url = self
            .endpoints
            .status(chrono::Utc::now().timestamp_millis());

        let body = match self.client.request(Method::GET, &url, None).await {
            Ok(body) => body,
            Err(err) => {
                warn!(account = %self.name, error = %err, "status query failed");
                return Err(format!("登录验证异常: {err}"));
            }
        };

        match Envelope::decode(body) {
            Ok(envelope) if envelope.is_ok() => envelope.status().map_err(|e| e.to_string()),
            Ok(envelope) => {
                warn!(account = %self.name, code = %envelope.code, "status query rejected");
                Err(envelope.message_or("验证失败"))
            }
            Err(err) => {
                warn!(account = %self.name, error = %err, "status query rejected");
                Err("验证失败".to_string())
            }
        }
    }

    /// Submits today's check-in. Returns true when the gateway accepted it.
    pub async fn sign(&mut self) -> bool {
        self.try_sign().await.is_ok()
    }

    async fn try_sign(&mut self) -> Result<(), String> {
        let body = json!({ "deviceId": self.device_id });
        match self
            .client
            .request(Method::POST, &self.endpoints.sign(), Some(&body))
            .await
        {
            Ok(response) => {
                let message = match Envelope::decode(response) {
                    Ok(envelope) if envelope.is_ok() => {
                        info!(account = %self.name, "check-in accepted");
                        return Ok(());
                    }
                    Ok(envelope) => {
                        warn!(account = %self.name, code = %envelope.code, "check-in rejected");
                        envelope.message_or("未知错误")
                    }
                    Err(err) => {
                        warn!(account = %self.name, error = %err, "check-in rejected");
                        "未知错误".to_string()
                    }
                };
                let reason = format!("签到失败: {message}");
                self.log.set(LogField::SignResult, reason.clone());
                Err(reason)
            }
            Err(err) => {
                self.record_sign_error(&err);
                Err(err.to_string())
            }
        }
    }

    fn record_sign_error(&mut self, err: &NinebotError) {
        warn!(account = %self.name, error = %err, "check-in request failed");
        self.log.set(LogField::SignResult, "签到失败");
        self.log.set(LogField::ErrorDetail, err.to_string());
    }

    /// Runs the full check-in workflow and always returns an outcome.
    pub async fn run(&mut self) -> CheckinOutcome {
        info!(account = %self.name, "starting check-in");
        let outcome = match guard(self.reconcile()).await {
            Ok(outcome) => outcome,
            Err(message) => {
                error!(account = %self.name, panic = %message, "check-in aborted");
                let reason = format!("执行异常: {message}");
                self.log.set(LogField::Execution, reason.clone());
                CheckinOutcome::Failed(reason)
            }
        };
        info!(account = %self.name, ?outcome, "check-in finished");
        outcome
    }

    async fn reconcile(&mut self) -> CheckinOutcome {
        let status = match self.valid().await {
            Ok(status) => status,
            Err(reason) => {
                self.log.set(LogField::Validation, reason.clone());
                return CheckinOutcome::Failed(reason);
            }
        };

        self.record_status(&status);
        if status.is_checked_in() {
            return CheckinOutcome::AlreadyDone;
        }

        if let Err(reason) = self.try_sign().await {
            return CheckinOutcome::Failed(reason);
        }

        match self.valid().await {
            Ok(refreshed) => {
                self.log.set(
                    LogField::ConsecutiveDays,
                    format!("{}天", refreshed.consecutive_days),
                );
                self.log.set(LogField::TodayStatus, CHECKED);
                self.log.set(LogField::SignResult, "签到成功🎉🎉");
            }
            Err(reason) => {
                warn!(account = %self.name, %reason, "status refresh after check-in failed");
                self.log
                    .set(LogField::SignResult, "签到成功，但获取最新状态失败");
            }
        }
        CheckinOutcome::Success
    }

    fn record_status(&mut self, status: &CheckinStatus) {
        self.log.set(
            LogField::ConsecutiveDays,
            format!("{}天", status.consecutive_days),
        );
        self.log.set(
            LogField::TodayStatus,
            if status.is_checked_in() { CHECKED } else { UNCHECKED },
        );
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Accumulated log rendered as `label: value` lines.
    pub fn logs(&self) -> String {
        self.log.to_string()
    }

    pub fn into_result(self, outcome: CheckinOutcome) -> SessionResult {
        SessionResult {
            logs: self.logs(),
            name: self.name,
            outcome,
        }
    }
}

/// Polls `fut` to completion, turning a panic into its message.
async fn guard<F, T>(fut: F) -> Result<T, String>
where
    F: Future<Output = T>,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_device_id_is_rejected() {
        let account = Account::new("a", "  ", "token");
        let err = CheckinSession::new(&account, "http://localhost").err().unwrap();
        assert!(matches!(err, NinebotError::MissingCredentials));
    }

    #[test]
    fn blank_authorization_is_rejected() {
        let account = Account::new("a", "dev-1", "");
        let err = CheckinSession::new(&account, "http://localhost").err().unwrap();
        assert_eq!(err.to_string(), "缺少必要的参数: deviceId 或 authorization");
    }

    #[test]
    fn new_session_has_empty_log() {
        let account = Account::new("a", "dev-1", "token");
        let session = CheckinSession::new(&account, "http://localhost").unwrap();
        assert_eq!(session.name(), "a");
        assert!(session.log().is_empty());
        assert_eq!(session.logs(), "");
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload =
            std::panic::catch_unwind(|| panic!("{} {}", "formatted", 42)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 42");

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[tokio::test]
    async fn guard_catches_panicking_future() {
        let result: Result<(), String> = guard(async { panic!("workflow broke") }).await;
        assert_eq!(result.unwrap_err(), "workflow broke");

        let result = guard(async { 5 }).await;
        assert_eq!(result, Ok(5));
    }
}
