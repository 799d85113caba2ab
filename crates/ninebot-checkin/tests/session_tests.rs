// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Check-in workflow tests against a fake gateway.
//!
//! Every test starts its own wiremock server; retries use a 10ms delay so
//! exhausted-budget cases stay fast.

use std::time::Duration;

use ninebot_checkin::{CheckinSession, RetryPolicy};
use ninebot_core::{Account, CheckinOutcome, LogField};
use ninebot_test_utils::FakeGateway;
use serde_json::json;

const TOKEN: &str = "Bearer token-a";

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        retry_delay: Duration::from_millis(10),
        timeout: Duration::from_secs(2),
    }
}

fn session(gateway: &FakeGateway) -> CheckinSession {
    let account = Account::new("账号1", "dev-a", TOKEN);
    CheckinSession::new(&account, &gateway.base_url())
        .unwrap()
        .with_retry_policy(fast_policy())
}

// ---- Already checked in ----

#[tokio::test]
async fn test_already_checked_in_skips_sign() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 1, Some(5)).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert_eq!(outcome, CheckinOutcome::AlreadyDone);
    assert_eq!(session.logs(), "连续签到天数: 5天\n今日签到状态: 已签到🎉");
    assert_eq!(gateway.status_calls(TOKEN).await, 1);
    assert_eq!(gateway.sign_calls(TOKEN).await, 0);
}

// ---- Unchecked, sign succeeds ----

#[tokio::test]
async fn test_sign_then_refresh_updates_entries_in_place() {
    let gateway = FakeGateway::start().await;
    gateway.status_once(TOKEN, 0, Some(4)).await;
    gateway.status(TOKEN, 1, Some(5)).await;
    gateway.sign_ok(TOKEN).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert_eq!(outcome, CheckinOutcome::Success);
    assert_eq!(
        session.logs(),
        "连续签到天数: 5天\n今日签到状态: 已签到🎉\n签到结果: 签到成功🎉🎉"
    );
    assert_eq!(gateway.sign_calls(TOKEN).await, 1);
    assert_eq!(gateway.status_calls(TOKEN).await, 2);
    assert_eq!(
        gateway.sign_bodies(TOKEN).await,
        vec![json!({ "deviceId": "dev-a" })]
    );
}

#[tokio::test]
async fn test_refresh_failure_still_counts_as_success() {
    let gateway = FakeGateway::start().await;
    gateway.status_once(TOKEN, 0, Some(4)).await;
    gateway.status_http_error(TOKEN, 500).await;
    gateway.sign_ok(TOKEN).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert_eq!(outcome, CheckinOutcome::Success);
    assert_eq!(session.log().get(LogField::ConsecutiveDays), Some("4天"));
    assert_eq!(session.log().get(LogField::TodayStatus), Some("未签到❌"));
    assert_eq!(
        session.log().get(LogField::SignResult),
        Some("签到成功，但获取最新状态失败")
    );
    // First query, then the full retry budget for the refresh.
    assert_eq!(gateway.status_calls(TOKEN).await, 4);
}

#[tokio::test]
async fn test_missing_consecutive_days_reads_as_zero() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 1, None).await;

    let mut session = session(&gateway);
    session.run().await;

    assert_eq!(session.log().get(LogField::ConsecutiveDays), Some("0天"));
}

// ---- Sign failures ----

#[tokio::test]
async fn test_sign_rejected_records_remote_message() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 0, Some(4)).await;
    gateway.sign_rejected(TOKEN, 10001, "设备异常").await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert!(!outcome.is_success());
    assert_eq!(
        session.logs(),
        "连续签到天数: 4天\n今日签到状态: 未签到❌\n签到结果: 签到失败: 设备异常"
    );
    // Logical rejections are not retried.
    assert_eq!(gateway.sign_calls(TOKEN).await, 1);
    assert_eq!(gateway.status_calls(TOKEN).await, 1);
}

#[tokio::test]
async fn test_sign_rejected_without_message_uses_placeholder() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 0, Some(4)).await;
    gateway.sign_rejected(TOKEN, 1, "").await;

    let mut session = session(&gateway);
    assert!(!session.sign().await);
    assert_eq!(
        session.log().get(LogField::SignResult),
        Some("签到失败: 未知错误")
    );
}

#[tokio::test]
async fn test_sign_response_without_code_is_a_rejection() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 0, Some(4)).await;
    gateway.sign_without_code(TOKEN).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert_eq!(outcome, CheckinOutcome::Failed("签到失败: 未知错误".to_string()));
    assert_eq!(
        session.logs(),
        "连续签到天数: 4天\n今日签到状态: 未签到❌\n签到结果: 签到失败: 未知错误"
    );
    assert_eq!(session.log().get(LogField::ErrorDetail), None);
    assert_eq!(gateway.sign_calls(TOKEN).await, 1);
}

#[tokio::test]
async fn test_sign_transport_failure_records_error_detail() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 0, Some(4)).await;
    gateway.sign_http_error(TOKEN, 502).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert!(matches!(outcome, CheckinOutcome::Failed(_)));
    assert_eq!(session.log().get(LogField::SignResult), Some("签到失败"));
    assert_eq!(
        session.log().get(LogField::ErrorDetail),
        Some("状态码: 502, 信息: Request failed with status code 502")
    );
    assert_eq!(gateway.sign_calls(TOKEN).await, 3);
}

// ---- Validation failures ----

#[tokio::test]
async fn test_status_rejected_uses_remote_message() {
    let gateway = FakeGateway::start().await;
    gateway.status_rejected(TOKEN, 401, "登录已过期").await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert_eq!(outcome, CheckinOutcome::Failed("登录已过期".into()));
    assert_eq!(session.logs(), "验证结果: 登录已过期");
    assert_eq!(gateway.sign_calls(TOKEN).await, 0);
}

#[tokio::test]
async fn test_status_rejected_without_message_defaults() {
    let gateway = FakeGateway::start().await;
    gateway.status_rejected(TOKEN, 401, "").await;

    let session = session(&gateway);
    assert_eq!(session.valid().await.unwrap_err(), "验证失败");
}

#[tokio::test]
async fn test_status_transport_failure_exhausts_retries() {
    let gateway = FakeGateway::start().await;
    gateway.status_http_error(TOKEN, 500).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;

    assert!(!outcome.is_success());
    assert_eq!(
        session.logs(),
        "验证结果: 登录验证异常: 状态码: 500, 信息: Request failed with status code 500"
    );
    assert_eq!(gateway.status_calls(TOKEN).await, 3);
    assert_eq!(gateway.sign_calls(TOKEN).await, 0);
}

#[tokio::test]
async fn test_unreachable_gateway_fails_without_panicking() {
    let account = Account::new("账号1", "dev-a", TOKEN);
    let mut session = CheckinSession::new(&account, "http://127.0.0.1:1")
        .unwrap()
        .with_retry_policy(fast_policy());

    let outcome = session.run().await;

    assert!(!outcome.is_success());
    let validation = session.log().get(LogField::Validation).unwrap();
    assert!(validation.starts_with("登录验证异常: "), "{validation}");
}

#[tokio::test]
async fn test_into_result_carries_logs_and_outcome() {
    let gateway = FakeGateway::start().await;
    gateway.status(TOKEN, 1, Some(9)).await;

    let mut session = session(&gateway);
    let outcome = session.run().await;
    let result = session.into_result(outcome);

    assert_eq!(result.name, "账号1");
    assert!(result.success());
    assert_eq!(result.logs, "连续签到天数: 9天\n今日签到状态: 已签到🎉");
}
