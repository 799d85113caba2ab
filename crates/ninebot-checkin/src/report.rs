// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregated run report sent to every notifier.

use ninebot_core::SessionResult;

pub const REPORT_TITLE: &str = "九号出行签到结果";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub results: Vec<SessionResult>,
}

impl RunReport {
    pub fn new(results: Vec<SessionResult>) -> Self {
        Self { results }
    }

    pub fn title(&self) -> &'static str {
        REPORT_TITLE
    }

    /// One block per account, separated by a blank line.
    ///
    /// Each block is a ✅/❌ marker and the account name, followed by the
    /// session log indented by two spaces.
    pub fn body(&self) -> String {
        self.results
            .iter()
            .map(|r| {
                let marker = if r.success() { "✅" } else { "❌" };
                format!("{marker} {}\n{}", r.name, r.logs.replace('\n', "\n  "))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ninebot_core::CheckinOutcome;

    fn result(name: &str, outcome: CheckinOutcome, logs: &str) -> SessionResult {
        SessionResult {
            name: name.into(),
            outcome,
            logs: logs.into(),
        }
    }

    #[test]
    fn body_marks_and_indents_each_account() {
        let report = RunReport::new(vec![
            result(
                "A",
                CheckinOutcome::AlreadyDone,
                "连续签到天数: 5天\n今日签到状态: 已签到🎉",
            ),
            SessionResult::init_failed("B", "缺少必要的参数: deviceId 或 authorization"),
        ]);

        assert_eq!(report.title(), "九号出行签到结果");
        assert_eq!(
            report.body(),
            "✅ A\n连续签到天数: 5天\n  今日签到状态: 已签到🎉\n\n\
             ❌ B\n初始化失败: 缺少必要的参数: deviceId 或 authorization"
        );
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn empty_report_has_empty_body() {
        assert_eq!(RunReport::default().body(), "");
    }
}
