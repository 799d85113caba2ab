// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered, field-keyed log accumulated by a check-in session.
//!
//! Entries render as `"<label>: <value>"` lines in insertion order. Setting a
//! field that is already present replaces its value without moving it, so a
//! refreshed streak count stays where the first reading was recorded.

use std::fmt;

use strum::{Display, EnumIter};

/// The fixed set of fields a session can record.
///
/// The `Display` form is the label shown to the user in the notification body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LogField {
    #[strum(serialize = "连续签到天数")]
    ConsecutiveDays,
    #[strum(serialize = "今日签到状态")]
    TodayStatus,
    #[strum(serialize = "签到结果")]
    SignResult,
    #[strum(serialize = "错误详情")]
    ErrorDetail,
    #[strum(serialize = "验证结果")]
    Validation,
    #[strum(serialize = "执行结果")]
    Execution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    entries: Vec<(LogField, String)>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `field`, replacing in place if the field exists.
    pub fn set(&mut self, field: LogField, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: LogField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (LogField, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SessionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {value}")?;
        }
        Ok(())
    }
}
