// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier for deterministic testing.
//!
//! `MockNotifier` implements [`Notifier`] and records every title/message
//! pair it receives so tests can assert on the delivered report.

use std::sync::Arc;

use async_trait::async_trait;
use ninebot_core::Notifier;
use tokio::sync::Mutex;

/// A notifier that never touches the network.
///
/// Clones share the same capture buffer, so a test can keep one handle while
/// the runner owns a boxed copy.
#[derive(Clone)]
pub struct MockNotifier {
    name: String,
    configured: bool,
    accept: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    /// A configured notifier that accepts every message.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            configured: true,
            accept: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A notifier without credentials; `send` returns false and records nothing.
    pub fn unconfigured(name: &str) -> Self {
        Self {
            configured: false,
            ..Self::new(name)
        }
    }

    /// A configured notifier whose remote service rejects every message.
    pub fn rejecting(name: &str) -> Self {
        Self {
            accept: false,
            ..Self::new(name)
        }
    }

    /// Every `(title, message)` pair passed to `send` while configured.
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        if !self.configured {
            return false;
        }
        self.sent
            .lock()
            .await
            .push((title.to_string(), message.to_string()));
        self.accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_sent_messages_across_clones() {
        let notifier = MockNotifier::new("mock");
        let boxed: Box<dyn Notifier> = Box::new(notifier.clone());

        assert!(boxed.send("title", "body").await);
        assert_eq!(
            notifier.sent_messages().await,
            vec![("title".to_string(), "body".to_string())]
        );
    }

    #[tokio::test]
    async fn unconfigured_records_nothing() {
        let notifier = MockNotifier::unconfigured("mock");
        assert!(!notifier.send("title", "body").await);
        assert_eq!(notifier.sent_count().await, 0);
    }

    #[tokio::test]
    async fn rejecting_records_but_reports_failure() {
        let notifier = MockNotifier::rejecting("mock");
        assert!(!notifier.send("title", "body").await);
        assert_eq!(notifier.sent_count().await, 1);
    }
}
