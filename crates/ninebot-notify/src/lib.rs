// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push senders for the check-in report.
//!
//! Each sender implements [`Notifier`] and turns its own failures into a
//! `false` return, so one broken channel never keeps the others from running.

pub mod bark;
pub mod http;
pub mod pushdeer;
pub mod pushover;
pub mod serverchan;

use ninebot_config::CheckinConfig;
use ninebot_core::Notifier;
use tracing::info;

pub use bark::BarkNotifier;
pub use pushdeer::PushDeerNotifier;
pub use pushover::PushoverNotifier;
pub use serverchan::ServerChanNotifier;

/// What happened to one channel during [`notify_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub channel: String,
    pub configured: bool,
    pub delivered: bool,
}

/// Every supported sender, in delivery order: Bark, ServerChan, Pushover, PushDeer.
///
/// Unconfigured senders are included; they skip themselves at send time.
pub fn build_notifiers(config: &CheckinConfig) -> Vec<Box<dyn Notifier>> {
    vec![
        Box::new(BarkNotifier::new(config.bark.clone())),
        Box::new(ServerChanNotifier::new(config.serverchan.clone())),
        Box::new(PushoverNotifier::new(config.pushover.clone())),
        Box::new(PushDeerNotifier::new(config.pushdeer.clone())),
    ]
}

/// Sends `title`/`body` through each notifier in turn.
pub async fn notify_all(
    notifiers: &[Box<dyn Notifier>],
    title: &str,
    body: &str,
) -> Vec<DeliveryReport> {
    let mut reports = Vec::with_capacity(notifiers.len());
    for notifier in notifiers {
        let delivered = notifier.send(title, body).await;
        reports.push(DeliveryReport {
            channel: notifier.name().to_string(),
            configured: notifier.is_configured(),
            delivered,
        });
    }

    let delivered = reports.iter().filter(|r| r.delivered).count();
    info!(delivered, total = reports.len(), "notifications dispatched");
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use ninebot_test_utils::MockNotifier;

    #[test]
    fn build_notifiers_keeps_fixed_order() {
        let names: Vec<String> = build_notifiers(&CheckinConfig::default())
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, ["Bark", "ServerChan", "Pushover", "PushDeer"]);
    }

    #[test]
    fn default_config_configures_nothing() {
        assert!(
            build_notifiers(&CheckinConfig::default())
                .iter()
                .all(|n| !n.is_configured())
        );
    }

    #[tokio::test]
    async fn one_failing_channel_does_not_block_the_rest() {
        let first = MockNotifier::rejecting("first");
        let second = MockNotifier::unconfigured("second");
        let third = MockNotifier::new("third");
        let notifiers: Vec<Box<dyn Notifier>> = vec![
            Box::new(first.clone()),
            Box::new(second.clone()),
            Box::new(third.clone()),
        ];

        let reports = notify_all(&notifiers, "title", "body").await;

        assert_eq!(
            reports,
            vec![
                DeliveryReport {
                    channel: "first".into(),
                    configured: true,
                    delivered: false,
                },
                DeliveryReport {
                    channel: "second".into(),
                    configured: false,
                    delivered: false,
                },
                DeliveryReport {
                    channel: "third".into(),
                    configured: true,
                    delivered: true,
                },
            ]
        );
        assert_eq!(first.sent_count().await, 1);
        assert_eq!(second.sent_count().await, 0);
        assert_eq!(
            third.sent_messages().await,
            vec![("title".to_string(), "body".to_string())]
        );
    }
}
