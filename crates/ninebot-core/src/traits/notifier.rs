// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier trait for push-notification integrations (Bark, ServerChan, etc.).

use async_trait::async_trait;

/// A push-notification channel that can deliver a title/message pair.
///
/// Notifiers are fire-and-forget from the caller's point of view: `send`
/// reports whether the remote service accepted the message and never
/// returns an error. A notifier without the credentials it needs returns
/// `false` without touching the network.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Returns the human-readable name of this channel.
    fn name(&self) -> &str;

    /// Returns true when enough configuration is present to attempt delivery.
    fn is_configured(&self) -> bool;

    /// Delivers the message. `true` means the remote service accepted it.
    async fn send(&self, title: &str, message: &str) -> bool;
}
