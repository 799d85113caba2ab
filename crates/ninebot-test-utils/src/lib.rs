// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ninebot-checkin integration tests.
//!
//! # Components
//!
//! - [`MockNotifier`] - Notifier that captures what it was asked to send
//! - [`FakeGateway`] - wiremock server speaking the check-in gateway protocol

pub mod fake_gateway;
pub mod mock_notifier;

pub use fake_gateway::{FakeGateway, status_body};
pub use mock_notifier::MockNotifier;
