// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between the runner and its collaborators.

pub mod notifier;

pub use notifier::Notifier;
