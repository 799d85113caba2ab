// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ninebot check` command implementation.
//!
//! Shows which accounts and notification channels the loaded configuration
//! would use. Makes no network requests and never prints credentials.

use std::fmt::Write as _;
use std::io::IsTerminal;

use colored::Colorize;
use ninebot_config::CheckinConfig;
use ninebot_core::Notifier;
use secrecy::ExposeSecret;

/// Run the `ninebot check` command.
///
/// Colors are disabled with `--plain` or when stdout is not a TTY.
pub fn run_check(config: &CheckinConfig, notifiers: &[Box<dyn Notifier>], plain: bool) {
    let use_color = !plain && std::io::stdout().is_terminal();
    print!("{}", render_check(config, notifiers, use_color));
}

fn mark(ok: bool, use_color: bool) -> String {
    match (ok, use_color) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (true, false) => "[OK]".to_string(),
        (false, false) => "[--]".to_string(),
    }
}

pub fn render_check(
    config: &CheckinConfig,
    notifiers: &[Box<dyn Notifier>],
    use_color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  ninebot check");
    let _ = writeln!(out, "  {}", "-".repeat(35));
    let _ = writeln!(out, "    Gateway:   {}", config.api.base_url);
    let _ = writeln!(out, "    Log level: {}", config.log_level);
    let _ = writeln!(out);

    let _ = writeln!(out, "  Accounts");
    match config.resolve_accounts() {
        Ok(accounts) => {
            for account in &accounts {
                let complete = !account.device_id.trim().is_empty()
                    && !account.authorization.expose_secret().trim().is_empty();
                let note = if complete { "" } else { " (missing deviceId or authorization)" };
                let _ = writeln!(out, "    {} {}{note}", mark(complete, use_color), account.name);
            }
        }
        Err(e) => {
            let _ = writeln!(out, "    {} {e}", mark(false, use_color));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  Notifications");
    for notifier in notifiers {
        let state = if notifier.is_configured() {
            "configured"
        } else {
            "not configured"
        };
        let _ = writeln!(
            out,
            "    {} {:<11} {state}",
            mark(notifier.is_configured(), use_color),
            notifier.name()
        );
    }
    let _ = writeln!(out);
    out
}
