// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ninebot - Daily check-in for Ninebot scooter accounts.
//!
//! This is the binary entry point. It loads configuration, runs every account,
//! and pushes the report to the configured notification channels.

mod check;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ninebot_checkin::RetryPolicy;
use tracing::error;

/// ninebot - Daily check-in for Ninebot scooter accounts.
#[derive(Parser, Debug)]
#[command(name = "ninebot", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of ./ninebot.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Check in every configured account (default).
    Run {
        /// Print the report instead of sending notifications.
        #[arg(long)]
        no_notify: bool,
    },
    /// Validate configuration and list accounts and notifiers.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ninebot_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            ninebot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);

    match cli.command.unwrap_or(Commands::Run { no_notify: false }) {
        Commands::Run { no_notify } => {
            let notifiers = if no_notify {
                Vec::new()
            } else {
                ninebot_notify::build_notifiers(&config)
            };

            match run::execute(&config, &notifiers, RetryPolicy::default()).await {
                Ok(outcome) if no_notify => {
                    println!("{}", outcome.report.title());
                    println!();
                    println!("{}", outcome.report.body());
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "check-in skipped"),
            }
        }
        Commands::Check { plain } => {
            let notifiers = ninebot_notify::build_notifiers(&config);
            check::run_check(&config, &notifiers, plain);
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ninebot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
