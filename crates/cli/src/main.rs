// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kubectl-x: run kubectl subcommands across kubeconfig contexts

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod kubeconfig;
mod signal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{contexts, run, Command};
use crate::config::{Layer, Settings};
use crate::exit_error::ExitError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("KX_BUILD_HASH"), ")");

/// Root flags are only read before the subcommand; everything after it
/// goes to kubectl.
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-x",
    bin_name = "kubectl x",
    version = VERSION,
    about = "Run kubectl commands against every context in kubeconfig",
    styles = color::styles(),
    arg_required_else_help = true
)]
struct Cli {
    /// Number of contexts to process in parallel [default: 25]
    #[arg(short = 'b', long, value_name = "N")]
    batch_size: Option<usize>,

    /// kubectl binary to run
    #[arg(long, value_name = "PATH")]
    kubectl: Option<String>,

    /// Only target contexts matching this regex (case-insensitive, repeatable)
    #[arg(long, value_name = "REGEX")]
    filter: Vec<String>,

    /// Skip contexts matching this regex (case-insensitive, repeatable)
    #[arg(long, value_name = "REGEX")]
    exclude: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn layer(&self) -> Layer {
        Layer {
            batch_size: self.batch_size,
            kubectl: self.kubectl.clone(),
            filter: self.filter.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_cli(cli: Cli) -> Result<()> {
    let file = match env::config_path() {
        Some(path) => Layer::from_file(&path)?,
        None => Layer::default(),
    };
    let layer = cli.layer().over(Layer::from_env().over(file));
    let settings = Settings::resolve(layer, color::should_show_progress())?;
    tracing::debug!(?settings, "resolved settings");

    let kubeconfig = env::kubeconfig_path();
    let selected =
        kubeconfig::selected_contexts(kubeconfig.as_deref(), &settings.filter, &settings.exclude)?;

    match cli.command.forwarded() {
        Some((subcommand, args)) => run::handle(subcommand, args, &selected, &settings).await,
        None => contexts::handle(&selected, &mut std::io::stdout().lock()),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("Error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
