// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan a kubectl subcommand out across contexts.

use anyhow::Result;
use kx_adapters::KubectlAdapter;
use kx_core::{has_column_header, is_follow_mode, is_watch_mode, resolve_mode, Context, OutputMode};
use kx_engine::{Aggregator, Dispatcher, LineSink, Multiplexer, StreamOptions, StreamOutcome, StreamStatus};

use crate::color;
use crate::config::Settings;
use crate::exit_error::ExitError;
use crate::signal;

/// How a subcommand's output is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Buffer every context, then aggregate.
    Batch(OutputMode),
    /// Follow every context live.
    Stream(StreamOptions),
}

pub fn plan(subcommand: &str, args: &[String]) -> Plan {
    match subcommand {
        "get" if is_watch_mode(args) => {
            Plan::Stream(StreamOptions { dedup_header: has_column_header(args) })
        }
        "events" if is_watch_mode(args) => Plan::Stream(StreamOptions::default()),
        "logs" if is_follow_mode(args) => Plan::Stream(StreamOptions::default()),
        _ => Plan::Batch(resolve_mode(subcommand, args)),
    }
}

pub async fn handle(
    subcommand: &str,
    args: &[String],
    contexts: &[Context],
    settings: &Settings,
) -> Result<()> {
    let adapter = KubectlAdapter::new(settings.batch.program.clone());
    let colorize = color::should_colorize();
    let plan = plan(subcommand, args);
    tracing::debug!(subcommand, contexts = contexts.len(), ?plan, "running");

    match plan {
        Plan::Batch(mode) => {
            let dispatcher = Dispatcher::new(adapter, settings.batch.clone());
            let results = dispatcher.run(contexts, subcommand, args).await?;

            let mut out = std::io::stdout().lock();
            let mut err = std::io::stderr().lock();
            Aggregator::new(colorize).write(mode, &results, &mut out, &mut err)?;

            let failed = results.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                return Err(ExitError::contexts_failed(failed, results.len()).into());
            }
        }
        Plan::Stream(options) => {
            let cancel = signal::cancel_on_interrupt()?;
            let mux = Multiplexer::new(adapter, LineSink::stdout(), LineSink::stderr())
                .colorize(colorize);
            let outcomes = mux.run(contexts, subcommand, args, options, cancel.clone()).await?;

            let failed = count_stream_failures(&outcomes, cancel.is_cancelled());
            if failed > 0 {
                return Err(ExitError::contexts_failed(failed, outcomes.len()).into());
            }
        }
    }
    Ok(())
}

/// After an interrupt, children commonly die from the same signal, so only
/// start failures still count.
fn count_stream_failures(outcomes: &[StreamOutcome], interrupted: bool) -> usize {
    outcomes
        .iter()
        .filter(|o| match &o.status {
            StreamStatus::FailedToStart(_) => true,
            StreamStatus::Exited(Err(_)) => !interrupted,
            StreamStatus::Exited(Ok(())) | StreamStatus::Cancelled => false,
        })
        .count()
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
