// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch dispatcher: bounded-concurrency fan-out with index-stable results.

use std::sync::Arc;

use kx_adapters::ProcessAdapter;
use kx_core::{BatchConfig, Context, ContextResult, Invocation, RunError};
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::error::EngineError;
use crate::progress::Progress;

/// Runs one invocation per context with at most `batch_size` in flight.
pub struct Dispatcher<P: ProcessAdapter> {
    adapter: P,
    config: BatchConfig,
}

impl<P: ProcessAdapter> Dispatcher<P> {
    pub fn new(adapter: P, config: BatchConfig) -> Self {
        Self { adapter, config }
    }

    /// Run `subcommand args...` against every context.
    ///
    /// `result[i]` always belongs to `contexts[i]`. Per-context failures are
    /// recorded on their own result and never stop sibling work.
    pub async fn run(
        &self,
        contexts: &[Context],
        subcommand: &str,
        args: &[String],
    ) -> Result<Vec<ContextResult>, EngineError> {
        if contexts.is_empty() {
            return Err(EngineError::NoContexts);
        }

        let span = tracing::info_span!(
            "kx.dispatch",
            subcommand,
            contexts = contexts.len(),
            batch_size = self.config.batch_size.get(),
            failed = tracing::field::Empty,
        );

        let progress =
            self.config.progress.then(|| Progress::start(contexts.len(), std::io::stderr()));
        let counters = progress.as_ref().map(Progress::counters);
        let gate = Arc::new(Semaphore::new(self.config.batch_size.get()));

        let handles: Vec<_> = contexts
            .iter()
            .map(|context| {
                let adapter = self.adapter.clone();
                let gate = Arc::clone(&gate);
                let counters = counters.clone();
                let invocation = Invocation::new(context.clone(), subcommand, args);
                tokio::spawn(
                    async move {
                        // The gate is never closed, so acquisition only fails on shutdown.
                        let _permit = gate.acquire_owned().await.ok();
                        if let Some(c) = &counters {
                            c.start();
                        }
                        let result = adapter.run(&invocation).await;
                        if let Some(c) = &counters {
                            c.complete();
                        }
                        result
                    }
                    .instrument(span.clone()),
                )
            })
            .collect();

        let mut results = Vec::with_capacity(contexts.len());
        for (context, handle) in contexts.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(parent: &span, context = %context, error = %e, "worker failed");
                    ContextResult::failure(
                        context.clone(),
                        String::new(),
                        RunError::Join { message: e.to_string() },
                    )
                }
            };
            results.push(result);
        }

        if let Some(progress) = progress {
            progress.finish().await;
        }

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        span.record("failed", failed);
        tracing::debug!(parent: &span, failed, "batch complete");

        Ok(results)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
