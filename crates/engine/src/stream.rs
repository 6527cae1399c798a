// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream multiplexer for watch/follow runs.
//!
//! Every context's child starts immediately. Each output channel gets its
//! own reader task that forwards whole prefixed lines to a shared
//! [`LineSink`]. Cancelling the token sends `SIGTERM` to every live child;
//! workers then reap their child and join their readers before returning.

use std::sync::Arc;

use kx_adapters::ProcessAdapter;
use kx_core::{max_label_width, Context, Invocation, RunError};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use parking_lot::Once;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::error::EngineError;
use crate::label::Labeler;
use crate::sink::LineSink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Swallow each context's first stdout line and print one shared
    /// `CONTEXT` header in its place.
    pub dedup_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    /// Child ran to completion on its own.
    Exited(Result<(), RunError>),
    /// Child was terminated because the run was cancelled.
    Cancelled,
    /// Child never started.
    FailedToStart(RunError),
}

/// How one context's stream ended. Stored at the context's input index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutcome {
    pub context: Context,
    pub status: StreamStatus,
}

impl StreamOutcome {
    /// False when the child failed to start or exited unsuccessfully on
    /// its own. Cancellation counts as a clean stop.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, StreamStatus::Exited(Ok(())) | StreamStatus::Cancelled)
    }
}

/// One-shot gate for the shared header line.
struct HeaderGate {
    once: Once,
    label: String,
}

pub struct Multiplexer<P: ProcessAdapter> {
    adapter: P,
    out: LineSink,
    err: LineSink,
    colorize: bool,
}

impl<P: ProcessAdapter> Multiplexer<P> {
    pub fn new(adapter: P, out: LineSink, err: LineSink) -> Self {
        Self { adapter, out, err, colorize: false }
    }

    /// Color context labels.
    pub fn colorize(mut self, enabled: bool) -> Self {
        self.colorize = enabled;
        self
    }

    /// Follow every context until all children finish or `cancel` fires.
    pub async fn run(
        &self,
        contexts: &[Context],
        subcommand: &str,
        args: &[String],
        options: StreamOptions,
        cancel: CancellationToken,
    ) -> Result<Vec<StreamOutcome>, EngineError> {
        if contexts.is_empty() {
            return Err(EngineError::NoContexts);
        }

        let span = tracing::info_span!(
            "kx.stream",
            subcommand,
            contexts = contexts.len(),
            dedup_header = options.dedup_header,
        );

        let labeler = Labeler::new(max_label_width(contexts, options.dedup_header), self.colorize);
        let header = options
            .dedup_header
            .then(|| Arc::new(HeaderGate { once: Once::new(), label: labeler.header() }));

        let mut slots: Vec<Result<JoinHandle<StreamStatus>, RunError>> =
            Vec::with_capacity(contexts.len());
        for context in contexts {
            let invocation = Invocation::new(context.clone(), subcommand, args);
            match self.adapter.spawn(&invocation) {
                Ok(child) => {
                    let worker = Worker {
                        context: context.clone(),
                        labeler,
                        out: self.out.clone(),
                        err: self.err.clone(),
                        header: header.clone(),
                    };
                    let cancel = cancel.clone();
                    slots.push(Ok(tokio::spawn(
                        worker.follow(child, cancel).instrument(span.clone()),
                    )));
                }
                Err(e) => {
                    tracing::warn!(parent: &span, context = %context, error = %e, "failed to start");
                    emit(&self.err, &format!("Context {context}: {e}"));
                    slots.push(Err(e));
                }
            }
        }

        let mut outcomes = Vec::with_capacity(contexts.len());
        for (context, slot) in contexts.iter().zip(slots) {
            let status = match slot {
                Ok(handle) => match handle.await {
                    Ok(status) => status,
                    Err(e) => StreamStatus::Exited(Err(RunError::Join { message: e.to_string() })),
                },
                Err(e) => StreamStatus::FailedToStart(e),
            };
            outcomes.push(StreamOutcome { context: context.clone(), status });
        }
        Ok(outcomes)
    }
}

/// Per-context streaming state moved into its task.
struct Worker {
    context: Context,
    labeler: Labeler,
    out: LineSink,
    err: LineSink,
    header: Option<Arc<HeaderGate>>,
}

impl Worker {
    async fn follow(self, mut child: Child, cancel: CancellationToken) -> StreamStatus {
        let readers: Vec<JoinHandle<()>> = [
            child.stdout.take().map(|r| self.pump(r, self.out.clone(), self.header.clone())),
            child.stderr.take().map(|r| self.pump(r, self.err.clone(), None)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let exited = tokio::select! {
            status = child.wait() => Some(status),
            () = cancel.cancelled() => None,
        };

        let status = match exited {
            Some(Ok(status)) => StreamStatus::Exited(RunError::from_status(status).map_or(Ok(()), Err)),
            Some(Err(e)) => StreamStatus::Exited(Err(RunError::Join { message: e.to_string() })),
            None => {
                terminate(&child, &self.context);
                if let Err(e) = child.wait().await {
                    tracing::warn!(context = %self.context, error = %e, "failed to reap child");
                }
                StreamStatus::Cancelled
            }
        };

        for reader in readers {
            if let Err(e) = reader.await {
                tracing::warn!(context = %self.context, error = %e, "reader task failed");
            }
        }
        tracing::debug!(context = %self.context, ?status, "stream finished");
        status
    }

    fn pump<R>(&self, reader: R, sink: LineSink, header: Option<Arc<HeaderGate>>) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let context = self.context.clone();
        let labeler = self.labeler;
        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::new();
            let mut first = true;
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(context = %context, error = %e, "read failed");
                        break;
                    }
                }
                let line = decode_line(&buf);

                if first {
                    first = false;
                    if let Some(gate) = &header {
                        gate.once.call_once(|| emit(&sink, &format!("{}  {}", gate.label, line)));
                        continue;
                    }
                }
                emit(&sink, &labeler.line(&context, &line));
            }
        })
    }
}

fn decode_line(buf: &[u8]) -> String {
    let mut line = String::from_utf8_lossy(buf).into_owned();
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Write a line, logging rather than failing on a broken sink so readers
/// keep draining their pipe.
fn emit(sink: &LineSink, line: &str) {
    if let Err(e) = sink.write_line(line) {
        tracing::debug!(error = %e, "dropped output line");
    }
}

/// Ask the child to stop with `SIGTERM`.
fn terminate(child: &Child, context: &Context) {
    let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) else {
        return;
    };
    tracing::debug!(context = %context, pid, "sending SIGTERM");
    if let Err(e) = kill(Pid::from_raw(pid), Signal::SIGTERM) {
        tracing::debug!(context = %context, pid, error = %e, "SIGTERM failed");
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
