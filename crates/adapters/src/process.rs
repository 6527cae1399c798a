// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process runner for one context.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use kx_core::{ContextResult, Invocation, RunError};
use tokio::process::{Child, Command};

/// Adapter that executes one [`Invocation`] of the wrapped tool.
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Run to completion and capture both output streams.
    ///
    /// Never fails outright: start failures and non-zero exits are recorded
    /// on the returned result alongside whatever output was captured.
    async fn run(&self, invocation: &Invocation) -> ContextResult;

    /// Start a long-lived child with piped stdout and stderr.
    fn spawn(&self, invocation: &Invocation) -> Result<Child, RunError>;
}

/// Runs the real `kubectl` (or a configured replacement binary).
#[derive(Clone, Debug)]
pub struct KubectlAdapter {
    program: String,
}

impl KubectlAdapter {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(invocation.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for KubectlAdapter {
    fn default() -> Self {
        Self::new(kx_core::DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl ProcessAdapter for KubectlAdapter {
    async fn run(&self, invocation: &Invocation) -> ContextResult {
        let start = Instant::now();
        let span = tracing::info_span!(
            "kx.run",
            context = %invocation.context,
            subcommand = %invocation.subcommand,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let output = match self.command(invocation).output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    parent: &span,
                    program = %self.program,
                    error = %e,
                    "failed to start process"
                );
                return ContextResult::failure(
                    invocation.context.clone(),
                    String::new(),
                    RunError::spawn(&self.program, &e),
                );
            }
        };

        span.record("exit_code", output.status.code().unwrap_or(-1));
        span.record("duration_ms", start.elapsed().as_millis() as u64);

        ContextResult {
            context: invocation.context.clone(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            error: RunError::from_status(output.status),
        }
    }

    fn spawn(&self, invocation: &Invocation) -> Result<Child, RunError> {
        tracing::debug!(context = %invocation.context, program = %self.program, "spawning");
        self.command(invocation).spawn().map_err(|e| RunError::spawn(&self.program, &e))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Scripted behavior for one context.
    #[derive(Debug, Clone, Default)]
    pub struct FakeResponse {
        pub stdout: String,
        pub stderr: String,
        pub exit_code: i32,
        pub delay: Duration,
        /// `sh -c` script used by `spawn`.
        pub script: Option<String>,
        /// Simulate a missing binary.
        pub start_failure: bool,
    }

    impl FakeResponse {
        pub fn ok(stdout: impl Into<String>) -> Self {
            Self { stdout: stdout.into(), ..Default::default() }
        }

        pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
            Self { stderr: stderr.into(), exit_code, ..Default::default() }
        }

        pub fn script(script: impl Into<String>) -> Self {
            Self { script: Some(script.into()), ..Default::default() }
        }

        pub fn missing_binary() -> Self {
            Self { start_failure: true, ..Default::default() }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    /// In-memory stand-in for [`KubectlAdapter`].
    #[derive(Clone, Default)]
    pub struct FakeProcessAdapter {
        responses: Arc<Mutex<HashMap<String, FakeResponse>>>,
        calls: Arc<Mutex<Vec<Invocation>>>,
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl FakeProcessAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, context: &str, response: FakeResponse) -> &Self {
            self.responses.lock().insert(context.to_string(), response);
            self
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().clone()
        }

        /// Highest number of `run` calls observed in progress at once.
        pub fn peak_in_flight(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }

        fn response(&self, invocation: &Invocation) -> FakeResponse {
            self.responses.lock().get(invocation.context.as_str()).cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl ProcessAdapter for FakeProcessAdapter {
        async fn run(&self, invocation: &Invocation) -> ContextResult {
            self.calls.lock().push(invocation.clone());
            let response = self.response(invocation);

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if response.start_failure {
                let err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
                return ContextResult::failure(
                    invocation.context.clone(),
                    String::new(),
                    RunError::spawn("kubectl", &err),
                );
            }

            let error = (response.exit_code != 0).then_some(RunError::Exit { code: response.exit_code });
            ContextResult {
                context: invocation.context.clone(),
                stdout: response.stdout,
                stderr: response.stderr,
                error,
            }
        }

        fn spawn(&self, invocation: &Invocation) -> Result<Child, RunError> {
            self.calls.lock().push(invocation.clone());
            let response = self.response(invocation);
            if response.start_failure {
                let err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
                return Err(RunError::spawn("kubectl", &err));
            }
            let script = response.script.unwrap_or_default();
            Command::new("sh")
                .arg("-c")
                .arg(script)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(|e| RunError::spawn("sh", &e))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessAdapter, FakeResponse};

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
