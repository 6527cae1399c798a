// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-context outcome of one wrapped-tool execution.

use crate::context::Context;

/// Why a single context's execution did not succeed.
///
/// Display strings are what users see after `Context <name>: Error: `.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// The process could not be started (binary missing, permission denied).
    #[error("failed to start `{program}`: {message}")]
    Spawn { program: String, message: String },

    /// The process exited with a non-zero status.
    #[error("exit status {code}")]
    Exit { code: i32 },

    /// The process was terminated by a signal before exiting.
    #[error("terminated by signal {signal}")]
    Signal { signal: i32 },

    /// The run was interrupted before the process finished.
    #[error("cancelled")]
    Cancelled,

    /// The worker driving this context panicked or was aborted.
    #[error("worker failed: {message}")]
    Join { message: String },
}

impl RunError {
    pub fn spawn(program: impl Into<String>, source: &std::io::Error) -> Self {
        Self::Spawn { program: program.into(), message: source.to_string() }
    }

    /// Classify a finished process status. Returns `None` on success.
    pub fn from_status(status: std::process::ExitStatus) -> Option<Self> {
        if status.success() {
            return None;
        }
        if let Some(code) = status.code() {
            return Some(Self::Exit { code });
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Some(Self::Signal { signal });
            }
        }
        Some(Self::Exit { code: -1 })
    }
}

/// Captured output of one context. Produced exactly once per context and
/// stored at that context's position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextResult {
    pub context: Context,
    pub stdout: String,
    pub stderr: String,
    pub error: Option<RunError>,
}

impl ContextResult {
    pub fn success(context: Context, stdout: impl Into<String>) -> Self {
        Self { context, stdout: stdout.into(), stderr: String::new(), error: None }
    }

    pub fn failure(context: Context, output: impl Into<String>, error: RunError) -> Self {
        Self { context, stdout: output.into(), stderr: String::new(), error: Some(error) }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Combined view: stdout followed by stderr.
    pub fn output(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        if self.stdout.is_empty() {
            return self.stderr.clone();
        }
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        combined.push_str(&self.stdout);
        if !self.stdout.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
