// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! so every buffered line is flushed before `main()` terminates.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed by `main` when non-empty.
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Some contexts failed. Their diagnostics were already printed.
    pub fn contexts_failed(failed: usize, total: usize) -> Self {
        tracing::debug!(failed, total, "contexts failed");
        Self::new(1, String::new())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
