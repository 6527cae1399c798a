// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit per-run configuration handed to the dispatcher.

use std::num::NonZeroUsize;

/// Contexts processed in parallel when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Wrapped tool looked up on `PATH` when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "kubectl";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Upper bound on concurrently running child processes.
    pub batch_size: NonZeroUsize,
    /// Program invoked once per context.
    pub program: String,
    /// Draw the advisory progress bar on stderr.
    pub progress: bool,
}

impl BatchConfig {
    pub fn new(batch_size: usize) -> Result<Self, ConfigError> {
        let batch_size =
            NonZeroUsize::new(batch_size).ok_or(ConfigError::InvalidBatchSize(batch_size))?;
        Ok(Self { batch_size, ..Self::default() })
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::MIN.saturating_add(DEFAULT_BATCH_SIZE - 1),
            program: DEFAULT_PROGRAM.to_string(),
            progress: false,
        }
    }
}
