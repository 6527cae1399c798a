// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Batch-level failures. Per-context failures never surface here; they are
/// carried on each `ContextResult`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no contexts selected")]
    NoContexts,

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to encode merged {format}: {message}")]
    Encode { format: &'static str, message: String },
}
