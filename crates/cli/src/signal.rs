// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt handling for streaming runs.

use anyhow::{Context as _, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

/// Token cancelled on the first SIGINT or SIGTERM.
///
/// Handlers are registered before this returns, so an interrupt that
/// arrives while children are starting is not lost.
pub fn cancel_on_interrupt() -> Result<CancellationToken> {
    let mut interrupt =
        signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::debug!("SIGINT received"),
            _ = terminate.recv() => tracing::debug!("SIGTERM received"),
            () = cancel.cancelled() => return,
        }
        cancel.cancel();
    });
    Ok(token)
}
