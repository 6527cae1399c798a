// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kx-core: Data model shared by the kubectl-x engine and CLI

pub mod args;
pub mod config;
pub mod context;
pub mod mode;
pub mod result;

pub use args::{detect_output_format, has_column_header, is_follow_mode, is_watch_mode, OutputFormat};
pub use config::{BatchConfig, ConfigError, DEFAULT_BATCH_SIZE, DEFAULT_PROGRAM};
pub use context::{max_label_width, Context, Invocation, CONTEXT_HEADER};
pub use mode::{resolve_mode, OutputMode};
pub use result::{ContextResult, RunError};
