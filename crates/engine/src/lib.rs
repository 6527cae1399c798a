// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kx-engine: Parallel execution and output aggregation
//!
//! - [`Dispatcher`] runs one buffered process per context under a
//!   concurrency limit and returns results in context order.
//! - [`Multiplexer`] follows many live processes at once, writing whole
//!   prefixed lines to shared sinks until completion or cancellation.
//! - [`Aggregator`] turns buffered results into one table, merged
//!   JSON/YAML list, prefixed log stream, or version summary.

pub mod aggregate;
pub mod dispatch;
mod error;
pub mod label;
pub mod progress;
pub mod sink;
pub mod stream;

pub use aggregate::{Aggregator, Rendered};
pub use dispatch::Dispatcher;
pub use error::EngineError;
pub use label::{context_color, Labeler};
pub use progress::Progress;
pub use sink::{LineSink, SharedBuffer};
pub use stream::{Multiplexer, StreamOptions, StreamOutcome, StreamStatus};
