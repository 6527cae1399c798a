// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for running the wrapped tool as OS processes

pub mod process;

#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessAdapter, FakeResponse};
pub use process::{KubectlAdapter, ProcessAdapter};
