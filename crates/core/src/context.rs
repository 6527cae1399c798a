// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Contexts and the invocation shape forwarded to the wrapped tool.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label printed above the context column whenever a shared header is shown.
pub const CONTEXT_HEADER: &str = "CONTEXT";

/// A named kubeconfig context. Ordering of contexts in a run defines output order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(String);

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Width of the name in characters, used for column padding.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Context {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Widest context name in a batch, optionally floored at the width of
/// [`CONTEXT_HEADER`].
pub fn max_label_width<'a>(
    contexts: impl IntoIterator<Item = &'a Context>,
    with_header: bool,
) -> usize {
    let widest = contexts.into_iter().map(Context::len).max().unwrap_or(0);
    if with_header {
        widest.max(CONTEXT_HEADER.len())
    } else {
        widest
    }
}

/// One execution of the wrapped tool against a single context.
///
/// The forwarded arguments are never inspected here; they land on the
/// command line exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub context: Context,
    pub subcommand: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(context: Context, subcommand: impl Into<String>, args: &[String]) -> Self {
        Self { context, subcommand: subcommand.into(), args: args.to_vec() }
    }

    /// Arguments after the program name:
    /// `--context <name> <subcommand> <args...>`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push("--context".to_string());
        argv.push(self.context.as_str().to_string());
        argv.push(self.subcommand.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
