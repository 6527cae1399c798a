// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context labels: padding to a shared width and stable per-context colors.

use kx_core::{Context, CONTEXT_HEADER};

const RESET: &str = "\x1b[0m";

/// Bright colors first, then the standard set.
const PALETTE: [&str; 13] = [
    "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m", "\x1b[97m",
    "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m",
];

/// 32-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for b in bytes {
        hash ^= u32::from(*b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// ANSI color escape for a context. The same name always gets the same color.
pub fn context_color(name: &str) -> &'static str {
    PALETTE[(fnv1a(name.as_bytes()) as usize) % PALETTE.len()]
}

/// Renders context labels padded to a fixed column width.
///
/// Padding is computed from the plain name so color escapes never shift
/// the columns that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labeler {
    width: usize,
    colorize: bool,
}

impl Labeler {
    pub fn new(width: usize, colorize: bool) -> Self {
        Self { width, colorize }
    }

    /// Name, optionally colored, without padding.
    pub fn name(&self, context: &Context) -> String {
        if self.colorize {
            format!("{}{}{}", context_color(context.as_str()), context, RESET)
        } else {
            context.to_string()
        }
    }

    /// Name plus trailing spaces up to the column width.
    pub fn label(&self, context: &Context) -> String {
        let pad = self.width.saturating_sub(context.len());
        format!("{}{}", self.name(context), " ".repeat(pad))
    }

    /// The `CONTEXT` header cell padded to the column width.
    pub fn header(&self) -> String {
        format!("{:<width$}", CONTEXT_HEADER, width = self.width)
    }

    /// `label + two spaces + content`, the shape of every prefixed line.
    pub fn line(&self, context: &Context, content: &str) -> String {
        format!("{}  {}", self.label(context), content)
    }
}
