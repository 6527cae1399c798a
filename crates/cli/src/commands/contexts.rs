// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `contexts`: list the selected contexts, one per line.

use std::io::Write;

use anyhow::Result;
use kx_core::Context;

pub fn handle(contexts: &[Context], out: &mut impl Write) -> Result<()> {
    for context in contexts {
        writeln!(out, "{context}")?;
    }
    out.flush()?;
    Ok(())
}
