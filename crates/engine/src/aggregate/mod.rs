// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output aggregation: reconcile per-context results into one document.
//!
//! Every renderer is pure. It produces the diagnostic text and the primary
//! body separately, and [`Aggregator::write`] flushes diagnostics before
//! the body so an error never trails the output it belongs to.

mod logs;
mod structured;
mod table;
mod version;

use std::fmt::Write as _;
use std::io::Write;

use kx_core::{Context, ContextResult, OutputMode, RunError};

use crate::error::EngineError;
use crate::label::Labeler;

pub(crate) use structured::Format;

/// Rendered output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Destined for stderr.
    pub diagnostics: String,
    /// Destined for stdout.
    pub body: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    colorize: bool,
}

impl Aggregator {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    /// Render `results` in `mode`. Streaming output was already written live,
    /// so [`OutputMode::Stream`] renders nothing.
    pub fn render(&self, mode: OutputMode, results: &[ContextResult]) -> Result<Rendered, EngineError> {
        match mode {
            OutputMode::Table => Ok(table::render(results, self.colorize)),
            OutputMode::Json => structured::render(results, Format::Json),
            OutputMode::Yaml => structured::render(results, Format::Yaml),
            OutputMode::Logs => Ok(logs::render(results, self.colorize)),
            OutputMode::Version => Ok(version::render(results, self.colorize)),
            OutputMode::Stream => Ok(Rendered::default()),
        }
    }

    /// Render and write: all diagnostics to `err` first, then the body to `out`.
    pub fn write(
        &self,
        mode: OutputMode,
        results: &[ContextResult],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), EngineError> {
        let rendered = self.render(mode, results)?;
        err.write_all(rendered.diagnostics.as_bytes())?;
        err.flush()?;
        out.write_all(rendered.body.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Attributed diagnostic lines accumulated during a render.
#[derive(Default)]
pub(crate) struct Diagnostics {
    text: String,
    colorize: bool,
}

impl Diagnostics {
    pub(crate) fn new(colorize: bool) -> Self {
        Self { text: String::new(), colorize }
    }

    fn name(&self, context: &Context) -> String {
        Labeler::new(0, self.colorize).name(context)
    }

    /// `Context <name>: Error: <err>` plus the captured output, if any.
    pub(crate) fn error(&mut self, context: &Context, error: &RunError, output: &str) {
        let name = self.name(context);
        let _ = writeln!(self.text, "Context {name}: Error: {error}");
        let output = output.trim_end();
        if !output.is_empty() {
            let _ = writeln!(self.text, "Output: {output}");
        }
    }

    /// Forward stderr of a successful run, one attributed line each.
    pub(crate) fn stderr(&mut self, context: &Context, stderr: &str) {
        for line in stderr.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let name = self.name(context);
            let _ = writeln!(self.text, "Context {name}: {line}");
        }
    }

    pub(crate) fn parse_failure(&mut self, context: &Context, format: Format, message: &str) {
        let _ = writeln!(self.text, "Context {}: Failed to parse {format}: {message}", self.name(context));
    }

    pub(crate) fn finish(self, body: String) -> Rendered {
        Rendered { diagnostics: self.text, body }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
