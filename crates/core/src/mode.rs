// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output shape the aggregator renders for a batch.

use std::fmt;

use crate::args::{detect_output_format, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Realigned kubectl table with a leading CONTEXT column.
    Table,
    /// Merged `kind: List` document rendered as JSON.
    Json,
    /// Merged `kind: List` document rendered as YAML.
    Yaml,
    /// Every output line prefixed with its context.
    Logs,
    /// Client version once, then one server version per context.
    Version,
    /// Output was already written live by the multiplexer.
    Stream,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::Table => "table",
            OutputMode::Json => "json",
            OutputMode::Yaml => "yaml",
            OutputMode::Logs => "logs",
            OutputMode::Version => "version",
            OutputMode::Stream => "stream",
        })
    }
}

/// Pick the buffered output mode for a subcommand and its forwarded args.
///
/// An explicit json/yaml request always wins over the subcommand's own
/// text rendering.
pub fn resolve_mode(subcommand: &str, args: &[String]) -> OutputMode {
    match detect_output_format(args) {
        OutputFormat::Json => OutputMode::Json,
        OutputFormat::Yaml => OutputMode::Yaml,
        OutputFormat::Default => match subcommand {
            "logs" => OutputMode::Logs,
            "version" => OutputMode::Version,
            _ => OutputMode::Table,
        },
    }
}
