// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only inspection of forwarded kubectl arguments.
//!
//! These helpers only look for flags; the argument vector itself is always
//! forwarded untouched.

use std::fmt;

/// Output format requested through `-o`/`--output` in the forwarded arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Json,
    Yaml,
}

impl OutputFormat {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => OutputFormat::Default,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Default => "default",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

/// Values given to `-o`/`--output` in any of their spellings, in order.
fn output_values(args: &[String]) -> impl Iterator<Item = &str> {
    args.iter().enumerate().filter_map(|(i, arg)| {
        if arg == "-o" || arg == "--output" {
            args.get(i + 1).map(String::as_str)
        } else if let Some(value) = arg.strip_prefix("--output=") {
            Some(value)
        } else {
            arg.strip_prefix("-o")
                .map(|v| v.strip_prefix('=').unwrap_or(v))
                .filter(|v| !v.is_empty())
        }
    })
}

/// Find the first `json` or `yaml` output request.
///
/// Recognizes `-o json`, `--output json`, `-ojson`, `-o=json` and
/// `--output=json` (case-insensitive). Other formats such as `wide` or
/// `jsonpath=...` fall back to [`OutputFormat::Default`] and keep scanning.
pub fn detect_output_format(args: &[String]) -> OutputFormat {
    output_values(args)
        .map(OutputFormat::parse)
        .find(|format| *format != OutputFormat::Default)
        .unwrap_or_default()
}

/// Output formats that never print a column header line.
fn is_headerless_format(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    matches!(value.as_str(), "json" | "yaml" | "name")
        || ["jsonpath", "go-template", "template"].iter().any(|p| value.starts_with(p))
}

/// Whether kubectl's output for these arguments opens with a column header.
///
/// False for `--no-headers` and for `-o json|yaml|name|jsonpath…|go-template…`.
pub fn has_column_header(args: &[String]) -> bool {
    let no_headers = args.iter().any(|a| a == "--no-headers" || a == "--no-headers=true");
    !no_headers && !output_values(args).any(is_headerless_format)
}

/// `get`/`events` watch flags: `-w`, `--watch`, `--watch-only`.
pub fn is_watch_mode(args: &[String]) -> bool {
    args.iter().any(|a| a == "-w" || a == "--watch" || a == "--watch-only")
}

/// `logs` follow flags: `-f`, `--follow`.
pub fn is_follow_mode(args: &[String]) -> bool {
    args.iter().any(|a| a == "-f" || a == "--follow")
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
