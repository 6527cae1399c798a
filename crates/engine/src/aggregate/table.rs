// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Re-aligned table with a leading context column.

use std::sync::LazyLock;

use kx_core::{max_label_width, Context, ContextResult};
use regex::Regex;

use super::{Diagnostics, Rendered};
use crate::label::Labeler;

/// Columns in kubectl's table output are separated by runs of two or more blanks.
#[allow(clippy::expect_used)]
static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("constant regex pattern is valid"));

const COLUMN_GAP: &str = "    ";

/// Split one line into trimmed, non-empty column values.
pub(crate) fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_SEPARATOR.split(line).map(str::trim).filter(|c| !c.is_empty()).collect()
}

struct Parsed<'a> {
    context: &'a Context,
    rows: Vec<Vec<&'a str>>,
}

impl Parsed<'_> {
    /// A header needs data below it and at least two columns.
    fn has_header(&self) -> bool {
        self.rows.len() > 1 && self.rows[0].len() >= 2
    }
}

/// Shared per-index column widths across header and every data row.
#[derive(Default)]
struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    fn observe(&mut self, columns: &[&str]) {
        for (i, col) in columns.iter().enumerate() {
            let width = col.chars().count();
            match self.0.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => self.0.push(width),
            }
        }
    }

    fn format(&self, columns: &[&str]) -> String {
        let padded: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let width = self.0.get(i).copied().unwrap_or(0);
                format!("{col:<width$}")
            })
            .collect();
        padded.join(COLUMN_GAP).trim_end().to_string()
    }
}

pub(crate) fn render(results: &[ContextResult], colorize: bool) -> Rendered {
    let mut diagnostics = Diagnostics::new(colorize);
    let mut labeled = Vec::new();
    let mut parsed = Vec::new();

    for result in results {
        if let Some(error) = &result.error {
            diagnostics.error(&result.context, error, &result.output());
            labeled.push(&result.context);
            continue;
        }
        diagnostics.stderr(&result.context, &result.stderr);

        let text = result.stdout.trim();
        if text.is_empty() {
            continue;
        }
        labeled.push(&result.context);
        parsed.push(Parsed {
            context: &result.context,
            rows: text.split('\n').map(|line| split_columns(line.trim())).collect(),
        });
    }

    // The first output with a header supplies it for everyone.
    let header = parsed.iter().find(|p| p.has_header()).map(|p| p.rows[0].clone());
    let skip = |p: &Parsed<'_>| usize::from(header.is_some() && p.has_header());

    let mut widths = ColumnWidths::default();
    if let Some(header) = &header {
        widths.observe(header);
    }
    for p in &parsed {
        for row in &p.rows[skip(p)..] {
            widths.observe(row);
        }
    }

    let labeler = Labeler::new(max_label_width(labeled, true), colorize);
    let mut body = String::new();
    if let Some(header) = &header {
        body.push_str(&format!("{}  {}\n", labeler.header(), widths.format(header)));
    }
    for p in &parsed {
        for row in p.rows[skip(p)..].iter().filter(|r| !r.is_empty()) {
            body.push_str(&labeler.line(p.context, &widths.format(row)));
            body.push('\n');
        }
    }

    diagnostics.finish(body)
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
