// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `version`: shared client versions once, then one server version per context.

use kx_core::{ContextResult, CONTEXT_HEADER};

use super::{Diagnostics, Rendered};
use crate::label::Labeler;

const COLUMN_WIDTH: usize = 30;
const RULE_WIDTH: usize = 50;

const CLIENT: &str = "Client Version:";
const KUSTOMIZE: &str = "Kustomize Version:";
const SERVER: &str = "Server Version:";

fn field<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines().map(str::trim).find_map(|line| line.strip_prefix(prefix)).map(str::trim)
}

pub(crate) fn render(results: &[ContextResult], colorize: bool) -> Rendered {
    let mut diagnostics = Diagnostics::new(false);
    let mut client = None;
    let mut kustomize = None;

    for result in results.iter().filter(|r| r.is_ok()) {
        client = client.or_else(|| field(&result.stdout, CLIENT).filter(|v| !v.is_empty()));
        kustomize = kustomize.or_else(|| field(&result.stdout, KUSTOMIZE).filter(|v| !v.is_empty()));
        if client.is_some() && kustomize.is_some() {
            break;
        }
    }

    let labeler = Labeler::new(COLUMN_WIDTH, colorize);
    let mut rows = String::new();
    for result in results {
        let server = match &result.error {
            Some(error) => {
                diagnostics.error(&result.context, error, &result.output());
                "ERROR"
            }
            None => {
                diagnostics.stderr(&result.context, &result.stderr);
                field(&result.stdout, SERVER).filter(|v| !v.is_empty()).unwrap_or("N/A")
            }
        };
        rows.push_str(&labeler.line(&result.context, server));
        rows.push('\n');
    }

    let mut body = String::new();
    if let Some(client) = client {
        body.push_str(&format!("{CLIENT} {client}\n"));
    }
    if let Some(kustomize) = kustomize {
        body.push_str(&format!("{KUSTOMIZE} {kustomize}\n"));
    }
    if client.is_some() || kustomize.is_some() {
        body.push('\n');
    }
    body.push_str(&format!("{:<width$}  SERVER VERSION\n", CONTEXT_HEADER, width = COLUMN_WIDTH));
    body.push_str(&"-".repeat(RULE_WIDTH));
    body.push('\n');
    body.push_str(&rows);

    diagnostics.finish(body)
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
