// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered `logs`: every line prefixed with its context.

use kx_core::{max_label_width, ContextResult};

use super::{Diagnostics, Rendered};
use crate::label::Labeler;

pub(crate) fn render(results: &[ContextResult], colorize: bool) -> Rendered {
    let labeler = Labeler::new(max_label_width(results.iter().map(|r| &r.context), false), colorize);
    let mut diagnostics = Diagnostics::new(colorize);
    let mut body = String::new();

    for result in results {
        if let Some(error) = &result.error {
            diagnostics.error(&result.context, error, &result.output());
            continue;
        }
        diagnostics.stderr(&result.context, &result.stderr);

        let text = result.stdout.trim();
        if text.is_empty() {
            continue;
        }
        for line in text.split('\n') {
            body.push_str(&labeler.line(&result.context, line.trim_end_matches('\r')));
            body.push('\n');
        }
    }

    diagnostics.finish(body)
}
