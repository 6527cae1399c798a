// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merged `kind: List` documents for `-o json` and `-o yaml`.

use std::fmt;

use kx_core::{Context, ContextResult};
use serde_json::{Map, Value};

use super::{Diagnostics, Rendered};
use crate::error::EngineError;

type Object = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Format {
    fn name(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        }
    }

    fn parse(self, text: &str) -> Result<Object, String> {
        match self {
            Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn encode(self, document: &Value) -> Result<String, EngineError> {
        let encoded = match self {
            Format::Json => serde_json::to_string_pretty(document)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::to_string(document).map_err(|e| e.to_string()),
        };
        encoded.map_err(|message| EngineError::Encode { format: self.name(), message })
    }
}

/// Tag a list element: `metadata.context`, creating `metadata` when absent
/// or not an object.
fn tag_item(item: &mut Object, context: &Context) {
    let name = Value::String(context.to_string());
    match item.get_mut("metadata") {
        Some(Value::Object(metadata)) => {
            metadata.insert("context".to_string(), name);
        }
        _ => {
            let mut metadata = Object::new();
            metadata.insert("context".to_string(), name);
            item.insert("metadata".to_string(), Value::Object(metadata));
        }
    }
}

/// Tag a standalone object: `metadata.context` when it has metadata,
/// a top-level `context` otherwise.
fn tag_object(object: &mut Object, context: &Context) {
    let name = Value::String(context.to_string());
    match object.get_mut("metadata") {
        Some(Value::Object(metadata)) => {
            metadata.insert("context".to_string(), name);
        }
        _ => {
            object.insert("context".to_string(), name);
        }
    }
}

/// Items contributed by one successful context, in its own order.
fn collect_items(mut document: Object, context: &Context, items: &mut Vec<Value>) {
    match document.remove("items") {
        Some(Value::Array(list)) => {
            for item in list {
                if let Value::Object(mut item) = item {
                    tag_item(&mut item, context);
                    items.push(Value::Object(item));
                }
            }
        }
        // Present but not a list: nothing usable.
        Some(_) => {}
        None => {
            tag_object(&mut document, context);
            items.push(Value::Object(document));
        }
    }
}

pub(crate) fn render(results: &[ContextResult], format: Format) -> Result<Rendered, EngineError> {
    let mut diagnostics = Diagnostics::new(false);
    let mut items = Vec::new();

    for result in results {
        let context = &result.context;

        if let Some(error) = &result.error {
            // A failing run may still print a structured payload; keep it.
            match format.parse(&result.stdout) {
                Ok(mut payload) if !result.stdout.trim().is_empty() => {
                    diagnostics.error(context, error, "");
                    payload.insert("context".to_string(), Value::String(context.to_string()));
                    payload.insert("error".to_string(), Value::String(error.to_string()));
                    items.push(Value::Object(payload));
                }
                _ => diagnostics.error(context, error, &result.output()),
            }
            continue;
        }

        diagnostics.stderr(context, &result.stderr);
        match format.parse(&result.stdout) {
            Ok(document) => collect_items(document, context, &mut items),
            Err(message) => diagnostics.parse_failure(context, format, &message),
        }
    }

    let mut envelope = Object::new();
    envelope.insert("apiVersion".to_string(), Value::String("v1".to_string()));
    envelope.insert("items".to_string(), Value::Array(items));
    envelope.insert("kind".to_string(), Value::String("List".to_string()));

    let body = format.encode(&Value::Object(envelope))?;
    Ok(diagnostics.finish(body))
}

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;
