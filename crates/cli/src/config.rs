// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered settings: flags > environment > config file > defaults.

use std::path::Path;

use anyhow::{Context as _, Result};
use kx_core::{BatchConfig, DEFAULT_BATCH_SIZE, DEFAULT_PROGRAM};
use serde::Deserialize;

use crate::env;

/// One source of settings. Unset fields defer to the layer below.
///
/// The config file deserializes straight into this shape:
///
/// ```toml
/// batch_size = 10
/// kubectl = "/usr/local/bin/kubectl"
/// filter = ["^prod-"]
/// exclude = ["sandbox"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layer {
    pub batch_size: Option<usize>,
    pub kubectl: Option<String>,
    pub filter: Vec<String>,
    pub exclude: Vec<String>,
}

impl Layer {
    /// Settings from `KX_BATCH_SIZE` and `KX_KUBECTL`.
    pub fn from_env() -> Self {
        Self { batch_size: env::batch_size(), kubectl: env::kubectl(), ..Self::default() }
    }

    /// Read a TOML config file. A missing file is an empty layer.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Fill unset fields from `lower`. Pattern lists replace rather than merge.
    pub fn over(self, lower: Layer) -> Layer {
        Layer {
            batch_size: self.batch_size.or(lower.batch_size),
            kubectl: self.kubectl.or(lower.kubectl),
            filter: if self.filter.is_empty() { lower.filter } else { self.filter },
            exclude: if self.exclude.is_empty() { lower.exclude } else { self.exclude },
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub batch: BatchConfig,
    pub filter: Vec<String>,
    pub exclude: Vec<String>,
}

impl Settings {
    pub fn resolve(layer: Layer, progress: bool) -> Result<Self> {
        let batch = BatchConfig::new(layer.batch_size.unwrap_or(DEFAULT_BATCH_SIZE))?
            .program(layer.kubectl.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()))
            .progress(progress);
        Ok(Self { batch, filter: layer.filter, exclude: layer.exclude })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
