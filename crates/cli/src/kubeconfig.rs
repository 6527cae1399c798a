// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context source: kubeconfig contexts narrowed by regex selection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kx_core::Context;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not determine kubeconfig path")]
    NoPath,

    #[error("failed to read kubeconfig {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse kubeconfig {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_yaml::Error },

    #[error("no contexts found in kubeconfig")]
    Empty,

    #[error("invalid regex pattern {pattern:?}: {source}")]
    InvalidPattern { pattern: String, source: regex::Error },

    #[error("no contexts match filter patterns: {}", patterns.join(", "))]
    NoMatch { patterns: Vec<String> },

    #[error("all contexts excluded by patterns: {}", patterns.join(", "))]
    AllExcluded { patterns: Vec<String> },
}

/// Only the parts of a kubeconfig we read.
#[derive(Deserialize)]
struct Kubeconfig {
    #[serde(default)]
    contexts: Option<Vec<NamedContext>>,
}

#[derive(Deserialize)]
struct NamedContext {
    #[serde(default)]
    name: String,
}

/// Context names in file order. Entries without a name are skipped and
/// repeated names keep their first occurrence.
pub fn parse(text: &str) -> Result<Vec<Context>, serde_yaml::Error> {
    let config: Kubeconfig = serde_yaml::from_str(text)?;
    let mut seen = HashSet::new();
    Ok(config
        .contexts
        .unwrap_or_default()
        .into_iter()
        .filter(|c| !c.name.is_empty())
        .filter(|c| seen.insert(c.name.clone()))
        .map(|c| Context::new(c.name))
        .collect())
}

pub fn load(path: &Path) -> Result<Vec<Context>, SourceError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| SourceError::Read { path: path.to_path_buf(), source })?;
    let contexts =
        parse(&text).map_err(|source| SourceError::Parse { path: path.to_path_buf(), source })?;
    if contexts.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(contexts)
}

/// Case-insensitive include/exclude patterns.
///
/// A context is kept when it matches any include pattern (or there are
/// none) and no exclude pattern.
#[derive(Debug)]
pub struct Selector {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, SourceError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| SourceError::InvalidPattern { pattern: pattern.clone(), source })
        })
        .collect()
}

impl Selector {
    pub fn new(filter: &[String], exclude: &[String]) -> Result<Self, SourceError> {
        Ok(Self { include: compile(filter)?, exclude: compile(exclude)? })
    }

    fn included(&self, context: &Context) -> bool {
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(context.as_str()))
    }

    fn excluded(&self, context: &Context) -> bool {
        self.exclude.iter().any(|re| re.is_match(context.as_str()))
    }

    /// Keep matching contexts in kubeconfig order. An empty result is an error.
    pub fn apply(&self, contexts: Vec<Context>) -> Result<Vec<Context>, SourceError> {
        let included: Vec<Context> = contexts.into_iter().filter(|c| self.included(c)).collect();
        if included.is_empty() {
            return Err(SourceError::NoMatch { patterns: patterns(&self.include) });
        }
        let selected: Vec<Context> = included.into_iter().filter(|c| !self.excluded(c)).collect();
        if selected.is_empty() {
            return Err(SourceError::AllExcluded { patterns: patterns(&self.exclude) });
        }
        Ok(selected)
    }
}

fn patterns(regexes: &[Regex]) -> Vec<String> {
    regexes.iter().map(|re| re.as_str().to_string()).collect()
}

/// The ordered, filtered contexts a run targets.
pub fn selected_contexts(
    path: Option<&Path>,
    filter: &[String],
    exclude: &[String],
) -> Result<Vec<Context>, SourceError> {
    let selector = Selector::new(filter, exclude)?;
    let path = path.ok_or(SourceError::NoPath)?;
    let contexts = load(path)?;
    tracing::debug!(path = %path.display(), found = contexts.len(), "loaded kubeconfig");
    selector.apply(contexts)
}

#[cfg(test)]
#[path = "kubeconfig_tests.rs"]
mod tests;
