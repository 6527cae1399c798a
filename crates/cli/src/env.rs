// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Default tracing filter when `KX_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolve the kubeconfig: first entry of `KUBECONFIG` > `~/.kube/config`
pub fn kubeconfig_path() -> Option<PathBuf> {
    if let Some(value) = std::env::var_os("KUBECONFIG").filter(|v| !v.is_empty()) {
        if let Some(first) = std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()) {
            return Some(first);
        }
    }
    dirs::home_dir().map(|home| home.join(".kube").join("config"))
}

/// Resolve the config file: `KX_CONFIG` > `<config_dir>/kubectl-x/config.toml`
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("KX_CONFIG").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("kubectl-x").join("config.toml"))
}

/// Parallelism override. Unparseable values are ignored.
pub fn batch_size() -> Option<usize> {
    std::env::var("KX_BATCH_SIZE").ok().and_then(|s| s.trim().parse::<usize>().ok())
}

/// Replacement for the `kubectl` binary
pub fn kubectl() -> Option<String> {
    std::env::var("KX_KUBECTL").ok().filter(|s| !s.is_empty())
}

/// `NO_COLOR=1` turns color off.
pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

/// `COLOR=1` forces color on without a terminal.
pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

/// Tracing filter directives (`KX_LOG`, e.g. `debug` or `kx_engine=trace`).
pub fn log_filter() -> String {
    std::env::var("KX_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
