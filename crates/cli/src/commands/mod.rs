// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod contexts;
pub mod run;

use clap::{Args, Subcommand};

/// Arguments handed to kubectl untouched.
#[derive(Args, Debug, Clone, Default)]
pub struct Forwarded {
    /// Arguments passed through to kubectl
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display resources (-w/--watch streams live with one shared header)
    #[command(disable_help_flag = true)]
    Get(Forwarded),
    /// Print container logs (-f/--follow streams live)
    #[command(disable_help_flag = true)]
    Logs(Forwarded),
    /// List events (-w/--watch streams live)
    #[command(disable_help_flag = true)]
    Events(Forwarded),
    /// Show resource usage
    #[command(disable_help_flag = true)]
    Top(Forwarded),
    /// Wait for a condition on resources
    #[command(disable_help_flag = true)]
    Wait(Forwarded),
    /// List API resources
    #[command(disable_help_flag = true)]
    ApiResources(Forwarded),
    /// List API versions
    #[command(disable_help_flag = true)]
    ApiVersions(Forwarded),
    /// Show client version once and each server version
    #[command(disable_help_flag = true)]
    Version(Forwarded),
    /// Print the contexts a run would target
    Contexts,
}

impl Command {
    /// The kubectl subcommand and its forwarded arguments, or `None` for
    /// commands handled locally.
    pub fn forwarded(&self) -> Option<(&'static str, &[String])> {
        let (name, forwarded) = match self {
            Self::Get(f) => ("get", f),
            Self::Logs(f) => ("logs", f),
            Self::Events(f) => ("events", f),
            Self::Top(f) => ("top", f),
            Self::Wait(f) => ("wait", f),
            Self::ApiResources(f) => ("api-resources", f),
            Self::ApiVersions(f) => ("api-versions", f),
            Self::Version(f) => ("version", f),
            Self::Contexts => return None,
        };
        Some((name, &forwarded.args))
    }
}
