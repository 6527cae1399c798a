//! Help and version output.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_two() {
    cli().fails().code_eq(2).stderr_has("Usage:");
}

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("get")
        .stdout_has("logs")
        .stdout_has("api-resources")
        .stdout_has("contexts")
        .stdout_has("--batch-size");
}

#[test]
fn version_flag_shows_package_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2.0");
}

#[test]
fn unknown_subcommand_is_rejected() {
    cli().args(&["apply", "-f", "x.yaml"]).fails().code_eq(2);
}

/// `--help` after a subcommand belongs to kubectl, so it is forwarded.
#[test]
fn help_after_subcommand_is_forwarded() {
    let cluster = Cluster::with_contexts(&["ctx1"]);
    cluster.kubectl(r#"echo "args: $*""#);
    cluster.kx().args(&["get", "--help"]).passes().stdout_has("args: --help");
}
