//! Context discovery and selection.

use crate::prelude::*;

#[test]
fn lists_contexts_in_kubeconfig_order() {
    let cluster = Cluster::with_contexts(&["prod-east", "dev", "prod-west"]);
    cluster.kx().args(&["contexts"]).passes().stdout_eq("prod-east\ndev\nprod-west\n");
}

#[test]
fn filter_is_case_insensitive_and_repeatable() {
    let cluster = Cluster::with_contexts(&["Prod-East", "dev", "staging", "prod-west"]);
    cluster
        .kx()
        .args(&["--filter", "^prod", "--filter", "stag", "contexts"])
        .passes()
        .stdout_eq("Prod-East\nstaging\nprod-west\n");
}

#[test]
fn exclude_removes_matches() {
    let cluster = Cluster::with_contexts(&["prod-east", "prod-sandbox", "dev"]);
    cluster
        .kx()
        .args(&["--filter", "prod", "--exclude", "SANDBOX", "contexts"])
        .passes()
        .stdout_eq("prod-east\n");
}

#[test]
fn no_match_is_fatal() {
    let cluster = Cluster::with_contexts(&["dev"]);
    cluster
        .kx()
        .args(&["--filter", "prod", "--filter", "stage", "contexts"])
        .fails()
        .code_eq(1)
        .stderr_has("no contexts match filter patterns: prod, stage");
}

#[test]
fn excluding_everything_is_fatal() {
    let cluster = Cluster::with_contexts(&["dev", "qa"]);
    cluster
        .kx()
        .args(&["--exclude", ".", "get", "pods"])
        .fails()
        .stderr_has("all contexts excluded by patterns: .");
}

#[test]
fn invalid_pattern_is_fatal() {
    let cluster = Cluster::with_contexts(&["dev"]);
    cluster.kx().args(&["--filter", "(", "contexts"]).fails().stderr_has("invalid regex pattern");
}

#[test]
fn empty_kubeconfig_is_fatal_before_any_process_runs() {
    let cluster = Cluster::with_contexts(&[]);
    cluster.kubectl("echo ran");
    cluster
        .kx()
        .args(&["get", "pods"])
        .fails()
        .code_eq(1)
        .stderr_has("no contexts found in kubeconfig")
        .stdout_lacks("ran");
}

#[test]
fn missing_kubeconfig_is_reported() {
    cli()
        .env("KUBECONFIG", "/nonexistent/kubeconfig")
        .args(&["contexts"])
        .fails()
        .stderr_has("failed to read kubeconfig /nonexistent/kubeconfig");
}
