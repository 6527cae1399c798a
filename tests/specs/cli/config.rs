//! Settings layering: flags over environment over config file.

use crate::prelude::*;

#[test]
fn config_file_supplies_filter() {
    let cluster = Cluster::with_contexts(&["prod", "dev"]);
    let config = cluster.config("filter = [\"dev\"]\n");
    cluster
        .kx()
        .env("KX_CONFIG", config.display().to_string())
        .args(&["contexts"])
        .passes()
        .stdout_eq("dev\n");
}

#[test]
fn flag_replaces_config_filter() {
    let cluster = Cluster::with_contexts(&["prod", "dev"]);
    let config = cluster.config("filter = [\"dev\"]\n");
    cluster
        .kx()
        .env("KX_CONFIG", config.display().to_string())
        .args(&["--filter", "prod", "contexts"])
        .passes()
        .stdout_eq("prod\n");
}

#[test]
fn unknown_config_key_is_rejected() {
    let cluster = Cluster::with_contexts(&["dev"]);
    let config = cluster.config("batch = 3\n");
    cluster
        .kx()
        .env("KX_CONFIG", config.display().to_string())
        .args(&["contexts"])
        .fails()
        .stderr_has("failed to parse config");
}

#[test]
fn zero_batch_size_is_rejected() {
    let cluster = Cluster::with_contexts(&["dev"]);
    cluster
        .kx()
        .args(&["-b", "0", "get", "pods"])
        .fails()
        .code_eq(1)
        .stderr_has("batch size must be at least 1, got 0");
}

#[test]
fn kubectl_flag_overrides_environment() {
    let cluster = Cluster::with_contexts(&["dev"]);
    cluster
        .kx()
        .args(&["--kubectl", "/nonexistent/kubectl", "get", "pods"])
        .fails()
        .stderr_has("Context dev: Error: failed to start");
}
