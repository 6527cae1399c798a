//! Buffered table output across contexts.

use crate::prelude::*;

const PODS: &str = r#"printf 'NAME   STATUS\npod-%s   Running\n' "$ctx""#;

#[test]
fn merges_tables_under_one_header() {
    let cluster = Cluster::with_contexts(&["ctx1", "ctx2"]);
    cluster.kubectl(PODS);
    cluster
        .kx()
        .args(&["get", "pods"])
        .passes()
        .stdout_eq(
            "CONTEXT  NAME        STATUS\n\
             ctx1     pod-ctx1    Running\n\
             ctx2     pod-ctx2    Running\n",
        )
        .stderr_lacks("Context");
}

#[test]
fn output_follows_kubeconfig_order_not_completion_order() {
    let cluster = Cluster::with_contexts(&["slow", "fast"]);
    cluster.kubectl(&format!(r#"[ "$ctx" = slow ] && sleep 0.3
{PODS}"#));
    cluster.kx().args(&["get", "pods"]).passes().stdout_eq(
        "CONTEXT  NAME        STATUS\n\
         slow     pod-slow    Running\n\
         fast     pod-fast    Running\n",
    );
}

#[test]
fn forwards_context_and_arguments() {
    let cluster = Cluster::with_contexts(&["ctx1"]);
    cluster.kubectl(r#"echo "$ctx $sub $*""#);
    cluster
        .kx()
        .args(&["get", "pods", "-n", "kube-system", "-l", "app=web"])
        .passes()
        .stdout_eq("ctx1     ctx1 get pods -n kube-system -l app=web\n");
}

#[test]
fn batch_size_of_one_still_runs_every_context() {
    let cluster = Cluster::with_contexts(&["a", "b", "c"]);
    cluster.kubectl(PODS);
    cluster
        .kx()
        .env("KX_BATCH_SIZE", "1")
        .args(&["top", "pods"])
        .passes()
        .stdout_has("a        pod-a    Running")
        .stdout_has("b        pod-b    Running")
        .stdout_has("c        pod-c    Running");
}

#[test]
fn logs_are_prefixed_without_a_header() {
    let cluster = Cluster::with_contexts(&["a", "bbb"]);
    cluster.kubectl(r#"printf 'line one\nline two\n'"#);
    cluster.kx().args(&["logs", "deploy/api"]).passes().stdout_eq(
        "a    line one\n\
         a    line two\n\
         bbb  line one\n\
         bbb  line two\n",
    );
}

#[test]
fn single_column_output_keeps_every_row() {
    let cluster = Cluster::with_contexts(&["ctx1", "ctx2"]);
    cluster.kubectl(r#"printf 'apps/v1\nbatch/v1\nv1\n'"#);
    cluster.kx().args(&["api-versions"]).passes().stdout_eq(
        "ctx1     apps/v1\n\
         ctx1     batch/v1\n\
         ctx1     v1\n\
         ctx2     apps/v1\n\
         ctx2     batch/v1\n\
         ctx2     v1\n",
    );
}
