//! Live streaming for watch and follow modes.

use crate::prelude::*;

#[test]
fn watch_prints_one_shared_header() {
    let cluster = Cluster::with_contexts(&["ctx1", "ctx2", "ctx3"]);
    cluster.kubectl(r#"printf 'NAME   STATUS\n%s-pod   Running\n' "$ctx""#);
    let run = cluster.kx().args(&["get", "pods", "-w"]).passes();

    let stdout = run.stdout();
    assert_eq!(stdout.matches("NAME   STATUS").count(), 1, "{stdout}");
    assert!(stdout.starts_with("CONTEXT  NAME   STATUS\n"), "{stdout}");
    for ctx in ["ctx1", "ctx2", "ctx3"] {
        assert!(stdout.contains(&format!("{ctx}     {ctx}-pod   Running\n")), "{stdout}");
    }
}

#[test]
fn follow_prefixes_every_line() {
    let cluster = Cluster::with_contexts(&["a", "bb"]);
    cluster.kubectl(r#"echo "hello from $ctx"; echo "bye from $ctx""#);
    cluster
        .kx()
        .args(&["logs", "-f", "deploy/api"])
        .passes()
        .stdout_has("a   hello from a\n")
        .stdout_has("a   bye from a\n")
        .stdout_has("bb  hello from bb\n");
}

#[test]
fn stream_exit_failure_sets_exit_code() {
    let cluster = Cluster::with_contexts(&["ok", "bad"]);
    cluster.kubectl(r#"echo "event in $ctx"; [ "$ctx" = bad ] && exit 4; exit 0"#);
    cluster
        .kx()
        .args(&["events", "--watch"])
        .fails()
        .code_eq(1)
        .stdout_has("event in ok")
        .stdout_has("event in bad");
}

#[test]
fn stream_stderr_goes_to_stderr() {
    let cluster = Cluster::with_contexts(&["ctx1"]);
    cluster.kubectl(r#"echo "watch error" >&2"#);
    cluster
        .kx()
        .args(&["get", "pods", "--watch"])
        .passes()
        .stderr_has("watch error")
        .stdout_lacks("watch error");
}

#[test]
fn watch_without_headers_keeps_every_row() {
    let cluster = Cluster::with_contexts(&["ctx1", "ctx2"]);
    cluster.kubectl(r#"printf '%s-a   Running\n%s-b   Running\n' "$ctx" "$ctx""#);
    let run = cluster.kx().args(&["get", "pods", "-w", "--no-headers"]).passes();

    let stdout = run.stdout();
    assert!(!stdout.contains("CONTEXT"), "{stdout}");
    for row in ["ctx1  ctx1-a", "ctx1  ctx1-b", "ctx2  ctx2-a", "ctx2  ctx2-b"] {
        assert!(stdout.contains(row), "{stdout}");
    }
}
