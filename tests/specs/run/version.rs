//! `version` prints the client once and one server row per context.

use crate::prelude::*;

#[test]
fn summarizes_server_versions() {
    let cluster = Cluster::with_contexts(&["prod", "down"]);
    cluster.kubectl(
        r#"if [ "$ctx" = down ]; then echo "unreachable" >&2; exit 1; fi
printf 'Client Version: v1.30.1\nKustomize Version: v5.0.4\nServer Version: v1.29.3\n'"#,
    );
    let rule = "-".repeat(50);
    cluster
        .kx()
        .args(&["version"])
        .fails()
        .code_eq(1)
        .stdout_eq(&format!(
            "Client Version: v1.30.1\n\
             Kustomize Version: v5.0.4\n\
             \n\
             {:<30}  SERVER VERSION\n\
             {rule}\n\
             {:<30}  v1.29.3\n\
             {:<30}  ERROR\n",
            "CONTEXT", "prod", "down",
        ))
        .stderr_has("Context down: Error: exit status 1");
}
