//! JSON and YAML output merged into one list.

use crate::prelude::*;

const POD_JSON: &str = r#"printf '{"apiVersion":"v1","kind":"List","items":[{"metadata":{"name":"pod-%s"}}]}' "$ctx""#;

#[test]
fn json_items_are_merged_and_tagged() {
    let cluster = Cluster::with_contexts(&["ctx1", "ctx2"]);
    cluster.kubectl(POD_JSON);
    let run = cluster.kx().args(&["get", "pods", "-o", "json"]).passes();

    let merged: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(merged["apiVersion"], "v1");
    assert_eq!(merged["kind"], "List");
    let items = merged["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["metadata"]["name"], "pod-ctx1");
    assert_eq!(items[0]["metadata"]["context"], "ctx1");
    assert_eq!(items[1]["metadata"]["context"], "ctx2");
}

#[test]
fn single_object_becomes_an_item() {
    let cluster = Cluster::with_contexts(&["ctx1"]);
    cluster.kubectl(r#"printf '{"kind":"Pod","metadata":{"name":"web"}}'"#);
    let run = cluster.kx().args(&["get", "pod", "web", "-ojson"]).passes();

    let merged: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(merged["items"][0]["kind"], "Pod");
    assert_eq!(merged["items"][0]["metadata"]["context"], "ctx1");
}

#[test]
fn yaml_output_is_merged() {
    let cluster = Cluster::with_contexts(&["ctx1"]);
    cluster.kubectl(r#"printf 'apiVersion: v1\nkind: List\nitems:\n- metadata:\n    name: pod1\n'"#);
    cluster.kx().args(&["get", "pods", "--output=yaml"]).passes().stdout_eq(
        "apiVersion: v1\n\
         items:\n\
         - metadata:\n    context: ctx1\n    name: pod1\n\
         kind: List\n",
    );
}

#[test]
fn unparseable_output_is_reported_and_skipped() {
    let cluster = Cluster::with_contexts(&["ok", "garbled"]);
    cluster.kubectl(&format!(
        r#"if [ "$ctx" = garbled ]; then echo "not json"; exit 0; fi
{POD_JSON}"#
    ));
    let run = cluster
        .kx()
        .args(&["get", "pods", "-o", "json"])
        .passes()
        .stderr_has("Context garbled: Failed to parse JSON");

    let merged: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(merged["items"].as_array().unwrap().len(), 1);
}
