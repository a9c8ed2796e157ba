//! End-to-end runs of the `page-query` binary.

use std::io::Write;
use std::process::Command;

use serde_json::{json, Value};

fn data_file() -> tempfile::NamedTempFile {
    let docs: Vec<Value> = (0..6)
        .map(|i| {
            let shop = if i < 3 { "s1" } else { "s2" };
            json!({ "_id": format!("d{i}"), "priority": i % 2, "shopId": shop })
        })
        .collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&docs).unwrap().as_bytes())
        .unwrap();
    file
}

fn run(args: &[&str]) -> (bool, String, String) {
    let file = data_file();
    let output = Command::new(env!("CARGO_BIN_EXE_page-query"))
        .arg("--data")
        .arg(file.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn prints_requested_page_as_json() {
    let (ok, stdout, stderr) = run(&["--first", "2", "--sort-by", "priority", "--after", "d2"]);
    assert!(ok, "stderr: {stderr}");

    let connection: Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = connection["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["_id"].as_str().unwrap())
        .collect();
    // priority 0: d0 d2 d4 | priority 1: d1 d3 d5
    assert_eq!(ids, vec!["d4", "d1"]);
    assert_eq!(connection["pageInfo"]["hasNextPage"], json!(true));
    assert_eq!(connection["pageInfo"]["endCursor"], json!("d1"));
    assert_eq!(connection["totalCount"], json!(6));
}

#[test]
fn applies_base_filter() {
    let filter = r#"{"op":"eq","attribute":"shopId","value":"s2"}"#;
    let (ok, stdout, stderr) = run(&["--filter", filter, "--last", "2", "--no-total-count"]);
    assert!(ok, "stderr: {stderr}");

    let connection: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(connection["pageInfo"]["startCursor"], json!("d4"));
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], json!(true));
    assert!(connection.get("totalCount").map_or(true, Value::is_null));
}

#[test]
fn rejects_conflicting_arguments() {
    let (ok, stdout, stderr) = run(&["--first", "2", "--last", "2"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid parameter"), "stderr: {stderr}");
}
