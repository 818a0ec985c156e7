// CLI integration tests: run the binary against small dumps in a tempdir.
use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_sqldump2json");
    Command::new(exe)
}

fn header(name: &str, rows: usize) -> String {
    format!("-- {} ({} rows)\n-- {}\n", name, rows, "=".repeat(44))
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn extracts_tables_and_summary() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dump = temp.path().join("dump.sql");
    let out = temp.path().join("out");
    let text = format!(
        "-- Database dump\n\n{}INSERT INTO users (id, name, active) VALUES (1, 'Alice', TRUE);\n\
         INSERT INTO users (id, name, active) VALUES (2, 'O''Brien', false);\n\
         INSERT INTO users (id, name, active) VALUES (3, 'Broken');\n\n\
         {}INSERT INTO posts (id, tags, score) VALUES (10, [\"a\"], 4.5);\n",
        header("users", 3),
        header("posts", 1),
    );
    fs::write(&dump, text).expect("write dump");

    let run = cmd()
        .args([dump.to_str().unwrap(), "-o", out.to_str().unwrap(), "--quiet"])
        .output()
        .expect("run");
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
    let stderr = String::from_utf8_lossy(&run.stderr);
    assert!(stderr.contains("Row has 2 values but 3 columns"), "{stderr}");

    let users = read_json(&out.join("users.json"));
    assert_eq!(users["table_name"], "users");
    assert_eq!(users["columns"], json!(["id", "name", "active"]));
    assert_eq!(users["row_count"], 2);
    assert_eq!(
        users["data"],
        json!([
            {"id": 1, "name": "Alice", "active": true},
            {"id": 2, "name": "O'Brien", "active": false}
        ])
    );
    assert!(users["extracted_at"].as_str().is_some());

    let posts = read_json(&out.join("posts.json"));
    assert_eq!(posts["data"], json!([{"id": 10, "tags": ["a"], "score": 4.5}]));

    let summary = read_json(&out.join("extraction_summary.json"));
    assert_eq!(summary["extraction_info"]["total_tables"], 2);
    assert_eq!(summary["extraction_info"]["total_rows"], 3);
    assert_eq!(summary["tables"]["posts"]["file"], "posts.json");
    assert_eq!(summary["extraction_info"]["extracted_at"], users["extracted_at"]);
}

#[test]
fn missing_input_fails_before_writing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("out");
    let run = cmd()
        .args(["does-not-exist.sql", "-o", out.to_str().unwrap()])
        .output()
        .expect("run");
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("not found"));
    assert!(!out.exists());
}

#[test]
fn dump_without_headers_writes_empty_summary_unless_required() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dump = temp.path().join("plain.sql");
    fs::write(&dump, "INSERT INTO t (a) VALUES (1);\n").expect("write dump");

    let out = temp.path().join("out");
    let run = cmd()
        .args([dump.to_str().unwrap(), "-o", out.to_str().unwrap(), "-q"])
        .output()
        .expect("run");
    assert!(run.status.success());
    let summary = read_json(&out.join("extraction_summary.json"));
    assert_eq!(summary["extraction_info"]["total_tables"], 0);

    let strict_out = temp.path().join("strict");
    let strict = cmd()
        .args([
            dump.to_str().unwrap(),
            "-o",
            strict_out.to_str().unwrap(),
            "-q",
            "--require-tables",
        ])
        .output()
        .expect("run");
    assert_eq!(strict.status.code(), Some(1));
    assert!(!strict_out.exists());
}

#[test]
fn scan_statements_flag_handles_quoted_terminator() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dump = temp.path().join("dump.sql");
    fs::write(
        &dump,
        format!("{}INSERT INTO notes (id, body) VALUES (1, 'a);b');\n", header("notes", 1)),
    )
    .expect("write dump");

    let out = temp.path().join("out");
    let run = cmd()
        .args([
            dump.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-q",
            "--scan-statements",
            "--workers",
            "2",
        ])
        .output()
        .expect("run");
    assert!(run.status.success());
    let notes = read_json(&out.join("notes.json"));
    assert_eq!(notes["data"], json!([{"id": 1, "body": "a);b"}]));
}

#[test]
fn headers_without_inserts_satisfy_require_tables() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dump = temp.path().join("d.sql");
    fs::write(&dump, format!("{}-- empty\n", header("users", 0))).expect("write dump");

    let out = temp.path().join("out");
    let run = cmd()
        .args([
            dump.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-q",
            "--require-tables",
        ])
        .output()
        .expect("run");
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
    let stderr = String::from_utf8_lossy(&run.stderr);
    assert!(stderr.contains("No INSERT statements found for users"), "{stderr}");
    assert!(!stderr.contains("No table headers found"), "{stderr}");

    let summary = read_json(&out.join("extraction_summary.json"));
    assert_eq!(summary["extraction_info"]["total_tables"], 0);
}
