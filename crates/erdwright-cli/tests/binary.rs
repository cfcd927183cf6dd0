//! End-to-end tests that run the compiled `erdwright` binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn erdwright(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_erdwright"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("ERDWRIGHT_LOG_LEVEL")
        .env_remove("ERDWRIGHT_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn erdwright");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for erdwright")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_sample_then_format_is_stable() {
    let sample = erdwright(&["sample"], "");
    assert!(sample.status.success());

    let formatted = erdwright(&["format"], &stdout(&sample));
    assert!(formatted.status.success());
    let again = erdwright(&["format"], &stdout(&formatted));
    assert_eq!(stdout(&formatted), stdout(&again));
}

#[test]
fn test_ddl_from_stdin() {
    let output = erdwright(
        &["ddl", "--dialect", "postgres"],
        "User {\n    int id PK\n}\nPost {\n    int user_id FK\n}\nUser ||--o{ Post",
    );
    assert!(output.status.success());
    let ddl = stdout(&output);
    assert!(ddl.starts_with("-- Generated DDL for POSTGRESQL\n"));
    assert!(ddl.contains("ALTER TABLE \"Post\"\n    ADD CONSTRAINT \"FK_Post_userid_User_id\""));
}

#[test]
fn test_unknown_dialect_fails() {
    let output = erdwright(&["ddl", "--dialect", "db2"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown SQL dialect: db2"));
}

#[test]
fn test_strict_validate_exit_code() {
    let output = erdwright(&["validate", "--strict"], "erDiagram\n    User {\n");
    assert!(!output.status.success());
    assert!(stdout(&output).contains("✗ Invalid ER diagram"));

    let output = erdwright(&["validate"], "erDiagram\n    User {\n        int id PK\n    }\n");
    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Valid ER diagram (1 tables, 0 relationships)"));
}

#[test]
fn test_lenient_validate_of_undetected_input() {
    let output = erdwright(&["validate"], "hello world\n");
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(report.contains("! Input does not look like an ER diagram"));
    assert!(report.contains("~ Parsed leniently (0 tables, 0 relationships)"));
    assert!(!report.contains("✓ Valid"));
}

#[test]
fn test_parse_emits_json() {
    let output = erdwright(&["parse", "--compact"], "A {\n    int id PK\n}");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["tables"][0]["name"], "A");
    assert_eq!(json["tables"][0]["columns"][0]["isPrimaryKey"], true);
}
