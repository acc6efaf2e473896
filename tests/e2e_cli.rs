mod common;

use assert_cmd::Command;
use common::cli::{PerfWorkspace, run_perf};
use predicates::prelude::*;
use std::fs;

#[test]
fn version_json_has_version() {
    let _log = common::test_log("version_json_has_version");
    let ws = PerfWorkspace::new();
    let run = run_perf(&ws, ["version", "--json"], "version");
    assert!(run.status.success());
    assert_eq!(run.json()["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn schema_describes_benchmark_files() {
    let _log = common::test_log("schema_describes_benchmark_files");
    let ws = PerfWorkspace::new();
    let run = run_perf(&ws, ["schema"], "schema");
    assert!(run.status.success());
    let schema = run.json();
    assert_eq!(schema["type"], "object");
    assert!(schema.to_string().contains("mid_ms"));
}

#[test]
fn completions_written_to_file() {
    let _log = common::test_log("completions_written_to_file");
    let ws = PerfWorkspace::new();
    let run = run_perf(&ws, ["completions", "fish", "-o", "perfbase.fish"], "completions");
    assert!(run.status.success(), "completions failed: {}", run.stderr);
    let script = fs::read_to_string(ws.path("perfbase.fish")).unwrap();
    assert!(script.contains("complete -c perfbase"));
}

#[test]
fn human_error_has_hint() {
    Command::new(assert_cmd::cargo::cargo_bin!("perfbase"))
        .args(["compare", "--dir", "definitely-missing-dir"])
        .env("NO_COLOR", "1")
        .env_remove("PERFBASE_DIR")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("definitely-missing-dir"))
        .stderr(predicate::str::contains("_new.json"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    Command::new(assert_cmd::cargo::cargo_bin!("perfbase"))
        .arg("frobnicate")
        .assert()
        .failure();
}
