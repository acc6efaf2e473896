//! End-to-end tests for the artifact helpers: `copy` and `license`.

mod common;

use common::cli::{PerfWorkspace, run_perf};
use std::fs;

#[test]
fn copy_directory_replaces_destination() {
    let _log = common::test_log("copy_directory_replaces_destination");
    let ws = PerfWorkspace::new();
    fs::create_dir_all(ws.path("src_dir/nested")).unwrap();
    fs::write(ws.path("src_dir/a.txt"), "a").unwrap();
    fs::write(ws.path("src_dir/nested/b.txt"), "b").unwrap();
    fs::create_dir_all(ws.path("deploy/target")).unwrap();
    fs::write(ws.path("deploy/target/stale.txt"), "old").unwrap();

    let run = run_perf(&ws, ["copy", "src_dir", "deploy/target", "--json"], "copy_dir");
    assert!(run.status.success(), "copy failed: {}", run.stderr);
    let out = run.json();
    assert_eq!(out["kind"], "directory");
    assert_eq!(out["files"], 2);

    assert_eq!(fs::read_to_string(ws.path("deploy/target/nested/b.txt")).unwrap(), "b");
    assert!(!ws.path("deploy/target/stale.txt").exists());
}

#[test]
fn copy_file_creates_parent() {
    let _log = common::test_log("copy_file_creates_parent");
    let ws = PerfWorkspace::new();
    fs::write(ws.path("lib.so"), "bin").unwrap();

    let run = run_perf(&ws, ["cp", "lib.so", "out/deep/lib.so"], "copy_file");
    assert!(run.status.success(), "copy failed: {}", run.stderr);
    assert_eq!(fs::read_to_string(ws.path("out/deep/lib.so")).unwrap(), "bin");
}

#[test]
fn copy_missing_source_fails() {
    let _log = common::test_log("copy_missing_source_fails");
    let ws = PerfWorkspace::new();
    let run = run_perf(&ws, ["copy", "ghost", "dest", "--json"], "copy_missing");
    assert_eq!(run.code(), Some(2));
    assert_eq!(run.error_json()["error"]["code"], "PATH_NOT_FOUND");
}

#[test]
fn license_rewrites_headers_in_tree() {
    let _log = common::test_log("license_rewrites_headers_in_tree");
    let ws = PerfWorkspace::new();
    fs::write(ws.path("LICENSE.tpl"), "// Copyright %year% Example").unwrap();
    fs::create_dir_all(ws.path("code/sub")).unwrap();
    fs::write(
        ws.path("code/a.h"),
        "// old header\n// more\n#ifndef A_H\n#define A_H\n#endif\n",
    )
    .unwrap();
    fs::write(ws.path("code/sub/b.CPP"), "/* x */\n#include <b.h>\nint b;\n").unwrap();
    fs::write(ws.path("code/sub/plain.c"), "int main(void) { return 0; }\n").unwrap();
    fs::write(ws.path("code/resource.h"), "// keep\n#include <x>\n").unwrap();
    fs::write(ws.path("code/notes.txt"), "// txt\n#include <x>\n").unwrap();

    let run = run_perf(
        &ws,
        ["license", "LICENSE.tpl", "code", "--year", "2024", "--json"],
        "license",
    );
    assert!(run.status.success(), "license failed: {}", run.stderr);
    let out = run.json();
    assert_eq!(out["updated"], 2);
    assert_eq!(out["unchanged"], 1);
    assert_eq!(out["ignored"], 1);

    assert_eq!(
        fs::read_to_string(ws.path("code/a.h")).unwrap(),
        "// Copyright 2024 Example\n#ifndef A_H\n#define A_H\n#endif\n"
    );
    assert_eq!(
        fs::read_to_string(ws.path("code/sub/b.CPP")).unwrap(),
        "// Copyright 2024 Example\n#include <b.h>\nint b;\n"
    );
    assert_eq!(
        fs::read_to_string(ws.path("code/resource.h")).unwrap(),
        "// keep\n#include <x>\n"
    );
    assert_eq!(
        fs::read_to_string(ws.path("code/notes.txt")).unwrap(),
        "// txt\n#include <x>\n"
    );
}

#[test]
fn license_plain_output_reports_each_file() {
    let _log = common::test_log("license_plain_output_reports_each_file");
    let ws = PerfWorkspace::new();
    fs::write(ws.path("tpl"), "// L").unwrap();
    fs::write(ws.path("one.c"), "// old\n#include <a>\n").unwrap();

    let run = run_perf(&ws, ["license", "tpl", "one.c"], "license_plain");
    assert!(run.status.success(), "license failed: {}", run.stderr);
    assert!(run.stdout.contains("Update success"), "stdout: {}", run.stdout);
}

#[test]
fn license_missing_target_fails() {
    let _log = common::test_log("license_missing_target_fails");
    let ws = PerfWorkspace::new();
    fs::write(ws.path("tpl"), "// L").unwrap();
    let run = run_perf(&ws, ["license", "tpl", "nowhere", "--json"], "license_missing");
    assert_eq!(run.code(), Some(2));
    assert_eq!(run.error_json()["error"]["code"], "PATH_NOT_FOUND");
}
