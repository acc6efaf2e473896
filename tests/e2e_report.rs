mod common;

use common::cli::{PerfWorkspace, run_perf};
use std::fs;

fn seed(ws: &PerfWorkspace) {
    ws.write_bench(
        "render",
        r#"{
            "draw": {"mid_ms": 10.0, "avg_ms": 10.5, "min_ms": 9.0, "max_ms": 12.0},
            "blit": {"mid_ms": 10.0, "avg_ms": 10.0},
            "cold": {"mid_ms": 0.0, "avg_ms": 0.0}
        }"#,
    );
    ws.write_bench(
        "render_new",
        r#"{
            "draw": {"mid_ms": 9.0, "avg_ms": 9.5, "min_ms": 8.0, "max_ms": 11.0},
            "blit": {"mid_ms": 10.005, "avg_ms": 10.0},
            "cold": {"mid_ms": 5.0, "avg_ms": 5.0}
        }"#,
    );
}

#[test]
fn report_writes_html_with_embedded_payload() {
    let _log = common::test_log("report_writes_html_with_embedded_payload");
    let ws = PerfWorkspace::new();
    seed(&ws);

    let run = run_perf(&ws, ["report"], "report");
    assert!(run.status.success(), "report failed: {}", run.stderr);
    assert!(run.stdout.contains("Performance report generated"));

    let html = fs::read_to_string(ws.path("performance_report.html")).unwrap();
    assert!(html.contains("render: draw"));
    assert!(html.contains("+10.00%"));
    assert!(html.contains(r#"percentage-change zero">0.05%</span>"#));
    assert!(html.contains("performanceData"));
    assert!(!html.contains("{{"), "unfilled placeholder left in report");
}

#[test]
fn report_json_summary_counts() {
    let _log = common::test_log("report_json_summary_counts");
    let ws = PerfWorkspace::new();
    seed(&ws);

    let run = run_perf(&ws, ["report", "-o", "out/perf.html", "--json"], "report_json");
    assert!(run.status.success(), "report failed: {}", run.stderr);
    let out = run.json();
    assert_eq!(out["generated"], true);
    let summary = &out["summary"];
    assert_eq!(summary["total_tests"], 3);
    assert_eq!(summary["improved"], 1);
    assert_eq!(summary["regressed"], 0);
    assert_eq!(summary["unchanged"], 2);
    assert!(ws.path("out/perf.html").exists());
}

#[test]
fn report_missing_directory_fails_with_layout_hint() {
    let _log = common::test_log("report_missing_directory_fails_with_layout_hint");
    let ws = PerfWorkspace::new();

    let run = run_perf(&ws, ["report", "--dir", "absent", "--json"], "report_missing");
    assert_eq!(run.code(), Some(2));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "DIRECTORY_NOT_FOUND");
    assert!(
        err["error"]["context"]["expected_layout"]
            .to_string()
            .contains("_new.json")
    );
    assert!(!ws.path("performance_report.html").exists());
}

#[test]
fn report_empty_directory_warns_and_succeeds() {
    let _log = common::test_log("report_empty_directory_warns_and_succeeds");
    let ws = PerfWorkspace::new();

    let run = run_perf(&ws, ["report"], "report_empty");
    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("No JSON files found"));
    assert!(!ws.path("performance_report.html").exists());
}

#[test]
fn report_skips_invalid_files() {
    let _log = common::test_log("report_skips_invalid_files");
    let ws = PerfWorkspace::new();
    seed(&ws);
    ws.write_bench("bad", "[1, 2, 3]");

    let run = run_perf(&ws, ["report", "--json"], "report_invalid");
    assert!(run.status.success(), "report failed: {}", run.stderr);
    assert_eq!(run.json()["summary"]["total_tests"], 3);
}
