mod common;

use assert_cmd::prelude::*;
use common::Project;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn versus() -> Command {
    let mut cmd = Command::cargo_bin("versus-runner").unwrap();
    cmd.env("NO_COLOR", "1").arg("--lang").arg("en");
    cmd
}

#[test]
fn help_lists_subcommands() {
    versus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("init"));
}

/// A full run spawns both tracks, waits for them and prints the table.
#[cfg(unix)]
#[test]
fn run_compares_both_tracks() {
    let project = Project::new();
    project.emitting("alpha", "sort_bench", 500000);
    project.emitting("beta", "sort_bench", 300000);
    project.emitting("alpha", "string_ops", 1000);
    project.emitting("beta", "string_ops", 1050);

    versus()
        .arg("run")
        .arg("--root")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("[START alpha for sort_bench]"))
        .stdout(predicate::str::contains("[DONE  beta for string_ops] -> "))
        .stdout(predicate::str::contains("Alpha (66.7% faster)"))
        .stdout(predicate::str::contains("Close"))
        .stdout(predicate::str::contains("All tests completed."));

    assert!(project.root().join("alpha/results_alpha_sort_bench.json").exists());
    assert!(project.root().join("beta/results_beta_string_ops.json").exists());
}

#[cfg(unix)]
#[test]
fn failing_track_still_completes_with_zero_exit() {
    let project = Project::new();
    project.script("alpha", "fib", "echo crashed 1>&2\nexit 1\n");
    project.emitting("beta", "fib", 42);

    versus()
        .arg("run")
        .arg("--root")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("[FAIL  alpha for fib] (code 1)"))
        .stdout(predicate::str::contains("Beta Only"));

    let capture = fs::read_to_string(project.root().join("alpha/results_alpha_fib.json")).unwrap();
    assert!(capture.contains("crashed"));
}

#[cfg(unix)]
#[test]
fn run_with_filter_and_json_export() {
    let project = Project::new();
    project.emitting("alpha", "sort_bench", 10);
    project.emitting("beta", "sort_bench", 30);
    project.emitting("alpha", "fib", 10);
    let json = project.root().join("out.json");

    versus()
        .arg("run")
        .arg("--root")
        .arg(project.root())
        .arg("--filter")
        .arg("sort")
        .arg("--runs")
        .arg("2")
        .arg("--json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("runs=2"))
        .stdout(predicate::str::contains("[START alpha for fib]").not());

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["verdicts"].as_array().unwrap().len(), 1);
    assert_eq!(report["verdicts"][0]["outcome"], "secondary_wins");
}

#[test]
fn report_only_uses_existing_captures() {
    let project = Project::new();
    project.capture("alpha", "sort_bench", r#"{"median_ops_per_sec": 500000}"#);
    project.capture("beta", "sort_bench", r#"{"median_ops_per_sec": 300000}"#);
    project.capture("beta", "only_b", r#"{"median_ops_per_sec": 5}"#);

    versus()
        .arg("report")
        .arg("--root")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchmark Comparison Report"))
        .stdout(predicate::str::contains("Alpha (66.7% faster)"))
        .stdout(predicate::str::contains("Beta Only"))
        .stdout(predicate::str::contains("[START").not())
        .stdout(predicate::str::contains("Report completed."));
}

#[test]
fn report_in_chinese() {
    let project = Project::new();
    project.capture("alpha", "fib", r#"{"median_ops_per_sec": 1}"#);

    let mut cmd = Command::cargo_bin("versus-runner").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--lang")
        .arg("zh-CN")
        .arg("report")
        .arg("--root")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("基准对比报告"))
        .stdout(predicate::str::contains("仅 Alpha"));
}

#[test]
fn empty_discovery_fails() {
    let project = Project::new();

    versus()
        .arg("run")
        .arg("--root")
        .arg(project.root())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Warning: no tests found in"))
        .stderr(predicate::str::contains("Error:"));

    versus()
        .arg("report")
        .arg("--root")
        .arg(project.root())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Warning: no tests found in"));
}

#[test]
fn init_writes_and_protects_config() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("Versus.toml");

    versus()
        .arg("init")
        .arg("--non-interactive")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("[primary]"));
    assert!(written.contains("median_ops_per_sec"));

    fs::write(&output, "# edited by hand\n").unwrap();
    versus()
        .arg("init")
        .arg("--non-interactive")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "# edited by hand\n");

    versus()
        .arg("init")
        .arg("--non-interactive")
        .arg("--force")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    assert!(fs::read_to_string(&output).unwrap().contains("[secondary]"));
}
