mod common;

use common::Project;
use std::fs;

use versus_runner::config::BenchConfig;
use versus_runner::core::HarnessError;
use versus_runner::extractor::MetricExtractor;
use versus_runner::infra::fs::CaptureLayout;
use versus_runner::infra::discovery::{discover_captures, discover_tests, filter_tests};
use versus_runner::models::TestName;
use versus_runner::reporting::console::{Labels, ReportKind, render_row};
use versus_runner::reporting::{generate_html_report, report, write_json_report};
use versus_runner::verdict::{ComparisonVerdict, Outcome};

fn labels() -> Labels {
    Labels::new("Alpha", "Beta")
}

fn names(raw: &[&str]) -> Vec<TestName> {
    raw.iter().map(|n| TestName::new(*n).unwrap()).collect()
}

fn render(project: &Project, tests: &[TestName], kind: ReportKind) -> (String, Vec<ComparisonVerdict>) {
    let mut out = Vec::new();
    let verdicts = report(
        &mut out,
        tests,
        &project.layout(),
        &MetricExtractor::default(),
        &labels(),
        kind,
    )
    .unwrap();
    (String::from_utf8(out).unwrap(), verdicts)
}

#[test]
fn table_rows_for_every_outcome() {
    common::plain_output();
    let project = Project::new();
    project.capture("alpha", "sort_bench", r#"{"median_ops_per_sec": 500000}"#);
    project.capture("beta", "sort_bench", r#"{"median_ops_per_sec": 300000}"#);
    project.capture("alpha", "fib", r#"{"median_ops_per_sec": 100}"#);
    project.capture("beta", "fib", r#"{"median_ops_per_sec": 110}"#);
    project.capture("alpha", "only_a", r#"{"median_ops_per_sec": 7}"#);
    project.capture("beta", "only_a", "Traceback: boom");
    project.capture("beta", "only_b", r#"{'median_ops_per_sec': 9.6}"#);

    let tests = names(&["sort_bench", "fib", "only_a", "only_b", "nothing"]);
    let (text, verdicts) = render(&project, &tests, ReportKind::Run);

    assert!(text.contains("Benchmark Comparison Results"));
    assert!(text.contains(&format!(
        "{:<20} | {:<15} | {:<15} | {}",
        "Category", "Alpha (ops/s)", "Beta (ops/s)", "Winner"
    )));
    assert!(text.contains(&format!(
        "{:<20} | {:<15} | {:<15} | Alpha (66.7% faster)",
        "sort_bench", "500000", "300000"
    )));
    assert!(text.contains(&format!("{:<20} | {:<15} | {:<15} | Close", "fib", "100", "110")));
    assert!(text.contains(&format!(
        "{:<20} | {:<15} | {:<15} | Alpha Only",
        "only_a", "7", "Missing"
    )));
    assert!(text.contains(&format!(
        "{:<20} | {:<15} | {:<15} | Beta Only",
        "only_b", "Missing", "10"
    )));
    assert!(text.contains(&format!(
        "{:<20} | {:<15} | {:<15} | No Results",
        "nothing", "N/A", "N/A"
    )));
    assert!(text.contains(
        "Alpha wins: 1 | Beta wins: 0 | Close: 1 | One-sided: 2 | No results: 1"
    ));
    assert!(text.trim_end().ends_with("All tests completed."));

    let outcomes: Vec<Outcome> = verdicts.iter().map(|v| v.outcome).collect();
    assert_eq!(
        outcomes,
        [
            Outcome::PrimaryWins,
            Outcome::Close,
            Outcome::OnlyPrimary,
            Outcome::OnlySecondary,
            Outcome::BothMissing
        ]
    );
}

#[test]
fn rows_follow_the_given_order() {
    common::plain_output();
    let project = Project::new();
    let tests = names(&["zeta", "alpha_test", "mid"]);
    let (text, _) = render(&project, &tests, ReportKind::ReportOnly);

    let zeta = text.find("zeta").unwrap();
    let alpha = text.find("alpha_test").unwrap();
    let mid = text.find("mid ").unwrap();
    assert!(zeta < alpha && alpha < mid);
    assert!(text.contains("Benchmark Comparison Report"));
    assert!(text.trim_end().ends_with("Report completed."));
}

#[test]
fn secondary_win_names_secondary_label() {
    common::plain_output();
    let verdict = ComparisonVerdict::new(TestName::new("hash").unwrap(), Some(100.0), Some(125.0));
    let row = render_row(&verdict, &labels());
    assert!(row.ends_with("Beta (25.0% faster)"), "{row}");
}

#[test]
fn discovery_reads_the_primary_track() {
    let project = Project::new();
    project.emitting("alpha", "sort_bench", 1);
    project.emitting("alpha", "fib", 1);
    project.emitting("alpha", "runner", 1);
    fs::write(project.root().join("alpha").join("notes.txt"), "ignored").unwrap();
    project.capture("alpha", "fib", "{}");

    let mut config = BenchConfig::default();
    config.primary.tests_dir = "alpha".into();
    config.primary.extension = "sh".to_string();
    config.primary.exclude = vec!["runner".to_string()];

    let tests = discover_tests(&config.primary, project.root()).unwrap();
    assert_eq!(tests, names(&["fib", "sort_bench"]));
    assert_eq!(filter_tests(tests, Some("sort")), names(&["sort_bench"]));
}

#[test]
fn discovery_without_tests_is_an_error() {
    let project = Project::new();
    let mut config = BenchConfig::default();
    config.primary.tests_dir = "alpha".into();
    config.primary.extension = "sh".to_string();

    assert!(matches!(
        discover_tests(&config.primary, project.root()),
        Err(HarnessError::DiscoveryEmpty { .. })
    ));
    config.primary.tests_dir = "does/not/exist".into();
    assert!(matches!(
        discover_tests(&config.primary, project.root()),
        Err(HarnessError::DiscoveryEmpty { .. })
    ));
    assert!(matches!(
        discover_captures(&project.layout()),
        Err(HarnessError::DiscoveryEmpty { .. })
    ));
}

#[test]
fn capture_discovery_is_the_union_of_both_tracks() {
    let project = Project::new();
    project.capture("alpha", "sort_bench", "{}");
    project.capture("beta", "sort_bench", "{}");
    project.capture("beta", "only_b", "{}");
    project.capture("alpha", "only_a", "{}");
    project.emitting("alpha", "not_a_capture", 1);

    let tests = discover_captures(&project.layout()).unwrap();
    assert_eq!(tests, names(&["only_a", "only_b", "sort_bench"]));
}

#[test]
fn shared_results_dir_keeps_tracks_apart() {
    common::plain_output();
    let project = Project::new();
    let dir = project.root().join("bench");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("results_py_sort.json"), r#"{"median_ops_per_sec": 100}"#).unwrap();
    fs::write(dir.join("results_py_fast_sort.json"), r#"{"median_ops_per_sec": 900}"#).unwrap();
    let layout = CaptureLayout::new(("py", dir.clone()), ("py_fast", dir.clone()));

    let tests = discover_captures(&layout).unwrap();
    assert_eq!(tests, names(&["sort"]));

    let mut out = Vec::new();
    let verdicts = report(
        &mut out,
        &tests,
        &layout,
        &MetricExtractor::default(),
        &labels(),
        ReportKind::ReportOnly,
    )
    .unwrap();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].primary, Some(100.0));
    assert_eq!(verdicts[0].secondary, Some(900.0));
    assert_eq!(verdicts[0].outcome, Outcome::SecondaryWins);
}

#[test]
fn html_and_json_exports() {
    common::plain_output();
    let project = Project::new();
    project.capture("alpha", "sort_bench", r#"{"median_ops_per_sec": 500000}"#);
    project.capture("beta", "sort_bench", r#"{"median_ops_per_sec": 300000}"#);
    let (_, verdicts) = render(&project, &names(&["sort_bench", "fib"]), ReportKind::Run);

    let html_path = project.root().join("report.html");
    generate_html_report(&verdicts, &labels(), &html_path).unwrap();
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Alpha vs Beta Benchmark Report"));
    assert!(html.contains("sort_bench"));
    assert!(html.contains("500000"));

    let json_path = project.root().join("report.json");
    write_json_report(&verdicts, &labels(), &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["primary"], "Alpha");
    assert_eq!(json["verdicts"][0]["test"], "sort_bench");
    assert_eq!(json["verdicts"][0]["outcome"], "primary_wins");
    assert_eq!(json["verdicts"][1]["outcome"], "both_missing");
    assert_eq!(json["tally"]["primary_wins"], 1);
    assert_eq!(json["tally"]["no_results"], 1);
}
