//! # Console Reporting Module / 控制台报告模块
//!
//! The reporter: for each test name it re-reads both tracks' capture
//! destinations through the shared [`CaptureLayout`], extracts the metrics,
//! classifies the pair and renders one fixed-width row. Colour is
//! presentation only and never feeds back into the comparison.
//!
//! 报告器：对每个测试名称，通过共享的 [`CaptureLayout`] 重新读取两条轨道的捕获文件，
//! 提取指标、归类并渲染一行固定宽度的表格。颜色仅用于展示，不影响比较结果。

use colored::*;
use std::io::{self, Write};

use crate::core::config::BenchConfig;
use crate::core::extractor::MetricExtractor;
use crate::core::models::{TestName, Track};
use crate::core::verdict::{ComparisonVerdict, Outcome, Tally};
use crate::infra::fs::CaptureLayout;
use crate::infra::t;

/// Horizontal rule framing the table.
const RULE: &str = "=============================================================";

/// Display labels of the two tracks (e.g. "Python" and "Ruby").
/// 两条轨道的显示名称（例如 "Python" 和 "Ruby"）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub primary: String,
    pub secondary: String,
}

impl Labels {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(&config.primary.label, &config.secondary.label)
    }

    pub fn get(&self, track: Track) -> &str {
        match track {
            Track::Primary => &self.primary,
            Track::Secondary => &self.secondary,
        }
    }
}

/// Which flow produced the report; only affects the title and closing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Dispatch followed by report.
    Run,
    /// Report against pre-existing captures only.
    ReportOnly,
}

/// Reads both captures of one test and computes its verdict.
pub fn compare_test(
    test: &TestName,
    layout: &CaptureLayout,
    extractor: &MetricExtractor,
) -> ComparisonVerdict {
    let primary = extractor.extract_file(&layout.destination(test, Track::Primary));
    let secondary = extractor.extract_file(&layout.destination(test, Track::Secondary));
    ComparisonVerdict::new(test.clone(), primary, secondary)
}

/// Computes the verdict of every test, in the given order.
pub fn collect_verdicts(
    tests: &[TestName],
    layout: &CaptureLayout,
    extractor: &MetricExtractor,
) -> Vec<ComparisonVerdict> {
    tests
        .iter()
        .map(|test| compare_test(test, layout, extractor))
        .collect()
}

/// Renders the title and column header block.
pub fn render_header(labels: &Labels, kind: ReportKind) -> String {
    let title = match kind {
        ReportKind::Run => t!("report.title_run"),
        ReportKind::ReportOnly => t!("report.title_report_only"),
    };
    let primary_col = t!("report.column_metric", label = &labels.primary);
    let secondary_col = t!("report.column_metric", label = &labels.secondary);

    format!(
        "\n{}\n{}\n{:<20} | {:<15} | {:<15} | {}\n{}",
        title.yellow().bold(),
        RULE.bold(),
        t!("report.column_test"),
        primary_col,
        secondary_col,
        t!("report.column_winner"),
        RULE
    )
}

fn format_metric(value: f64) -> String {
    format!("{:.0}", value)
}

/// Renders one comparison row.
///
/// ```text
/// sort_bench           | 500000          | 300000          | Python (66.7% faster)
/// ```
pub fn render_row(verdict: &ComparisonVerdict, labels: &Labels) -> String {
    let name = verdict.test.as_str();
    let missing = t!("report.missing").to_string();
    let cell = |track: Track| {
        verdict
            .metric(track)
            .map(format_metric)
            .unwrap_or_else(|| missing.clone())
    };

    match verdict.outcome {
        Outcome::BothMissing => {
            let na = t!("report.not_available");
            format!(
                "{:<20} | {:<15} | {:<15} | {}",
                name,
                na,
                na,
                t!("report.no_results").yellow()
            )
        }
        Outcome::OnlyPrimary => format!(
            "{:<20} | {:<15} | {:<15} | {}",
            name,
            cell(Track::Primary).green(),
            missing,
            t!("report.only", label = labels.get(Track::Primary)).green()
        ),
        Outcome::OnlySecondary => format!(
            "{:<20} | {:<15} | {:<15} | {}",
            name,
            missing,
            cell(Track::Secondary).green(),
            t!("report.only", label = labels.get(Track::Secondary)).green()
        ),
        Outcome::PrimaryWins | Outcome::SecondaryWins => {
            let (primary_cell, secondary_cell) = if verdict.outcome == Outcome::PrimaryWins {
                (cell(Track::Primary).green(), cell(Track::Secondary).red())
            } else {
                (cell(Track::Primary).red(), cell(Track::Secondary).green())
            };
            let winner = verdict.outcome.winner().map_or("", |track| labels.get(track));
            let percent = verdict.percent_faster.unwrap_or_default();
            format!(
                "{:<20} | {:<15} | {:<15} | {} {}",
                name,
                primary_cell,
                secondary_cell,
                winner.green(),
                t!("report.faster", percent = format!("{:.1}", percent))
            )
        }
        Outcome::Close => format!(
            "{:<20} | {:<15} | {:<15} | {}",
            name,
            cell(Track::Primary).yellow(),
            cell(Track::Secondary).yellow(),
            t!("report.close").yellow()
        ),
    }
}

/// Renders the closing rule, the aggregate tally and the completion line.
pub fn render_footer(tally: &Tally, labels: &Labels, kind: ReportKind) -> String {
    let summary = t!(
        "report.summary",
        primary = &labels.primary,
        primary_wins = tally.primary_wins,
        secondary = &labels.secondary,
        secondary_wins = tally.secondary_wins,
        close = tally.close,
        one_sided = tally.one_sided,
        no_results = tally.no_results
    );
    let done = match kind {
        ReportKind::Run => t!("report.completed_run"),
        ReportKind::ReportOnly => t!("report.completed_report_only"),
    };
    format!("{}\n{}\n{}", RULE, summary.bold(), done.green())
}

/// Produces the full comparison table for `tests` on `out` and returns the
/// verdicts for optional exports.
///
/// Must only be called once every worker writing to `layout` has returned.
///
/// 在 `out` 上输出 `tests` 的完整对比表格，并返回对比结论以供后续导出。
/// 只能在所有写入 `layout` 的工作单元都返回之后调用。
pub fn report<W: Write>(
    out: &mut W,
    tests: &[TestName],
    layout: &CaptureLayout,
    extractor: &MetricExtractor,
    labels: &Labels,
    kind: ReportKind,
) -> io::Result<Vec<ComparisonVerdict>> {
    writeln!(out, "{}", render_header(labels, kind))?;

    let mut verdicts = Vec::with_capacity(tests.len());
    for test in tests {
        let verdict = compare_test(test, layout, extractor);
        writeln!(out, "{}", render_row(&verdict, labels))?;
        verdicts.push(verdict);
    }

    let tally = Tally::from_verdicts(&verdicts);
    writeln!(out, "{}", render_footer(&tally, labels, kind))?;
    out.flush()?;
    Ok(verdicts)
}
