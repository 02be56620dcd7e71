//! # HTML Reporting Module / HTML 报告模块
//!
//! Writes a self-contained HTML page with the comparison table and the
//! aggregate tally of a run.
//!
//! 生成包含对比表格和汇总统计的独立 HTML 页面。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;

use crate::core::models::Track;
use crate::core::verdict::{ComparisonVerdict, Outcome, Tally};
use crate::infra::t;
use crate::reporting::console::Labels;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.6rem; }
.generated { color: #777; font-size: 0.85rem; }
.summary-container { display: flex; gap: 1rem; margin: 1.5rem 0; }
.summary-item { border: 1px solid #ddd; border-radius: 6px; padding: 0.75rem 1.25rem; text-align: center; }
.summary-item .count { display: block; font-size: 1.5rem; font-weight: bold; }
.summary-item .label { color: #555; font-size: 0.85rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #eee; padding: 0.5rem 0.75rem; text-align: left; }
td.metric { text-align: right; font-variant-numeric: tabular-nums; }
.win { color: #1a7f37; font-weight: bold; }
.lose { color: #cf222e; }
.close { color: #9a6700; }
.missing { color: #999; font-style: italic; }
"#;

fn cell_class(verdict: &ComparisonVerdict, track: Track) -> &'static str {
    match (verdict.outcome, verdict.metric(track)) {
        (_, None) => "missing",
        (Outcome::Close, _) => "close",
        (outcome, _) if outcome.winner() == Some(track) => "win",
        (Outcome::PrimaryWins | Outcome::SecondaryWins, _) => "lose",
        _ => "win",
    }
}

fn outcome_text(verdict: &ComparisonVerdict, labels: &Labels) -> String {
    match verdict.outcome {
        Outcome::BothMissing => t!("report.no_results").to_string(),
        Outcome::OnlyPrimary => t!("report.only", label = &labels.primary).to_string(),
        Outcome::OnlySecondary => t!("report.only", label = &labels.secondary).to_string(),
        Outcome::PrimaryWins | Outcome::SecondaryWins => {
            let winner = verdict.outcome.winner().map_or("", |track| labels.get(track));
            format!(
                "{} {}",
                winner,
                t!(
                    "report.faster",
                    percent = format!("{:.1}", verdict.percent_faster.unwrap_or_default())
                )
            )
        }
        Outcome::Close => t!("report.close").to_string(),
    }
}

fn metric_cell(verdict: &ComparisonVerdict, track: Track) -> Markup {
    let text = verdict
        .metric(track)
        .map(|value| format!("{:.0}", value))
        .unwrap_or_else(|| t!("report.missing").to_string());
    html! { td class={ "metric " (cell_class(verdict, track)) } { (text) } }
}

/// Renders the report page.
pub fn render_html_report(verdicts: &[ComparisonVerdict], labels: &Labels) -> Markup {
    let tally = Tally::from_verdicts(verdicts);
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", primary = &labels.primary, secondary = &labels.secondary)) }
                style { (maud::PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.title", primary = &labels.primary, secondary = &labels.secondary)) }
                p class="generated" { (t!("html_report.generated_at", time = generated)) }
                div class="summary-container" {
                    div class="summary-item" {
                        span class="count win" { (tally.primary_wins) }
                        span class="label" { (t!("html_report.wins", label = &labels.primary)) }
                    }
                    div class="summary-item" {
                        span class="count win" { (tally.secondary_wins) }
                        span class="label" { (t!("html_report.wins", label = &labels.secondary)) }
                    }
                    div class="summary-item" {
                        span class="count close" { (tally.close) }
                        span class="label" { (t!("html_report.close")) }
                    }
                    div class="summary-item" {
                        span class="count missing" { (tally.one_sided + tally.no_results) }
                        span class="label" { (t!("html_report.incomplete")) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { (t!("report.column_test")) }
                            th { (t!("report.column_metric", label = &labels.primary)) }
                            th { (t!("report.column_metric", label = &labels.secondary)) }
                            th { (t!("report.column_winner")) }
                        }
                    }
                    tbody {
                        @for verdict in verdicts {
                            tr {
                                td { (verdict.test.as_str()) }
                                (metric_cell(verdict, Track::Primary))
                                (metric_cell(verdict, Track::Secondary))
                                td { (outcome_text(verdict, labels)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes the HTML comparison report to `output_path`.
///
/// # Errors / 错误
/// Fails if the file cannot be written.
/// 无法写入文件时返回错误。
pub fn generate_html_report(
    verdicts: &[ComparisonVerdict],
    labels: &Labels,
    output_path: &Path,
) -> Result<()> {
    let page = render_html_report(verdicts, labels);
    fs::write(output_path, page.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}
