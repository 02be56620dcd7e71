//! # Commands Module / 命令模块
//!
//! Subcommand implementations plus the workspace setup shared by `run` and
//! `report`.
//!
//! 各子命令的实现，以及 `run` 和 `report` 共用的工作区准备逻辑。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::core::config::{BenchConfig, load_config};
use crate::core::extractor::MetricExtractor;
use crate::core::verdict::ComparisonVerdict;
use crate::infra::fs::{CaptureLayout, absolute_path};
use crate::infra::t;
use crate::reporting::{Labels, generate_html_report, write_json_report};

pub mod init;
pub mod report;
pub mod run;

/// The `--config` argument and whether the user actually passed it.
#[derive(Debug, Clone)]
pub struct ConfigArg {
    pub path: PathBuf,
    pub explicit: bool,
}

/// Options shared by every reporting flow.
#[derive(Debug, Clone, Default)]
pub struct ExportArgs {
    pub filter: Option<String>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Everything `run` and `report` derive from the configuration.
pub(crate) struct Workspace {
    pub config: BenchConfig,
    pub root: PathBuf,
    pub layout: CaptureLayout,
    pub labels: Labels,
    pub extractor: MetricExtractor,
}

/// Loads the configuration and resolves the capture layout under `root`.
///
/// An explicitly passed config file must exist. When the default file name is
/// absent the built-in two-track defaults are used. Unless `--lang` was
/// given, the configured language becomes the active locale.
///
/// 加载配置并解析 `root` 下的捕获布局。显式指定的配置文件必须存在；
/// 默认配置文件缺失时使用内置默认值。未指定 `--lang` 时，使用配置中的语言。
pub(crate) fn load_workspace(
    config: &ConfigArg,
    root: &Path,
    lang_explicit: bool,
) -> Result<Workspace> {
    let root = absolute_path(root)
        .with_context(|| t!("run.root_not_found", path = root.display()).to_string())?;
    let config_path = if config.path.is_absolute() {
        config.path.clone()
    } else {
        root.join(&config.path)
    };

    let bench = if config.explicit || config_path.exists() {
        let loaded = load_config(&config_path)?;
        if !lang_explicit {
            crate::init(Some(&loaded.language));
        }
        println!(
            "{}",
            t!("run.loading_config", path = config_path.display()).cyan()
        );
        loaded
    } else {
        println!(
            "{}",
            t!("run.default_config", path = config_path.display()).cyan()
        );
        BenchConfig::default()
    };

    println!("{}", t!("run.root", path = root.display()));

    Ok(Workspace {
        layout: CaptureLayout::from_config(&bench, &root),
        labels: Labels::from_config(&bench),
        extractor: MetricExtractor::new(&bench.metric_key),
        config: bench,
        root,
    })
}

/// Writes the optional HTML and JSON exports. Export failures are reported
/// but do not fail the command; the console table is already out.
///
/// 写出可选的 HTML 和 JSON 报告。导出失败只会打印错误，不会使命令失败。
pub(crate) fn write_exports(verdicts: &[ComparisonVerdict], labels: &Labels, exports: &ExportArgs) {
    if let Some(path) = &exports.html {
        println!("\n{}", t!("report.generating_html", path = path.display()));
        if let Err(e) = generate_html_report(verdicts, labels, path) {
            eprintln!("{} {:#}", t!("report.export_failed").red(), e);
        }
    }
    if let Some(path) = &exports.json {
        println!("{}", t!("report.generating_json", path = path.display()));
        if let Err(e) = write_json_report(verdicts, labels, path) {
            eprintln!("{} {:#}", t!("report.export_failed").red(), e);
        }
    }
}
