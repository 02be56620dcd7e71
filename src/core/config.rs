//! # Configuration Module / 配置模块
//!
//! Parses the `Versus.toml` configuration file that describes the two tracks
//! being compared, how to invoke each of them, and where their captures live.
//!
//! 解析 `Versus.toml` 配置文件，该文件描述了两条对比轨道、各自的调用方式以及捕获文件的位置。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::core::extractor::METRIC_KEY;
use crate::core::models::Track;

/// The default name for the configuration file.
/// 配置文件的默认名称。
pub const CONFIG_FILE_NAME: &str = "Versus.toml";

/// Describes one implementation being benchmarked.
/// 描述被测的一种实现。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackConfig {
    /// Short identifier used in capture file names and status lines (e.g. "python").
    /// 用于捕获文件名和状态行的短标识（例如 "python"）。
    pub name: String,
    /// Human readable label used in the report table (e.g. "Python").
    /// 报告表格中使用的可读名称（例如 "Python"）。
    pub label: String,
    /// Directory holding this track's test sources.
    /// 存放该轨道测试源码的目录。
    pub tests_dir: PathBuf,
    /// File extension of the test sources, without the dot.
    /// 测试源码的文件扩展名（不含点）。
    pub extension: String,
    /// Command template. Supports `{test}`, `{class}`, `{runs}`, `{ops}` and
    /// `{tests_dir}` placeholders, environment variables and `~`.
    /// 命令模板，支持 `{test}`、`{class}`、`{runs}`、`{ops}`、`{tests_dir}` 占位符以及环境变量和 `~`。
    pub command: String,
    /// Where capture files are written. Defaults to `tests_dir`.
    /// 捕获文件的写入目录，默认为 `tests_dir`。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,
    /// Base names to ignore during discovery.
    /// 发现阶段忽略的文件基名。
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl TrackConfig {
    pub fn results_dir(&self) -> &Path {
        self.results_dir.as_deref().unwrap_or(&self.tests_dir)
    }

    fn capture_prefix(&self) -> String {
        format!("results_{}_", self.name)
    }

    /// The track name ends up inside a file name, so it must stay a single
    /// path component.
    fn validate_name(&self) -> Result<()> {
        let name = self.name.as_str();
        if name.trim().is_empty() {
            bail!("Track name must not be empty");
        }
        if name.contains(['/', '\\']) || name.contains("..") {
            bail!("Track name `{name}` must not contain path separators or `..`");
        }
        Ok(())
    }
}

/// The entire run configuration, loaded from a TOML file.
/// 从 TOML 文件加载的完整运行配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BenchConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,
    /// Runs each implementation performs per test.
    /// 每个实现每个测试执行的轮数。
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Operation count handed to each implementation.
    /// 传给每个实现的操作次数。
    #[serde(default = "default_ops")]
    pub ops: u64,
    /// The key whose numeric value is extracted from each capture.
    /// 从每个捕获文件中提取数值的键名。
    #[serde(default = "default_metric_key")]
    pub metric_key: String,
    pub primary: TrackConfig,
    pub secondary: TrackConfig,
}

impl BenchConfig {
    pub fn track(&self, track: Track) -> &TrackConfig {
        match track {
            Track::Primary => &self.primary,
            Track::Secondary => &self.secondary,
        }
    }

    /// Checks that every `(test, track)` pair maps to its own capture file
    /// and that capture file names can be attributed to exactly one track.
    ///
    /// 检查每个 `(test, track)` 都有独立的捕获文件，且捕获文件名只能归属于一条轨道。
    pub fn validate(&self) -> Result<()> {
        for track in Track::ALL {
            self.track(track)
                .validate_name()
                .with_context(|| format!("Invalid [{}] track", track_section(track)))?;
        }

        if normalized(self.primary.results_dir()) != normalized(self.secondary.results_dir()) {
            return Ok(());
        }
        let (primary, secondary) = (self.primary.capture_prefix(), self.secondary.capture_prefix());
        if primary == secondary {
            bail!(
                "[primary] and [secondary] share the name `{}` and the results directory `{}`; \
                 their captures would overwrite each other",
                self.primary.name,
                self.primary.results_dir().display()
            );
        }
        if primary.starts_with(&secondary) || secondary.starts_with(&primary) {
            bail!(
                "Track names `{}` and `{}` share the results directory `{}`, \
                 so their capture file names cannot be told apart",
                self.primary.name,
                self.secondary.name,
                self.primary.results_dir().display()
            );
        }
        Ok(())
    }
}

fn track_section(track: Track) -> &'static str {
    match track {
        Track::Primary => "primary",
        Track::Secondary => "secondary",
    }
}

/// Drops `.` components so `bench` and `./bench` compare equal.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Default for BenchConfig {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        Self {
            language: default_language(),
            runs: default_runs(),
            ops: default_ops(),
            metric_key: default_metric_key(),
            primary: TrackConfig {
                name: "python".to_string(),
                label: "Python".to_string(),
                tests_dir: PathBuf::from("python").join("tests"),
                extension: "py".to_string(),
                command: format!(
                    "{python} -c \"import json, sys; sys.path.insert(0, '{{tests_dir}}'); \
                     from {{test}} import {{class}}; res = {{class}}({{ops}}).run(runs={{runs}}, iterations={{ops}}); \
                     print(json.dumps(res))\""
                ),
                results_dir: None,
                exclude: vec!["runner".to_string(), "__init__".to_string()],
            },
            secondary: TrackConfig {
                name: "ruby".to_string(),
                label: "Ruby".to_string(),
                tests_dir: PathBuf::from("ruby").join("tests"),
                extension: "rb".to_string(),
                command: "ruby -r json -I {tests_dir} -e \"require '{test}'; t = {class}.new({ops}); \
                          res = t.run({runs}, {ops}); puts JSON.generate(res)\""
                    .to_string(),
                results_dir: None,
                exclude: vec!["runner".to_string()],
            },
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_runs() -> u32 {
    5
}

fn default_ops() -> u64 {
    10_000_000
}

fn default_metric_key() -> String {
    METRIC_KEY.to_string()
}

/// Loads and parses a configuration file.
/// 加载并解析配置文件。
pub fn load_config(path: &Path) -> Result<BenchConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: BenchConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Renders a configuration as TOML with an explanatory header, as written by `init`.
/// 将配置渲染为带说明头部的 TOML，供 `init` 命令写入。
pub fn render_config(config: &BenchConfig) -> Result<String> {
    let body = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    Ok(format!(
        "# Versus Runner configuration / Versus Runner 配置\n\
         #\n\
         # Command placeholders / 命令占位符:\n\
         #   {{test}}      test name (file name without extension)\n\
         #   {{class}}     CamelCase class name with a `Test` suffix\n\
         #   {{runs}}      runs per test\n\
         #   {{ops}}       operation count\n\
         #   {{tests_dir}} the track's tests directory\n\
         \n{body}"
    ))
}
