//! # Versus Runner Library / Versus Runner 库
//!
//! This library provides the core functionality for the Versus Runner tool,
//! a concurrent harness that runs two implementations ("tracks") of every
//! benchmark test side by side and compares the metric each one emits.
//!
//! 此库为 Versus Runner 工具提供核心功能，
//! 这是一个并发基准对比工具：为每个测试同时运行两种实现（"轨道"），并比较各自输出的指标。
//!
//! ## Modules / 模块
//!
//! - `core` - Job model, metric extraction, verdicts, workers and dispatch
//! - `infra` - Command construction, capture naming, discovery and the status stream
//! - `reporting` - Console table, HTML and JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 任务模型、指标提取、对比结论、工作单元与调度
//! - `infra` - 命令构建、捕获文件命名、测试发现与状态输出流
//! - `reporting` - 控制台表格、HTML 与 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::extractor;
pub use core::models;
pub use core::verdict;

/// Resolves the language to use for user-facing messages.
///
/// An explicit request wins; otherwise the system locale is detected. The full
/// locale (e.g. "zh-CN") is tried first, then its language part (e.g. "en"
/// from "en-US"), and finally the default "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Initializes internationalization for the given (optional) language request.
pub fn init(requested: Option<&str>) -> String {
    let lang = resolve_locale(requested);
    rust_i18n::set_locale(&lang);
    lang
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
