//! # Reporting Module / 报告模块
//!
//! This module turns capture destinations into comparison verdicts and
//! renders them: a fixed-width console table, plus optional HTML and JSON
//! exports of the same verdicts.
//!
//! 此模块将捕获文件转换为对比结论并进行渲染：固定宽度的控制台表格，
//! 以及可选的 HTML 和 JSON 导出。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{Labels, ReportKind, collect_verdicts, report};
pub use html::generate_html_report;
pub use json::write_json_report;
