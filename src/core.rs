//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Versus Runner:
//! the job model, metric extraction, comparison verdicts, the execution
//! worker and the dispatcher that fans jobs out and joins them.
//!
//! 此模块包含 Versus Runner 的核心功能：
//! 任务模型、指标提取、对比结论、执行工作单元以及负责并发分发与汇合的调度器。

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod extractor;
pub mod models;
pub mod verdict;

// Re-exports
pub use config::BenchConfig;
pub use dispatcher::{DispatchSummary, Dispatcher};
pub use error::HarnessError;
pub use execution::execute;
pub use extractor::{extract, extract_file};
pub use models::{CaptureResult, ExitState, Job, TestName, Track};
pub use verdict::{ComparisonVerdict, Outcome, classify};
