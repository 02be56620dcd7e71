//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! normalized test names, the two comparison tracks, the immutable job
//! description and the outcome a worker reports when a job finishes.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 规范化的测试名称、两条对比轨道、不可变的任务描述以及任务结束时工作单元报告的结果。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::HarnessError;

/// A normalized test identifier, derived from a discovered file name with
/// its directory and extension stripped. It is the join key between tracks.
///
/// 规范化的测试标识符，由发现的文件名去掉目录和扩展名得到，是两条轨道之间的关联键。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestName(String);

impl TestName {
    /// Validates a raw name. It must be non-empty and free of path separators.
    pub fn new(raw: impl Into<String>) -> Result<Self, HarnessError> {
        let raw = raw.into();
        if raw.trim().is_empty() || raw.contains(['/', '\\']) {
            return Err(HarnessError::InvalidTestName(raw));
        }
        Ok(Self(raw))
    }

    /// Derives a test name from a file path: basename without its extension.
    /// 从文件路径推导测试名称：去掉扩展名的文件名。
    pub fn from_path(path: &Path) -> Result<Self, HarnessError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HarnessError::InvalidTestName(path.display().to_string()))?;
        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts `snake_case` (or `kebab-case`) into the `CamelCaseTest`
    /// class name the benchmark sources define.
    ///
    /// 将 `snake_case`（或 `kebab-case`）转换为基准源码中定义的 `CamelCaseTest` 类名。
    pub fn class_name(&self) -> String {
        let mut class = String::with_capacity(self.0.len() + 4);
        let mut capitalize = true;

        for c in self.0.chars() {
            if c == '_' || c == '-' {
                capitalize = true;
            } else if capitalize {
                class.push(c.to_ascii_uppercase());
                capitalize = false;
            } else {
                class.push(c);
            }
        }

        class.push_str("Test");
        class
    }
}

impl TryFrom<String> for TestName {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TestName> for String {
    fn from(value: TestName) -> Self {
        value.0
    }
}

impl fmt::Display for TestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies which of the two compared implementations a job belongs to.
/// The cardinality is fixed at two for the lifetime of a run.
///
/// 标识任务所属的对比实现。一次运行中轨道数量固定为两条。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Track A.
    Primary,
    /// Track B.
    Secondary,
}

impl Track {
    /// Both tracks, primary first.
    pub const ALL: [Track; 2] = [Track::Primary, Track::Secondary];

    pub fn other(self) -> Track {
        match self {
            Track::Primary => Track::Secondary,
            Track::Secondary => Track::Primary,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Primary => f.write_str("primary"),
            Track::Secondary => f.write_str("secondary"),
        }
    }
}

/// An immutable description of one (test, track) execution request.
/// Each job writes to its own capture destination; destinations never alias.
///
/// 一次（测试，轨道）执行请求的不可变描述。
/// 每个任务写入自己独占的捕获文件，捕获文件之间不会重叠。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    test: TestName,
    track: Track,
    track_name: String,
    runs: u32,
    ops: u64,
    capture: PathBuf,
}

impl Job {
    pub fn new(
        test: TestName,
        track: Track,
        track_name: impl Into<String>,
        runs: u32,
        ops: u64,
        capture: PathBuf,
    ) -> Self {
        Self {
            test,
            track,
            track_name: track_name.into(),
            runs,
            ops,
            capture,
        }
    }

    pub fn test(&self) -> &TestName {
        &self.test
    }

    pub fn track(&self) -> Track {
        self.track
    }

    /// The configured name of the track (e.g. "python"), used in status lines.
    pub fn track_name(&self) -> &str {
        &self.track_name
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn ops(&self) -> u64 {
        self.ops
    }

    pub fn capture(&self) -> &Path {
        &self.capture
    }
}

/// How an external execution ended.
/// 外部执行的结束方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitState {
    /// The process exited with status zero.
    Success,
    /// The process exited non-zero. `code` is `None` when it was killed by a signal.
    Failed { code: Option<i32> },
    /// The process never ran: the capture could not be created, or the
    /// command could not be built or spawned.
    NotStarted { reason: String },
}

impl ExitState {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            ExitState::Success
        } else {
            ExitState::Failed {
                code: status.code(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitState::Success)
    }
}

/// What a worker reports when its job reaches a terminal state.
/// It lives only long enough to emit a status line and be counted; metrics
/// are re-derived from the capture destination at report time.
///
/// 工作单元在任务结束时报告的结果。它只用于输出状态行和计数；
/// 指标在报告阶段从捕获文件重新读取。
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub job: Job,
    pub exit: ExitState,
    /// 1-based position in which this job finished relative to its siblings.
    pub completion_order: usize,
    pub duration: Duration,
}
