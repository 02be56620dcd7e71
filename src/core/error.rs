//! # Error Taxonomy / 错误分类
//!
//! Typed errors raised by the harness core. Per-job failures never travel
//! through this type to other jobs; only discovery yielding nothing is meant
//! to abort a whole run.
//!
//! 核心层的类型化错误。单个任务的失败不会影响其他任务；
//! 只有"未发现任何测试"会终止整个运行。

use std::path::PathBuf;
use thiserror::Error;

use crate::core::models::Track;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// No test names were found where discovery looked.
    #[error("no tests found in {}", .location.display())]
    DiscoveryEmpty { location: PathBuf },

    /// The concurrency primitive for a job could not be created.
    #[error("could not launch {track} job for '{test}': {reason}")]
    Launch {
        test: String,
        track: Track,
        reason: String,
    },

    /// A test name was empty or contained a path separator.
    #[error("invalid test name '{0}'")]
    InvalidTestName(String),

    /// The external command line for a job could not be constructed.
    #[error("invalid command for {track}: {reason}")]
    Command { track: Track, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HarnessError::Io {
            context: context.into(),
            source,
        }
    }
}
