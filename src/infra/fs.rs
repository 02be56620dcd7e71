//! # File System Operations Module / 文件系统操作模块
//!
//! This module owns the capture destination naming convention shared by the
//! dispatcher (to tell a worker where to write) and the reporter (to know
//! where to read), plus small directory helpers.
//!
//! 此模块负责捕获文件的命名约定：调度器用它告诉工作单元写到哪里，
//! 报告器用它知道从哪里读取；另外还提供一些目录辅助函数。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::BenchConfig;
use crate::core::models::{TestName, Track};

/// Extension of every capture file.
const CAPTURE_EXTENSION: &str = "json";

/// The single naming function `(TestName, Track) -> path` for capture
/// destinations. The dispatcher and the reporter must use the same instance.
///
/// 捕获文件的唯一命名函数 `(TestName, Track) -> path`。调度器和报告器必须使用同一个实例。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLayout {
    primary: TrackLayout,
    secondary: TrackLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TrackLayout {
    name: String,
    dir: PathBuf,
}

impl TrackLayout {
    fn prefix(&self) -> String {
        format!("results_{}_", self.name)
    }
}

impl CaptureLayout {
    /// Builds the layout from a configuration, resolving relative result
    /// directories against `root`.
    pub fn from_config(config: &BenchConfig, root: &Path) -> Self {
        let layout_for = |track: Track| {
            let cfg = config.track(track);
            TrackLayout {
                name: cfg.name.clone(),
                dir: root.join(cfg.results_dir()),
            }
        };
        Self {
            primary: layout_for(Track::Primary),
            secondary: layout_for(Track::Secondary),
        }
    }

    /// Builds a layout from explicit track names and directories.
    pub fn new(
        primary: (impl Into<String>, impl Into<PathBuf>),
        secondary: (impl Into<String>, impl Into<PathBuf>),
    ) -> Self {
        Self {
            primary: TrackLayout {
                name: primary.0.into(),
                dir: primary.1.into(),
            },
            secondary: TrackLayout {
                name: secondary.0.into(),
                dir: secondary.1.into(),
            },
        }
    }

    fn track(&self, track: Track) -> &TrackLayout {
        match track {
            Track::Primary => &self.primary,
            Track::Secondary => &self.secondary,
        }
    }

    /// The capture destination of `(test, track)`:
    /// `<results_dir>/results_<track name>_<test>.json`.
    pub fn destination(&self, test: &TestName, track: Track) -> PathBuf {
        let layout = self.track(track);
        layout
            .dir
            .join(format!("{}{}.{}", layout.prefix(), test, CAPTURE_EXTENSION))
    }

    /// The directory holding a track's captures.
    pub fn dir(&self, track: Track) -> &Path {
        &self.track(track).dir
    }

    /// Recovers the test name from a capture file name of the given track,
    /// or `None` if the file does not follow the naming convention.
    ///
    /// When both tracks write into one directory and the other track's
    /// prefix is the longer match (`results_py_fast_` over `results_py_`),
    /// the file belongs to the other track.
    ///
    /// 从指定轨道的捕获文件名中还原测试名称；不符合命名约定时返回 `None`。
    pub fn test_name_of(&self, track: Track, file_name: &str) -> Option<TestName> {
        let stem = file_name.strip_suffix(&format!(".{CAPTURE_EXTENSION}"))?;
        let own = self.track(track);
        let name = stem.strip_prefix(&own.prefix())?;
        let other = self.track(track.other());
        let other_prefix = other.prefix();
        if other.dir == own.dir
            && other_prefix.len() > own.prefix().len()
            && stem.starts_with(&other_prefix)
        {
            return None;
        }
        TestName::new(name).ok()
    }
}

/// Creates a directory (and its parents) if missing.
/// 如果目录不存在则创建（包括父目录）。
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Gets the absolute path from a potentially relative path.
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
