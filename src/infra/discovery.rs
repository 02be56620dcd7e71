//! # Test Discovery / 测试发现
//!
//! Supplies the ordered, deduplicated list of test names a run works on:
//! either from the primary track's source files (full run) or from the
//! capture files already on disk (report-only run).
//!
//! 提供一次运行所需的有序、去重的测试名称列表：
//! 完整运行时来自主轨道的源文件，仅报告模式下来自磁盘上已有的捕获文件。

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::core::config::TrackConfig;
use crate::core::error::HarnessError;
use crate::core::models::{TestName, Track};
use crate::infra::fs::CaptureLayout;

/// Directory fragments that never hold tests.
const IGNORED_FRAGMENTS: &[&str] = &["__pycache__"];

/// Lists the test sources of a track: files in `root/tests_dir` with the
/// track's extension, minus excluded base names. Sorted by name.
///
/// 列出某轨道的测试源文件：`root/tests_dir` 中带有该轨道扩展名的文件，去掉排除的基名，按名称排序。
pub fn discover_tests(track: &TrackConfig, root: &Path) -> Result<Vec<TestName>, HarnessError> {
    let dir = root.join(&track.tests_dir);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HarnessError::DiscoveryEmpty { location: dir });
        }
        Err(e) => {
            return Err(HarnessError::io(
                format!("Failed to list {}", dir.display()),
                e,
            ));
        }
    };

    let names: BTreeSet<TestName> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension().and_then(|ext| ext.to_str()) == Some(track.extension.as_str())
        })
        .filter(|path| {
            let text = path.to_string_lossy();
            !IGNORED_FRAGMENTS.iter().any(|fragment| text.contains(fragment))
        })
        .filter_map(|path| TestName::from_path(&path).ok())
        .filter(|name| !track.exclude.iter().any(|ex| ex == name.as_str()))
        .collect();

    if names.is_empty() {
        return Err(HarnessError::DiscoveryEmpty { location: dir });
    }
    Ok(names.into_iter().collect())
}

/// Lists the test names that have a capture file for either track, as used
/// by report-only runs. Sorted by name.
///
/// 列出任一轨道存在捕获文件的测试名称，用于仅报告模式。按名称排序。
pub fn discover_captures(layout: &CaptureLayout) -> Result<Vec<TestName>, HarnessError> {
    let mut names = BTreeSet::new();

    for track in Track::ALL {
        let Ok(entries) = fs::read_dir(layout.dir(track)) else {
            continue;
        };
        names.extend(
            entries
                .filter_map(Result::ok)
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter_map(|file_name| layout.test_name_of(track, &file_name)),
        );
    }

    if names.is_empty() {
        return Err(HarnessError::DiscoveryEmpty {
            location: layout.dir(Track::Primary).to_path_buf(),
        });
    }
    Ok(names.into_iter().collect())
}

/// Keeps only the names containing `pattern`, when one is given.
pub fn filter_tests(tests: Vec<TestName>, pattern: Option<&str>) -> Vec<TestName> {
    match pattern {
        Some(pattern) => tests
            .into_iter()
            .filter(|name| name.as_str().contains(pattern))
            .collect(),
        None => tests,
    }
}
