//! # Report Command Module / 报告命令模块
//!
//! Report-only flow: no process is spawned. Test names come from the capture
//! files already on disk for either track.
//!
//! 仅报告流程：不启动任何进程，测试名称来自磁盘上任一轨道已有的捕获文件。

use anyhow::{Context, Result};
use colored::*;
use std::io;
use std::path::PathBuf;

use crate::{
    core::{error::HarnessError, models::Track},
    infra::{
        discovery::{discover_captures, filter_tests},
        t,
    },
    reporting::{ReportKind, report},
};

use super::{ConfigArg, ExportArgs, load_workspace, write_exports};

pub fn execute(
    config: ConfigArg,
    root: PathBuf,
    exports: ExportArgs,
    lang_explicit: bool,
) -> Result<()> {
    let ws = load_workspace(&config, &root, lang_explicit)?;

    let tests = match discover_captures(&ws.layout) {
        Ok(tests) => filter_tests(tests, exports.filter.as_deref()),
        Err(e) => {
            println!("{}", t!("report.no_captures_found", reason = &e).yellow());
            return Err(e.into());
        }
    };
    if tests.is_empty() {
        let e = HarnessError::DiscoveryEmpty {
            location: ws.layout.dir(Track::Primary).to_path_buf(),
        };
        println!("{}", t!("report.no_captures_found", reason = &e).yellow());
        return Err(e.into());
    }

    let verdicts = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report(
            &mut out,
            &tests,
            &ws.layout,
            &ws.extractor,
            &ws.labels,
            ReportKind::ReportOnly,
        )
        .context(t!("report.write_failed").to_string())?
    };

    write_exports(&verdicts, &ws.labels, &exports);
    Ok(())
}
