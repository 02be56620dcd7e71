//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: discover the tests of the
//! primary track, dispatch one job per track per test concurrently, wait for
//! all of them and print the comparison table.
//!
//! 此模块实现 `run` 命令：发现主轨道的测试，为每个测试的每条轨道并发调度一个任务，
//! 等待全部完成后输出对比表格。

use anyhow::{Context, Result};
use colored::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    core::{
        dispatcher::Dispatcher,
        error::HarnessError,
        execution::ExecutionContext,
        models::Track,
    },
    infra::{
        command::TemplateCommands,
        discovery::{discover_tests, filter_tests},
        fs::ensure_dir,
        status::StatusSink,
        t,
    },
    reporting::{ReportKind, report},
};

use super::{ConfigArg, ExportArgs, load_workspace, write_exports};

/// Arguments of the `run` subcommand.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub config: ConfigArg,
    pub root: PathBuf,
    pub runs: Option<u32>,
    pub ops: Option<u64>,
    pub exports: ExportArgs,
    pub lang_explicit: bool,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Ok` once the report has been printed, whatever the individual jobs did.
/// An error only when setup fails or no tests were discovered.
pub async fn execute(args: RunArgs) -> Result<()> {
    let mut ws = load_workspace(&args.config, &args.root, args.lang_explicit)?;
    if let Some(runs) = args.runs {
        ws.config.runs = runs;
    }
    if let Some(ops) = args.ops {
        ws.config.ops = ops;
    }

    let discovered = match discover_tests(&ws.config.primary, &ws.root) {
        Ok(tests) => tests,
        Err(e @ HarnessError::DiscoveryEmpty { .. }) => {
            println!("{}", t!("run.no_tests_found", reason = &e).yellow());
            return Err(e.into());
        }
        Err(e) => return Err(e).context(t!("run.discovery_failed").to_string()),
    };
    let tests = filter_tests(discovered, args.exports.filter.as_deref());
    if tests.is_empty() {
        let e = HarnessError::DiscoveryEmpty {
            location: ws.root.join(&ws.config.primary.tests_dir),
        };
        println!("{}", t!("run.no_tests_found", reason = &e).yellow());
        return Err(e.into());
    }

    for track in Track::ALL {
        ensure_dir(ws.layout.dir(track))?;
    }

    println!(
        "{}",
        t!(
            "run.dispatching",
            jobs = tests.len() * Track::ALL.len(),
            tests = tests.len(),
            runs = ws.config.runs,
            ops = ws.config.ops
        )
        .bold()
    );

    let ctx = ExecutionContext::new(
        Arc::new(TemplateCommands::from_config(&ws.config)),
        StatusSink::stdout(),
        ws.root.clone(),
    );
    let dispatcher = Dispatcher::new(
        &ws.layout,
        [
            ws.config.primary.name.as_str(),
            ws.config.secondary.name.as_str(),
        ],
        ws.config.runs,
        ws.config.ops,
        ctx,
    );
    let summary = dispatcher.run(&tests).await;

    println!(
        "\n{}",
        t!(
            "run.dispatch_summary",
            launched = summary.launched,
            succeeded = summary.succeeded,
            failed = summary.failed,
            dropped = summary.dropped,
            lost = summary.lost
        )
        .cyan()
    );

    let verdicts = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report(
            &mut out,
            &tests,
            &ws.layout,
            &ws.extractor,
            &ws.labels,
            ReportKind::Run,
        )
        .context(t!("report.write_failed").to_string())?
    };

    write_exports(&verdicts, &ws.labels, &args.exports);
    Ok(())
}
