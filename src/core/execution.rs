//! # Execution Worker Module / 执行工作单元模块
//!
//! Runs one job: invokes the external command built for it, captures the
//! combined output into the job's capture destination and reports how it
//! ended. A failing job is recorded and surfaced; it never affects siblings.
//!
//! 运行单个任务：调用为其构建的外部命令，将合并输出写入任务的捕获文件，并报告结束状态。
//! 失败的任务会被记录并显示，但绝不影响其他任务。

use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::{
    core::models::{CaptureResult, ExitState, Job},
    infra::{
        command::{CommandBuilder, spawn_to_capture},
        status::StatusSink,
        t,
    },
};

/// Everything a worker shares with its siblings. Cheap to clone.
///
/// 工作单元之间共享的全部内容，克隆开销很小。
#[derive(Clone)]
pub struct ExecutionContext {
    commands: Arc<dyn CommandBuilder>,
    status: StatusSink,
    working_dir: PathBuf,
    completed: Arc<AtomicUsize>,
}

impl ExecutionContext {
    pub fn new(
        commands: Arc<dyn CommandBuilder>,
        status: StatusSink,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            commands,
            status,
            working_dir: working_dir.into(),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn status(&self) -> &StatusSink {
        &self.status
    }
}

/// Executes a single job to completion.
///
/// Emits a `START` line before anything runs and a `DONE` or `FAIL` line
/// afterwards. The status lock is only taken for those two lines, never
/// while the external process runs.
///
/// # Arguments
/// * `job` - The job to run; consumed
/// * `ctx` - The shared execution context
///
/// # Returns
/// A `CaptureResult` describing how the job ended
pub async fn execute(job: Job, ctx: ExecutionContext) -> CaptureResult {
    ctx.status.emit(
        t!(
            "status.start",
            track = job.track_name(),
            test = job.test().as_str()
        )
        .blue(),
    );

    let started = Instant::now();
    let exit = match ctx.commands.build(&job) {
        Ok(command) => match spawn_to_capture(&command, &ctx.working_dir, job.capture()).await {
            Ok(status) => ExitState::from_status(status),
            Err(e) => ExitState::NotStarted {
                reason: e.to_string(),
            },
        },
        Err(e) => ExitState::NotStarted {
            reason: e.to_string(),
        },
    };
    let duration = started.elapsed();
    let completion_order = ctx.completed.fetch_add(1, Ordering::SeqCst) + 1;

    let line = match &exit {
        ExitState::Success => t!(
            "status.done",
            track = job.track_name(),
            test = job.test().as_str(),
            path = job.capture().display(),
            duration = format!("{:.2}", duration.as_secs_f64())
        )
        .green(),
        ExitState::Failed { code } => t!(
            "status.failed",
            track = job.track_name(),
            test = job.test().as_str(),
            code = code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            path = job.capture().display()
        )
        .red(),
        ExitState::NotStarted { reason } => t!(
            "status.not_started",
            track = job.track_name(),
            test = job.test().as_str(),
            reason = reason,
            path = job.capture().display()
        )
        .red(),
    };
    ctx.status.emit(line);

    CaptureResult {
        job,
        exit,
        completion_order,
        duration,
    }
}
