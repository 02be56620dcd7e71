//! # Dispatcher Module / 调度器模块
//!
//! Builds the full job set (one job per track per test), launches every job
//! as its own concurrently running task and then waits for all of them. The
//! join is a hard barrier: nothing may read a capture destination before every
//! worker has returned.
//!
//! 构建完整的任务集合（每个测试每条轨道一个任务），将每个任务作为独立的并发任务启动，
//! 然后等待全部完成。汇合是一道硬屏障：在所有工作单元返回之前，任何人都不能读取捕获文件。

use colored::*;
use std::future::Future;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinSet;

use crate::{
    core::{
        error::HarnessError,
        execution::{ExecutionContext, execute},
        models::{CaptureResult, Job, TestName, Track},
    },
    infra::{fs::CaptureLayout, t},
};

/// Builds exactly one job per track for every test name: `2 × N` jobs,
/// primary before secondary, in discovery order.
///
/// 为每个测试名称的每条轨道构建一个任务：共 `2 × N` 个，主轨道在前，按发现顺序排列。
pub fn build_jobs(
    tests: &[TestName],
    layout: &CaptureLayout,
    track_names: [&str; 2],
    runs: u32,
    ops: u64,
) -> Vec<Job> {
    tests
        .iter()
        .flat_map(|test| {
            Track::ALL.into_iter().zip(track_names).map(move |(track, name)| {
                Job::new(
                    test.clone(),
                    track,
                    name,
                    runs,
                    ops,
                    layout.destination(test, track),
                )
            })
        })
        .collect()
}

/// A structured group of concurrently running tasks with an explicit
/// join-all. Tasks are never capped or throttled.
///
/// 一组并发运行的任务，带有显式的全部汇合操作。任务数量不设上限也不限流。
pub struct TaskGroup<T> {
    set: JoinSet<T>,
    launched: usize,
}

/// What a join-all observed.
#[derive(Debug)]
pub struct Joined<T> {
    pub completed: Vec<T>,
    /// Tasks that panicked or were aborted instead of returning.
    pub lost: usize,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new() -> Self {
        Self {
            set: JoinSet::new(),
            launched: 0,
        }
    }

    /// Launches a task on the current runtime.
    ///
    /// Fails without side effects when no runtime is available to host the
    /// task; the caller decides what to do with the work that was not launched.
    pub fn launch<F>(&mut self, task: F) -> Result<(), TryCurrentError>
    where
        F: Future<Output = T> + Send + 'static,
    {
        let handle = Handle::try_current()?;
        self.set.spawn_on(task, &handle);
        self.launched += 1;
        Ok(())
    }

    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Waits until every launched task has reached a terminal state.
    pub async fn join_all(mut self) -> Joined<T> {
        let mut completed = Vec::with_capacity(self.launched);
        let mut lost = 0;
        while let Some(res) = self.set.join_next().await {
            match res {
                Ok(value) => completed.push(value),
                Err(e) => {
                    eprintln!("A worker task did not return: {}", e);
                    lost += 1;
                }
            }
        }
        Joined { completed, lost }
    }
}

impl<T: Send + 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts describing a finished dispatch. Metrics are deliberately absent:
/// the reporter re-derives them from the capture destinations.
///
/// 描述一次调度结束状态的计数。这里不包含指标：报告器会从捕获文件中重新读取。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Jobs whose task was launched.
    pub launched: usize,
    /// Jobs dropped because their task could not be launched.
    pub dropped: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Launched tasks that panicked instead of returning.
    pub lost: usize,
}

/// Fans jobs out to concurrently running workers and joins them.
pub struct Dispatcher<'a> {
    layout: &'a CaptureLayout,
    track_names: [&'a str; 2],
    runs: u32,
    ops: u64,
    ctx: ExecutionContext,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        layout: &'a CaptureLayout,
        track_names: [&'a str; 2],
        runs: u32,
        ops: u64,
        ctx: ExecutionContext,
    ) -> Self {
        Self {
            layout,
            track_names,
            runs,
            ops,
            ctx,
        }
    }

    /// Runs every job for `tests` concurrently and returns once all of them
    /// have finished. A job whose task cannot be launched is reported and left
    /// out of the join; the run continues.
    pub async fn run(&self, tests: &[TestName]) -> DispatchSummary {
        let jobs = build_jobs(tests, self.layout, self.track_names, self.runs, self.ops);
        let mut group = TaskGroup::new();
        let mut dropped = 0;

        for job in jobs {
            let (test, track) = (job.test().to_string(), job.track());
            let track_name = job.track_name().to_string();
            if let Err(e) = group.launch(execute(job, self.ctx.clone())) {
                let error = HarnessError::Launch {
                    test: test.clone(),
                    track,
                    reason: e.to_string(),
                };
                self.ctx.status().emit(
                    t!(
                        "status.launch_failed",
                        track = track_name,
                        test = test,
                        reason = error
                    )
                    .yellow(),
                );
                dropped += 1;
            }
        }

        let launched = group.launched();
        let joined: Joined<CaptureResult> = group.join_all().await;
        let succeeded = joined
            .completed
            .iter()
            .filter(|result| result.exit.is_success())
            .count();

        DispatchSummary {
            launched,
            dropped,
            succeeded,
            failed: joined.completed.len() - succeeded,
            lost: joined.lost,
        }
    }
}
