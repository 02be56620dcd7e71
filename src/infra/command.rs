//! # Command Module / 命令模块
//!
//! Builds the external command line for a job and spawns it with its
//! combined output redirected into the job's capture destination.
//!
//! 为任务构建外部命令行，并在派生进程时将其合并输出重定向到任务的捕获文件。

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use crate::core::config::BenchConfig;
use crate::core::error::HarnessError;
use crate::core::models::{Job, Track};

/// A ready-to-spawn program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a full command string with shell-like quoting rules.
    pub fn parse(track: Track, command: &str) -> Result<Self, HarnessError> {
        let parts = shlex::split(command).ok_or_else(|| HarnessError::Command {
            track,
            reason: format!("unbalanced quotes in `{command}`"),
        })?;
        let mut parts = parts.into_iter();
        let program = parts.next().ok_or_else(|| HarnessError::Command {
            track,
            reason: "empty command".to_string(),
        })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// A shell-quoted rendering, for logs.
    pub fn display(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words).unwrap_or_else(|_| format!("{} {}", self.program, self.args.join(" ")))
    }
}

/// Produces the exact command line to invoke for a job.
///
/// The execution worker is agnostic to what the command does; it only spawns
/// what this collaborator returns. Closures implement it directly.
///
/// 为任务生成需要调用的确切命令行。执行工作单元不关心命令内容，只负责派生它。
pub trait CommandBuilder: Send + Sync {
    fn build(&self, job: &Job) -> Result<CommandLine, HarnessError>;
}

impl<F> CommandBuilder for F
where
    F: Fn(&Job) -> Result<CommandLine, HarnessError> + Send + Sync,
{
    fn build(&self, job: &Job) -> Result<CommandLine, HarnessError> {
        self(job)
    }
}

/// Expands the per-track command templates from the configuration.
///
/// Placeholders: `{test}`, `{class}`, `{runs}`, `{ops}`, `{tests_dir}`.
/// After substitution, environment variables and `~` are expanded and the
/// result is split with shell quoting rules.
#[derive(Debug, Clone)]
pub struct TemplateCommands {
    primary: Template,
    secondary: Template,
}

#[derive(Debug, Clone)]
struct Template {
    command: String,
    tests_dir: PathBuf,
}

impl TemplateCommands {
    pub fn from_config(config: &BenchConfig) -> Self {
        let template = |track: Track| {
            let cfg = config.track(track);
            Template {
                command: cfg.command.clone(),
                tests_dir: cfg.tests_dir.clone(),
            }
        };
        Self {
            primary: template(Track::Primary),
            secondary: template(Track::Secondary),
        }
    }

    /// Substitutes the placeholders of a job into its track's template,
    /// without any further expansion.
    pub fn render(&self, job: &Job) -> String {
        let template = match job.track() {
            Track::Primary => &self.primary,
            Track::Secondary => &self.secondary,
        };
        // Forward slashes keep the path intact inside interpreter string literals.
        let tests_dir = template.tests_dir.to_string_lossy().replace('\\', "/");

        template
            .command
            .replace("{tests_dir}", &tests_dir)
            .replace("{test}", job.test().as_str())
            .replace("{class}", &job.test().class_name())
            .replace("{runs}", &job.runs().to_string())
            .replace("{ops}", &job.ops().to_string())
    }
}

impl CommandBuilder for TemplateCommands {
    fn build(&self, job: &Job) -> Result<CommandLine, HarnessError> {
        let rendered = self.render(job);
        let expanded = shellexpand::full(&rendered).map_err(|e| HarnessError::Command {
            track: job.track(),
            reason: e.to_string(),
        })?;
        CommandLine::parse(job.track(), &expanded)
    }
}

/// Spawns a command with stdout and stderr both redirected into `capture`,
/// creating or truncating it first, and waits for the process to exit.
///
/// Both streams share one file handle, so the capture holds the combined
/// output in the order the process produced it.
///
/// 派生命令并将 stdout 和 stderr 一起重定向到 `capture`（先创建或截断该文件），然后等待进程退出。
pub async fn spawn_to_capture(
    command: &CommandLine,
    working_dir: &Path,
    capture: &Path,
) -> Result<ExitStatus, HarnessError> {
    let stdout = tokio::fs::File::create(capture)
        .await
        .map_err(|e| {
            HarnessError::io(format!("Failed to create capture {}", capture.display()), e)
        })?
        .into_std()
        .await;
    // Duplicates the descriptor only; no I/O happens here.
    let stderr = stdout.try_clone().map_err(|e| {
        HarnessError::io(format!("Failed to share capture {}", capture.display()), e)
    })?;

    let mut cmd = tokio::process::Command::new(&command.program);
    cmd.args(&command.args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| {
        HarnessError::io(format!("Failed to spawn `{}`", command.display()), e)
    })?;

    child
        .wait()
        .await
        .map_err(|e| HarnessError::io("Failed to wait for process", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::TestName;

    fn job(track: Track) -> Job {
        Job::new(
            TestName::new("sorting_benchmark").unwrap(),
            track,
            "python",
            3,
            1000,
            PathBuf::from("out.json"),
        )
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let mut config = BenchConfig::default();
        config.primary.command = "run {tests_dir} {test} {class} {runs} {ops}".to_string();
        config.primary.tests_dir = PathBuf::from("py/tests");
        let commands = TemplateCommands::from_config(&config);

        assert_eq!(
            commands.render(&job(Track::Primary)),
            "run py/tests sorting_benchmark SortingBenchmarkTest 3 1000"
        );
    }

    #[test]
    fn build_splits_quoted_arguments() {
        let mut config = BenchConfig::default();
        config.secondary.command = "ruby -e \"require '{test}'\"".to_string();
        let commands = TemplateCommands::from_config(&config);

        let line = commands.build(&job(Track::Secondary)).unwrap();
        assert_eq!(line.program, "ruby");
        assert_eq!(line.args, vec!["-e", "require 'sorting_benchmark'"]);
    }

    #[test]
    fn empty_or_unbalanced_templates_are_rejected() {
        assert!(matches!(
            CommandLine::parse(Track::Primary, "   "),
            Err(HarnessError::Command { .. })
        ));
        assert!(matches!(
            CommandLine::parse(Track::Primary, "echo \"unterminated"),
            Err(HarnessError::Command { .. })
        ));
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let line = CommandLine::new("ruby", ["-e", "puts 1"]);
        assert_eq!(line.display(), "ruby -e 'puts 1'");
    }
}
