//! # Command-Line Interface / 命令行接口
//!
//! Builds the `versus-runner` command tree and routes to the subcommands:
//! `run` (discover, dispatch, report), `report` (report against existing
//! captures only) and `init` (write a starter configuration).
//!
//! 构建 `versus-runner` 命令树并分发到各子命令：`run`（发现、调度、报告）、
//! `report`（仅基于已有捕获文件生成报告）以及 `init`（生成初始配置）。

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::CONFIG_FILE_NAME;
use crate::infra::t;

pub mod commands;

use commands::{ConfigArg, ExportArgs};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(value) = args.iter().find_map(|arg| arg.strip_prefix("--lang=")) {
        return Some(value.to_string());
    }
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("cli.arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(CONFIG_FILE_NAME)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn root_arg(locale: &str) -> Arg {
    Arg::new("root")
        .long("root")
        .help(t!("cli.arg_root", locale = locale).to_string())
        .value_name("ROOT")
        .default_value(".")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn filter_arg(locale: &str) -> Arg {
    Arg::new("filter")
        .long("filter")
        .help(t!("cli.arg_filter", locale = locale).to_string())
        .value_name("PATTERN")
        .action(ArgAction::Set)
}

fn html_arg(locale: &str) -> Arg {
    Arg::new("html")
        .long("html")
        .help(t!("cli.arg_html", locale = locale).to_string())
        .value_name("HTML")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn json_arg(locale: &str) -> Arg {
    Arg::new("json")
        .long("json")
        .help(t!("cli.arg_json", locale = locale).to_string())
        .value_name("JSON")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("versus-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.cmd_run_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(root_arg(locale))
                .arg(
                    Arg::new("runs")
                        .long("runs")
                        .help(t!("cli.arg_runs", locale = locale).to_string())
                        .value_name("RUNS")
                        .value_parser(clap::value_parser!(u32))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("ops")
                        .long("ops")
                        .help(t!("cli.arg_ops", locale = locale).to_string())
                        .value_name("OPS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(filter_arg(locale))
                .arg(html_arg(locale))
                .arg(json_arg(locale)),
        )
        .subcommand(
            Command::new("report")
                .about(t!("cli.cmd_report_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(root_arg(locale))
                .arg(filter_arg(locale))
                .arg(html_arg(locale))
                .arg(json_arg(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .default_value(CONFIG_FILE_NAME)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn config_from(matches: &ArgMatches) -> ConfigArg {
    ConfigArg {
        path: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        explicit: matches.value_source("config") == Some(ValueSource::CommandLine),
    }
}

fn root_from(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn exports_from(matches: &ArgMatches) -> ExportArgs {
    ExportArgs {
        filter: matches.get_one::<String>("filter").cloned(),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let lang_explicit = requested.is_some();
    let language = crate::init(requested.as_deref());

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(commands::run::RunArgs {
                config: config_from(run_matches),
                root: root_from(run_matches),
                runs: run_matches.get_one::<u32>("runs").copied(),
                ops: run_matches.get_one::<u64>("ops").copied(),
                exports: exports_from(run_matches),
                lang_explicit,
            })
            .await?;
        }
        Some(("report", report_matches)) => {
            commands::report::execute(
                config_from(report_matches),
                root_from(report_matches),
                exports_from(report_matches),
                lang_explicit,
            )?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            commands::init::execute(
                output,
                init_matches.get_flag("force"),
                init_matches.get_flag("non-interactive"),
                &language,
            )?;
        }
        _ => {
            // `subcommand_required` makes clap print help before we get here.
        }
    }
    Ok(())
}
