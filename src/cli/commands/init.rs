//! # Init Command Module / 初始化命令模块
//!
//! Writes a starter `Versus.toml`. Interactive by default, through a
//! `dialoguer` wizard that asks for each track's label, directory, file
//! extension and the run parameters; `--non-interactive` writes the built-in
//! defaults as they are.
//!
//! 生成初始的 `Versus.toml`。默认通过 `dialoguer` 交互式向导询问每条轨道的名称、目录、
//! 扩展名以及运行参数；`--non-interactive` 则直接写入内置默认值。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::Path, path::PathBuf};

use crate::core::config::{BenchConfig, TrackConfig, render_config};
use crate::infra::t;

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Skip the wizard and write the defaults
/// * `language` - Language recorded in the generated file
pub fn execute(output: PathBuf, force: bool, non_interactive: bool, language: &str) -> Result<()> {
    let mut config = BenchConfig {
        language: language.to_string(),
        ..BenchConfig::default()
    };

    if output.exists() && !force {
        if non_interactive {
            println!("{}", t!("init.file_exists", path = output.display()).red());
            println!("{}", t!("init.use_force").yellow());
            return Ok(());
        }
        let theme = ColorfulTheme::default();
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(t!("init.confirm_overwrite", path = output.display()).to_string())
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", t!("init.aborted").yellow());
            return Ok(());
        }
    }

    if !non_interactive {
        run_wizard(&mut config)?;
    }

    write_config(&output, &config)?;

    println!("{}", t!("init.success", path = output.display()).green());
    println!("{}", t!("init.next_steps"));
    Ok(())
}

fn run_wizard(config: &mut BenchConfig) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("\n{}", t!("init.wizard_welcome").bold().cyan());
    println!("{}\n", t!("init.wizard_description"));

    prompt_track(&theme, &mut config.primary, &t!("init.primary_heading"))?;
    prompt_track(&theme, &mut config.secondary, &t!("init.secondary_heading"))?;

    config.runs = Input::with_theme(&theme)
        .with_prompt(t!("init.prompt_runs").to_string())
        .default(config.runs)
        .interact_text()?;
    config.ops = Input::with_theme(&theme)
        .with_prompt(t!("init.prompt_ops").to_string())
        .default(config.ops)
        .interact_text()?;
    Ok(())
}

fn prompt_track(theme: &ColorfulTheme, track: &mut TrackConfig, heading: &str) -> Result<()> {
    println!("{}", heading.bold());

    track.name = Input::with_theme(theme)
        .with_prompt(t!("init.prompt_name").to_string())
        .default(track.name.clone())
        .interact_text()?;
    track.label = Input::with_theme(theme)
        .with_prompt(t!("init.prompt_label").to_string())
        .default(track.label.clone())
        .interact_text()?;
    let tests_dir: String = Input::with_theme(theme)
        .with_prompt(t!("init.prompt_tests_dir").to_string())
        .default(track.tests_dir.to_string_lossy().into_owned())
        .interact_text()?;
    track.tests_dir = PathBuf::from(tests_dir);
    track.extension = Input::with_theme(theme)
        .with_prompt(t!("init.prompt_extension").to_string())
        .default(track.extension.clone())
        .interact_text()?;
    track.command = Input::with_theme(theme)
        .with_prompt(t!("init.prompt_command").to_string())
        .default(track.command.clone())
        .interact_text()?;
    Ok(())
}

fn write_config(output: &Path, config: &BenchConfig) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", path = parent.display()).to_string()
        })?;
    }
    config.validate().context("Refusing to write an invalid configuration")?;
    let body = render_config(config)?;
    fs::write(output, body)
        .with_context(|| t!("init.write_failed", path = output.display()).to_string())
}
