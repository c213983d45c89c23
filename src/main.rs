//! texview CLI - live preview for LaTeX documents
//!
//! Usage: texview [OPTIONS] <MASTER> [INCLUDED]...

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use texview::cli::Cli;
use texview::config::{Config, ConfigWarning};

mod commands;
mod ui;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "texview failed");
            ui::error::print_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (config, warnings) = load_config(cli)?;

    let _log_guard = texview::logging::init(&config.log, cli.verbose)
        .context("cannot set up logging")?;

    report_warnings(&warnings, cli, &config);

    commands::preview::cmd_preview(cli, &config)
}

/// Config file (explicit or discovered), then env, then CLI flags
fn load_config(cli: &Cli) -> Result<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("cannot load config {}", path.display()))?;
            (config.with_env_overrides(), warnings)
        }
        None => {
            let project_dir = cli.master.parent().filter(|p| !p.as_os_str().is_empty());
            Config::load_or_default(Some(project_dir.unwrap_or_else(|| std::path::Path::new("."))))?
        }
    };

    let mut config = config;
    cli.apply_to(&mut config);
    Ok((config, warnings))
}

fn report_warnings(warnings: &[ConfigWarning], cli: &Cli, config: &Config) {
    for warning in warnings {
        tracing::warn!(key = %warning.key, file = %warning.file.display(), "unknown config key");
    }
    if cli.json || warnings.is_empty() {
        return;
    }

    let ui = ui::context::UiContext::new(false, &config.output);
    for warning in warnings {
        eprint!(
            "{}",
            ui::error::format_config_warning(warning, ui.color, ui.unicode)
        );
    }
}
