//! `linesizer config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (all layers merged)
    Show,

    /// Show paths to configuration files
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref());

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
        }
        _ => {
            println!(
                "{}: {}",
                style("parameters").cyan(),
                config.parameters_path(None).display()
            );
            println!(
                "{}: {}",
                style("default_format").cyan(),
                config.default_format.as_deref().unwrap_or("text")
            );
            println!("{}: {}", style("mass_unit").cyan(), config.mass_unit());
        }
    }

    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    match Config::global_config_path() {
        Some(path) => {
            let marker = if path.exists() { "" } else { " (not found)" };
            println!("{}: {}{}", style("global").cyan(), path.display(), marker);
        }
        None => println!("{}: unavailable", style("global").cyan()),
    }

    let local = global
        .config
        .clone()
        .unwrap_or_else(|| LOCAL_CONFIG_FILE.into());
    let marker = if local.exists() { "" } else { " (not found)" };
    println!("{}: {}{}", style("local").cyan(), local.display(), marker);

    Ok(())
}
