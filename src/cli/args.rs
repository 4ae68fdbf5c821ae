//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, config::ConfigCommands, init::InitArgs,
    size::SizeArgs,
};

#[derive(Parser)]
#[command(name = "linesizer")]
#[command(author, version, about = "Production-line sizing for dumpling plants")]
#[command(long_about = "Computes how many dumpling machines, dough kneaders and cutters a plant needs to meet its daily output target, from machine capacities and product composition.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./.linesizer.yaml
    #[arg(long, global = true, env = "LINESIZER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute required machine counts from a parameter file
    Size(SizeArgs),

    /// Validate a parameter file without computing counts
    Check(CheckArgs),

    /// Create a starter parameter file
    Init(InitArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default, falling back to text
    #[default]
    Auto,
    /// Human-readable tables
    Text,
    /// Markdown tables
    Md,
    /// Comma-separated values (machine table only)
    Csv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve `Auto` against a configured default
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .filter(|f| *f != OutputFormat::Auto)
            .unwrap_or(OutputFormat::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(OutputFormat::Json.resolve(Some("yaml")), OutputFormat::Json);
        assert_eq!(OutputFormat::Auto.resolve(Some("YAML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Auto.resolve(Some("bogus")), OutputFormat::Text);
        assert_eq!(OutputFormat::Auto.resolve(Some("auto")), OutputFormat::Text);
        assert_eq!(OutputFormat::Auto.resolve(None), OutputFormat::Text);
    }
}
