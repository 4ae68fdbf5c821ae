//! `linesizer size` command - Compute required machine counts

use miette::Result;
use std::path::PathBuf;
use tracing::info;

use crate::cli::helpers::write_output;
use crate::cli::report::{render_invalid_composition, render_report, RenderContext};
use crate::cli::GlobalOpts;
use crate::core::{load_parameters, Config};
use crate::sizing::{self, SizingError};

#[derive(clap::Args, Debug)]
pub struct SizeArgs {
    /// Parameter file (default: configured file, then ./values.json)
    pub path: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: SizeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref());
    let path = config.parameters_path(args.path.as_deref());
    let format = global.format.resolve(config.default_format.as_deref());

    let parameters = load_parameters(&path)?;

    let ctx = RenderContext {
        source: path.display().to_string(),
        mass_unit: config.mass_unit().to_string(),
        quiet: global.quiet,
    };

    let output = match sizing::run(&parameters) {
        Ok(report) => {
            info!(counts = ?report.counts(), "line sized");
            render_report(&report, format, &ctx)?
        }
        // Reported, not fatal: the run ends without counts
        Err(SizingError::InvalidComposition { total }) => {
            render_invalid_composition(&parameters, total, format, &ctx)?
        }
        Err(e) => return Err(e.into()),
    };

    write_output(&output, args.output)
}
