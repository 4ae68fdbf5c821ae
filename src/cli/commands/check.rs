//! `linesizer check` command - Validate a parameter file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::format_quantity;
use crate::cli::GlobalOpts;
use crate::core::{load_parameters, Config};
use crate::sizing::SizingError;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Parameter file (default: configured file, then ./values.json)
    pub path: Option<PathBuf>,
}

/// Load the file, then check bounds and composition; fails on the first problem
pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref());
    let path = config.parameters_path(args.path.as_deref());

    let parameters = load_parameters(&path)?;
    parameters.validate()?;

    let composition = parameters.composition();
    if !composition.is_valid() {
        return Err(SizingError::InvalidComposition {
            total: composition.total(),
        }
        .into());
    }

    if !global.quiet {
        println!(
            "{} {} is valid",
            style("✓").green(),
            style(path.display()).cyan()
        );
        println!("   All ten parameters present and within bounds");
        println!(
            "   Composition: {}% (dough {}%, filling {}%)",
            format_quantity(composition.total()),
            format_quantity(composition.dough),
            format_quantity(composition.filling())
        );
    }

    Ok(())
}
