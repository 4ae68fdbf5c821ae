//! `linesizer init` command - Create a starter parameter file

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::format_quantity;
use crate::cli::GlobalOpts;
use crate::core::template::{example_parameters, TemplateGenerator};
use crate::core::{Config, DocumentFormat};
use crate::sizing::{ParameterField, ProcessParameters};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// File to create (default: configured file, then ./values.json)
    pub path: Option<PathBuf>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Interactive mode (prompt for each parameter)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref());
    let path = config.parameters_path(args.path.as_deref());

    if path.exists() && !args.force {
        println!(
            "{} Parameter file already exists at {}",
            style("!").yellow(),
            style(path.display()).cyan()
        );
        println!();
        println!("Use {} to overwrite", style("linesizer init --force").yellow());
        return Ok(());
    }

    let parameters = if args.interactive {
        prompt_parameters()?
    } else {
        example_parameters()
    };

    ensure_complete(&parameters)?;

    let filename = path.display().to_string();
    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let content = generator
        .generate_parameters(&parameters, DocumentFormat::from_path(&path), &filename)
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }
    std::fs::write(&path, content).into_diagnostic()?;

    println!(
        "{} Created parameter file {}",
        style("✓").green(),
        style(&filename).cyan()
    );
    if !global.quiet {
        println!();
        println!("Next steps:");
        println!("  {} Adjust outputs, capacities and composition", style(format!("edit {}", filename)).yellow());
        println!("  {} Validate the file", style("linesizer check").yellow());
        println!("  {} Compute machine counts", style("linesizer size").yellow());
    }

    Ok(())
}

/// Ask for every parameter, offering the reference plant values as defaults
fn prompt_parameters() -> Result<ProcessParameters> {
    let theme = ColorfulTheme::default();
    let defaults = example_parameters();
    let mut values = defaults;

    println!();
    println!("{} New process parameters", style("◆").cyan());
    println!("{}", style("─".repeat(50)).dim());

    for field in ParameterField::all() {
        let value: f64 = Input::with_theme(&theme)
            .with_prompt(format!("{} ({})", field.label(), field.unit().render("mass")))
            .default(defaults.get(*field))
            .validate_with(|value: &f64| field.check(*value).map_err(|e| e.to_string()))
            .interact_text()
            .into_diagnostic()?;
        set_field(&mut values, *field, value);
    }

    Ok(values)
}

/// Refuse to write parameters that a sizing run would reject
fn ensure_complete(parameters: &ProcessParameters) -> Result<()> {
    parameters.validate()?;

    let composition = parameters.composition();
    if !composition.is_valid() {
        return Err(miette::miette!(
            help = "adjust the five mass fractions so they add up to 100",
            "Mass fractions sum to {}%, expected 100%; no file written",
            format_quantity(composition.total())
        ));
    }
    Ok(())
}

fn set_field(parameters: &mut ProcessParameters, field: ParameterField, value: f64) {
    let slot = match field {
        ParameterField::DailyProductOutput => &mut parameters.daily_product_output,
        ParameterField::ShiftDuration => &mut parameters.shift_duration,
        ParameterField::DumplingMachineCapacity => &mut parameters.dumpling_machine_capacity,
        ParameterField::DoughMassFraction => &mut parameters.dough_mass_fraction,
        ParameterField::DoughKneaderCapacity => &mut parameters.dough_kneader_capacity,
        ParameterField::CutterCapacity => &mut parameters.cutter_capacity,
        ParameterField::MeatMassFraction => &mut parameters.meat_mass_fraction,
        ParameterField::EggsMassFraction => &mut parameters.eggs_mass_fraction,
        ParameterField::SaltMassFraction => &mut parameters.salt_mass_fraction,
        ParameterField::SpicesMassFraction => &mut parameters.spices_mass_fraction,
    };
    *slot = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field() {
        let mut params = example_parameters();
        for field in ParameterField::all() {
            set_field(&mut params, *field, 1.0);
        }
        assert!(params.entries().all(|(_, v)| v == 1.0));
    }

    #[test]
    fn test_ensure_complete_accepts_example() {
        assert!(ensure_complete(&example_parameters()).is_ok());
    }

    #[test]
    fn test_ensure_complete_rejects_bad_values() {
        let mut params = example_parameters();
        set_field(&mut params, ParameterField::CutterCapacity, f64::NAN);
        let err = ensure_complete(&params).unwrap_err();
        assert!(err.to_string().contains("cutter_capacity"));

        let mut params = example_parameters();
        set_field(&mut params, ParameterField::SpicesMassFraction, 12.0);
        let err = ensure_complete(&params).unwrap_err();
        assert!(err.to_string().contains("sum to 105%"));
    }
}
