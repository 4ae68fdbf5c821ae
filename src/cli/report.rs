//! Sizing report rendering
//!
//! Text and markdown reports list the inputs first, then the machine table
//! in fixed order: dumpling machines, dough kneaders, cutters. JSON and YAML
//! serialize the report itself; CSV carries the machine table only.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::format_quantity;
use crate::cli::OutputFormat;
use crate::sizing::{ProcessParameters, SizingReport, UnitKind};

/// Presentation settings shared by all renderers
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Parameter file the report was computed from
    pub source: String,
    pub mass_unit: String,
    pub quiet: bool,
}

/// Structured output when the composition check fails
#[derive(Debug, Serialize)]
pub struct InvalidCompositionReport<'a> {
    pub parameters: &'a ProcessParameters,
    pub composition_total: f64,
    pub composition_valid: bool,
}

pub fn render_report(report: &SizingReport, format: OutputFormat, ctx: &RenderContext) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => serde_yml::to_string(report).into_diagnostic(),
        OutputFormat::Csv => machines_csv(report),
        OutputFormat::Md => Ok(report_markdown(report, ctx)),
        OutputFormat::Auto | OutputFormat::Text => Ok(report_text(report, ctx)),
    }
}

pub fn render_invalid_composition(
    parameters: &ProcessParameters,
    total: f64,
    format: OutputFormat,
    ctx: &RenderContext,
) -> Result<String> {
    let structured = InvalidCompositionReport {
        parameters,
        composition_total: total,
        composition_valid: false,
    };

    match format {
        OutputFormat::Json => to_json(&structured),
        OutputFormat::Yaml => serde_yml::to_string(&structured).into_diagnostic(),
        OutputFormat::Csv => parameters_csv(parameters, total),
        OutputFormat::Md => {
            let mut output = String::new();
            output.push_str("# Line Sizing Report\n\n");
            output.push_str(&format!("Source: `{}`\n\n", ctx.source));
            output.push_str("## Process Parameters\n\n");
            output.push_str(&parameter_table(parameters, ctx).with(Style::markdown()).to_string());
            output.push_str(&format!(
                "\n\n**Composition invalid:** mass fractions sum to {}%, expected 100%. No machine counts computed.\n",
                format_quantity(total)
            ));
            Ok(output)
        }
        OutputFormat::Auto | OutputFormat::Text => {
            let mut output = String::new();
            if !ctx.quiet {
                push_parameters_text(&mut output, parameters, ctx);
            }
            output.push_str(&format!(
                "{} Ingredient composition invalid: mass fractions sum to {}%, expected 100%\n",
                style("✗").red(),
                format_quantity(total)
            ));
            output.push_str("  No machine counts computed.\n");
            Ok(output)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .into_diagnostic()
}

fn parameter_table(parameters: &ProcessParameters, ctx: &RenderContext) -> tabled::Table {
    let mut builder = Builder::default();
    builder.push_record(["Parameter", "Key", "Value", "Unit"]);
    for (field, value) in parameters.entries() {
        builder.push_record([
            field.label().to_string(),
            field.key().to_string(),
            format_quantity(value),
            field.unit().render(&ctx.mass_unit),
        ]);
    }
    builder.build()
}

fn machine_table(report: &SizingReport, ctx: &RenderContext) -> tabled::Table {
    let rate = UnitKind::MassPerHour.render(&ctx.mass_unit);
    let mut builder = Builder::default();
    builder.push_record([
        "Machine".to_string(),
        format!("Throughput ({})", rate),
        format!("Capacity ({})", rate),
        "Load ratio".to_string(),
        "Count".to_string(),
    ]);
    for machine in &report.machines {
        builder.push_record([
            machine.kind.label().to_string(),
            format_quantity(machine.throughput),
            format_quantity(machine.capacity),
            format_quantity(machine.load_ratio),
            machine.count.to_string(),
        ]);
    }
    builder.build()
}

fn push_parameters_text(output: &mut String, parameters: &ProcessParameters, ctx: &RenderContext) {
    output.push_str(&format!(
        "{} ({})\n",
        style("Process parameters").bold(),
        style(&ctx.source).cyan()
    ));
    output.push_str(&parameter_table(parameters, ctx).with(Style::rounded()).to_string());
    output.push_str("\n\n");
}

fn report_text(report: &SizingReport, ctx: &RenderContext) -> String {
    let mut output = String::new();

    if !ctx.quiet {
        push_parameters_text(&mut output, &report.parameters, ctx);
        output.push_str(&format!(
            "   Half-shift output: {} {}\n",
            style(format_quantity(report.half_shift_output)).yellow(),
            UnitKind::MassPerHour.render(&ctx.mass_unit)
        ));
        output.push_str(&format!(
            "   Composition: {}% {}\n\n",
            format_quantity(report.composition_total),
            style("✓").green()
        ));
        output.push_str(&format!("{}\n", style("Machine requirements").bold()));
    }

    output.push_str(&machine_table(report, ctx).with(Style::rounded()).to_string());
    output.push('\n');

    if !ctx.quiet {
        output.push_str(&format!(
            "\n   Total machines: {}\n",
            style(report.total_machines()).cyan()
        ));
    }

    output
}

fn report_markdown(report: &SizingReport, ctx: &RenderContext) -> String {
    let mut output = String::new();
    output.push_str("# Line Sizing Report\n\n");
    output.push_str(&format!("Source: `{}`\n\n", ctx.source));

    output.push_str("## Process Parameters\n\n");
    output.push_str(&parameter_table(&report.parameters, ctx).with(Style::markdown()).to_string());

    output.push_str("\n\n## Machine Requirements\n\n");
    output.push_str(&machine_table(report, ctx).with(Style::markdown()).to_string());

    output.push_str("\n\n## Summary\n\n");
    output.push_str(&format!(
        "- **Half-shift output:** {} {}\n",
        format_quantity(report.half_shift_output),
        UnitKind::MassPerHour.render(&ctx.mass_unit)
    ));
    output.push_str(&format!(
        "- **Composition total:** {}%\n",
        format_quantity(report.composition_total)
    ));
    output.push_str(&format!("- **Total machines:** {}\n", report.total_machines()));
    output
}

fn machines_csv(report: &SizingReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["machine", "throughput", "capacity", "load_ratio", "count"])
        .into_diagnostic()?;
    for machine in &report.machines {
        writer
            .write_record([
                machine.kind.to_string(),
                machine.throughput.to_string(),
                machine.capacity.to_string(),
                machine.load_ratio.to_string(),
                machine.count.to_string(),
            ])
            .into_diagnostic()?;
    }
    finish_csv(writer)
}

fn parameters_csv(parameters: &ProcessParameters, total: f64) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["parameter", "value"]).into_diagnostic()?;
    for (field, value) in parameters.entries() {
        writer
            .write_record([field.key().to_string(), value.to_string()])
            .into_diagnostic()?;
    }
    writer
        .write_record(["composition_total".to_string(), total.to_string()])
        .into_diagnostic()?;
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| miette::miette!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).into_diagnostic()
}
