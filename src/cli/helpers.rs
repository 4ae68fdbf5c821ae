//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Format a quantity with at most four decimals, dropping trailing zeros
///
/// `62.5` stays `62.5`, `1000.0` becomes `1000`, `1.666666` becomes `1.6667`.
pub fn format_quantity(value: f64) -> String {
    let s = format!("{:.4}", value);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write rendered output to a file, or to stdout when no path is given
pub fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            eprintln!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(62.5), "62.5");
        assert_eq!(format_quantity(1000.0), "1000");
        assert_eq!(format_quantity(25.0 / 15.0), "1.6667");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(-0.00001), "0");
        assert_eq!(format_quantity(0.1), "0.1");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_output("hello\n", Some(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}
