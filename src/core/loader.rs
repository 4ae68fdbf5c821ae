//! Parameter file loading
//!
//! A parameter file is a JSON or YAML mapping holding the ten process
//! parameters. Each field is looked up by key and coerced to a number;
//! numeric strings such as `"1000"` are accepted. Extra keys are ignored.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::document::{locate_key, DocumentSyntaxError};
use crate::sizing::{ParameterField, ProcessParameters};

/// Default parameter file, relative to the working directory
pub const DEFAULT_PARAMETERS_FILE: &str = "values.json";

/// On-disk format of a parameter file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension (`.json` is JSON, anything else YAML)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Failure to turn a parameter file into `ProcessParameters`
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read parameter file {}", .path.display())]
    #[diagnostic(
        code(linesizer::load::io),
        help("pass the parameter file path explicitly or run `linesizer init` to create one")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] DocumentSyntaxError),

    #[error("{file} must contain a mapping of parameter names to values")]
    #[diagnostic(code(linesizer::load::not_a_mapping))]
    NotAMapping { file: String },

    #[error("parameter `{field}` not found in {file}")]
    #[diagnostic(
        code(linesizer::load::missing_field),
        help("every parameter file needs all ten process parameters")
    )]
    MissingField {
        field: ParameterField,
        file: String,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("parameter `{field}` is not a number: {value}")]
    #[diagnostic(code(linesizer::load::malformed_field))]
    MalformedField {
        field: ParameterField,
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number")]
        span: Option<SourceSpan>,
    },
}

/// Load process parameters from a file
pub fn load_parameters(path: &Path) -> Result<ProcessParameters, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path.display().to_string();
    let format = DocumentFormat::from_path(path);

    info!(path = %filename, ?format, "loading process parameters");
    parse_parameters(&source, &filename, format)
}

/// Parse process parameters from document text
pub fn parse_parameters(
    source: &str,
    filename: &str,
    format: DocumentFormat,
) -> Result<ProcessParameters, LoadError> {
    let document: Value = match format {
        DocumentFormat::Json => serde_json::from_str(source)
            .map_err(|e| DocumentSyntaxError::from_json_error(&e, source, filename))?,
        DocumentFormat::Yaml => serde_yml::from_str(source)
            .map_err(|e| DocumentSyntaxError::from_yaml_error(&e, source, filename))?,
    };

    let map = document.as_object().ok_or_else(|| LoadError::NotAMapping {
        file: filename.to_string(),
    })?;

    let lookup = |field: ParameterField| lookup_field(map, field, source, filename);

    let parameters = ProcessParameters {
        daily_product_output: lookup(ParameterField::DailyProductOutput)?,
        shift_duration: lookup(ParameterField::ShiftDuration)?,
        dumpling_machine_capacity: lookup(ParameterField::DumplingMachineCapacity)?,
        dough_kneader_capacity: lookup(ParameterField::DoughKneaderCapacity)?,
        cutter_capacity: lookup(ParameterField::CutterCapacity)?,
        dough_mass_fraction: lookup(ParameterField::DoughMassFraction)?,
        meat_mass_fraction: lookup(ParameterField::MeatMassFraction)?,
        eggs_mass_fraction: lookup(ParameterField::EggsMassFraction)?,
        salt_mass_fraction: lookup(ParameterField::SaltMassFraction)?,
        spices_mass_fraction: lookup(ParameterField::SpicesMassFraction)?,
    };

    debug!(?parameters, "parsed process parameters");
    Ok(parameters)
}

fn lookup_field(
    map: &Map<String, Value>,
    field: ParameterField,
    source: &str,
    filename: &str,
) -> Result<f64, LoadError> {
    let value = map.get(field.key()).ok_or_else(|| LoadError::MissingField {
        field,
        file: filename.to_string(),
        src: NamedSource::new(filename, source.to_string()),
    })?;

    coerce_number(value).ok_or_else(|| LoadError::MalformedField {
        field,
        value: value.to_string(),
        src: NamedSource::new(filename, source.to_string()),
        span: locate_key(source, field.key()),
    })
}

/// Numbers pass through; strings are trimmed and parsed as floats
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const JSON_PARAMS: &str = r#"{
  "daily_product_output": 1000,
  "shift_duration": 8,
  "dumpling_machine_capacity": 50,
  "dough_mass_fraction": 40,
  "dough_kneader_capacity": 15,
  "cutter_capacity": 20,
  "meat_mass_fraction": 35,
  "eggs_mass_fraction": 15,
  "salt_mass_fraction": 3,
  "spices_mass_fraction": 7
}"#;

    const YAML_PARAMS: &str = "\
daily_product_output: 1000
shift_duration: 8
dumpling_machine_capacity: 50
dough_mass_fraction: 40
dough_kneader_capacity: 15
cutter_capacity: 20
meat_mass_fraction: 35
eggs_mass_fraction: 15
salt_mass_fraction: 3
spices_mass_fraction: 7
";

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("values.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("VALUES.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("plant.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("plant")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_parse_json() {
        let params = parse_parameters(JSON_PARAMS, "values.json", DocumentFormat::Json).unwrap();
        assert_eq!(params.daily_product_output, 1000.0);
        assert_eq!(params.cutter_capacity, 20.0);
        assert_eq!(params.spices_mass_fraction, 7.0);
    }

    #[test]
    fn test_parse_yaml_matches_json() {
        let json = parse_parameters(JSON_PARAMS, "values.json", DocumentFormat::Json).unwrap();
        let yaml = parse_parameters(YAML_PARAMS, "values.yaml", DocumentFormat::Yaml).unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let source = JSON_PARAMS.replace("\"shift_duration\": 8", "\"shift_duration\": \" 8.5 \"");
        let params = parse_parameters(&source, "values.json", DocumentFormat::Json).unwrap();
        assert_eq!(params.shift_duration, 8.5);
    }

    #[test]
    fn test_missing_field_is_lookup_failure() {
        let source = YAML_PARAMS.replace("cutter_capacity: 20\n", "");
        let err = parse_parameters(&source, "values.yaml", DocumentFormat::Yaml).unwrap_err();
        match err {
            LoadError::MissingField { field, .. } => {
                assert_eq!(field, ParameterField::CutterCapacity)
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_field() {
        let source = YAML_PARAMS.replace("salt_mass_fraction: 3", "salt_mass_fraction: a pinch");
        let err = parse_parameters(&source, "values.yaml", DocumentFormat::Yaml).unwrap_err();
        match err {
            LoadError::MalformedField { field, span, .. } => {
                assert_eq!(field, ParameterField::SaltMassFraction);
                assert!(span.is_some());
            }
            other => panic!("expected malformed field, got {:?}", other),
        }
    }

    #[test]
    fn test_not_a_mapping() {
        let err = parse_parameters("[1, 2, 3]", "values.json", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::NotAMapping { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_parameters("{\"a\": }", "values.json", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, JSON_PARAMS).unwrap();

        let params = load_parameters(&path).unwrap();
        assert_eq!(params.dough_mass_fraction, 40.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_parameters(Path::new("/nonexistent/values.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
