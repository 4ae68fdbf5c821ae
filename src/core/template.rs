//! Starter parameter file generation

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::loader::DocumentFormat;
use crate::sizing::ProcessParameters;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const YAML_TEMPLATE: &str = "parameters.yaml.tera";
const JSON_TEMPLATE: &str = "parameters.json.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template rendering failed: {0}")]
    RenderError(String),
}

/// A valid reference plant: 1000 mass/day over 8 h shifts
pub fn example_parameters() -> ProcessParameters {
    ProcessParameters {
        daily_product_output: 1000.0,
        shift_duration: 8.0,
        dumpling_machine_capacity: 50.0,
        dough_kneader_capacity: 15.0,
        cutter_capacity: 20.0,
        dough_mass_fraction: 40.0,
        meat_mass_fraction: 35.0,
        eggs_mass_fraction: 15.0,
        salt_mass_fraction: 3.0,
        spices_mass_fraction: 7.0,
    }
}

pub struct TemplateGenerator {
    tera: Tera,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a parameter file in the given format
    pub fn generate_parameters(
        &self,
        parameters: &ProcessParameters,
        format: DocumentFormat,
        filename: &str,
    ) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        context.insert("filename", filename);
        for (field, value) in parameters.entries() {
            context.insert(field.key(), &value);
        }

        let template = match format {
            DocumentFormat::Yaml => YAML_TEMPLATE,
            DocumentFormat::Json => JSON_TEMPLATE,
        };

        self.tera
            .render(template, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_parameters;

    #[test]
    fn test_example_parameters_are_valid() {
        let params = example_parameters();
        assert!(params.validate().is_ok());
        assert!(params.composition().is_valid());
    }

    #[test]
    fn test_yaml_template_loads_back() {
        let generator = TemplateGenerator::new().unwrap();
        let params = example_parameters();
        let yaml = generator
            .generate_parameters(&params, DocumentFormat::Yaml, "values.yaml")
            .unwrap();

        assert!(yaml.contains("# Process parameters"));
        let loaded = parse_parameters(&yaml, "values.yaml", DocumentFormat::Yaml).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_both_templates_are_embedded() {
        let generator = TemplateGenerator::new().unwrap();
        let names: Vec<_> = generator.tera.get_template_names().collect();
        assert!(names.contains(&YAML_TEMPLATE));
        assert!(names.contains(&JSON_TEMPLATE));
    }

    #[test]
    fn test_json_template_loads_back() {
        let generator = TemplateGenerator::new().unwrap();
        let params = ProcessParameters {
            shift_duration: 7.5,
            ..example_parameters()
        };
        let json = generator
            .generate_parameters(&params, DocumentFormat::Json, "values.json")
            .unwrap();

        let loaded = parse_parameters(&json, "values.json", DocumentFormat::Json).unwrap();
        assert_eq!(loaded, params);
    }
}
