//! Core module - configuration, parameter loading, starter templates

pub mod config;
pub mod loader;
pub mod template;

pub use config::Config;
pub use loader::{load_parameters, parse_parameters, DocumentFormat, LoadError};
pub use template::{TemplateError, TemplateGenerator};
