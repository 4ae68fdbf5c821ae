//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::loader::DEFAULT_PARAMETERS_FILE;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".linesizer.yaml";

/// linesizer configuration with layered hierarchy
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parameter file used when none is given on the command line
    pub parameters: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Mass unit shown next to outputs and capacities
    pub mass_unit: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `explicit` replaces the per-directory config file when given.
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/linesizer/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./.linesizer.yaml, or --config)
        let local_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if let Some(local) = Self::read_file(&local_path) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(parameters) = std::env::var("LINESIZER_PARAMETERS") {
            config.parameters = Some(PathBuf::from(parameters));
        }
        if let Ok(format) = std::env::var("LINESIZER_FORMAT") {
            config.default_format = Some(format);
        }
        if let Ok(unit) = std::env::var("LINESIZER_MASS_UNIT") {
            config.mass_unit = Some(unit);
        }

        debug!(?config, "effective configuration");
        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "linesizer")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.parameters.is_some() {
            self.parameters = other.parameters;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.mass_unit.is_some() {
            self.mass_unit = other.mass_unit;
        }
    }

    /// Parameter file to read, falling back to `values.json`
    pub fn parameters_path(&self, cli_path: Option<&Path>) -> PathBuf {
        cli_path
            .map(Path::to_path_buf)
            .or_else(|| self.parameters.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMETERS_FILE))
    }

    pub fn mass_unit(&self) -> &str {
        self.mass_unit.as_deref().unwrap_or("kg")
    }
}
