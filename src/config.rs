use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{ExportError, Result};

/// Where the workflow export is read from, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "compose/n8n-mas-health-check.json";
/// Where the rendered statement is written, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "restore_workflow.sql";
/// Primary key of the restored row. Every run reuses it.
pub const DEFAULT_WORKFLOW_ID: &str = "HealthCheckFinal01";
/// Display name used when the document has no usable `name`.
pub const DEFAULT_WORKFLOW_NAME: &str = "MAS - Proactive Health Check & Report";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// workflow export to read
    pub input_path: PathBuf,
    /// sql file to write, truncated if it exists
    pub output_path: PathBuf,
    /// fixed `id` column value
    pub workflow_id: String,
    /// `name` column value when the document has none
    pub default_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            workflow_id: DEFAULT_WORKFLOW_ID.to_string(),
            default_name: DEFAULT_WORKFLOW_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| ExportError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}
