//! Loads `GeneratorConfig` from a YAML file on disk.

use std::path::Path;

use anyhow::Result;

use crate::domain::{GeneratorConfig, GeneratorError};

/// Load the config at `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Returns [`GeneratorError::Config`] if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let config_error = |reason: String| GeneratorError::Config {
        path: path.to_path_buf(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }
    let config: GeneratorConfig =
        serde_yaml::from_str(&content).map_err(|e| config_error(e.to_string()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
