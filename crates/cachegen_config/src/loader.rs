//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use cachegen_common::is_valid_identifier;
use std::path::Path;

/// File name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "cachegen.toml";

/// Loads and validates `cachegen.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `cachegen.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates required fields and capability names.
///
/// An empty capability list is accepted here: it is a generation-time error
/// reported by the generator itself, after command-line overrides are applied.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    if config.generation.root.trim().is_empty() {
        return Err(ConfigError::MissingField("generation.root".to_string()));
    }
    if config.schema.paths.is_empty() {
        return Err(ConfigError::MissingField("schema.paths".to_string()));
    }
    validate_capabilities(&config.generation.capabilities)
}

/// Rejects capability names that cannot form part of a generated identifier.
pub(crate) fn validate_capabilities(capabilities: &[String]) -> Result<(), ConfigError> {
    for name in capabilities {
        if !is_valid_identifier(name) {
            return Err(ConfigError::ValidationError(format!(
                "capability name `{name}` is not a valid identifier"
            )));
        }
    }
    Ok(())
}
