//! Request resolution: merging the configuration file with command-line overrides.

use crate::error::ConfigError;
use crate::loader::validate_capabilities;
use crate::types::{EmissionMode, GeneratorConfig, OutputFormat};
use std::fmt;
use std::path::{Path, PathBuf};

/// The plain-data input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Canonical name of the root composite type.
    pub root: String,
    /// Capability names in caller order.
    pub capabilities: Vec<String>,
    /// Shared or local emission.
    pub mode: EmissionMode,
    /// Import hints passed through unmodified to the emitter. Always empty in local mode.
    pub import_hints: Vec<String>,
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    /// Replaces `generation.root`.
    pub root: Option<String>,
    /// Replaces `generation.capabilities` when non-empty.
    pub capabilities: Vec<String>,
    /// Replaces `generation.mode`.
    pub mode: Option<EmissionMode>,
    /// Replaces `output.format`.
    pub format: Option<OutputFormat>,
    /// Replaces `output.path`, relative to the working directory.
    pub output: Option<PathBuf>,
}

/// A non-fatal adjustment made while resolving a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Import hints were configured for a local-mode run and dropped.
    ImportHintsIgnored {
        /// How many hints were dropped.
        count: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::ImportHintsIgnored { count } => write!(
                f,
                "{count} import hint(s) ignored: import hints only apply to shared mode"
            ),
        }
    }
}

/// A fully resolved generation run: request plus resolved file locations.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// The generation request.
    pub request: GenerationRequest,
    /// Schema files, resolved against the project directory.
    pub schema_paths: Vec<PathBuf>,
    /// Initializer template, if configured.
    pub template: Option<String>,
    /// Output file, if any.
    pub output_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Adjustments made during resolution.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolves a loaded configuration and command-line overrides into a request.
///
/// Override values replace file values wholesale. Capability names supplied
/// as overrides are validated the same way as those read from the file.
pub fn resolve_request(
    config: &GeneratorConfig,
    overrides: &RequestOverrides,
    project_dir: &Path,
) -> Result<ResolvedRequest, ConfigError> {
    let root = match &overrides.root {
        Some(root) if root.trim().is_empty() => {
            return Err(ConfigError::MissingField("generation.root".to_string()))
        }
        Some(root) => root.clone(),
        None => config.generation.root.clone(),
    };

    let capabilities = if overrides.capabilities.is_empty() {
        config.generation.capabilities.clone()
    } else {
        validate_capabilities(&overrides.capabilities)?;
        overrides.capabilities.clone()
    };

    let mode = overrides.mode.unwrap_or(config.generation.mode);

    let mut warnings = Vec::new();
    let import_hints = match mode {
        EmissionMode::Shared => config.generation.import_hints.clone(),
        EmissionMode::Local => {
            if !config.generation.import_hints.is_empty() {
                warnings.push(ConfigWarning::ImportHintsIgnored {
                    count: config.generation.import_hints.len(),
                });
            }
            Vec::new()
        }
    };

    let schema_paths = config
        .schema
        .paths
        .iter()
        .map(|p| project_dir.join(p))
        .collect();

    let output_path = overrides.output.clone().or_else(|| {
        config
            .output
            .path
            .as_ref()
            .map(|p| project_dir.join(p))
    });

    Ok(ResolvedRequest {
        request: GenerationRequest {
            root,
            capabilities,
            mode,
            import_hints,
        },
        schema_paths,
        template: config.derive.template.clone(),
        output_path,
        format: overrides.format.unwrap_or(config.output.format),
        warnings,
    })
}
