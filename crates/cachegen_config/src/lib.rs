//! Parsing and validation of `cachegen.toml` generator configuration.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`GeneratorConfig`], then resolves it (with command-line overrides) into the
//! plain-data [`GenerationRequest`] consumed by the generator.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{
    resolve_request, ConfigWarning, GenerationRequest, RequestOverrides, ResolvedRequest,
};
pub use types::*;
