//! Rendering a generation run into source text.
//!
//! Every emitter stamps the unit's fingerprint into its output so a build
//! step can detect stale checked-in files with [`read_fingerprint`].

mod json;
mod rust;

pub use json::JsonEmitter;
pub use rust::RustEmitter;

use cachegen_common::{ContentHash, InternalError};
use cachegen_config::OutputFormat;
use serde::Serialize;

use crate::bundle::DeclarationSet;

/// Prefix of the fingerprint line in Rust output.
pub(crate) const FINGERPRINT_LINE: &str = "// fingerprint: ";

/// Everything an emitter needs to render one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// Root type the run started from.
    pub root: String,
    /// Import hints, rendered verbatim. Empty for local scope.
    pub import_hints: Vec<String>,
    /// The derived declarations.
    #[serde(flatten)]
    pub declarations: DeclarationSet,
}

impl GeneratedUnit {
    /// Hashes the JSON form of the unit.
    pub fn fingerprint(&self) -> Result<ContentHash, EmitError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(ContentHash::from_bytes(&bytes))
    }
}

/// Errors raised while rendering.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The unit could not be serialized.
    #[error("cannot serialize generated unit: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A generated or capability name is not usable as an identifier.
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),

    /// A type name cannot be written as a Rust path.
    #[error("`{0}` is not a valid Rust type path")]
    InvalidTypePath(String),

    /// Two distinct names render to the same Rust item name in one scope.
    #[error("`{first}` and `{second}` both render as `{name}`")]
    DuplicateName {
        /// The rendered item name.
        name: String,
        /// The name rendered first.
        first: String,
        /// The name rendered second.
        second: String,
    },

    /// Broken invariant in the emitter's input.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Renders a [`GeneratedUnit`] into target text.
pub trait CodeEmitter {
    /// Short name of the output format.
    fn name(&self) -> &'static str;

    /// Renders the unit.
    fn emit(&self, unit: &GeneratedUnit) -> Result<String, EmitError>;
}

impl<T: CodeEmitter + ?Sized> CodeEmitter for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn emit(&self, unit: &GeneratedUnit) -> Result<String, EmitError> {
        (**self).emit(unit)
    }
}

/// Returns the emitter for a configured output format.
pub fn emitter_for(format: OutputFormat) -> Box<dyn CodeEmitter> {
    match format {
        OutputFormat::Rust => Box::new(RustEmitter),
        OutputFormat::Json => Box::new(JsonEmitter),
    }
}

/// Reads the fingerprint stamped into previously emitted text, in either format.
pub fn read_fingerprint(text: &str) -> Option<ContentHash> {
    for line in text.lines().take(4) {
        if let Some(hex) = line.strip_prefix(FINGERPRINT_LINE) {
            return hex.trim().parse().ok();
        }
    }
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    value.get("fingerprint")?.as_str()?.parse().ok()
}
