//! Error types for schema loading.

use crate::parser::ParseError;
use std::path::PathBuf;

/// Errors that can occur while building a [`SchemaRegistry`](crate::SchemaRegistry).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema file could not be read.
    #[error("failed to read schema file {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A schema file has an extension other than `.toml` or `.json`.
    #[error("unsupported schema file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// A TOML or JSON schema document is malformed.
    #[error("failed to parse schema: {0}")]
    Parse(String),

    /// A field's type reference could not be parsed.
    #[error("field `{owner}.{field}`: {source}")]
    InvalidTypeRef {
        /// The declaring type.
        owner: String,
        /// The field name.
        field: String,
        /// The parse failure.
        source: ParseError,
    },

    /// The same type name was declared twice.
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    /// The same field name was declared twice on one type.
    #[error("type `{owner}` declares field `{field}` more than once")]
    DuplicateField {
        /// The declaring type.
        owner: String,
        /// The repeated field name.
        field: String,
    },

    /// An enumeration or opaque type was declared with fields.
    #[error("type `{0}` is not a record and cannot declare fields")]
    FieldsOnNonRecord(String),
}
