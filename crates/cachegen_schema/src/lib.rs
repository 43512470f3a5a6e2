//! Composite type schemas: the read-only input of type-graph discovery.
//!
//! A schema answers two questions about a type name: is it a composite
//! (record-like) type, and if so, what are its fields in declaration order.
//! [`SchemaProvider`] is the interface the generator depends on;
//! [`SchemaRegistry`] is an implementation loaded from TOML or JSON schema
//! files, with field types written as type references such as
//! `Option<Vec<Address>>` (see [`parse_type_ref`]).

#![warn(missing_docs)]

pub mod error;
pub mod field_type;
pub mod parser;
pub mod provider;
pub mod registry;

pub use error::SchemaError;
pub use field_type::FieldType;
pub use parser::{parse_type_ref, ParseError, ParseErrorKind};
pub use provider::{Field, SchemaProvider, TypeKind};
pub use registry::{SchemaRegistry, TypeDecl};
