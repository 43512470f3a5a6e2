//! Shared foundational types used across the cachegen workspace.
//!
//! This crate provides interned type names, content fingerprints for generated
//! output, identifier naming helpers, and the internal error type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod naming;
pub mod result;

pub use hash::{ContentHash, ParseHashError};
pub use ident::{Ident, Interner};
pub use naming::{is_valid_identifier, lower_camel, rust_path, simple_name, snake_case};
pub use result::{InternalError, InternalResult};
