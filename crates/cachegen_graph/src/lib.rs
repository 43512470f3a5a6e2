//! Type-graph discovery.
//!
//! Given a root composite type, [`discover`] enumerates every distinct
//! composite type reachable through its fields, looking through optional,
//! sequence and map wrappers. The result is a [`TypeGraph`]: root first,
//! breadth-first in order of first discovery, no type twice.
//!
//! # Usage
//!
//! ```ignore
//! let graph = discover(&registry, "TestWrapperClass")?;
//! assert_eq!(graph.root().type_name, "TestWrapperClass");
//! ```

#![warn(missing_docs)]

pub mod cycle;
pub mod error;
pub mod graph;
pub mod inspect;

pub use error::{GraphError, UnsupportedReason};
pub use graph::{TypeGraph, TypeNode};
pub use inspect::discover;
