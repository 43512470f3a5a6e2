//! Capability declaration generation for cachegen.
//!
//! Given a discovered [`TypeGraph`](cachegen_graph::TypeGraph) and a list of
//! capability names, [`generate`] plans one memoized declaration per
//! (type, capability) pair. A [`DerivationEngine`] supplies each declaration's
//! initializer, and a [`CodeEmitter`] renders the result. [`run`] chains the
//! whole thing for one [`GenerationRequest`](cachegen_config::GenerationRequest).

#![warn(missing_docs)]

pub mod bundle;
pub mod declaration;
pub mod derive;
pub mod emit;
pub mod errors;
pub mod generator;
pub mod pipeline;

pub use bundle::{Bundle, DeclarationSet, DerivedDeclaration, LocalBlock};
pub use declaration::{declaration_identifier, CapabilityDeclaration, Scope};
pub use derive::{DerivationEngine, DerivationError, Initializer, TemplateEngine, DEFAULT_TEMPLATE};
pub use emit::{
    emitter_for, read_fingerprint, CodeEmitter, EmitError, GeneratedUnit, JsonEmitter, RustEmitter,
};
pub use generator::{generate, GenerateError};
pub use pipeline::{run, GenError, GenerationOutput};
