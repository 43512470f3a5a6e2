//! Declaration generation: one declaration per (type, capability) pair.

use std::collections::HashMap;

use cachegen_graph::TypeGraph;
use tracing::{debug, info};

use crate::declaration::{CapabilityDeclaration, Scope};

/// Errors produced by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// No capability names were requested.
    #[error("no capability names were requested")]
    EmptyCapabilitySet,

    /// Two (type, capability) pairs produced the same identifier.
    #[error(
        "duplicate identifier `{identifier}`: generated for `{existing_type}` ({existing_capability}) \
         and again for `{conflicting_type}` ({conflicting_capability})"
    )]
    DuplicateIdentifier {
        /// The colliding identifier.
        identifier: String,
        /// Type of the declaration generated first.
        existing_type: String,
        /// Capability of the declaration generated first.
        existing_capability: String,
        /// Type of the declaration that collided.
        conflicting_type: String,
        /// Capability of the declaration that collided.
        conflicting_capability: String,
    },
}

/// Produces the declarations for every type in `graph` and every capability,
/// types in graph order outermost and capabilities in caller order innermost.
///
/// # Errors
///
/// [`GenerateError::EmptyCapabilitySet`] if `capabilities` is empty, and
/// [`GenerateError::DuplicateIdentifier`] as soon as an identifier repeats.
/// Collisions are never resolved by renaming or dropping a declaration.
pub fn generate<C: AsRef<str>>(
    graph: &TypeGraph,
    capabilities: &[C],
    scope: Scope,
) -> Result<Vec<CapabilityDeclaration>, GenerateError> {
    if capabilities.is_empty() {
        return Err(GenerateError::EmptyCapabilitySet);
    }

    let mut declarations = Vec::with_capacity(graph.len() * capabilities.len());
    let mut emitted: HashMap<String, usize> = HashMap::new();

    for node in graph {
        for capability in capabilities {
            let declaration =
                CapabilityDeclaration::new(node.clone(), capability.as_ref(), scope);
            if let Some(&existing) = emitted.get(&declaration.identifier) {
                let existing: &CapabilityDeclaration = &declarations[existing];
                return Err(GenerateError::DuplicateIdentifier {
                    identifier: declaration.identifier,
                    existing_type: existing.type_node.type_name.clone(),
                    existing_capability: existing.capability_name.clone(),
                    conflicting_type: declaration.type_node.type_name,
                    conflicting_capability: declaration.capability_name,
                });
            }
            debug!(
                identifier = %declaration.identifier,
                type_name = %declaration.type_node.type_name,
                capability = %declaration.capability_name,
                "declaration planned"
            );
            emitted.insert(declaration.identifier.clone(), declarations.len());
            declarations.push(declaration);
        }
    }

    info!(count = declarations.len(), %scope, "declarations generated");
    Ok(declarations)
}
