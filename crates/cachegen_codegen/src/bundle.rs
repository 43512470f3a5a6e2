//! Grouping derived declarations for placement.
//!
//! Shared-scope declarations are grouped into one bundle per capability, so a
//! consumer can bring a subset of capabilities into scope. Local-scope
//! declarations all belong to a single type and form one block beside it.

use cachegen_common::{InternalError, InternalResult};
use cachegen_graph::TypeNode;
use serde::Serialize;

use crate::declaration::{CapabilityDeclaration, Scope};
use crate::derive::Initializer;

/// A declaration together with the initializer its engine produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedDeclaration {
    /// The planned declaration.
    #[serde(flatten)]
    pub declaration: CapabilityDeclaration,
    /// Expression computing the memoized value.
    pub initializer: Initializer,
}

/// Every derived declaration of one generation run, in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationSet {
    scope: Scope,
    declarations: Vec<DerivedDeclaration>,
}

/// Shared-scope declarations of one capability.
#[derive(Debug, PartialEq, Eq)]
pub struct Bundle<'a> {
    /// The capability every declaration in the bundle instantiates.
    pub capability_name: &'a str,
    /// Declarations in generation order.
    pub declarations: Vec<&'a DerivedDeclaration>,
}

/// Local-scope declarations, all for one type.
#[derive(Debug, PartialEq, Eq)]
pub struct LocalBlock<'a> {
    /// The type the block is placed beside.
    pub type_node: &'a TypeNode,
    /// Declarations in capability order.
    pub declarations: Vec<&'a DerivedDeclaration>,
}

impl DeclarationSet {
    /// Creates a set. Every declaration is expected to carry `scope`.
    pub fn new(scope: Scope, declarations: Vec<DerivedDeclaration>) -> Self {
        Self {
            scope,
            declarations,
        }
    }

    /// Returns the scope of the set.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the declarations in generation order.
    pub fn declarations(&self) -> &[DerivedDeclaration] {
        &self.declarations
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if there are no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Groups the declarations by capability.
    ///
    /// Bundles appear in the order their capability first appears; each
    /// bundle keeps generation order, which is type-graph order.
    pub fn bundles(&self) -> Vec<Bundle<'_>> {
        let mut bundles: Vec<Bundle<'_>> = Vec::new();
        for derived in &self.declarations {
            let capability = derived.declaration.capability_name.as_str();
            match bundles.iter_mut().find(|b| b.capability_name == capability) {
                Some(bundle) => bundle.declarations.push(derived),
                None => bundles.push(Bundle {
                    capability_name: capability,
                    declarations: vec![derived],
                }),
            }
        }
        bundles
    }

    /// Returns the single block of a local-scope set.
    ///
    /// # Errors
    ///
    /// An [`InternalError`] if the set is empty or spans more than one type.
    /// Local generation always runs over a one-node graph, so either case is
    /// a bug in the caller.
    pub fn local_block(&self) -> InternalResult<LocalBlock<'_>> {
        let first = self
            .declarations
            .first()
            .ok_or_else(|| InternalError::new("local block without declarations"))?;
        let type_node = &first.declaration.type_node;
        if let Some(other) = self
            .declarations
            .iter()
            .find(|d| d.declaration.type_node != *type_node)
        {
            return Err(InternalError::new(format!(
                "local block spans `{}` and `{}`",
                type_node.type_name, other.declaration.type_node.type_name
            )));
        }
        Ok(LocalBlock {
            type_node,
            declarations: self.declarations.iter().collect(),
        })
    }
}
