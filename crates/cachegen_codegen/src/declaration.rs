//! Capability declarations and their emission scope.

use std::fmt;

use cachegen_common::lower_camel;
use cachegen_config::EmissionMode;
use cachegen_graph::TypeNode;
use serde::{Deserialize, Serialize};

/// Where a generated declaration is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Grouped with the declarations of the same capability into a bundle the
    /// consumer brings into scope explicitly.
    Shared,
    /// Placed next to the type's own definition.
    Local,
}

impl From<EmissionMode> for Scope {
    fn from(mode: EmissionMode) -> Self {
        match mode {
            EmissionMode::Shared => Scope::Shared,
            EmissionMode::Local => Scope::Local,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Shared => write!(f, "shared"),
            Scope::Local => write!(f, "local"),
        }
    }
}

/// One memoized capability instance to generate, for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityDeclaration {
    /// The type the instance is for.
    pub type_node: TypeNode,
    /// The capability being instantiated.
    pub capability_name: String,
    /// Name of the memoized value.
    pub identifier: String,
    /// Placement of the declaration.
    pub scope: Scope,
}

impl CapabilityDeclaration {
    /// Creates a declaration, deriving its identifier from the type's simple
    /// name followed by the capability name.
    pub fn new(type_node: TypeNode, capability_name: impl Into<String>, scope: Scope) -> Self {
        let capability_name = capability_name.into();
        let identifier = declaration_identifier(&type_node.type_name, &capability_name);
        Self {
            type_node,
            capability_name,
            identifier,
            scope,
        }
    }
}

/// `lowerCamel(simple type name) + capability`.
pub fn declaration_identifier(type_name: &str, capability_name: &str) -> String {
    let mut identifier = lower_camel(type_name);
    identifier.push_str(capability_name);
    identifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_concatenates() {
        let decl = CapabilityDeclaration::new(TypeNode::new("TestClass"), "Decoder", Scope::Local);
        assert_eq!(decl.identifier, "testClassDecoder");
        assert_eq!(decl.scope, Scope::Local);
    }

    #[test]
    fn identifier_uses_simple_name() {
        assert_eq!(
            declaration_identifier("models::Address", "Encoder"),
            "addressEncoder"
        );
    }

    #[test]
    fn scope_from_mode() {
        assert_eq!(Scope::from(EmissionMode::Shared), Scope::Shared);
        assert_eq!(Scope::from(EmissionMode::Local), Scope::Local);
        assert_eq!(Scope::Local.to_string(), "local");
    }

    #[test]
    fn serializes_scope_lowercase() {
        let decl = CapabilityDeclaration::new(TypeNode::new("A"), "Show", Scope::Shared);
        let json = serde_json::to_value(&decl).unwrap();
        assert_eq!(json["scope"], "shared");
        assert_eq!(json["identifier"], "aShow");
        assert_eq!(json["type_node"]["type_name"], "A");
    }
}
