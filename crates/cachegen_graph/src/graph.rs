//! Type nodes and the ordered type graph.

use std::collections::HashSet;

use cachegen_common::lower_camel;
use cachegen_schema::SchemaProvider;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, UnsupportedReason};

/// A composite type discovered in the graph.
///
/// Equality and hashing use `type_name` only; `binding_name` is derived from it.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    /// Lowercase-initial identifier used to name memoized values.
    pub binding_name: String,
    /// Canonical type name.
    pub type_name: String,
}

impl TypeNode {
    /// Creates a node, deriving the binding name from the type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            binding_name: lower_camel(&type_name),
            type_name,
        }
    }
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl std::hash::Hash for TypeNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
    }
}

/// Ordered, deduplicated sequence of composite types reachable from a root.
///
/// The root is always first. Besides the nodes, the graph remembers which
/// node's fields referenced which other nodes, by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    #[serde(skip)]
    edges: Vec<(usize, usize)>,
}

impl TypeGraph {
    pub(crate) fn from_parts(nodes: Vec<TypeNode>, edges: Vec<(usize, usize)>) -> Self {
        Self { nodes, edges }
    }

    /// Builds a graph from explicit nodes, without edges.
    ///
    /// Nodes sharing a `type_name` are the same node; only the first is kept.
    pub fn from_nodes(nodes: impl IntoIterator<Item = TypeNode>) -> Self {
        let mut seen = HashSet::new();
        let nodes = nodes
            .into_iter()
            .filter(|n| seen.insert(n.type_name.clone()))
            .collect();
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Builds a one-node graph for `root` without traversing its fields.
    ///
    /// Used when declarations are generated for exactly one type. The root
    /// must still be a composite type.
    pub fn single<S: SchemaProvider + ?Sized>(schema: &S, root: &str) -> Result<Self, GraphError> {
        check_root(schema, root)?;
        Ok(Self::from_parts(vec![TypeNode::new(root)], Vec::new()))
    }

    /// Returns the root node.
    ///
    /// # Panics
    ///
    /// Panics if the graph is empty, which only a `from_nodes` call with no
    /// nodes can produce.
    pub fn root(&self) -> &TypeNode {
        &self.nodes[0]
    }

    /// Returns the nodes in discovery order.
    pub fn nodes(&self) -> &[TypeNode] {
        &self.nodes
    }

    /// Iterates the nodes in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeNode> {
        self.nodes.iter()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the nodes directly referenced by the node at `index`, in field order.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &TypeNode> {
        self.edges
            .iter()
            .filter(move |(from, _)| *from == index)
            .map(|&(_, to)| &self.nodes[to])
    }

    /// Returns the `(from, to)` reference edges by node index.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl<'a> IntoIterator for &'a TypeGraph {
    type Item = &'a TypeNode;
    type IntoIter = std::slice::Iter<'a, TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Rejects a root that is not a composite type.
pub(crate) fn check_root<S: SchemaProvider + ?Sized>(
    schema: &S,
    root: &str,
) -> Result<(), GraphError> {
    if schema.is_composite(root) {
        return Ok(());
    }
    let reason = if schema.resolves(root) {
        UnsupportedReason::NotComposite
    } else {
        UnsupportedReason::Unresolved {
            referenced_by: None,
        }
    };
    Err(GraphError::UnsupportedTypeKind {
        type_name: root.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachegen_schema::SchemaRegistry;

    #[test]
    fn node_derives_binding_name() {
        let node = TypeNode::new("TestWrapperClass");
        assert_eq!(node.binding_name, "testWrapperClass");
        assert_eq!(node.type_name, "TestWrapperClass");
        assert_eq!(TypeNode::new("models::Address").binding_name, "address");
    }

    #[test]
    fn node_identity_is_type_name() {
        let mut a = TypeNode::new("Foo");
        let b = TypeNode::new("Foo");
        a.binding_name = "somethingElse".to_string();
        assert_eq!(a, b);
        assert_ne!(TypeNode::new("Foo"), TypeNode::new("foo"));
    }

    #[test]
    fn from_nodes_keeps_first_occurrence() {
        let graph = TypeGraph::from_nodes([
            TypeNode::new("A"),
            TypeNode::new("B"),
            TypeNode::new("A"),
        ]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.root().type_name, "A");
        assert_eq!(graph.nodes()[1].type_name, "B");
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn single_accepts_composite_root() {
        let mut registry = SchemaRegistry::new();
        registry.declare_record("TestClass", vec![]).unwrap();
        let graph = TypeGraph::single(&registry, "TestClass").unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.root().binding_name, "testClass");
    }

    #[test]
    fn single_rejects_enum_root() {
        let mut registry = SchemaRegistry::new();
        registry.declare_enum("Color").unwrap();
        let err = TypeGraph::single(&registry, "Color").unwrap_err();
        assert_eq!(
            err,
            GraphError::UnsupportedTypeKind {
                type_name: "Color".to_string(),
                reason: UnsupportedReason::NotComposite,
            }
        );
    }

    #[test]
    fn single_rejects_unknown_root() {
        let registry = SchemaRegistry::new();
        let err = TypeGraph::single(&registry, "Nowhere").unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnsupportedTypeKind {
                reason: UnsupportedReason::Unresolved { referenced_by: None },
                ..
            }
        ));
    }

    #[test]
    fn serializes_as_node_list() {
        let graph = TypeGraph::from_nodes([TypeNode::new("A")]);
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(
            json,
            r#"{"nodes":[{"binding_name":"a","type_name":"A"}]}"#
        );
    }
}
