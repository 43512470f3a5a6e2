//! Breadth-first discovery of the composite types reachable from a root.

use std::collections::{HashMap, HashSet, VecDeque};

use cachegen_schema::SchemaProvider;
use tracing::{debug, info};

use crate::cycle::find_cycle;
use crate::error::{GraphError, UnsupportedReason};
use crate::graph::{check_root, TypeGraph, TypeNode};

/// Mutable state of one discovery run.
///
/// Every call to [`discover`] owns a fresh instance, so independent runs never
/// share a seen set.
struct Discovery<'s, S: SchemaProvider + ?Sized> {
    schema: &'s S,
    /// Types waiting to be expanded.
    queue: VecDeque<String>,
    /// Type name to node index, for every type already appended.
    seen: HashMap<String, usize>,
    nodes: Vec<TypeNode>,
    /// Reference edges, recorded by name until both ends have an index.
    references: Vec<(usize, String)>,
}

impl<'s, S: SchemaProvider + ?Sized> Discovery<'s, S> {
    fn new(schema: &'s S, root: &str) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root.to_string());
        Self {
            schema,
            queue,
            seen: HashMap::new(),
            nodes: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Drains the queue, appending each newly seen type and enqueueing the
    /// composite types its fields reference.
    fn run(&mut self) -> Result<(), GraphError> {
        while let Some(type_name) = self.queue.pop_front() {
            if self.seen.contains_key(&type_name) {
                continue;
            }
            let index = self.nodes.len();
            debug!(type_name = %type_name, index, "discovered composite type");
            self.seen.insert(type_name.clone(), index);
            self.nodes.push(TypeNode::new(type_name.as_str()));
            self.expand(index, &type_name)?;
        }
        Ok(())
    }

    fn expand(&mut self, index: usize, type_name: &str) -> Result<(), GraphError> {
        let schema = self.schema;
        let Some(fields) = schema.fields_of(type_name) else {
            // Only composite types are ever enqueued.
            return Ok(());
        };
        for field in fields {
            for referenced in field.ty.innermost() {
                if !schema.resolves(referenced) {
                    return Err(GraphError::UnsupportedTypeKind {
                        type_name: referenced.to_string(),
                        reason: UnsupportedReason::Unresolved {
                            referenced_by: Some(format!("{type_name}.{}", field.name)),
                        },
                    });
                }
                if !schema.is_composite(referenced) {
                    continue;
                }
                self.references.push((index, referenced.to_string()));
                if !self.seen.contains_key(referenced) {
                    self.queue.push_back(referenced.to_string());
                }
            }
        }
        Ok(())
    }

    /// Resolves recorded references to deduplicated index edges.
    fn edges(&self) -> Vec<(usize, usize)> {
        let mut unique = HashSet::with_capacity(self.references.len());
        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(self.references.len());
        for (from, name) in &self.references {
            if let Some(&to) = self.seen.get(name) {
                if unique.insert((*from, to)) {
                    edges.push((*from, to));
                }
            }
        }
        edges
    }
}

/// Discovers every composite type reachable from `root`.
///
/// Fields are visited in declaration order; optional, sequence and map
/// wrappers are looked through (map keys before values). Primitive,
/// enumeration and opaque leaves contribute nothing. A type reachable by
/// several paths appears once, at its first discovery.
///
/// # Errors
///
/// [`GraphError::UnsupportedTypeKind`] if the root is not composite, if a
/// field references a name the schema cannot resolve, or if the reachable
/// types contain a reference cycle.
pub fn discover<S: SchemaProvider + ?Sized>(schema: &S, root: &str) -> Result<TypeGraph, GraphError> {
    check_root(schema, root)?;

    let mut discovery = Discovery::new(schema, root);
    discovery.run()?;

    let edges = discovery.edges();
    if let Some(members) = find_cycle(discovery.nodes.len(), &edges) {
        let members: Vec<String> = members
            .into_iter()
            .map(|i| discovery.nodes[i].type_name.clone())
            .collect();
        return Err(GraphError::UnsupportedTypeKind {
            type_name: members[0].clone(),
            reason: UnsupportedReason::Cyclic { members },
        });
    }

    let graph = TypeGraph::from_parts(discovery.nodes, edges);
    info!(root, types = graph.len(), "type graph discovered");
    Ok(graph)
}
