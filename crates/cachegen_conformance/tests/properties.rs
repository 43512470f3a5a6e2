//! Property checks over a family of generated acyclic schemas.
//!
//! Each schema is a layered DAG: a type may only reference types in deeper
//! layers, through a mix of plain, optional, sequence and map fields, with
//! primitives and enums sprinkled in. Each layout comes from a seeded
//! `StdRng`, so a failing seed is reproducible.

use std::collections::{BTreeSet, HashSet};

use cachegen_codegen::{generate, GenerateError, Scope};
use cachegen_graph::{discover, TypeGraph, TypeNode};
use cachegen_schema::{Field, FieldType, SchemaProvider, SchemaRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn type_name(layer: usize, index: usize) -> String {
    format!("L{layer}T{index}")
}

fn layered_schema(seed: u64) -> SchemaRegistry {
    let mut rng = StdRng::seed_from_u64(seed);
    let layers: usize = rng.gen_range(2..6);
    let widths: Vec<usize> = (0..layers).map(|_| rng.gen_range(1..5)).collect();
    let mut registry = SchemaRegistry::new();
    registry.declare_enum("Flag").unwrap();

    for layer in 0..layers {
        for index in 0..widths[layer] {
            let field_count = rng.gen_range(0..5);
            let mut fields = Vec::new();
            for f in 0..field_count {
                let target = if layer + 1 < layers && rng.gen_bool(2.0 / 3.0) {
                    let deeper = rng.gen_range(layer + 1..layers);
                    FieldType::named(type_name(deeper, rng.gen_range(0..widths[deeper])))
                } else if rng.gen_bool(0.5) {
                    FieldType::named("String")
                } else {
                    FieldType::named("Flag")
                };
                let ty = match rng.gen_range(0..4) {
                    0 => target,
                    1 => FieldType::optional(target),
                    2 => FieldType::sequence(target),
                    _ => FieldType::map(FieldType::named("String"), target),
                };
                fields.push(Field::new(format!("f{f}"), ty));
            }
            registry
                .declare_record(type_name(layer, index), fields)
                .unwrap();
        }
    }
    registry
}

/// Every composite type reachable from `root`, found by naive recursion.
fn reachable(schema: &SchemaRegistry, root: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_string()];
    while let Some(name) = stack.pop() {
        if !found.insert(name.clone()) {
            continue;
        }
        for field in schema.fields_of(&name).unwrap_or(&[]) {
            for inner in field.ty.innermost() {
                if schema.is_composite(inner) {
                    stack.push(inner.to_string());
                }
            }
        }
    }
    found
}

const SEEDS: std::ops::Range<u64> = 1..60;

#[test]
fn discovery_is_deterministic() {
    for seed in SEEDS {
        let schema = layered_schema(seed);
        let a = discover(&schema, "L0T0").unwrap();
        let b = discover(&schema, "L0T0").unwrap();
        assert_eq!(a, b, "seed {seed}");
    }
}

#[test]
fn discovery_has_no_duplicates_and_root_first() {
    for seed in SEEDS {
        let schema = layered_schema(seed);
        let graph = discover(&schema, "L0T0").unwrap();
        assert_eq!(graph.root().type_name, "L0T0", "seed {seed}");
        let unique: HashSet<_> = graph.iter().map(|n| n.type_name.as_str()).collect();
        assert_eq!(unique.len(), graph.len(), "seed {seed}");
    }
}

#[test]
fn discovery_is_complete() {
    for seed in SEEDS {
        let schema = layered_schema(seed);
        let graph = discover(&schema, "L0T0").unwrap();
        let discovered: BTreeSet<String> =
            graph.iter().map(|n| n.type_name.clone()).collect();
        assert_eq!(discovered, reachable(&schema, "L0T0"), "seed {seed}");
    }
}

#[test]
fn discovery_is_breadth_first() {
    // A node never appears before the node that first referenced it, and the
    // referencing positions are non-decreasing along the output.
    for seed in SEEDS {
        let schema = layered_schema(seed);
        let graph = discover(&schema, "L0T0").unwrap();
        let mut first_parent = vec![None; graph.len()];
        for &(from, to) in graph.edges() {
            if first_parent[to].is_none() {
                first_parent[to] = Some(from);
            }
        }
        let mut last = 0;
        for (index, parent) in first_parent.iter().enumerate().skip(1) {
            let parent = parent.unwrap_or_else(|| panic!("seed {seed}: orphan at {index}"));
            assert!(parent < index, "seed {seed}");
            assert!(parent >= last, "seed {seed}");
            last = parent;
        }
    }
}

#[test]
fn generated_identifiers_are_unique() {
    let capabilities = ["Encoder", "Decoder", "Eq"];
    for seed in SEEDS {
        let schema = layered_schema(seed);
        let graph = discover(&schema, "L0T0").unwrap();
        let decls = generate(&graph, &capabilities, Scope::Shared).unwrap();
        assert_eq!(decls.len(), graph.len() * capabilities.len(), "seed {seed}");
        let ids: HashSet<_> = decls.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids.len(), decls.len(), "seed {seed}");
    }
}

#[test]
fn case_folded_names_always_collide() {
    for (a, b) in [("Foo", "foo"), ("a::Item", "b::Item"), ("x.Node", "Node")] {
        let graph = TypeGraph::from_nodes([TypeNode::new(a), TypeNode::new(b)]);
        let err = generate(&graph, &["Codec"], Scope::Shared).unwrap_err();
        match err {
            GenerateError::DuplicateIdentifier {
                existing_type,
                conflicting_type,
                ..
            } => {
                assert_eq!(existing_type, a);
                assert_eq!(conflicting_type, b);
            }
            other => panic!("expected a collision for {a}/{b}, got {other:?}"),
        }
    }
}
