//! In-memory schema registry loaded from TOML or JSON schema files.
//!
//! Schema document format (TOML shown; JSON uses the same shape):
//!
//! ```toml
//! [types.TestWrapperClass]
//! fields = [
//!   { name = "testClass1", type = "TestClass1" },
//!   { name = "testClass2", type = "Option<TestClass2>" },
//! ]
//!
//! [types.Color]
//! kind = "enum"
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use cachegen_common::{Ident, Interner};
use serde::Deserialize;

use crate::error::SchemaError;
use crate::parser::parse_type_ref;
use crate::provider::{Field, SchemaProvider, TypeKind};

/// Names that always resolve as opaque leaf types, without a declaration.
const BUILTIN_PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "String", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16",
    "i32", "i64", "i128", "isize", "f32", "f64", "Boolean", "Byte", "Short", "Int", "Integer",
    "Long", "Float", "Double", "Char", "BigInt", "BigDecimal", "Unit",
];

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Canonical type name.
    pub name: String,
    /// Record, enumeration, or opaque.
    pub kind: TypeKind,
    /// Fields in declaration order. Empty unless `kind` is [`TypeKind::Record`].
    pub fields: Vec<Field>,
}

/// A [`SchemaProvider`] backed by explicit type declarations.
///
/// Type names are interned; lookups by name go through the interner and then
/// an [`Ident`]-keyed table.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    interner: Interner,
    types: HashMap<Ident, TypeDecl>,
    /// Declaration order, for stable iteration.
    order: Vec<Ident>,
}

#[derive(Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    types: BTreeMap<String, RawType>,
}

#[derive(Deserialize)]
struct RawType {
    #[serde(default)]
    kind: RawKind,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Deserialize, Default, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    #[default]
    Record,
    Enum,
    Opaque,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a record type with the given fields.
    pub fn declare_record(
        &mut self,
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    owner: name,
                    field: field.name.clone(),
                });
            }
        }
        self.declare(TypeDecl {
            name,
            kind: TypeKind::Record,
            fields,
        })
    }

    /// Declares an enumeration (a type without a field schema).
    pub fn declare_enum(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        self.declare(TypeDecl {
            name: name.into(),
            kind: TypeKind::Enum,
            fields: Vec::new(),
        })
    }

    /// Declares an opaque type.
    pub fn declare_opaque(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        self.declare(TypeDecl {
            name: name.into(),
            kind: TypeKind::Opaque,
            fields: Vec::new(),
        })
    }

    fn declare(&mut self, decl: TypeDecl) -> Result<(), SchemaError> {
        let id = self.interner.get_or_intern(&decl.name);
        if self.types.contains_key(&id) {
            return Err(SchemaError::DuplicateType(decl.name));
        }
        self.types.insert(id, decl);
        self.order.push(id);
        Ok(())
    }

    /// Looks up a declared type by canonical name.
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.interner.get(name).and_then(|id| self.types.get(&id))
    }

    /// Returns the kind of a declared or builtin type.
    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        match self.get(name) {
            Some(decl) => Some(decl.kind),
            None if BUILTIN_PRIMITIVES.contains(&name) => Some(TypeKind::Opaque),
            None => None,
        }
    }

    /// Iterates declared types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.order.iter().filter_map(|id| self.types.get(id))
    }

    /// Returns the number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Builds a registry from a TOML schema document.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.add_toml_str(content)?;
        Ok(registry)
    }

    /// Builds a registry from a JSON schema document.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.add_json_str(content)?;
        Ok(registry)
    }

    /// Merges a TOML schema document into this registry.
    pub fn add_toml_str(&mut self, content: &str) -> Result<(), SchemaError> {
        let doc: SchemaDocument =
            toml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        self.add_document(doc)
    }

    /// Merges a JSON schema document into this registry.
    pub fn add_json_str(&mut self, content: &str) -> Result<(), SchemaError> {
        let doc: SchemaDocument =
            serde_json::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        self.add_document(doc)
    }

    /// Merges a schema file, choosing the format from its extension.
    pub fn add_file(&mut self, path: &Path) -> Result<(), SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => self.add_toml_str(&content),
            Some("json") => self.add_json_str(&content),
            _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Builds a registry from several schema files, merged in order.
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for path in paths {
            registry.add_file(path.as_ref())?;
        }
        Ok(registry)
    }

    fn add_document(&mut self, doc: SchemaDocument) -> Result<(), SchemaError> {
        for (name, raw) in doc.types {
            match raw.kind {
                RawKind::Record => {
                    let fields = raw
                        .fields
                        .into_iter()
                        .map(|f| {
                            let ty = parse_type_ref(&f.ty).map_err(|source| {
                                SchemaError::InvalidTypeRef {
                                    owner: name.clone(),
                                    field: f.name.clone(),
                                    source,
                                }
                            })?;
                            Ok(Field::new(f.name, ty))
                        })
                        .collect::<Result<Vec<_>, SchemaError>>()?;
                    self.declare_record(name, fields)?;
                }
                RawKind::Enum | RawKind::Opaque if !raw.fields.is_empty() => {
                    return Err(SchemaError::FieldsOnNonRecord(name));
                }
                RawKind::Enum => self.declare_enum(name)?,
                RawKind::Opaque => self.declare_opaque(name)?,
            }
        }
        Ok(())
    }
}

impl SchemaProvider for SchemaRegistry {
    fn is_composite(&self, type_name: &str) -> bool {
        self.get(type_name)
            .is_some_and(|decl| decl.kind == TypeKind::Record)
    }

    fn fields_of(&self, type_name: &str) -> Option<&[Field]> {
        self.get(type_name)
            .filter(|decl| decl.kind == TypeKind::Record)
            .map(|decl| decl.fields.as_slice())
    }

    fn resolves(&self, type_name: &str) -> bool {
        self.kind_of(type_name).is_some()
    }
}
