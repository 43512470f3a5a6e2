//! The schema provider interface.

use crate::field_type::FieldType;
use serde::Serialize;

/// A single declared field of a composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The field name as declared.
    pub name: String,
    /// The declared field type.
    pub ty: FieldType,
}

impl Field {
    /// Creates a field.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// What kind of type a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A record-like type with an ordered field schema.
    Record,
    /// An enumeration without fields.
    Enum,
    /// A primitive or otherwise opaque type.
    Opaque,
}

/// Read-only access to the field schemas of composite types.
///
/// Implementations must be deterministic across repeated calls within one
/// generation run: the same name always yields the same answer and the same
/// field order.
pub trait SchemaProvider {
    /// Returns `true` if `type_name` is a composite type with a field schema.
    fn is_composite(&self, type_name: &str) -> bool;

    /// Returns the fields of a composite type in declaration order, or `None`
    /// if `type_name` is not composite.
    fn fields_of(&self, type_name: &str) -> Option<&[Field]>;

    /// Returns `true` if `type_name` refers to any known type: composite,
    /// enumeration, or opaque.
    ///
    /// The default accepts every name, treating unknown names as opaque.
    fn resolves(&self, type_name: &str) -> bool {
        let _ = type_name;
        true
    }
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for &T {
    fn is_composite(&self, type_name: &str) -> bool {
        (**self).is_composite(type_name)
    }

    fn fields_of(&self, type_name: &str) -> Option<&[Field]> {
        (**self).fields_of(type_name)
    }

    fn resolves(&self, type_name: &str) -> bool {
        (**self).resolves(type_name)
    }
}
