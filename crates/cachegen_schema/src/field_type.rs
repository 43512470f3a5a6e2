//! Field type references and wrapper unwrapping.

use std::fmt;

/// The declared type of a field.
///
/// Either a plain reference to a named type (composite, enumeration, or
/// opaque) or a wrapper around another field type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A reference to a named type, e.g. `TestClass1` or `models::Address`.
    Named(String),
    /// An optional value, e.g. `Option<T>`.
    Optional(Box<FieldType>),
    /// A sequence or set of values, e.g. `Vec<T>`.
    Sequence(Box<FieldType>),
    /// A map from keys to values, e.g. `BTreeMap<K, V>`.
    Map {
        /// The key type.
        key: Box<FieldType>,
        /// The value type.
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// Convenience constructor for a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    /// Wraps `inner` in an optional.
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    /// Wraps `inner` in a sequence.
    pub fn sequence(inner: FieldType) -> Self {
        FieldType::Sequence(Box::new(inner))
    }

    /// Builds a map type.
    pub fn map(key: FieldType, value: FieldType) -> Self {
        FieldType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns the named types left after peeling off every wrapper layer.
    ///
    /// A map contributes its key before its value, so the result follows the
    /// order in which the names are written.
    pub fn innermost(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_innermost(&mut out);
        out
    }

    fn collect_innermost<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FieldType::Named(name) => out.push(name),
            FieldType::Optional(inner) | FieldType::Sequence(inner) => {
                inner.collect_innermost(out)
            }
            FieldType::Map { key, value } => {
                key.collect_innermost(out);
                value.collect_innermost(out);
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Named(name) => write!(f, "{name}"),
            FieldType::Optional(inner) => write!(f, "Option<{inner}>"),
            FieldType::Sequence(inner) => write!(f, "Vec<{inner}>"),
            FieldType::Map { key, value } => write!(f, "Map<{key}, {value}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_of_named() {
        assert_eq!(FieldType::named("TestClass1").innermost(), vec!["TestClass1"]);
    }

    #[test]
    fn innermost_through_nested_wrappers() {
        let ty = FieldType::optional(FieldType::sequence(FieldType::named("TestClass3")));
        assert_eq!(ty.innermost(), vec!["TestClass3"]);
    }

    #[test]
    fn innermost_of_map_is_key_then_value() {
        let ty = FieldType::map(
            FieldType::named("Key"),
            FieldType::sequence(FieldType::named("Value")),
        );
        assert_eq!(ty.innermost(), vec!["Key", "Value"]);
    }

    #[test]
    fn display_normalizes_wrappers() {
        let ty = FieldType::map(
            FieldType::named("String"),
            FieldType::optional(FieldType::named("a::B")),
        );
        assert_eq!(ty.to_string(), "Map<String, Option<a::B>>");
    }
}
