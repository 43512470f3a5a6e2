//! Errors raised during type-graph discovery.

use std::fmt;

/// Why a type was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The type is known but has no field schema (primitive, enumeration, opaque).
    NotComposite,
    /// The type name does not resolve to any known type.
    Unresolved {
        /// The `Owner.field` that referenced it, or `None` for the root.
        referenced_by: Option<String>,
    },
    /// The type can reach itself through its fields.
    Cyclic {
        /// Every type on the cycle, in discovery order.
        members: Vec<String>,
    },
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NotComposite => write!(f, "has no field schema"),
            UnsupportedReason::Unresolved {
                referenced_by: Some(field),
            } => write!(f, "is referenced by `{field}` but is not a known type"),
            UnsupportedReason::Unresolved {
                referenced_by: None,
            } => write!(f, "is not a known type"),
            UnsupportedReason::Cyclic { members } => {
                write!(f, "is part of a reference cycle through ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "`{member}`")?;
                }
                Ok(())
            }
        }
    }
}

/// Errors produced by [`discover`](crate::discover).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A type without a usable field schema was found where a composite type
    /// was required.
    #[error("unsupported type kind: `{type_name}` {reason}")]
    UnsupportedTypeKind {
        /// The offending type.
        type_name: String,
        /// Why it was rejected.
        reason: UnsupportedReason,
    },
}

impl GraphError {
    /// Returns the name of the offending type.
    pub fn type_name(&self) -> &str {
        match self {
            GraphError::UnsupportedTypeKind { type_name, .. } => type_name,
        }
    }
}
