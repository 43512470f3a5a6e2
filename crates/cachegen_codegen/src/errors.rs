//! Diagnostic codes and builders for generation failures.
//!
//! Error codes `E001`--`E005` cover the failures that abort a run. `W001`
//! covers import hints dropped from a local-mode request.

use cachegen_diagnostics::{Category, Diagnostic, DiagnosticCode};
use cachegen_graph::{GraphError, UnsupportedReason};

use crate::derive::DerivationError;
use crate::emit::EmitError;
use crate::generator::GenerateError;

/// A type without a field schema where a composite type was required.
pub const E001: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);

/// No capability names were requested.
pub const E002: DiagnosticCode = DiagnosticCode::new(Category::Error, 2);

/// Two declarations would share an identifier.
pub const E003: DiagnosticCode = DiagnosticCode::new(Category::Error, 3);

/// The derivation engine failed for a (type, capability) pair.
pub const E004: DiagnosticCode = DiagnosticCode::new(Category::Error, 4);

/// The generated unit could not be rendered.
pub const E005: DiagnosticCode = DiagnosticCode::new(Category::Error, 5);

/// Import hints given for a local-mode run were ignored.
pub const W001: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

/// Creates a diagnostic for a discovery failure.
pub fn error_unsupported_type(err: &GraphError) -> Diagnostic {
    let GraphError::UnsupportedTypeKind { type_name, reason } = err;
    let diag = Diagnostic::error(E001, err.to_string()).with_subject(type_name.clone());
    match reason {
        UnsupportedReason::NotComposite => {
            diag.with_help("choose a record type with declared fields as the root")
        }
        UnsupportedReason::Unresolved { .. } => {
            diag.with_help("declare the type in one of the configured schema files")
        }
        UnsupportedReason::Cyclic { .. } => diag
            .with_note("memoized instances can only be generated for acyclic type graphs")
            .with_help("break the cycle or generate the cyclic types by hand"),
    }
}

/// Creates a diagnostic for a declaration-planning failure.
pub fn error_generate(err: &GenerateError) -> Diagnostic {
    match err {
        GenerateError::EmptyCapabilitySet => Diagnostic::error(E002, err.to_string())
            .with_help("list at least one capability in `generation.capabilities` or pass `--capability`"),
        GenerateError::DuplicateIdentifier {
            identifier,
            existing_type,
            conflicting_type,
            ..
        } => {
            let diag = Diagnostic::error(E003, err.to_string()).with_subject(identifier.clone());
            if existing_type == conflicting_type {
                diag.with_help("remove the repeated capability name")
            } else {
                diag.with_note("identifiers are built from the simple type name")
                    .with_help(format!(
                        "rename `{existing_type}` or `{conflicting_type}` so their simple names differ"
                    ))
            }
        }
    }
}

/// Creates a diagnostic for a derivation-engine failure.
pub fn error_derivation(type_name: &str, capability: &str, err: &DerivationError) -> Diagnostic {
    let diag = Diagnostic::error(
        E004,
        format!("cannot derive `{capability}` for `{type_name}`: {err}"),
    )
    .with_subject(format!("{type_name} / {capability}"));
    match err {
        DerivationError::UnknownPlaceholder(_) | DerivationError::UnbalancedBrace { .. } => diag
            .with_help("placeholders are {type}, {simple}, {binding}, {capability} and {capability_snake}; write {{ and }} for literal braces"),
        DerivationError::Unsupported(_) => diag,
    }
}

/// Creates a diagnostic for a rendering failure.
pub fn error_emit(err: &EmitError) -> Diagnostic {
    let diag = Diagnostic::error(E005, format!("cannot render output: {err}"));
    match err {
        EmitError::InvalidTypePath(_) => {
            diag.with_help("select the `json` output format for names that are not Rust paths")
        }
        EmitError::DuplicateName { name, .. } => diag
            .with_subject(name.clone())
            .with_help("rename one of the capabilities so the names differ by more than case"),
        EmitError::Internal(_) => diag.with_note("this is a bug in cachegen"),
        _ => diag,
    }
}

/// Creates a warning for import hints dropped from a local-mode request.
pub fn warning_import_hints_ignored(count: usize) -> Diagnostic {
    Diagnostic::warning(
        W001,
        format!("{count} import hint(s) ignored in local mode"),
    )
    .with_help("import hints only apply to shared mode; remove `generation.import_hints`")
}
