//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// Generation has no source spans to point at; instead a diagnostic names its
/// `subject`, usually the offending type or `Type/Capability` pair, so the
/// build host can reference it in its own failure report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// What the diagnostic is about (a type name, a config key, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Explanatory footnotes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Actionable suggestions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Sets the subject of this diagnostic.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 1);
        let diag = Diagnostic::error(code, "unsupported type kind");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "unsupported type kind");
        assert_eq!(diag.code.to_string(), "E001");
        assert!(diag.subject.is_none());
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Error, 3);
        let diag = Diagnostic::error(code, "duplicate identifier `fooEncoder`")
            .with_subject("a::Foo")
            .with_note("also produced by b::Foo")
            .with_help("rename one of the types");
        assert_eq!(diag.subject.as_deref(), Some("a::Foo"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn json_skips_empty_fields() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 1), "ignored");
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("notes"));
        assert!(!json.contains("subject"));
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message, "ignored");
    }
}
