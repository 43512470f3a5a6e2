//! Diagnostic rendering for build logs.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[E003]: duplicate identifier `fooEncoder`
///   --> b::Foo
///    = note: first produced by `a::Foo` with capability `Encoder`
///    = help: rename one of the types or qualify its name
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        if self.color {
            out.push_str(&format!(
                "{}{}[{}]{RESET}{BOLD}: {}{RESET}\n",
                diag.severity.ansi(),
                diag.severity,
                diag.code,
                diag.message
            ));
        } else {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                diag.severity, diag.code, diag.message
            ));
        }

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_subject() {
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 1),
            "type `Color` has no field schema",
        )
        .with_subject("Color");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.starts_with("error[E001]: type `Color` has no field schema\n"));
        assert!(output.contains("  --> Color\n"));
    }

    #[test]
    fn render_warning_with_notes() {
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 1),
            "import hints ignored",
        )
        .with_note("local declarations are placed beside the type")
        .with_help("remove `generation.import_hints`");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("warning[W001]: import hints ignored"));
        assert!(output.contains("= note: local declarations are placed beside the type"));
        assert!(output.contains("= help: remove `generation.import_hints`"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_with_color() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 2), "no capabilities");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.contains("\x1b[1;31merror[E002]"));
        assert!(output.contains(RESET));
    }
}
