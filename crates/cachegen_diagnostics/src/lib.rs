//! Diagnostic creation, severity management, and terminal rendering.
//!
//! Generation failures and configuration warnings are turned into structured
//! [`Diagnostic`] messages with a severity, a stable code, and optional notes
//! and help lines. The thread-safe [`DiagnosticSink`] accumulates them during a
//! run, and [`TerminalRenderer`] formats them for a build log.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
