//! Conformance test helpers for cachegen.
//!
//! Provides shared pipeline functions that take schema and configuration text
//! through the full pipeline (discover → generate → derive → emit) and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use std::path::Path;

use cachegen_codegen::{
    emitter_for, errors, run, GenerationOutput, TemplateEngine, DEFAULT_TEMPLATE,
};
use cachegen_config::{
    load_config_from_str, resolve_request, ConfigWarning, EmissionMode, GenerationRequest,
    OutputFormat, RequestOverrides,
};
use cachegen_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use cachegen_schema::SchemaRegistry;

/// The nested type graph used throughout the scenarios: a wrapper holding a
/// direct child and an optional child, one of which holds a sequence.
pub const WRAPPER_SCHEMA: &str = r#"
[types.TestWrapperClass]
fields = [
  { name = "testClass1", type = "TestClass1" },
  { name = "testClass2", type = "Option<TestClass2>" },
]

[types.TestClass1]
fields = [{ name = "list", type = "Vec<TestClass3>" }]

[types.TestClass2]
fields = [{ name = "value", type = "String" }]

[types.TestClass3]
fields = [{ name = "value", type = "Int" }]

[types.TestClass]
fields = [{ name = "name", type = "String" }]
"#;

/// Result of running the full pipeline.
pub struct PipelineResult {
    /// The run's output, absent when it failed.
    pub output: Option<GenerationOutput>,
    /// All diagnostics emitted during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Returns the generated identifiers in output order.
    pub fn identifiers(&self) -> Vec<String> {
        self.output
            .iter()
            .flat_map(|out| out.unit.declarations.declarations())
            .map(|d| d.declaration.identifier.clone())
            .collect()
    }

    /// Returns the rendered text, or an empty string when the run failed.
    pub fn text(&self) -> &str {
        self.output.as_ref().map_or("", |out| out.text.as_str())
    }

    /// Returns the codes of all diagnostics, rendered as strings (`E003`).
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }
}

/// Parses a TOML schema document.
pub fn make_schema(schema_toml: &str) -> SchemaRegistry {
    SchemaRegistry::from_toml_str(schema_toml).unwrap()
}

/// Parses a JSON schema document.
pub fn make_json_schema(schema_json: &str) -> SchemaRegistry {
    SchemaRegistry::from_json_str(schema_json).unwrap()
}

/// Creates a generation request without import hints.
pub fn make_request(root: &str, capabilities: &[&str], mode: EmissionMode) -> GenerationRequest {
    GenerationRequest {
        root: root.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        mode,
        import_hints: Vec::new(),
    }
}

/// Runs the pipeline with the default template, rendering Rust.
pub fn full_pipeline(
    schema_toml: &str,
    root: &str,
    capabilities: &[&str],
    mode: EmissionMode,
) -> PipelineResult {
    let schema = make_schema(schema_toml);
    let request = make_request(root, capabilities, mode);
    run_request(
        &request,
        &schema,
        &TemplateEngine::default(),
        OutputFormat::Rust,
        DiagnosticSink::new(),
    )
}

/// Runs the pipeline the way the CLI does: configuration text is loaded and
/// resolved against `project_dir`, and the schema comes from `schema_toml`
/// rather than the configured paths.
pub fn full_pipeline_with_config(
    config_toml: &str,
    schema_toml: &str,
    project_dir: &Path,
) -> PipelineResult {
    let config = load_config_from_str(config_toml).unwrap();
    let resolved = resolve_request(&config, &RequestOverrides::default(), project_dir).unwrap();
    let sink = DiagnosticSink::new();
    for warning in &resolved.warnings {
        match warning {
            ConfigWarning::ImportHintsIgnored { count } => {
                sink.emit(errors::warning_import_hints_ignored(*count));
            }
        }
    }
    let engine = TemplateEngine::new(resolved.template.as_deref().unwrap_or(DEFAULT_TEMPLATE));
    run_request(
        &resolved.request,
        &make_schema(schema_toml),
        &engine,
        resolved.format,
        sink,
    )
}

fn run_request(
    request: &GenerationRequest,
    schema: &SchemaRegistry,
    engine: &TemplateEngine,
    format: OutputFormat,
    sink: DiagnosticSink,
) -> PipelineResult {
    let emitter = emitter_for(format);
    let output = match run(request, schema, engine, &*emitter) {
        Ok(output) => Some(output),
        Err(err) => {
            sink.emit(err.to_diagnostic());
            None
        }
    };
    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    PipelineResult {
        output,
        has_errors: error_count > 0,
        error_count,
        warning_count,
        diagnostics,
    }
}
