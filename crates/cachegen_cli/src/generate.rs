//! `cachegen generate`: renders the memoized declarations.
//!
//! 1. Load the project configuration and apply command-line overrides
//! 2. Load the schema files
//! 3. Discover, plan, derive and render (`cachegen_codegen::run`)
//! 4. Write the output, print it, or with `--check` compare it to the file on disk

use std::fs;
use std::path::{Path, PathBuf};

use cachegen_codegen::{
    emitter_for, errors, read_fingerprint, run as run_pipeline, TemplateEngine, DEFAULT_TEMPLATE,
};
use cachegen_config::{resolve_request, ConfigWarning, RequestOverrides};
use cachegen_diagnostics::DiagnosticSink;
use tracing::debug;

use crate::pipeline::{load_project, load_schema, report};
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// Runs the `cachegen generate` command.
///
/// Returns exit code 0 on success, 1 if generation failed or `--check` found
/// the output stale.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let overrides = RequestOverrides {
        root: args.root.clone(),
        capabilities: args.capabilities.clone(),
        mode: args.mode.map(Into::into),
        format: args.format.map(Into::into),
        output: args.output.as_ref().map(PathBuf::from),
    };
    let resolved = resolve_request(&project.config, &overrides, &project.dir)?;

    let sink = DiagnosticSink::new();
    for warning in &resolved.warnings {
        match warning {
            ConfigWarning::ImportHintsIgnored { count } => {
                sink.emit(errors::warning_import_hints_ignored(*count));
            }
        }
    }

    let schema = load_schema(&resolved.schema_paths)?;
    let engine = TemplateEngine::new(resolved.template.as_deref().unwrap_or(DEFAULT_TEMPLATE));
    let emitter = emitter_for(resolved.format);

    if !global.quiet {
        eprintln!(
            "  Generating `{}` ({}, {} capability(ies))",
            resolved.request.root,
            resolved.request.mode,
            resolved.request.capabilities.len()
        );
    }

    let output = match run_pipeline(&resolved.request, &schema, &engine, &*emitter) {
        Ok(output) => output,
        Err(err) => {
            debug!(error = %err, "generation failed");
            sink.emit(err.to_diagnostic());
            report(&sink, ReportFormat::Text, global);
            return Ok(1);
        }
    };
    report(&sink, ReportFormat::Text, global);

    let summary = format!(
        "{} declaration(s) for {} type(s)",
        output.unit.declarations.len(),
        output.graph.len()
    );

    if args.check {
        let Some(path) = &resolved.output_path else {
            return Err("--check needs an output path (`output.path` or `--output`)".into());
        };
        return Ok(check(path, &output.text, global));
    }

    match &resolved.output_path {
        Some(path) => {
            write_output(path, &output.text)?;
            if !global.quiet {
                eprintln!("     Wrote {summary} to {}", path.display());
            }
        }
        None => {
            print!("{}", output.text);
            if !global.quiet {
                eprintln!("     Generated {summary}");
            }
        }
    }
    Ok(0)
}

/// Compares freshly rendered text with the file on disk.
fn check(path: &Path, rendered: &str, global: &GlobalArgs) -> i32 {
    let existing = fs::read_to_string(path).ok();
    if existing.as_deref() == Some(rendered) {
        if !global.quiet {
            eprintln!("     {} is up to date", path.display());
        }
        return 0;
    }
    let found = existing
        .as_deref()
        .and_then(read_fingerprint)
        .map_or_else(|| "none".to_string(), |h| h.to_string());
    let expected = read_fingerprint(rendered).map_or_else(|| "none".to_string(), |h| h.to_string());
    eprintln!(
        "error: {} is stale (fingerprint {found}, expected {expected}); rerun `cachegen generate`",
        path.display()
    );
    1
}

fn write_output(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)
}
