//! Shared helpers for CLI commands: project discovery, configuration and
//! schema loading, and diagnostic reporting.

use std::path::{Path, PathBuf};

use cachegen_config::{load_config, load_config_from_str, GeneratorConfig, CONFIG_FILE_NAME};
use cachegen_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use cachegen_schema::SchemaRegistry;
use tracing::debug;

use crate::{GlobalArgs, ReportFormat};

/// A loaded project: its directory and configuration.
#[derive(Debug)]
pub struct Project {
    /// Directory relative paths in the configuration are resolved against.
    pub dir: PathBuf,
    /// The validated configuration.
    pub config: GeneratorConfig,
}

/// Walks up from `start` looking for the nearest directory containing `cachegen.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Loads the project named by `--config`, or the nearest one above the
/// current directory.
///
/// `--config` may name the configuration file itself (any file name) or the
/// directory holding `cachegen.toml`.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    let project = match &global.config {
        Some(config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_file() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                let dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                Project {
                    dir,
                    config: load_config_from_str(&content)
                        .map_err(|e| format!("{}: {e}", path.display()))?,
                }
            } else {
                Project {
                    config: load_config(&path)
                        .map_err(|e| format!("{}: {e}", path.join(CONFIG_FILE_NAME).display()))?,
                    dir: path,
                }
            }
        }
        None => {
            let dir = find_project_root(&std::env::current_dir()?)?;
            Project {
                config: load_config(&dir)
                    .map_err(|e| format!("{}: {e}", dir.join(CONFIG_FILE_NAME).display()))?,
                dir,
            }
        }
    };
    debug!(dir = %project.dir.display(), "project loaded");
    Ok(project)
}

/// Loads and merges the schema files.
pub fn load_schema(paths: &[PathBuf]) -> Result<SchemaRegistry, Box<dyn std::error::Error>> {
    let registry = SchemaRegistry::load_files(paths)?;
    debug!(files = paths.len(), types = registry.len(), "schema loaded");
    Ok(registry)
}

/// Renders every diagnostic in the sink to stderr.
///
/// Warnings are suppressed by `--quiet`; errors never are.
pub fn report(sink: &DiagnosticSink, format: ReportFormat, global: &GlobalArgs) {
    let diagnostics: Vec<Diagnostic> = sink
        .take_all()
        .into_iter()
        .filter(|d| d.severity.is_error() || !global.quiet)
        .collect();
    if diagnostics.is_empty() {
        return;
    }
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|_| "[]".to_string());
            eprintln!("{json}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONFIG: &str = r#"
[generation]
root = "Order"
capabilities = ["Encoder"]

[schema]
paths = ["schema/models.toml"]
"#;

    fn global_with(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config,
        }
    }

    #[test]
    fn find_root_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
        let root = find_project_root(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
        let nested = dir.path().join("src").join("models");
        fs::create_dir_all(&nested).unwrap();
        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_project_root(dir.path()).unwrap_err();
        assert!(err.to_string().contains("could not find cachegen.toml"));
    }

    #[test]
    fn load_project_from_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, CONFIG).unwrap();
        let project = load_project(&global_with(Some(path.display().to_string()))).unwrap();
        assert_eq!(project.dir, dir.path());
        assert_eq!(project.config.generation.root, "Order");
    }

    #[test]
    fn load_project_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
        let project = load_project(&global_with(Some(dir.path().display().to_string()))).unwrap();
        assert_eq!(project.config.generation.capabilities, vec!["Encoder"]);
    }

    #[test]
    fn load_project_reports_file_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[generation\n").unwrap();
        let err = load_project(&global_with(Some(path.display().to_string()))).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
