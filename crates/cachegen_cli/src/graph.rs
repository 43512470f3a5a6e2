//! `cachegen graph`: prints the composite types reachable from the root.

use cachegen_codegen::GenError;
use cachegen_diagnostics::DiagnosticSink;
use cachegen_graph::{discover, TypeGraph};

use crate::pipeline::{load_project, load_schema, report};
use crate::{GlobalArgs, GraphArgs, ReportFormat};

/// Runs the `cachegen graph` command.
///
/// Returns exit code 0 on success, 1 if discovery rejected a type.
pub fn run(args: &GraphArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| project.config.generation.root.clone());
    let schema_paths: Vec<_> = project
        .config
        .schema
        .paths
        .iter()
        .map(|p| project.dir.join(p))
        .collect();
    let schema = load_schema(&schema_paths)?;

    let graph = match discover(&schema, &root) {
        Ok(graph) => graph,
        Err(err) => {
            let sink = DiagnosticSink::new();
            sink.emit(GenError::from(err).to_diagnostic());
            report(&sink, args.format, global);
            return Ok(1);
        }
    };

    match args.format {
        ReportFormat::Text => print!("{}", render_text(&graph)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
    }
    Ok(0)
}

/// One line per type in discovery order, with the types its fields reference.
fn render_text(graph: &TypeGraph) -> String {
    let mut out = String::new();
    for (index, node) in graph.iter().enumerate() {
        let children: Vec<&str> = graph
            .children_of(index)
            .map(|child| child.type_name.as_str())
            .collect();
        if children.is_empty() {
            out.push_str(&format!("{index:>3}  {}\n", node.type_name));
        } else {
            out.push_str(&format!(
                "{index:>3}  {} -> {}\n",
                node.type_name,
                children.join(", ")
            ));
        }
    }
    out
}
