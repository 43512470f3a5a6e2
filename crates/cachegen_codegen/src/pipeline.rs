//! One generation run, from request to rendered text.

use cachegen_config::{EmissionMode, GenerationRequest};
use cachegen_diagnostics::Diagnostic;
use cachegen_graph::{discover, GraphError, TypeGraph};
use cachegen_schema::SchemaProvider;
use tracing::info;

use crate::bundle::{DeclarationSet, DerivedDeclaration};
use crate::declaration::Scope;
use crate::derive::{DerivationEngine, DerivationError};
use crate::emit::{CodeEmitter, EmitError, GeneratedUnit};
use crate::errors;
use crate::generator::{generate, GenerateError};

/// The result of a successful run.
#[derive(Debug)]
pub struct GenerationOutput {
    /// Types the declarations were generated for.
    pub graph: TypeGraph,
    /// The derived declarations and their placement.
    pub unit: GeneratedUnit,
    /// The rendered text.
    pub text: String,
}

/// Any failure of a run. Each one aborts the run with no output.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Discovery rejected a type.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Declaration planning failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The derivation engine failed; reported as the engine raised it.
    #[error("derivation failed for `{type_name}` ({capability}): {source}")]
    DerivationFailure {
        /// The type being derived.
        type_name: String,
        /// The capability being derived.
        capability: String,
        /// The engine's error.
        #[source]
        source: DerivationError,
    },

    /// Rendering failed.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl GenError {
    /// Converts the error into a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenError::Graph(err) => errors::error_unsupported_type(err),
            GenError::Generate(err) => errors::error_generate(err),
            GenError::DerivationFailure {
                type_name,
                capability,
                source,
            } => errors::error_derivation(type_name, capability, source),
            GenError::Emit(err) => errors::error_emit(err),
        }
    }
}

/// Runs discovery, declaration planning, derivation and rendering.
///
/// Shared mode discovers the whole graph under the request's root. Local mode
/// generates for the root alone and never looks at its fields.
pub fn run<S, D, E>(
    request: &GenerationRequest,
    schema: &S,
    engine: &D,
    emitter: &E,
) -> Result<GenerationOutput, GenError>
where
    S: SchemaProvider + ?Sized,
    D: DerivationEngine + ?Sized,
    E: CodeEmitter + ?Sized,
{
    let graph = match request.mode {
        EmissionMode::Shared => discover(schema, &request.root)?,
        EmissionMode::Local => TypeGraph::single(schema, &request.root)?,
    };
    let scope = Scope::from(request.mode);
    let declarations = generate(&graph, request.capabilities.as_slice(), scope)?;

    let derived = declarations
        .into_iter()
        .map(|declaration| -> Result<DerivedDeclaration, GenError> {
            let initializer = engine
                .derive_and_memoize(&declaration.type_node, &declaration.capability_name)
                .map_err(|source| GenError::DerivationFailure {
                    type_name: declaration.type_node.type_name.clone(),
                    capability: declaration.capability_name.clone(),
                    source,
                })?;
            Ok(DerivedDeclaration {
                declaration,
                initializer,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let import_hints = match scope {
        Scope::Shared => request.import_hints.clone(),
        Scope::Local => Vec::new(),
    };
    let unit = GeneratedUnit {
        root: request.root.clone(),
        import_hints,
        declarations: DeclarationSet::new(scope, derived),
    };
    let text = emitter.emit(&unit)?;

    info!(
        root = %request.root,
        %scope,
        types = graph.len(),
        declarations = unit.declarations.len(),
        format = emitter.name(),
        "generation finished"
    );
    Ok(GenerationOutput { graph, unit, text })
}
