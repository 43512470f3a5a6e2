//! cachegen CLI: generates memoized capability instances for a type graph.
//!
//! Provides `cachegen init` for project scaffolding, `cachegen generate` for
//! rendering the declarations (or checking a checked-in file is current), and
//! `cachegen graph` for inspecting which types a root reaches.

#![warn(missing_docs)]

mod generate;
mod graph;
mod init;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use cachegen_config::{EmissionMode, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// cachegen: pre-generated, memoized capability instances.
#[derive(Parser, Debug)]
#[command(name = "cachegen", version, about = "Memoized capability instance generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `cachegen.toml` file, or to the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a starter `cachegen.toml` and schema file.
    Init {
        /// Directory to initialize. Defaults to the current directory.
        dir: Option<String>,
    },
    /// Generate the memoized declarations.
    Generate(GenerateArgs),
    /// Print the composite types reachable from the root.
    Graph(GraphArgs),
}

/// Arguments for the `cachegen generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Root type, replacing `generation.root`.
    #[arg(short, long)]
    pub root: Option<String>,

    /// Capability name; repeat for several. Replaces `generation.capabilities`.
    #[arg(short, long = "capability")]
    pub capabilities: Vec<String>,

    /// Emission mode, replacing `generation.mode`.
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output format, replacing `output.format`.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output file, replacing `output.path`.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verify the output file is current instead of writing it.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `cachegen graph` subcommand.
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Root type, replacing `generation.root`.
    #[arg(short, long)]
    pub root: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Emission mode selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One bundle per capability over the whole type graph.
    Shared,
    /// Declarations beside the root type only.
    Local,
}

impl From<ModeArg> for EmissionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Shared => EmissionMode::Shared,
            ModeArg::Local => EmissionMode::Local,
        }
    }
}

/// Generated output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Rust source.
    Rust,
    /// JSON description of the declarations.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Rust => OutputFormat::Rust,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Init { dir } => init::run(dir, &global),
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Graph(ref args) => graph::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .try_init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}
