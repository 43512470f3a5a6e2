//! `cachegen init`: project scaffolding.
//!
//! Writes a starter `cachegen.toml` and a `schema/models.toml` describing a
//! small type graph, so `cachegen generate` works immediately.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cachegen_config::CONFIG_FILE_NAME;

use crate::GlobalArgs;

const SCHEMA_FILE: &str = "schema/models.toml";

const STARTER_CONFIG: &str = r#"[generation]
root = "Order"
capabilities = ["Encoder", "Decoder"]
mode = "shared"
import_hints = ["crate::models::*"]

[schema]
paths = ["schema/models.toml"]

[derive]
template = "derive::{capability_snake}::<{type}>()"

[output]
path = "src/cached_instances.rs"
format = "rust"
"#;

const STARTER_SCHEMA: &str = r#"[types.Order]
fields = [
  { name = "id", type = "u64" },
  { name = "customer", type = "Customer" },
  { name = "lines", type = "Vec<OrderLine>" },
  { name = "status", type = "Status" },
]

[types.Customer]
fields = [
  { name = "name", type = "String" },
  { name = "address", type = "Option<Address>" },
]

[types.OrderLine]
fields = [
  { name = "sku", type = "String" },
  { name = "quantity", type = "u32" },
]

[types.Address]
fields = [
  { name = "street", type = "String" },
  { name = "city", type = "String" },
]

[types.Status]
kind = "enum"
"#;

/// Runs the `cachegen init` command.
///
/// Initializes `dir` (created if missing) or the current directory. Refuses
/// to overwrite an existing `cachegen.toml` or schema file.
pub fn run(dir: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };

    let created = scaffold(&project_dir)?;
    if !global.quiet {
        for path in &created {
            eprintln!("     Created {}", path.display());
        }
    }
    Ok(0)
}

/// Writes the starter files, returning their paths.
fn scaffold(project_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let schema_path = project_dir.join(SCHEMA_FILE);
    for path in [&config_path, &schema_path] {
        if path.exists() {
            return Err(format!("{} already exists", path.display()).into());
        }
    }

    if let Some(parent) = schema_path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_new(&config_path, STARTER_CONFIG)?;
    write_new(&schema_path, STARTER_SCHEMA)?;
    Ok(vec![config_path, schema_path])
}

fn write_new(path: &Path, content: &str) -> io::Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())
}
