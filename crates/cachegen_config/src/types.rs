//! Configuration types deserialized from `cachegen.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The top-level generator configuration parsed from `cachegen.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// What to generate: root type, capabilities, and emission mode.
    pub generation: GenerationConfig,
    /// Where the composite type schema comes from.
    #[serde(default)]
    pub schema: SchemaConfig,
    /// How instance initializers are derived.
    #[serde(default)]
    pub derive: DeriveConfig,
    /// Where and how the generated declarations are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[generation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Canonical name of the root composite type.
    pub root: String,
    /// Capability names, in the order declarations should be emitted.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Shared bundle or local-to-type emission.
    #[serde(default)]
    pub mode: EmissionMode,
    /// Import paths passed through to the emitter (shared mode only).
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub import_hints: Vec<String>,
}

/// Placement strategy for generated declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionMode {
    /// Discover the whole type graph and emit one composable bundle per capability.
    #[default]
    Shared,
    /// Emit declarations for the root type only, beside its definition.
    Local,
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionMode::Shared => write!(f, "shared"),
            EmissionMode::Local => write!(f, "local"),
        }
    }
}

/// The `[schema]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaConfig {
    /// Schema files (`.toml` or `.json`), relative to the project directory.
    ///
    /// Files are merged in order; a type may only be declared once.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub paths: Vec<String>,
}

/// The `[derive]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeriveConfig {
    /// Initializer template. `None` selects the generator's default template.
    pub template: Option<String>,
}

/// The `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output file, relative to the project directory. Standard output when absent.
    pub path: Option<String>,
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Rendering format for generated declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rust source with lazily initialized statics.
    #[default]
    Rust,
    /// The generated unit as JSON, for hosts that render their own syntax.
    Json,
}

/// Deserializes a field that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn emission_mode_variants() {
        for (input, expected) in [
            ("shared", EmissionMode::Shared),
            ("local", EmissionMode::Local),
        ] {
            let toml = format!(
                r#"
[generation]
root = "TestClass"
capabilities = ["Decoder"]
mode = "{input}"

[schema]
paths = ["schema.toml"]
"#
            );
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.generation.mode, expected);
        }
    }

    #[test]
    fn import_hints_single_string() {
        let toml = r#"
[generation]
root = "TestClass"
capabilities = ["Decoder"]
import_hints = "crate::models::*"

[schema]
paths = "schema.toml"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.generation.import_hints, vec!["crate::models::*"]);
        assert_eq!(config.schema.paths, vec!["schema.toml"]);
    }

    #[test]
    fn output_format_variants() {
        let toml = r#"
[generation]
root = "TestClass"

[schema]
paths = ["schema.toml"]

[output]
path = "src/cached.json"
format = "json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.path.as_deref(), Some("src/cached.json"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(EmissionMode::Shared.to_string(), "shared");
        assert_eq!(EmissionMode::Local.to_string(), "local");
    }
}
