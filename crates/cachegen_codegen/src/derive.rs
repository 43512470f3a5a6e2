//! Derivation engines: producing the initializer of each memoized instance.
//!
//! The generator decides *which* instances exist; an engine decides how each
//! one is computed. [`TemplateEngine`] fills a user template, so the generated
//! code can call whatever derivation entry point the consuming crate uses.

use std::fmt;

use cachegen_common::{rust_path, simple_name, snake_case};
use cachegen_graph::TypeNode;
use serde::{Deserialize, Serialize};

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "derive::{capability_snake}::<{type}>()";

/// An expression computing one capability instance, evaluated once on first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Initializer(String);

impl Initializer {
    /// Wraps an expression.
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// Returns the expression text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors reported by a derivation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivationError {
    /// The template names a placeholder the engine does not know.
    #[error("unknown placeholder `{{{0}}}` in initializer template")]
    UnknownPlaceholder(String),

    /// A `{` or `}` without its partner.
    #[error("unbalanced `{brace}` at byte {offset} of initializer template")]
    UnbalancedBrace {
        /// The offending brace.
        brace: char,
        /// Byte offset in the template.
        offset: usize,
    },

    /// The engine cannot derive this capability for this type.
    #[error("{0}")]
    Unsupported(String),
}

/// Produces the initializer for one (type, capability) pair.
///
/// Implementations must be deterministic. They are free to reference other
/// memoized instances by name; that reuse is the point of generating them.
pub trait DerivationEngine {
    /// Returns the expression computing `capability_name` for `type_node`.
    fn derive_and_memoize(
        &self,
        type_node: &TypeNode,
        capability_name: &str,
    ) -> Result<Initializer, DerivationError>;
}

impl<T: DerivationEngine + ?Sized> DerivationEngine for &T {
    fn derive_and_memoize(
        &self,
        type_node: &TypeNode,
        capability_name: &str,
    ) -> Result<Initializer, DerivationError> {
        (**self).derive_and_memoize(type_node, capability_name)
    }
}

/// A [`DerivationEngine`] rendering a text template.
///
/// Placeholders:
///
/// | placeholder          | value for `models::TestClass1`, `EncoderTypeClass` |
/// |----------------------|----------------------------------------------------|
/// | `{type}`             | `models::TestClass1`                               |
/// | `{name}`             | `models::TestClass1`                               |
/// | `{simple}`           | `TestClass1`                                       |
/// | `{binding}`          | `testClass1`                                       |
/// | `{capability}`       | `EncoderTypeClass`                                 |
/// | `{capability_snake}` | `encoder_type_class`                               |
///
/// `{type}` is written as a Rust path, so `models.TestClass1` also renders as
/// `models::TestClass1`; `{name}` keeps the schema spelling. A name that is not
/// a valid path is passed through unchanged and rejected by the emitter.
/// `{{` and `}}` produce literal braces. The template is checked on every
/// call, so a malformed template fails the first derivation rather than the
/// engine's construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEngine {
    template: String,
}

impl TemplateEngine {
    /// Creates an engine for `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Returns the template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    fn render(&self, type_node: &TypeNode, capability_name: &str) -> Result<String, DerivationError> {
        let mut out = String::with_capacity(self.template.len() + 32);
        let mut chars = self.template.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        match n {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => break,
                            _ => name.push(n),
                        }
                    }
                    if !closed {
                        return Err(DerivationError::UnbalancedBrace { brace: '{', offset });
                    }
                    out.push_str(&placeholder(&name, type_node, capability_name)?);
                }
                '}' => return Err(DerivationError::UnbalancedBrace { brace: '}', offset }),
                _ => out.push(c),
            }
        }
        Ok(out)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl DerivationEngine for TemplateEngine {
    fn derive_and_memoize(
        &self,
        type_node: &TypeNode,
        capability_name: &str,
    ) -> Result<Initializer, DerivationError> {
        self.render(type_node, capability_name).map(Initializer)
    }
}

fn placeholder(
    name: &str,
    type_node: &TypeNode,
    capability_name: &str,
) -> Result<String, DerivationError> {
    let value = match name.trim() {
        "type" => rust_path(&type_node.type_name).unwrap_or_else(|| type_node.type_name.clone()),
        "name" => type_node.type_name.clone(),
        "simple" => simple_name(&type_node.type_name).to_string(),
        "binding" => type_node.binding_name.clone(),
        "capability" => capability_name.to_string(),
        "capability_snake" => snake_case(capability_name),
        _ => return Err(DerivationError::UnknownPlaceholder(name.to_string())),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(template: &str, type_name: &str, capability: &str) -> Result<String, DerivationError> {
        TemplateEngine::new(template)
            .derive_and_memoize(&TypeNode::new(type_name), capability)
            .map(|init| init.to_string())
    }

    #[test]
    fn default_template() {
        let init = TemplateEngine::default()
            .derive_and_memoize(&TypeNode::new("TestClass1"), "EncoderTypeClass")
            .unwrap();
        assert_eq!(init.as_str(), "derive::encoder_type_class::<TestClass1>()");
    }

    #[test]
    fn all_placeholders() {
        let out = derive(
            "{type}|{name}|{simple}|{binding}|{capability}|{capability_snake}",
            "models::TestClass1",
            "EncoderTypeClass",
        )
        .unwrap();
        assert_eq!(
            out,
            "models::TestClass1|models::TestClass1|TestClass1|testClass1|EncoderTypeClass|encoder_type_class"
        );
    }

    #[test]
    fn dotted_type_renders_as_path() {
        let init = TemplateEngine::default()
            .derive_and_memoize(&TypeNode::new("com.example.Address"), "Show")
            .unwrap();
        assert_eq!(init.as_str(), "derive::show::<com::example::Address>()");
        assert_eq!(
            derive("{name}", "com.example.Address", "Show").unwrap(),
            "com.example.Address"
        );
    }

    #[test]
    fn escaped_braces() {
        let out = derive("|| {{ {capability}::of::<{type}>() }}", "A", "Show").unwrap();
        assert_eq!(out, "|| { Show::of::<A>() }");
    }

    #[test]
    fn unknown_placeholder() {
        assert_eq!(
            derive("derive::<{kind}>()", "A", "Show"),
            Err(DerivationError::UnknownPlaceholder("kind".to_string()))
        );
    }

    #[test]
    fn unclosed_placeholder() {
        assert_eq!(
            derive("derive::<{type>()", "A", "Show"),
            Err(DerivationError::UnbalancedBrace { brace: '{', offset: 9 })
        );
    }

    #[test]
    fn stray_closing_brace() {
        assert_eq!(
            derive("derive()}", "A", "Show"),
            Err(DerivationError::UnbalancedBrace { brace: '}', offset: 8 })
        );
    }

    #[test]
    fn works_through_reference() {
        let engine = TemplateEngine::default();
        let by_ref: &dyn DerivationEngine = &engine;
        assert!(by_ref
            .derive_and_memoize(&TypeNode::new("A"), "Show")
            .is_ok());
    }

    #[test]
    fn initializer_serializes_as_string() {
        let json = serde_json::to_string(&Initializer::new("f()")).unwrap();
        assert_eq!(json, r#""f()""#);
    }
}
