use std::collections::HashMap;

use cachegen_common::{is_valid_identifier, rust_path, snake_case};

use super::{CodeEmitter, EmitError, GeneratedUnit, FINGERPRINT_LINE};
use crate::bundle::{DerivedDeclaration, LocalBlock};
use crate::declaration::Scope;

const LAZY: &str = "std::sync::LazyLock";

/// Emits Rust source.
///
/// Shared scope renders one `pub mod <capability>_instances` per capability
/// holding a `pub static` per type. Local scope renders a single `impl` block
/// on the type, one accessor per capability, each backed by a function-local
/// static. Either way an instance is computed on first access and reused.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl CodeEmitter for RustEmitter {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn emit(&self, unit: &GeneratedUnit) -> Result<String, EmitError> {
        let mut out = String::new();
        out.push_str(&format!(
            "// @generated by cachegen from `{}`. Do not edit.\n",
            unit.root
        ));
        out.push_str(&format!("{FINGERPRINT_LINE}{}\n", unit.fingerprint()?));

        match unit.declarations.scope() {
            Scope::Shared => {
                let mut modules = EmittedNames::default();
                for bundle in unit.declarations.bundles() {
                    modules.claim(
                        format!("{}_instances", snake_case(bundle.capability_name)),
                        bundle.capability_name,
                    )?;
                    out.push('\n');
                    render_bundle(
                        &mut out,
                        bundle.capability_name,
                        &bundle.declarations,
                        &unit.import_hints,
                    )?;
                }
            }
            Scope::Local => {
                out.push('\n');
                render_local(&mut out, &unit.declarations.local_block()?)?;
            }
        }
        Ok(out)
    }
}

fn render_bundle(
    out: &mut String,
    capability: &str,
    declarations: &[&DerivedDeclaration],
    import_hints: &[String],
) -> Result<(), EmitError> {
    let capability = identifier(capability)?;
    out.push_str(&format!("pub mod {}_instances {{\n", snake_case(capability)));
    out.push_str("    use super::*;\n");
    for hint in import_hints {
        out.push_str(&format!("    use {};\n", import_path(hint)));
    }
    for derived in declarations {
        let decl = &derived.declaration;
        let name = identifier(&decl.identifier)?;
        let ty = type_path(&decl.type_node.type_name)?;
        out.push('\n');
        out.push_str("    #[allow(non_upper_case_globals)]\n");
        out.push_str(&format!(
            "    pub static {name}: {LAZY}<{capability}<{ty}>> =\n        {LAZY}::new(|| {});\n",
            derived.initializer
        ));
    }
    out.push_str("}\n");
    Ok(())
}

fn render_local(out: &mut String, block: &LocalBlock<'_>) -> Result<(), EmitError> {
    let ty = type_path(&block.type_node.type_name)?;
    let mut accessors = EmittedNames::default();
    out.push_str(&format!("impl {ty} {{\n"));
    for (i, derived) in block.declarations.iter().enumerate() {
        let decl = &derived.declaration;
        let capability = identifier(&decl.capability_name)?;
        let accessor = snake_case(identifier(&decl.identifier)?);
        accessors.claim(accessor.clone(), &decl.identifier)?;
        let instance = accessor.to_uppercase();
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "    pub fn {accessor}() -> &'static {capability}<{ty}> {{\n"
        ));
        out.push_str(&format!(
            "        static {instance}: {LAZY}<{capability}<{ty}>> =\n            {LAZY}::new(|| {});\n",
            derived.initializer
        ));
        out.push_str(&format!("        &{instance}\n"));
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    Ok(())
}

/// Names already written into one Rust scope, with the name each came from.
#[derive(Default)]
struct EmittedNames(HashMap<String, String>);

impl EmittedNames {
    fn claim(&mut self, name: String, source: &str) -> Result<(), EmitError> {
        match self.0.get(&name) {
            Some(first) => Err(EmitError::DuplicateName {
                name,
                first: first.clone(),
                second: source.to_string(),
            }),
            None => {
                self.0.insert(name, source.to_string());
                Ok(())
            }
        }
    }
}

fn identifier(name: &str) -> Result<&str, EmitError> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(EmitError::InvalidIdentifier(name.to_string()))
    }
}

fn type_path(type_name: &str) -> Result<String, EmitError> {
    rust_path(type_name).ok_or_else(|| EmitError::InvalidTypePath(type_name.to_string()))
}

/// Accepts hints written with or without the `use` keyword and semicolon.
fn import_path(hint: &str) -> &str {
    let hint = hint.trim();
    let hint = hint.strip_prefix("use ").unwrap_or(hint);
    hint.strip_suffix(';').unwrap_or(hint).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::tests::unit;

    fn body(text: &str) -> &str {
        // Skip the two header lines, which carry the fingerprint.
        let mut rest = text;
        for _ in 0..2 {
            rest = &rest[rest.find('\n').map_or(rest.len(), |i| i + 1)..];
        }
        rest
    }

    #[test]
    fn shared_bundle() {
        let mut u = unit(Scope::Shared, &["TestWrapperClass", "TestClass1"], &["EncoderTypeClass"]);
        u.import_hints = vec!["crate::models::*".to_string()];
        let text = RustEmitter.emit(&u).unwrap();
        assert!(text.starts_with("// @generated by cachegen from `TestWrapperClass`. Do not edit.\n"));
        assert_eq!(
            body(&text),
            "\n\
pub mod encoder_type_class_instances {
    use super::*;
    use crate::models::*;

    #[allow(non_upper_case_globals)]
    pub static testWrapperClassEncoderTypeClass: std::sync::LazyLock<EncoderTypeClass<TestWrapperClass>> =
        std::sync::LazyLock::new(|| derive::<TestWrapperClass>());

    #[allow(non_upper_case_globals)]
    pub static testClass1EncoderTypeClass: std::sync::LazyLock<EncoderTypeClass<TestClass1>> =
        std::sync::LazyLock::new(|| derive::<TestClass1>());
}
"
        );
    }

    #[test]
    fn one_module_per_capability() {
        let u = unit(Scope::Shared, &["A"], &["Encoder", "Decoder"]);
        let text = RustEmitter.emit(&u).unwrap();
        assert!(text.contains("pub mod encoder_instances {"));
        assert!(text.contains("pub mod decoder_instances {"));
        assert!(text.find("encoder_instances") < text.find("decoder_instances"));
    }

    #[test]
    fn local_block() {
        let u = unit(Scope::Local, &["TestClass"], &["Decoder"]);
        let text = RustEmitter.emit(&u).unwrap();
        assert_eq!(
            body(&text),
            "\n\
impl TestClass {
    pub fn test_class_decoder() -> &'static Decoder<TestClass> {
        static TEST_CLASS_DECODER: std::sync::LazyLock<Decoder<TestClass>> =
            std::sync::LazyLock::new(|| derive::<TestClass>());
        &TEST_CLASS_DECODER
    }
}
"
        );
    }

    #[test]
    fn local_scope_over_two_types_is_internal_error() {
        let u = unit(Scope::Local, &["A", "B"], &["Show"]);
        assert!(matches!(
            RustEmitter.emit(&u),
            Err(EmitError::Internal(_))
        ));
    }

    #[test]
    fn qualified_type_paths() {
        assert_eq!(type_path("models::Address").unwrap(), "models::Address");
        assert_eq!(type_path("com.example.Address").unwrap(), "com::example::Address");
        assert!(matches!(
            type_path("Vec<Address>"),
            Err(EmitError::InvalidTypePath(_))
        ));
    }

    #[test]
    fn invalid_capability_name() {
        let u = unit(Scope::Shared, &["A"], &["Not-An-Ident"]);
        assert!(matches!(
            RustEmitter.emit(&u),
            Err(EmitError::InvalidIdentifier(name)) if name == "Not-An-Ident"
        ));
    }

    #[test]
    fn case_variant_capabilities_share_a_module_name() {
        let u = unit(Scope::Shared, &["A"], &["URLCodec", "UrlCodec"]);
        match RustEmitter.emit(&u) {
            Err(EmitError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "url_codec_instances");
                assert_eq!(first, "URLCodec");
                assert_eq!(second, "UrlCodec");
            }
            other => panic!("expected a duplicate module, got {other:?}"),
        }
    }

    #[test]
    fn case_variant_capabilities_share_an_accessor() {
        let u = unit(Scope::Local, &["A"], &["URLCodec", "UrlCodec"]);
        match RustEmitter.emit(&u) {
            Err(EmitError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "a_url_codec");
                assert_eq!(first, "aURLCodec");
                assert_eq!(second, "aUrlCodec");
            }
            other => panic!("expected a duplicate accessor, got {other:?}"),
        }
    }

    #[test]
    fn lowercase_capability_shares_module_with_capitalized() {
        let u = unit(Scope::Shared, &["A"], &["Encoder", "encoder"]);
        assert!(matches!(
            RustEmitter.emit(&u),
            Err(EmitError::DuplicateName { name, .. }) if name == "encoder_instances"
        ));
    }

    #[test]
    fn import_hint_forms() {
        assert_eq!(import_path("crate::models::*"), "crate::models::*");
        assert_eq!(import_path("use crate::models::Address;"), "crate::models::Address");
    }
}
