//! Identifier derivation for generated declarations.
//!
//! Generated identifiers are built from the *simple* name of a type (its last
//! path segment), so `models::Address` and `billing::Address` deliberately map
//! to the same identifier stem. Callers detect the resulting collisions.

/// Returns the last segment of a path-qualified type name.
///
/// Both `::` and `.` are accepted as separators.
pub fn simple_name(type_name: &str) -> &str {
    let after_colons = type_name.rsplit("::").next().unwrap_or(type_name);
    after_colons.rsplit('.').next().unwrap_or(after_colons)
}

/// Writes a `::`- or `.`-qualified type name as a Rust path.
///
/// Returns `None` if any segment is not a plain identifier.
pub fn rust_path(type_name: &str) -> Option<String> {
    let segments: Vec<&str> = type_name
        .split("::")
        .flat_map(|segment| segment.split('.'))
        .collect();
    segments
        .iter()
        .all(|s| is_valid_identifier(s))
        .then(|| segments.join("::"))
}

/// Lowercases the first character of the simple name, leaving the rest as is.
///
/// `TestClass1` becomes `testClass1`; `URL` becomes `uRL`.
pub fn lower_camel(type_name: &str) -> String {
    let simple = simple_name(type_name);
    let mut chars = simple.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a camel-case identifier to `snake_case`.
///
/// Runs of capitals are kept together (`URLConfig` becomes `url_config`).
pub fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !out.ends_with('_') {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns `true` if `s` is a plain identifier: an ASCII letter or `_`
/// followed by ASCII alphanumerics or `_`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_paths() {
        assert_eq!(simple_name("TestClass1"), "TestClass1");
        assert_eq!(simple_name("models::Address"), "Address");
        assert_eq!(simple_name("com.example.Address"), "Address");
        assert_eq!(simple_name("a::b.C"), "C");
    }

    #[test]
    fn rust_path_normalises_separators() {
        assert_eq!(rust_path("TestClass1").as_deref(), Some("TestClass1"));
        assert_eq!(rust_path("models::Address").as_deref(), Some("models::Address"));
        assert_eq!(rust_path("com.example.Address").as_deref(), Some("com::example::Address"));
        assert_eq!(rust_path("a::b.C").as_deref(), Some("a::b::C"));
        assert_eq!(rust_path("Vec<Address>"), None);
        assert_eq!(rust_path("my-type"), None);
    }

    #[test]
    fn lower_camel_decapitalizes_first_char() {
        assert_eq!(lower_camel("TestWrapperClass"), "testWrapperClass");
        assert_eq!(lower_camel("TestClass1"), "testClass1");
        assert_eq!(lower_camel("URL"), "uRL");
        assert_eq!(lower_camel("already"), "already");
        assert_eq!(lower_camel("models::Address"), "address");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn case_folding_collides() {
        assert_eq!(lower_camel("Foo"), lower_camel("foo"));
        assert_eq!(lower_camel("a::Foo"), lower_camel("b.Foo"));
    }

    #[test]
    fn snake_case_conversions() {
        assert_eq!(
            snake_case("testWrapperClassEncoderTypeClass"),
            "test_wrapper_class_encoder_type_class"
        );
        assert_eq!(snake_case("testClass1Encoder"), "test_class1_encoder");
        assert_eq!(snake_case("URLConfig"), "url_config");
        assert_eq!(snake_case("Decoder"), "decoder");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("Encoder"));
        assert!(is_valid_identifier("_private2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("Enc oder"));
        assert!(!is_valid_identifier("Encoder<T>"));
    }
}
