//! Parser for field type references.
//!
//! Grammar:
//!
//! ```text
//! type  := path ( '<' type ( ',' type )* '>' )?
//! path  := ident ( ( '::' | '.' ) ident )*
//! ident := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! Generic arguments are only accepted on the known wrapper names: `Option`,
//! sequence-like containers (`Vec`, `List`, `Seq`, `Set`, ...) and map-like
//! containers (`Map`, `HashMap`, `BTreeMap`, ...). Wrappers are recognized by
//! their last path segment, so `std::collections::BTreeMap<K, V>` works.

use crate::field_type::FieldType;
use cachegen_common::simple_name;
use std::fmt;

/// The reason a type reference failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input was empty or only whitespace.
    Empty,
    /// An identifier was expected.
    ExpectedIdent,
    /// A specific character was expected.
    Expected(char),
    /// Input continued after a complete type.
    TrailingInput,
    /// A non-wrapper type was given generic arguments.
    UnsupportedGeneric(String),
    /// A wrapper was given the wrong number of generic arguments.
    WrongArity {
        /// The wrapper name as written.
        wrapper: String,
        /// How many arguments the wrapper takes.
        expected: usize,
        /// How many were written.
        found: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty type reference"),
            ParseErrorKind::ExpectedIdent => write!(f, "expected identifier"),
            ParseErrorKind::Expected(c) => write!(f, "expected `{c}`"),
            ParseErrorKind::TrailingInput => write!(f, "unexpected trailing input"),
            ParseErrorKind::UnsupportedGeneric(name) => write!(
                f,
                "`{name}` is not a supported wrapper; only optional, sequence and map containers take type arguments"
            ),
            ParseErrorKind::WrongArity {
                wrapper,
                expected,
                found,
            } => write!(
                f,
                "`{wrapper}` takes {expected} type argument(s), found {found}"
            ),
        }
    }
}

/// A type reference that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type reference `{input}` at offset {offset}: {kind}")]
pub struct ParseError {
    /// The full input text.
    pub input: String,
    /// Byte offset where parsing failed.
    pub offset: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Parses a type reference such as `Option<Vec<models::Address>>`.
pub fn parse_type_ref(input: &str) -> Result<FieldType, ParseError> {
    let mut parser = Parser { src: input, pos: 0 };
    parser.skip_ws();
    if parser.at_end() {
        return Err(parser.error(ParseErrorKind::Empty));
    }
    let ty = parser.parse_type()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error(ParseErrorKind::TrailingInput));
    }
    Ok(ty)
}

/// How a path name behaves when given generic arguments.
enum Wrapper {
    Optional,
    Sequence,
    Map,
}

fn wrapper_kind(path: &str) -> Option<Wrapper> {
    match simple_name(path) {
        "Option" | "Optional" => Some(Wrapper::Optional),
        "Vec" | "VecDeque" | "List" | "Seq" | "Set" | "Array" | "Vector" | "HashSet"
        | "BTreeSet" | "IndexSet" => Some(Wrapper::Sequence),
        "Map" | "HashMap" | "BTreeMap" | "IndexMap" => Some(Wrapper::Map),
        _ => None,
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            input: self.src.to_string(),
            offset: self.pos,
            kind,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::Expected(c)))
        }
    }

    fn parse_ident(&mut self) -> Result<&'a str, ParseError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.pos += 1,
            _ => return Err(self.error(ParseErrorKind::ExpectedIdent)),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(&self.src[start..self.pos])
    }

    /// Parses a `::`- or `.`-separated path, normalizing surrounding whitespace away.
    fn parse_path(&mut self) -> Result<String, ParseError> {
        let mut path = self.parse_ident()?.to_string();
        loop {
            self.skip_ws();
            let rest = &self.src[self.pos..];
            if rest.starts_with("::") {
                self.pos += 2;
                path.push_str("::");
            } else if rest.starts_with('.') {
                self.pos += 1;
                path.push('.');
            } else {
                return Ok(path);
            }
            path.push_str(self.parse_ident()?);
        }
    }

    fn parse_type(&mut self) -> Result<FieldType, ParseError> {
        let start = self.pos;
        let path = self.parse_path()?;
        if !self.eat('<') {
            return Ok(FieldType::Named(path));
        }

        let mut args = vec![self.parse_type()?];
        while self.eat(',') {
            args.push(self.parse_type()?);
        }
        self.expect('>')?;

        let Some(wrapper) = wrapper_kind(&path) else {
            return Err(ParseError {
                input: self.src.to_string(),
                offset: start,
                kind: ParseErrorKind::UnsupportedGeneric(path),
            });
        };

        let expected = match wrapper {
            Wrapper::Optional | Wrapper::Sequence => 1,
            Wrapper::Map => 2,
        };
        if args.len() != expected {
            return Err(ParseError {
                input: self.src.to_string(),
                offset: start,
                kind: ParseErrorKind::WrongArity {
                    wrapper: path,
                    expected,
                    found: args.len(),
                },
            });
        }

        let mut args = args.into_iter();
        let first = args.next().map(Box::new);
        let second = args.next().map(Box::new);
        Ok(match (wrapper, first, second) {
            (Wrapper::Optional, Some(inner), None) => FieldType::Optional(inner),
            (Wrapper::Sequence, Some(inner), None) => FieldType::Sequence(inner),
            (Wrapper::Map, Some(key), Some(value)) => FieldType::Map { key, value },
            _ => unreachable!("arity checked above"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_name() {
        assert_eq!(
            parse_type_ref("TestClass1").unwrap(),
            FieldType::named("TestClass1")
        );
    }

    #[test]
    fn parse_qualified_names() {
        assert_eq!(
            parse_type_ref("models::Address").unwrap(),
            FieldType::named("models::Address")
        );
        assert_eq!(
            parse_type_ref("com.example.Address").unwrap(),
            FieldType::named("com.example.Address")
        );
    }

    #[test]
    fn parse_optional_and_sequence() {
        assert_eq!(
            parse_type_ref("Option<TestClass2>").unwrap(),
            FieldType::optional(FieldType::named("TestClass2"))
        );
        assert_eq!(
            parse_type_ref("List<TestClass3>").unwrap(),
            FieldType::sequence(FieldType::named("TestClass3"))
        );
    }

    #[test]
    fn parse_nested_with_whitespace() {
        assert_eq!(
            parse_type_ref("  Option < Vec< a :: B > >  ").unwrap(),
            FieldType::optional(FieldType::sequence(FieldType::named("a::B")))
        );
    }

    #[test]
    fn parse_qualified_map() {
        assert_eq!(
            parse_type_ref("std::collections::BTreeMap<String, Vec<Item>>").unwrap(),
            FieldType::map(
                FieldType::named("String"),
                FieldType::sequence(FieldType::named("Item"))
            )
        );
    }

    #[test]
    fn empty_input_errors() {
        let err = parse_type_ref("   ").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Empty);
    }

    #[test]
    fn unclosed_generic_errors() {
        let err = parse_type_ref("Option<Foo").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected('>'));
    }

    #[test]
    fn trailing_input_errors() {
        let err = parse_type_ref("Foo Bar").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingInput);
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn unsupported_generic_errors() {
        let err = parse_type_ref("Either<A, B>").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnsupportedGeneric("Either".to_string())
        );
    }

    #[test]
    fn wrong_arity_errors() {
        let err = parse_type_ref("Map<String>").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::WrongArity {
                expected: 2,
                found: 1,
                ..
            }
        ));
        let err = parse_type_ref("Option<A, B>").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::WrongArity { .. }));
    }

    #[test]
    fn bad_identifier_errors() {
        let err = parse_type_ref("1Foo").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedIdent);
        let err = parse_type_ref("a::").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedIdent);
    }

    #[test]
    fn error_display_includes_input() {
        let err = parse_type_ref("Option<").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid type reference `Option<`"));
        assert!(msg.contains("expected identifier"));
    }
}
