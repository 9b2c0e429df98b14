// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Typed-placeholder expression dialect.
//!
//! Translates expressions like `I wait {seconds:d} seconds` into regex
//! source. Placeholders restrict the accepted character class per type:
//! `{name:d}` matches digits only, `{name:f}` an optionally signed decimal
//! number, `{name:w}` a single word, and untyped `{name}` matches the
//! shortest text that still lets the remainder of the expression match.
//! `{{` and `}}` are literal braces.

use lazy_regex::regex_is_match;

use crate::error::CompileError;

use super::ParamType;

/// Character class accepted by a placeholder of the given type.
fn class(ty: ParamType) -> &'static str {
    match ty {
        ParamType::Int => r"\d+",
        ParamType::Float => r"[+-]?\d+(?:\.\d+)?",
        ParamType::Word => r"\w+",
        ParamType::Str => r".+?",
    }
}

/// Translates a placeholder expression into anchored regex source plus the
/// ordered list of placeholder names and types.
///
/// # Errors
///
/// On an unclosed or unmatched brace, an invalid placeholder name, or an
/// unknown type spec.
pub(super) fn translate(
    expression: &str,
) -> Result<(String, Vec<(Option<String>, ParamType)>), CompileError> {
    let mut source = String::with_capacity(expression.len() + 4);
    let mut params = Vec::new();
    let mut literal = String::new();
    let mut chars = expression.chars().peekable();

    source.push_str(r"\A");
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                _ = chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                _ = chars.next();
                literal.push('}');
            }
            '{' => {
                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(CompileError::new(
                                expression,
                                "nested `{` inside a placeholder",
                            ));
                        }
                        Some(inner) => body.push(inner),
                        None => {
                            return Err(CompileError::new(
                                expression,
                                "unclosed `{` (use `{{` for a literal brace)",
                            ));
                        }
                    }
                }
                source.push_str(&regex::escape(&literal));
                literal.clear();

                let (name, ty) = parse_placeholder(expression, &body)?;
                match &name {
                    Some(n) => {
                        source.push_str(&format!("(?P<{n}>{})", class(ty)));
                    }
                    None => {
                        source.push('(');
                        source.push_str(class(ty));
                        source.push(')');
                    }
                }
                params.push((name, ty));
            }
            '}' => {
                return Err(CompileError::new(
                    expression,
                    "unmatched `}` (use `}}` for a literal brace)",
                ));
            }
            other => literal.push(other),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push_str(r"\z");

    Ok((source, params))
}

/// Parses the inside of a `{...}` placeholder into its optional name and
/// parameter type.
fn parse_placeholder(
    expression: &str,
    body: &str,
) -> Result<(Option<String>, ParamType), CompileError> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (body, None),
    };

    let name = if name.is_empty() {
        None
    } else if regex_is_match!(r"^[A-Za-z_][A-Za-z0-9_]*$", name) {
        Some(name.to_owned())
    } else {
        return Err(CompileError::new(
            expression,
            format!("invalid placeholder name `{name}`"),
        ));
    };

    let ty = match spec {
        None => ParamType::Str,
        Some("d") => ParamType::Int,
        Some("f") => ParamType::Float,
        Some("w") => ParamType::Word,
        Some("") => {
            return Err(CompileError::new(expression, "empty type spec after `:`"));
        }
        Some(other) => {
            return Err(CompileError::new(
                expression,
                format!("unknown type spec `{other}`"),
            ));
        }
    };

    Ok((name, ty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_text_is_escaped() {
        let (source, params) = translate("press + (add)").unwrap();
        assert_eq!(source, r"\Apress \+ \(add\)\z");
        assert!(params.is_empty());
    }

    #[test]
    fn typed_placeholders_compile_to_their_classes() {
        let (source, params) = translate("I wait {seconds:d} seconds").unwrap();
        assert_eq!(source, r"\AI wait (?P<seconds>\d+) seconds\z");
        assert_eq!(params, vec![(Some("seconds".to_owned()), ParamType::Int)]);
    }

    #[test]
    fn untyped_placeholder_is_non_greedy_text() {
        let (source, params) = translate("I see {message}").unwrap();
        assert_eq!(source, r"\AI see (?P<message>.+?)\z");
        assert_eq!(params, vec![(Some("message".to_owned()), ParamType::Str)]);
    }

    #[test]
    fn unnamed_placeholders_are_allowed() {
        let (source, params) = translate("a {} and a {:f}").unwrap();
        assert_eq!(source, r"\Aa (.+?) and a ([+-]?\d+(?:\.\d+)?)\z");
        assert_eq!(params, vec![(None, ParamType::Str), (None, ParamType::Float)]);
    }

    #[test]
    fn doubled_braces_are_literal() {
        let (source, params) = translate("json {{key}} here").unwrap();
        assert_eq!(source, r"\Ajson \{key\} here\z");
        assert!(params.is_empty());
    }

    #[test]
    fn unclosed_brace_is_a_compile_error() {
        let err = translate("I have {n").unwrap_err();
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn unmatched_closing_brace_is_a_compile_error() {
        let err = translate("oops } here").unwrap_err();
        assert!(err.message.contains("unmatched"));
    }

    #[test]
    fn unknown_type_spec_is_a_compile_error() {
        let err = translate("{n:q}").unwrap_err();
        assert!(err.message.contains("unknown type spec"));
    }

    #[test]
    fn invalid_name_is_a_compile_error() {
        let err = translate("{2fast}").unwrap_err();
        assert!(err.message.contains("invalid placeholder name"));
    }
}
