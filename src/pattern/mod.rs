// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step pattern compilation and matching.
//!
//! A [`Pattern`] binds a step expression in one of two dialects:
//! - [`Pattern::regex()`]: regular-expression style with capturing groups,
//!   parameters bound in group order;
//! - [`Pattern::expression()`]: typed-placeholder style
//!   (`I wait {seconds:d} seconds`), translated by [`expression`].
//!
//! Matching is case-sensitive and whole-string anchored: the entire step
//! text must be consumed. Compiling an invalid expression fails at
//! registration time, never at match time.

mod expression;

use std::fmt;

use derive_more::with_trait::{Display, Error};
use regex::Regex;

use crate::{error::CompileError, value::Value};

/// Declared type of a single step parameter.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ParamType {
    /// Free text (`{name}`, or an untyped capturing group).
    #[display("string")]
    Str,

    /// Integer (`{name:d}`, digits only).
    #[display("integer")]
    Int,

    /// Float (`{name:f}`, optionally signed decimal number).
    #[display("float")]
    Float,

    /// Single word (`{name:w}`).
    #[display("word")]
    Word,
}

/// A parameter extracted from matched step text: its placeholder/group name,
/// if any, and the coerced [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// Placeholder or named-group name.
    pub name: Option<String>,

    /// The coerced value.
    pub value: Value,
}

/// Error of coercing matched text into a declared parameter type.
///
/// This is a match-time error, not a non-match: the pattern consumed the
/// text, but a declared numeric type could not parse its slice of it.
#[derive(Clone, Debug, Error, PartialEq)]
pub struct CoerceError {
    /// The text that failed to parse.
    pub value: String,

    /// The declared parameter type.
    pub ty: ParamType,

    /// Name of the parameter, if it has one.
    pub name: Option<String>,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse `{}` as {}", self.value, self.ty)?;
        if let Some(name) = &self.name {
            write!(f, " for parameter `{name}`")?;
        }
        Ok(())
    }
}

/// Dialect a [`Pattern`] was compiled from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    /// Typed-placeholder style.
    Expression,

    /// Regular-expression style.
    Regex,
}

/// A compiled step pattern: source expression, anchored matcher and the
/// ordered list of expected parameters.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    dialect: Dialect,
    regex: Regex,
    params: Vec<(Option<String>, ParamType)>,
}

impl Pattern {
    /// Compiles a typed-placeholder expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] on a malformed placeholder or an expression the
    /// regex engine rejects.
    pub fn expression(expr: &str) -> Result<Self, CompileError> {
        let (source, params) = expression::translate(expr)?;
        let regex = Regex::new(&source)
            .map_err(|e| CompileError::new(expr, e.to_string()))?;
        Ok(Self {
            source: expr.to_owned(),
            dialect: Dialect::Expression,
            regex,
            params,
        })
    }

    /// Compiles a regular-expression pattern; every capturing group binds a
    /// [`ParamType::Str`] parameter.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the regex engine rejects the expression.
    pub fn regex(expr: &str) -> Result<Self, CompileError> {
        Self::regex_typed(expr, &[])
    }

    /// Compiles a regular-expression pattern with declared parameter types.
    ///
    /// `types` applies positionally to the capturing groups; groups beyond
    /// `types.len()` bind as [`ParamType::Str`]. At match time a failed
    /// numeric parse of a declared type surfaces as a [`CoerceError`], not
    /// as a non-match.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the regex engine rejects the expression, or if
    /// more types are declared than the expression has capturing groups.
    pub fn regex_typed(expr: &str, types: &[ParamType]) -> Result<Self, CompileError> {
        let regex = Regex::new(&format!(r"\A(?:{expr})\z"))
            .map_err(|e| CompileError::new(expr, e.to_string()))?;
        let groups = regex.captures_len() - 1;
        if types.len() > groups {
            return Err(CompileError::new(
                expr,
                format!(
                    "{} parameter types declared, but the expression has only \
                     {groups} capturing groups",
                    types.len(),
                ),
            ));
        }
        let params = regex
            .capture_names()
            .skip(1)
            .enumerate()
            .map(|(i, name)| {
                let ty = types.get(i).copied().unwrap_or(ParamType::Str);
                (name.map(str::to_owned), ty)
            })
            .collect();
        Ok(Self {
            source: expr.to_owned(),
            dialect: Dialect::Regex,
            regex,
            params,
        })
    }

    /// Returns the source expression this [`Pattern`] was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the dialect this [`Pattern`] was compiled from.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the ordered parameter names and types this [`Pattern`] binds.
    #[must_use]
    pub fn params(&self) -> &[(Option<String>, ParamType)] {
        &self.params
    }

    /// Matches the given step text against this [`Pattern`].
    ///
    /// Returns [`None`] on a non-match. On a match, returns the ordered
    /// coerced parameters, or a [`CoerceError`] if a declared numeric type
    /// failed to parse its captured text.
    #[must_use]
    pub fn find_match(&self, text: &str) -> Option<Result<Vec<Param>, CoerceError>> {
        let caps = self.regex.captures(text)?;
        let mut params = Vec::with_capacity(self.params.len());
        for (idx, (name, ty)) in self.params.iter().enumerate() {
            let raw = caps.get(idx + 1).map_or("", |m| m.as_str());
            match coerce(raw, *ty, name.clone()) {
                Ok(value) => params.push(Param { name: name.clone(), value }),
                Err(e) => return Some(Err(e)),
            }
        }
        Some(Ok(params))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Coerces captured text into a [`Value`] of the declared [`ParamType`].
fn coerce(raw: &str, ty: ParamType, name: Option<String>) -> Result<Value, CoerceError> {
    match ty {
        ParamType::Str | ParamType::Word => Ok(Value::Str(raw.to_owned())),
        ParamType::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| CoerceError {
            value: raw.to_owned(),
            ty,
            name,
        }),
        ParamType::Float => raw.parse::<f64>().map(Value::Float).map_err(|_| CoerceError {
            value: raw.to_owned(),
            ty,
            name,
        }),
    }
}
