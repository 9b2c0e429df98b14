// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Crate-level error types.
//!
//! Step- and matching-specific errors live in [`crate::step`]; this module
//! holds the two types that cross component boundaries: the fatal
//! [`CompileError`] surfaced at registration time, and the [`Failure`] a
//! step or hook body reports.

use derive_more::with_trait::{Display, Error};

/// Error of compiling a step pattern expression.
///
/// Surfaced at registration time and fatal to suite startup: a registry
/// holding a pattern that cannot match is never constructed.
#[derive(Clone, Debug, Display, Error)]
#[display("malformed step pattern `{expression}`: {message}")]
pub struct CompileError {
    /// The offending pattern expression, verbatim.
    #[error(not(source))]
    pub expression: String,

    /// Human-readable description of what is wrong with it.
    #[error(not(source))]
    pub message: String,
}

impl CompileError {
    /// Creates a new [`CompileError`] for the given `expression`.
    #[must_use]
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by a step or hook body.
///
/// Bodies return `Result<(), Failure>`; the [`fail!`] macro builds the
/// `Err` arm. Panics inside bodies are converted into failures too, at the
/// step/hook boundary.
///
/// [`fail!`]: crate::fail!
#[derive(Clone, Debug, Display, Error, PartialEq)]
#[display("{message}")]
pub struct Failure {
    /// What went wrong, as reported by the body.
    #[error(not(source))]
    pub message: String,
}

impl Failure {
    /// Creates a new [`Failure`] with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self { message: message.to_owned() }
    }
}
