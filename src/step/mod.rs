// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step definitions, their registry and the types passed to step bodies.

mod builder;
mod collection;
mod context;
mod error;
mod location;
mod table;

use std::fmt;

use crate::{
    error::Failure,
    pattern::{CoerceError, Param, Pattern},
};

pub use self::{
    builder::Builder,
    collection::Collection,
    context::StepContext,
    error::{AmbiguousMatchError, StepError},
    location::Location,
    table::Table,
};

/// Executable body of a step definition.
///
/// Receives the live execution [`Context`] and the [`StepContext`] of the
/// matched step.
///
/// [`Context`]: crate::Context
pub type StepFn = Box<dyn Fn(&mut crate::context::Context, &StepContext) -> Result<(), Failure>>;

/// A registered step definition: compiled pattern, registration site and
/// executable body.
///
/// Owned exclusively by a [`Collection`]; immutable after registration.
pub struct Definition {
    pattern: Pattern,
    location: Option<Location>,
    body: StepFn,
}

impl Definition {
    /// Creates a new [`Definition`].
    #[must_use]
    pub fn new(pattern: Pattern, location: Option<Location>, body: StepFn) -> Self {
        Self { pattern, location, body }
    }

    /// Returns the compiled [`Pattern`] of this definition.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the registration site, if one was captured.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Returns the executable body.
    #[must_use]
    pub fn body(&self) -> &StepFn {
        &self.body
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("pattern", &self.pattern)
            .field("location", &self.location)
            .field("body", &format_args!("{:p}", std::ptr::addr_of!(self.body)))
            .finish()
    }
}

/// Outcome of resolving a scenario step against a [`Collection`].
#[derive(Debug)]
pub enum Resolution<'c> {
    /// Exactly one definition matched; parameters are bound and coerced.
    Match(&'c Definition, Vec<Param>),

    /// More than one definition matched.
    Ambiguous(AmbiguousMatchError),

    /// Exactly one definition matched, but a declared parameter type failed
    /// to parse the captured text.
    BadArgument(CoerceError),

    /// No definition matched.
    Undefined,
}
