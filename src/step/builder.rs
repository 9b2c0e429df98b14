// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Builder collecting step registrations into a [`Collection`].

use crate::{
    context::Context,
    error::{CompileError, Failure},
    feature::StepType,
    pattern::Pattern,
};

use super::{
    collection::Collection,
    context::StepContext,
    location::Location,
    Definition, StepFn,
};

/// Builder for a step [`Collection`].
///
/// `given`/`when`/`then` register typed-placeholder expressions;
/// `given_regex`/`when_regex`/`then_regex` register regular expressions.
/// Patterns compiled elsewhere (e.g. [`Pattern::regex_typed()`]) go in
/// through [`Builder::add()`]. Compilation failures surface here, at
/// registration time, and are fatal to suite startup.
#[derive(Debug, Default)]
pub struct Builder {
    collection: Collection,
}

impl Builder {
    /// Creates a new empty [`Builder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `given` step under a typed-placeholder expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is malformed.
    #[track_caller]
    pub fn given<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::expression(expr)?;
        Ok(self.add(StepType::Given, pattern, body))
    }

    /// Registers a `when` step under a typed-placeholder expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is malformed.
    #[track_caller]
    pub fn when<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::expression(expr)?;
        Ok(self.add(StepType::When, pattern, body))
    }

    /// Registers a `then` step under a typed-placeholder expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is malformed.
    #[track_caller]
    pub fn then<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::expression(expr)?;
        Ok(self.add(StepType::Then, pattern, body))
    }

    /// Registers a `given` step under a regular expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is not a valid regex.
    #[track_caller]
    pub fn given_regex<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::regex(expr)?;
        Ok(self.add(StepType::Given, pattern, body))
    }

    /// Registers a `when` step under a regular expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is not a valid regex.
    #[track_caller]
    pub fn when_regex<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::regex(expr)?;
        Ok(self.add(StepType::When, pattern, body))
    }

    /// Registers a `then` step under a regular expression.
    ///
    /// # Errors
    ///
    /// [`CompileError`] if the expression is not a valid regex.
    #[track_caller]
    pub fn then_regex<F>(&mut self, expr: &str, body: F) -> Result<&mut Self, CompileError>
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let pattern = Pattern::regex(expr)?;
        Ok(self.add(StepType::Then, pattern, body))
    }

    /// Registers a step under an already compiled [`Pattern`].
    #[track_caller]
    pub fn add<F>(&mut self, ty: StepType, pattern: Pattern, body: F) -> &mut Self
    where
        F: Fn(&mut Context, &StepContext) -> Result<(), Failure> + 'static,
    {
        let body: StepFn = Box::new(body);
        self.collection.insert(
            ty,
            Definition::new(pattern, Some(Location::caller()), body),
        );
        self
    }

    /// Finishes registration and returns the built [`Collection`].
    #[must_use]
    pub fn build(self) -> Collection {
        self.collection
    }
}
