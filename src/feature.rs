// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Descriptors of the parsed scenario source consumed by the engine.
//!
//! A scenario-file parser (not part of this crate) produces a sequence of
//! [`Feature`]s, each holding [`Scenario`]s made of [`ScenarioStep`]s. The
//! engine reads these records and never mutates them.

use std::str::FromStr;

use derive_more::with_trait::{Display, Error};

use crate::step::Table;

/// Keyword written in front of a step in the scenario source.
///
/// [`And`] and [`But`] are continuations: they inherit the keyword class of
/// the immediately preceding step within the same scenario.
///
/// [`And`]: Keyword::And
/// [`But`]: Keyword::But
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Keyword {
    /// Precondition step.
    #[display("Given")]
    Given,

    /// Action step.
    #[display("When")]
    When,

    /// Assertion step.
    #[display("Then")]
    Then,

    /// Continuation of the preceding step's keyword.
    #[display("And")]
    And,

    /// Negated continuation of the preceding step's keyword.
    #[display("But")]
    But,
}

/// Keyword class a step definition is registered under.
///
/// Unlike [`Keyword`], this has no continuation variants: by the time a step
/// reaches the registry its effective class has been resolved.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum StepType {
    /// Precondition steps.
    #[display("Given")]
    Given,

    /// Action steps.
    #[display("When")]
    When,

    /// Assertion steps.
    #[display("Then")]
    Then,
}

impl Keyword {
    /// Resolves this [`Keyword`] to its effective [`StepType`].
    ///
    /// `prev` is the resolved class of the preceding step within the same
    /// scenario. Returns [`None`] for a leading [`And`]/[`But`] with no
    /// predecessor to inherit from.
    ///
    /// [`And`]: Keyword::And
    /// [`But`]: Keyword::But
    #[must_use]
    pub fn resolve(self, prev: Option<StepType>) -> Option<StepType> {
        match self {
            Self::Given => Some(StepType::Given),
            Self::When => Some(StepType::When),
            Self::Then => Some(StepType::Then),
            Self::And | Self::But => prev,
        }
    }
}

/// Error of parsing a [`Keyword`] from text.
#[derive(Clone, Debug, Display, Error)]
#[display("unknown step keyword `{raw}`")]
pub struct UnknownKeywordError {
    /// The text that is not a keyword.
    #[error(not(source))]
    pub raw: String,
}

impl FromStr for Keyword {
    type Err = UnknownKeywordError;

    /// Parses a keyword case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "given" => Ok(Self::Given),
            "when" => Ok(Self::When),
            "then" => Ok(Self::Then),
            "and" => Ok(Self::And),
            "but" => Ok(Self::But),
            _ => Err(UnknownKeywordError { raw: s.to_owned() }),
        }
    }
}

/// A single step of a [`Scenario`]: keyword, literal text and an optional
/// data [`Table`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioStep {
    /// Keyword as written in the scenario source.
    pub keyword: Keyword,

    /// Literal step text, without the keyword.
    pub text: String,

    /// Data table attached to the step, if any.
    pub table: Option<Table>,
}

impl ScenarioStep {
    /// Creates a new [`ScenarioStep`] without a table.
    #[must_use]
    pub fn new(keyword: Keyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
            table: None,
        }
    }

    /// Attaches a data [`Table`] to this step.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }
}

/// A named scenario: an ordered sequence of steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Name of the scenario.
    pub name: String,

    /// Steps in source order.
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Creates a new [`Scenario`].
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<ScenarioStep>) -> Self {
        Self { name: name.into(), steps }
    }
}

/// A named feature: an ordered sequence of scenarios.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Name of the feature.
    pub name: String,

    /// Scenarios in source order.
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Creates a new [`Feature`].
    #[must_use]
    pub fn new(name: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        Self { name: name.into(), scenarios }
    }
}
