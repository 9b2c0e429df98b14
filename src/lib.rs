// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Behaviour-driven step registry and execution engine.
//!
//! `cornichon` takes already-parsed scenario records ([`Feature`] →
//! [`Scenario`] → [`ScenarioStep`]) and drives them through registered step
//! definitions:
//!
//! - step definitions are registered under pattern expressions — regular
//!   expressions with capturing groups, or typed placeholders like
//!   `I wait {seconds:d} seconds` ([`pattern`]);
//! - free-text steps are matched with parameter extraction and type
//!   coercion, with undefined and ambiguous steps detected and reported
//!   per scenario ([`step`]);
//! - hooks and step bodies share one mutable, scope-reset [`Context`]
//!   ([`context`]);
//! - a deterministic lifecycle runs hooks in fixed order around suites,
//!   features and scenarios, isolating failures per scenario ([`runner`]);
//! - outcomes aggregate into per-feature and per-suite summaries computed
//!   on demand ([`result`]).
//!
//! # Example
//!
//! ```rust
//! use cornichon::{
//!     Builder, Feature, Keyword, Runner, Scenario, ScenarioStep,
//! };
//!
//! let mut steps = Builder::new();
//! steps
//!     .given("a pot with {n:d} pickles", |ctx, step| {
//!         ctx.set("pickles", step.int(0)?);
//!         Ok(())
//!     })?
//!     .when("I eat {n:d} of them", |ctx, step| {
//!         let left = ctx.get_int("pickles").unwrap_or(0) - step.int(0)?;
//!         ctx.set("pickles", left);
//!         Ok(())
//!     })?
//!     .then("{n:d} pickles remain", |ctx, step| {
//!         if ctx.get_int("pickles") != Some(step.int(0)?) {
//!             cornichon::fail!("pot holds {:?} pickles", ctx.get_int("pickles"));
//!         }
//!         Ok(())
//!     })?;
//!
//! let features = [Feature::new(
//!     "Pickle pot",
//!     vec![Scenario::new(
//!         "Eating pickles",
//!         vec![
//!             ScenarioStep::new(Keyword::Given, "a pot with 5 pickles"),
//!             ScenarioStep::new(Keyword::When, "I eat 2 of them"),
//!             ScenarioStep::new(Keyword::Then, "3 pickles remain"),
//!         ],
//!     )],
//! )];
//!
//! let suite = Runner::new(steps.build()).run(&features);
//! assert!(suite.success());
//! # Ok::<(), cornichon::CompileError>(())
//! ```

pub mod context;
pub mod error;
pub mod event;
pub mod feature;
mod panic_trap;
pub mod pattern;
pub mod result;
pub mod runner;
pub mod step;
pub mod value;
pub mod writer;

pub use self::{
    context::{Context, Scope},
    error::{CompileError, Failure},
    event::Event,
    feature::{Feature, Keyword, Scenario, ScenarioStep, StepType},
    pattern::{Param, ParamType, Pattern},
    result::{
        FeatureResult, ScenarioResult, Stats, Status, StepOutcome, SuiteResult,
    },
    runner::{HookResult, RunOptions, Runner},
    step::{Builder, Collection, StepContext, Table},
    writer::Listener,
};

/// Returns early from a step or hook body with a [`Failure`] built from the
/// given format arguments.
///
/// ```rust
/// use cornichon::{error::Failure, step::StepContext, Context};
///
/// fn divide(ctx: &mut Context, _step: &StepContext) -> Result<(), Failure> {
///     let divisor = ctx.get_float("divisor").unwrap_or(0.0);
///     if divisor == 0.0 {
///         cornichon::fail!("Cannot divide by zero");
///     }
///     ctx.set("result", ctx.get_float("dividend").unwrap_or(0.0) / divisor);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        return Err($crate::error::Failure::new(format!($($arg)*)))
    };
}
