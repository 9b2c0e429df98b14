//! Key occurrences in the lifecycle of a run.
//!
//! The runner emits an [`Event`] to every registered [`Listener`] on each
//! phase transition and recorded outcome, in occurrence order. Reporting
//! formats are layered on top of this stream instead of being wired into
//! the execution loop.
//!
//! [`Listener`]: crate::writer::Listener

use crate::{
    feature::{Feature, Scenario, ScenarioStep},
    result::{FeatureResult, ScenarioResult, StepOutcome, SuiteResult},
};

/// A lifecycle event, borrowing the descriptors and results it concerns.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    /// The run is starting.
    SuiteStarted {
        /// Number of features about to run.
        features: usize,
    },

    /// A feature is starting.
    FeatureStarted(&'a Feature),

    /// A scenario is starting.
    ScenarioStarted(&'a Scenario),

    /// A step is about to be resolved and executed (or recorded skipped).
    StepStarted(&'a ScenarioStep),

    /// A step's outcome has been recorded.
    StepFinished(&'a ScenarioStep, &'a StepOutcome),

    /// A scenario has finished; its result is complete.
    ScenarioFinished(&'a Scenario, &'a ScenarioResult),

    /// A feature has finished; its result is complete.
    FeatureFinished(&'a Feature, &'a FeatureResult),

    /// The run has finished; the suite result is complete.
    SuiteFinished(&'a SuiteResult),
}
