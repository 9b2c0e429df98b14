// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcomes of executed steps and their aggregation into scenario, feature
//! and suite results.
//!
//! Summaries are always computed on demand by folding over children; no
//! count is stored redundantly, so the summary can never drift from the
//! outcomes it is derived from.

mod stats;

use derive_more::with_trait::Display;

use crate::{error::Failure, step::StepError};

pub use self::stats::Stats;

/// Final status of a step, scenario, feature or suite.
///
/// Ordered worst-last: `Undefined > Failed > Skipped > Passed`, so folding
/// children with [`Iterator::max()`] yields the worst case.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Status {
    /// Everything ran and succeeded.
    #[display("passed")]
    Passed,

    /// Not executed because an earlier failure short-circuited execution.
    #[display("skipped")]
    Skipped,

    /// A body or hook failed.
    #[display("failed")]
    Failed,

    /// No registered definition matched.
    #[display("undefined")]
    Undefined,
}

/// Outcome of a single scenario step. Immutable once recorded.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The step's body ran and succeeded.
    Passed,

    /// The step's body or its resolution failed.
    Failed(StepError),

    /// The step was never invoked: an earlier step failed or was
    /// undefined, or a `before` hook failed.
    Skipped,

    /// No definition matched; carries the step text verbatim so a consumer
    /// can offer to scaffold a definition.
    Undefined(String),
}

impl StepOutcome {
    /// Returns the [`Status`] of this outcome.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Passed => Status::Passed,
            Self::Failed(_) => Status::Failed,
            Self::Skipped => Status::Skipped,
            Self::Undefined(_) => Status::Undefined,
        }
    }
}

/// Result of one executed (or skipped) scenario.
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    /// Name of the scenario.
    pub name: String,

    /// Outcome of every step, in source order.
    pub steps: Vec<StepOutcome>,

    /// Failure of the `before_scenario` hook, if it failed.
    pub before_hook_error: Option<Failure>,

    /// Failure of the `after_scenario` hook, if it failed. Recorded, but
    /// never retroactively changes step outcomes.
    pub after_hook_error: Option<Failure>,
}

impl ScenarioResult {
    /// Creates a result with every step recorded as [`StepOutcome::Skipped`].
    ///
    /// Used when an enclosing `before` hook failed and the scenario's own
    /// lifecycle never ran.
    #[must_use]
    pub fn skipped(name: impl Into<String>, step_count: usize) -> Self {
        Self {
            name: name.into(),
            steps: vec![StepOutcome::Skipped; step_count],
            before_hook_error: None,
            after_hook_error: None,
        }
    }

    /// Final status of the scenario.
    ///
    /// Failed if `before_scenario` failed; otherwise the worst-case status
    /// of its steps. A scenario with no steps passes.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.before_hook_error.is_some() {
            return Status::Failed;
        }
        self.steps
            .iter()
            .map(StepOutcome::status)
            .max()
            .unwrap_or(Status::Passed)
    }

    /// Returns the error of the first failed step, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&StepError> {
        self.steps.iter().find_map(|s| match s {
            StepOutcome::Failed(e) => Some(e),
            _ => None,
        })
    }
}

/// Result of one feature: its scenarios plus feature-level hook failures.
#[derive(Clone, Debug)]
pub struct FeatureResult {
    /// Name of the feature.
    pub name: String,

    /// Results of its scenarios, in source order.
    pub scenarios: Vec<ScenarioResult>,

    /// Failure of the `before_feature` hook, if it failed.
    pub before_hook_error: Option<Failure>,

    /// Failure of the `after_feature` hook, if it failed.
    pub after_hook_error: Option<Failure>,
}

impl FeatureResult {
    /// Folds the scenarios' final statuses into counts.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::from_statuses(self.scenarios.iter().map(ScenarioResult::status))
    }

    /// Returns `true` if this feature failed overall: its `before` hook
    /// failed, or any scenario is failed or undefined.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.before_hook_error.is_some() || self.stats().has_failures()
    }
}

/// Result of a whole run.
#[derive(Clone, Debug, Default)]
pub struct SuiteResult {
    /// Results of the executed features, in execution order.
    pub features: Vec<FeatureResult>,

    /// Failure of the `before_all` hook, if it failed.
    pub before_hook_error: Option<Failure>,

    /// Failure of the `after_all` hook, if it failed.
    pub after_hook_error: Option<Failure>,
}

impl SuiteResult {
    /// Folds all scenarios' final statuses across features into counts.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::from_statuses(
            self.features
                .iter()
                .flat_map(|f| f.scenarios.iter().map(ScenarioResult::status)),
        )
    }

    /// Returns `true` only if nothing failed: no failed or undefined
    /// scenario, no failed feature, no failed `before_all` hook.
    #[must_use]
    pub fn success(&self) -> bool {
        self.before_hook_error.is_none()
            && self.features.iter().all(|f| !f.has_failed())
    }

    /// Process exit status for this run: zero only on [`SuiteResult::success()`].
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        i32::from(!self.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str, steps: Vec<StepOutcome>) -> ScenarioResult {
        ScenarioResult {
            name: name.to_owned(),
            steps,
            before_hook_error: None,
            after_hook_error: None,
        }
    }

    #[test]
    fn status_ordering_is_worst_last() {
        assert!(Status::Undefined > Status::Failed);
        assert!(Status::Failed > Status::Skipped);
        assert!(Status::Skipped > Status::Passed);
    }

    #[test]
    fn scenario_status_is_worst_case_of_steps() {
        let passed = scenario("p", vec![StepOutcome::Passed, StepOutcome::Passed]);
        assert_eq!(passed.status(), Status::Passed);

        let undefined = scenario(
            "u",
            vec![
                StepOutcome::Passed,
                StepOutcome::Undefined("I do something new".to_owned()),
                StepOutcome::Skipped,
            ],
        );
        assert_eq!(undefined.status(), Status::Undefined);
    }

    #[test]
    fn empty_scenario_passes() {
        assert_eq!(scenario("empty", vec![]).status(), Status::Passed);
    }

    #[test]
    fn before_hook_failure_forces_failed_status() {
        let result = ScenarioResult {
            before_hook_error: Some(Failure::new("setup exploded")),
            ..scenario("s", vec![StepOutcome::Skipped])
        };
        assert_eq!(result.status(), Status::Failed);
    }

    #[test]
    fn after_hook_failure_does_not_change_status() {
        let result = ScenarioResult {
            after_hook_error: Some(Failure::new("teardown exploded")),
            ..scenario("s", vec![StepOutcome::Passed])
        };
        assert_eq!(result.status(), Status::Passed);
    }

    #[test]
    fn feature_stats_fold_scenario_statuses() {
        let feature = FeatureResult {
            name: "f".to_owned(),
            scenarios: vec![
                scenario("a", vec![StepOutcome::Passed]),
                scenario("b", vec![StepOutcome::Failed(StepError::Fail(
                    Failure::new("boom"),
                ))]),
                ScenarioResult::skipped("c", 2),
            ],
            before_hook_error: None,
            after_hook_error: None,
        };
        let stats = feature.stats();
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 1);
        assert!(feature.has_failed());
    }

    #[test]
    fn feature_before_hook_failure_fails_the_suite() {
        let suite = SuiteResult {
            features: vec![FeatureResult {
                name: "f".to_owned(),
                scenarios: vec![ScenarioResult::skipped("a", 1)],
                before_hook_error: Some(Failure::new("db down")),
                after_hook_error: None,
            }],
            before_hook_error: None,
            after_hook_error: None,
        };
        // All scenarios merely skipped, yet the run must not exit zero.
        assert_eq!(suite.stats().failed, 0);
        assert!(!suite.success());
        assert_eq!(suite.exit_status(), 1);
    }

    #[test]
    fn clean_suite_exits_zero() {
        let suite = SuiteResult {
            features: vec![FeatureResult {
                name: "f".to_owned(),
                scenarios: vec![scenario("a", vec![StepOutcome::Passed])],
                before_hook_error: None,
                after_hook_error: None,
            }],
            before_hook_error: None,
            after_hook_error: None,
        };
        assert!(suite.success());
        assert_eq!(suite.exit_status(), 0);
    }
}
