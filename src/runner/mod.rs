// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The lifecycle dispatcher.
//!
//! Drives the state machine
//! `SuiteStart → {FeatureStart → {ScenarioStart → StepExec* → ScenarioEnd}*
//! → FeatureEnd}* → SuiteEnd`, sequentially and single-threaded: one
//! scenario runs to completion before the next begins. Hooks run at fixed
//! points; failures are isolated per scenario and surface as recorded
//! outcomes, never as dispatcher aborts.

mod hooks;

use regex::Regex;

use crate::{
    context::{Context, Scope},
    event::Event,
    feature::{Feature, Scenario, ScenarioStep, StepType},
    panic_trap,
    result::{FeatureResult, ScenarioResult, Status, StepOutcome, SuiteResult},
    step::{Collection, Resolution, StepContext, StepError},
    writer::Listener,
};

use self::hooks::Hooks;

pub use self::hooks::HookResult;

/// Options of a [`Runner`] run.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Only execute scenarios whose name matches this pattern; others are
    /// neither run nor recorded.
    pub filter: Option<Regex>,

    /// Stop executing after the first feature containing a failed or
    /// undefined scenario; remaining features are neither run nor recorded.
    pub fail_fast: bool,
}

/// The lifecycle dispatcher: owns the step [`Collection`], the registered
/// hooks and listeners, and the single live [`Context`] of a run.
pub struct Runner {
    steps: Collection,
    hooks: Hooks,
    listeners: Vec<Box<dyn Listener>>,
    options: RunOptions,
}

impl Runner {
    /// Creates a [`Runner`] over the given step [`Collection`] with default
    /// [`RunOptions`].
    #[must_use]
    pub fn new(steps: Collection) -> Self {
        Self::with_options(steps, RunOptions::default())
    }

    /// Creates a [`Runner`] with explicit [`RunOptions`].
    #[must_use]
    pub fn with_options(steps: Collection, options: RunOptions) -> Self {
        Self {
            steps,
            hooks: Hooks::default(),
            listeners: Vec::new(),
            options,
        }
    }

    /// Sets the hook executed once before anything else.
    #[must_use]
    pub fn before_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context) -> HookResult + 'static,
    {
        self.hooks.before_all = Some(Box::new(hook));
        self
    }

    /// Sets the hook executed once after everything else, receiving the
    /// completed [`SuiteResult`].
    #[must_use]
    pub fn after_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context, &SuiteResult) -> HookResult + 'static,
    {
        self.hooks.after_all = Some(Box::new(hook));
        self
    }

    /// Sets the hook executed before each [`Feature`].
    #[must_use]
    pub fn before_feature<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context, &Feature) -> HookResult + 'static,
    {
        self.hooks.before_feature = Some(Box::new(hook));
        self
    }

    /// Sets the hook executed after each [`Feature`], receiving its
    /// completed [`FeatureResult`].
    #[must_use]
    pub fn after_feature<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context, &Feature, &FeatureResult) -> HookResult + 'static,
    {
        self.hooks.after_feature = Some(Box::new(hook));
        self
    }

    /// Sets the hook executed before each [`Scenario`].
    ///
    /// A failure here marks the scenario failed and skips all of its steps;
    /// the `after_scenario` hook still runs.
    #[must_use]
    pub fn before_scenario<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context, &Scenario) -> HookResult + 'static,
    {
        self.hooks.before_scenario = Some(Box::new(hook));
        self
    }

    /// Sets the hook executed after each [`Scenario`], receiving its
    /// completed [`ScenarioResult`].
    #[must_use]
    pub fn after_scenario<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context, &Scenario, &ScenarioResult) -> HookResult + 'static,
    {
        self.hooks.after_scenario = Some(Box::new(hook));
        self
    }

    /// Registers a [`Listener`] observing every lifecycle event.
    #[must_use]
    pub fn listener<L: Listener + 'static>(mut self, listener: L) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Executes the given features and returns the aggregated
    /// [`SuiteResult`].
    pub fn run(self, features: &[Feature]) -> SuiteResult {
        let Self { steps, hooks, listeners, options } = self;
        let mut executor = Executor {
            steps: &steps,
            hooks: &hooks,
            listeners,
            options: &options,
        };
        executor.run(features)
    }
}

/// One run's worth of execution state, splitting the [`Runner`]'s fields so
/// the step collection stays borrowed while listeners are notified.
struct Executor<'r> {
    steps: &'r Collection,
    hooks: &'r Hooks,
    listeners: Vec<Box<dyn Listener>>,
    options: &'r RunOptions,
}

impl<'r> Executor<'r> {
    fn run(&mut self, features: &[Feature]) -> SuiteResult {
        let mut ctx = Context::new();
        self.emit(&Event::SuiteStarted { features: features.len() });
        tracing::debug!(features = features.len(), "suite started");

        let before_hook_error = self.hooks.run_before_all(&mut ctx);
        let mut results = Vec::with_capacity(features.len());
        if before_hook_error.is_none() {
            for feature in features {
                let result = self.run_feature(&mut ctx, feature);
                let failed = result.has_failed();
                results.push(result);
                if self.options.fail_fast && failed {
                    tracing::debug!("fail-fast: remaining features not executed");
                    break;
                }
            }
        } else {
            // `before_all` failed: features are recorded skipped, never run.
            results.extend(features.iter().map(|f| self.skipped_feature(f)));
        }

        let mut suite = SuiteResult {
            features: results,
            before_hook_error,
            after_hook_error: None,
        };
        suite.after_hook_error = self.hooks.run_after_all(&mut ctx, &suite);
        self.emit(&Event::SuiteFinished(&suite));
        ctx.exit(Scope::Suite);
        suite
    }

    fn run_feature(&mut self, ctx: &mut Context, feature: &Feature) -> FeatureResult {
        ctx.enter(Scope::Feature);
        self.emit(&Event::FeatureStarted(feature));
        tracing::debug!(feature = %feature.name, "feature started");

        let before_hook_error = self.hooks.run_before_feature(ctx, feature);
        let selected = feature
            .scenarios
            .iter()
            .filter(|s| selected(self.options, s))
            .collect::<Vec<_>>();

        let mut scenarios = Vec::with_capacity(selected.len());
        for scenario in selected {
            if before_hook_error.is_none() {
                scenarios.push(self.run_scenario(ctx, scenario));
            } else {
                // `before_feature` failed: children are skipped, and their
                // own hooks never run.
                scenarios
                    .push(ScenarioResult::skipped(&scenario.name, scenario.steps.len()));
            }
        }

        let mut result = FeatureResult {
            name: feature.name.clone(),
            scenarios,
            before_hook_error,
            after_hook_error: None,
        };
        result.after_hook_error = self.hooks.run_after_feature(ctx, feature, &result);
        self.emit(&Event::FeatureFinished(feature, &result));
        ctx.exit(Scope::Feature);
        result
    }

    fn run_scenario(&mut self, ctx: &mut Context, scenario: &Scenario) -> ScenarioResult {
        ctx.enter(Scope::Scenario);
        self.emit(&Event::ScenarioStarted(scenario));
        tracing::debug!(scenario = %scenario.name, "scenario started");

        let before_hook_error = self.hooks.run_before_scenario(ctx, scenario);
        let mut skipping = before_hook_error.is_some();
        let mut prev = None;
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for step in &scenario.steps {
            self.emit(&Event::StepStarted(step));
            let outcome = if skipping {
                StepOutcome::Skipped
            } else {
                self.execute_step(ctx, step, &mut prev)
            };
            if matches!(outcome.status(), Status::Failed | Status::Undefined) {
                skipping = true;
            }
            self.emit(&Event::StepFinished(step, &outcome));
            steps.push(outcome);
        }

        let mut result = ScenarioResult {
            name: scenario.name.clone(),
            steps,
            before_hook_error,
            after_hook_error: None,
        };
        result.after_hook_error = self.hooks.run_after_scenario(ctx, scenario, &result);
        self.emit(&Event::ScenarioFinished(scenario, &result));
        ctx.exit(Scope::Scenario);
        result
    }

    fn execute_step(
        &mut self,
        ctx: &mut Context,
        step: &ScenarioStep,
        prev: &mut Option<StepType>,
    ) -> StepOutcome {
        let Some(ty) = step.keyword.resolve(*prev) else {
            tracing::warn!(step = %step.text, "continuation step without a predecessor");
            return StepOutcome::Failed(StepError::NoKeyword { keyword: step.keyword });
        };
        *prev = Some(ty);

        let steps = self.steps;
        match steps.find(ty, &step.text) {
            Resolution::Undefined => {
                tracing::debug!(step = %step.text, "no matching definition");
                StepOutcome::Undefined(step.text.clone())
            }
            Resolution::Ambiguous(e) => StepOutcome::Failed(StepError::Ambiguous(e)),
            Resolution::BadArgument(e) => StepOutcome::Failed(StepError::BadArgument(e)),
            Resolution::Match(def, params) => {
                let step_ctx = StepContext::new(step.clone(), params);
                match panic_trap::trap(|| (def.body())(ctx, &step_ctx)) {
                    Ok(Ok(())) => StepOutcome::Passed,
                    Ok(Err(failure)) => StepOutcome::Failed(StepError::Fail(failure)),
                    Err(panic) => StepOutcome::Failed(StepError::Panic {
                        message: panic.payload,
                        location: panic.location,
                    }),
                }
            }
        }
    }

    fn skipped_feature(&self, feature: &Feature) -> FeatureResult {
        FeatureResult {
            name: feature.name.clone(),
            scenarios: feature
                .scenarios
                .iter()
                .filter(|s| selected(self.options, s))
                .map(|s| ScenarioResult::skipped(&s.name, s.steps.len()))
                .collect(),
            before_hook_error: None,
            after_hook_error: None,
        }
    }

    fn emit(&mut self, event: &Event<'_>) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

/// Whether the scenario passes the name filter, if one is set.
fn selected(options: &RunOptions, scenario: &Scenario) -> bool {
    options
        .filter
        .as_ref()
        .map_or(true, |re| re.is_match(&scenario.name))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{error::Failure, feature::Keyword, step::Builder};

    fn one_feature(steps: Vec<ScenarioStep>) -> Vec<Feature> {
        vec![Feature::new("f", vec![Scenario::new("s", steps)])]
    }

    #[test]
    fn hooks_run_in_fixed_order() {
        let order = Rc::new(RefCell::new(Vec::<String>::new()));
        let log = |order: &Rc<RefCell<Vec<String>>>, entry: &'static str| {
            let order = Rc::clone(order);
            move || order.borrow_mut().push(entry.to_owned())
        };

        let (a, b, c, d, e, f) = (
            log(&order, "before_all"),
            log(&order, "before_feature"),
            log(&order, "before_scenario"),
            log(&order, "after_scenario"),
            log(&order, "after_feature"),
            log(&order, "after_all"),
        );
        let step_log = log(&order, "step");

        let mut builder = Builder::new();
        builder
            .given("a registered step", move |_, _| {
                step_log();
                Ok(())
            })
            .unwrap();

        let runner = Runner::new(builder.build())
            .before_all(move |_| {
                a();
                Ok(())
            })
            .before_feature(move |_, _| {
                b();
                Ok(())
            })
            .before_scenario(move |_, _| {
                c();
                Ok(())
            })
            .after_scenario(move |_, _, _| {
                d();
                Ok(())
            })
            .after_feature(move |_, _, _| {
                e();
                Ok(())
            })
            .after_all(move |_, _| {
                f();
                Ok(())
            });

        let features = one_feature(vec![ScenarioStep::new(
            Keyword::Given,
            "a registered step",
        )]);
        let suite = runner.run(&features);

        assert!(suite.success());
        assert_eq!(
            *order.borrow(),
            vec![
                "before_all",
                "before_feature",
                "before_scenario",
                "step",
                "after_scenario",
                "after_feature",
                "after_all",
            ],
        );
    }

    #[test]
    fn before_scenario_failure_skips_steps_but_runs_after_scenario() {
        let after_runs = Rc::new(RefCell::new(0_usize));
        let step_runs = Rc::new(RefCell::new(0_usize));

        let mut builder = Builder::new();
        let step_runs_in_body = Rc::clone(&step_runs);
        builder
            .given("a registered step", move |_, _| {
                *step_runs_in_body.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();

        let after_runs_in_hook = Rc::clone(&after_runs);
        let runner = Runner::new(builder.build())
            .before_scenario(|_, _| Err(Failure::new("setup exploded")))
            .after_scenario(move |_, _, result| {
                *after_runs_in_hook.borrow_mut() += 1;
                assert_eq!(result.status(), Status::Failed);
                Ok(())
            });

        let features = one_feature(vec![
            ScenarioStep::new(Keyword::Given, "a registered step"),
            ScenarioStep::new(Keyword::And, "a registered step"),
        ]);
        let suite = runner.run(&features);

        let scenario = &suite.features[0].scenarios[0];
        assert_eq!(scenario.status(), Status::Failed);
        assert_eq!(
            scenario.steps,
            vec![StepOutcome::Skipped, StepOutcome::Skipped],
        );
        assert_eq!(*step_runs.borrow(), 0);
        assert_eq!(*after_runs.borrow(), 1);
        assert!(!suite.success());
    }

    #[test]
    fn leading_continuation_is_a_failed_step() {
        let steps = Builder::new().build();
        let features = one_feature(vec![ScenarioStep::new(Keyword::And, "something")]);
        let suite = Runner::new(steps).run(&features);

        let scenario = &suite.features[0].scenarios[0];
        assert!(matches!(
            scenario.steps[0],
            StepOutcome::Failed(StepError::NoKeyword { keyword: Keyword::And }),
        ));
    }

    #[test]
    fn scenario_filter_selects_by_name() {
        let mut builder = Builder::new();
        builder.given("a step", |_, _| Ok(())).unwrap();

        let features = vec![Feature::new(
            "f",
            vec![
                Scenario::new("smoke: login", vec![ScenarioStep::new(Keyword::Given, "a step")]),
                Scenario::new("slow: report", vec![ScenarioStep::new(Keyword::Given, "a step")]),
            ],
        )];
        let options = RunOptions {
            filter: Some(Regex::new("^smoke:").unwrap()),
            fail_fast: false,
        };
        let suite = Runner::with_options(builder.build(), options).run(&features);

        let feature = &suite.features[0];
        assert_eq!(feature.scenarios.len(), 1);
        assert_eq!(feature.scenarios[0].name, "smoke: login");
    }

    #[test]
    fn fail_fast_stops_after_a_failing_feature() {
        let steps = Builder::new().build();
        let features = vec![
            Feature::new(
                "first",
                vec![Scenario::new("u", vec![ScenarioStep::new(Keyword::Given, "nope")])],
            ),
            Feature::new("second", vec![Scenario::new("s", vec![])]),
        ];
        let options = RunOptions { filter: None, fail_fast: true };
        let suite = Runner::with_options(steps, options).run(&features);

        assert_eq!(suite.features.len(), 1);
        assert_eq!(suite.features[0].name, "first");
        assert!(!suite.success());
    }
}
