// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifecycle hooks and their failure-isolating invocation.

use crate::{
    context::Context,
    error::Failure,
    feature::{Feature, Scenario},
    panic_trap,
    result::{FeatureResult, ScenarioResult, SuiteResult},
};

/// Result of a hook body.
pub type HookResult = Result<(), Failure>;

type BeforeAllFn = Box<dyn Fn(&mut Context) -> HookResult>;
type AfterAllFn = Box<dyn Fn(&mut Context, &SuiteResult) -> HookResult>;
type BeforeFeatureFn = Box<dyn Fn(&mut Context, &Feature) -> HookResult>;
type AfterFeatureFn = Box<dyn Fn(&mut Context, &Feature, &FeatureResult) -> HookResult>;
type BeforeScenarioFn = Box<dyn Fn(&mut Context, &Scenario) -> HookResult>;
type AfterScenarioFn = Box<dyn Fn(&mut Context, &Scenario, &ScenarioResult) -> HookResult>;

/// The set of registered lifecycle hooks.
///
/// Every hook is optional; the runner invokes whichever are present at the
/// fixed points of the lifecycle. Failures (returned or panicked) are
/// caught at the hook boundary and handed back as data.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) before_all: Option<BeforeAllFn>,
    pub(crate) after_all: Option<AfterAllFn>,
    pub(crate) before_feature: Option<BeforeFeatureFn>,
    pub(crate) after_feature: Option<AfterFeatureFn>,
    pub(crate) before_scenario: Option<BeforeScenarioFn>,
    pub(crate) after_scenario: Option<AfterScenarioFn>,
}

impl Hooks {
    pub(crate) fn run_before_all(&self, ctx: &mut Context) -> Option<Failure> {
        self.before_all
            .as_ref()
            .and_then(|hook| guard("before_all", || hook(ctx)))
    }

    pub(crate) fn run_after_all(
        &self,
        ctx: &mut Context,
        suite: &SuiteResult,
    ) -> Option<Failure> {
        self.after_all
            .as_ref()
            .and_then(|hook| guard("after_all", || hook(ctx, suite)))
    }

    pub(crate) fn run_before_feature(
        &self,
        ctx: &mut Context,
        feature: &Feature,
    ) -> Option<Failure> {
        self.before_feature
            .as_ref()
            .and_then(|hook| guard("before_feature", || hook(ctx, feature)))
    }

    pub(crate) fn run_after_feature(
        &self,
        ctx: &mut Context,
        feature: &Feature,
        result: &FeatureResult,
    ) -> Option<Failure> {
        self.after_feature
            .as_ref()
            .and_then(|hook| guard("after_feature", || hook(ctx, feature, result)))
    }

    pub(crate) fn run_before_scenario(
        &self,
        ctx: &mut Context,
        scenario: &Scenario,
    ) -> Option<Failure> {
        self.before_scenario
            .as_ref()
            .and_then(|hook| guard("before_scenario", || hook(ctx, scenario)))
    }

    pub(crate) fn run_after_scenario(
        &self,
        ctx: &mut Context,
        scenario: &Scenario,
        result: &ScenarioResult,
    ) -> Option<Failure> {
        self.after_scenario
            .as_ref()
            .and_then(|hook| guard("after_scenario", || hook(ctx, scenario, result)))
    }
}

/// Invokes a hook body, converting an `Err` return or a panic into the
/// [`Failure`] to record.
fn guard(name: &str, hook: impl FnOnce() -> HookResult) -> Option<Failure> {
    match panic_trap::trap(hook) {
        Ok(Ok(())) => None,
        Ok(Err(failure)) => {
            tracing::warn!("{name} hook failed: {failure}");
            Some(failure)
        }
        Err(panic) => {
            tracing::warn!("{name} hook panicked: {}", panic.payload);
            Some(Failure::new(format!("{name} hook panicked: {}", panic.payload)))
        }
    }
}
