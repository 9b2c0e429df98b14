// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default console progress [`Listener`].

use std::{
    io,
    time::{Duration, Instant},
};

use console::style;

use crate::{
    event::Event,
    result::{ScenarioResult, Status, StepOutcome, SuiteResult},
};

use super::Listener;

/// Banner width used around feature names.
const BANNER_WIDTH: usize = 60;

/// [`Listener`] printing human-readable progress to its output.
///
/// One line per scenario with a colored marker, a summary block per
/// feature, and a suite roll-up with the elapsed wall-clock time.
#[derive(Debug)]
pub struct Basic<Out: io::Write = io::Stdout> {
    output: Out,
    started: Option<Instant>,
}

impl Basic<io::Stdout> {
    /// Creates a [`Basic`] writer printing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<Out: io::Write> Basic<Out> {
    /// Creates a [`Basic`] writer printing to the given output.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self { output, started: None }
    }

    /// Consumes this writer, returning its output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.output, "{}", text.as_ref()) {
            tracing::warn!("failed to write progress output: {e}");
        }
    }

    fn scenario_finished(&mut self, result: &ScenarioResult) {
        match result.status() {
            Status::Passed => self.line(format!("  {}", style("✓ PASSED").green())),
            Status::Skipped => self.line(format!("  {}", style("○ SKIPPED").dim())),
            Status::Failed => {
                self.line(format!("  {}", style("✗ FAILED").red()));
                if let Some(e) = &result.before_hook_error {
                    self.line(format!("    Error in before_scenario: {e}"));
                }
                if let Some(e) = result.first_error() {
                    self.line(format!("    Error: {e}"));
                }
            }
            Status::Undefined => {
                self.line(format!("  {}", style("? UNDEFINED").yellow()));
                for step in &result.steps {
                    if let StepOutcome::Undefined(text) = step {
                        self.line(format!("    Undefined step: {text}"));
                    }
                }
            }
        }
        if let Some(e) = &result.after_hook_error {
            self.line(format!("    Error in after_scenario: {e}"));
        }
    }

    fn suite_finished(&mut self, result: &SuiteResult) {
        let stats = result.stats();
        self.line("");
        self.line(format!(
            "{} passed, {} failed, {} skipped, {} undefined",
            stats.passed, stats.failed, stats.skipped, stats.undefined,
        ));
        if let Some(e) = &result.before_hook_error {
            self.line(format!("Error in before_all: {e}"));
        }
        if let Some(e) = &result.after_hook_error {
            self.line(format!("Error in after_all: {e}"));
        }

        let elapsed = self
            .started
            .take()
            .map_or(Duration::ZERO, |started| started.elapsed());
        // Millisecond precision is plenty for a summary line.
        let elapsed = Duration::from_millis(
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        );
        let verdict = if result.success() {
            style("Test suite completed").green().to_string()
        } else {
            style("Test suite failed").red().to_string()
        };
        self.line(format!("{verdict} in {}", humantime::format_duration(elapsed)));
    }
}

impl<Out: io::Write> Listener for Basic<Out> {
    fn on_event(&mut self, event: &Event<'_>) {
        match event {
            Event::SuiteStarted { features } => {
                self.started = Some(Instant::now());
                self.line(format!("Starting test suite ({features} features)"));
            }
            Event::FeatureStarted(feature) => {
                self.line("");
                self.line("=".repeat(BANNER_WIDTH));
                self.line(format!("Feature: {}", style(&feature.name).bold()));
                self.line("=".repeat(BANNER_WIDTH));
            }
            Event::ScenarioStarted(scenario) => {
                self.line("");
                self.line(format!("Scenario: {}", scenario.name));
            }
            Event::StepStarted(_) | Event::StepFinished(..) => {}
            Event::ScenarioFinished(_, result) => self.scenario_finished(result),
            Event::FeatureFinished(_, result) => {
                let stats = result.stats();
                self.line("");
                self.line("Feature Summary:");
                self.line(format!("  Passed: {}", stats.passed));
                self.line(format!("  Failed: {}", stats.failed));
                self.line(format!("  Skipped: {}", stats.skipped));
                self.line(format!("  Undefined: {}", stats.undefined));
                if let Some(e) = &result.before_hook_error {
                    self.line(format!("  Error in before_feature: {e}"));
                }
                if let Some(e) = &result.after_hook_error {
                    self.line(format!("  Error in after_feature: {e}"));
                }
            }
            Event::SuiteFinished(result) => self.suite_finished(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Failure,
        feature::{Feature, Scenario},
        result::FeatureResult,
        step::StepError,
    };

    fn render(events: &[Event<'_>]) -> String {
        let mut writer = Basic::new(Vec::new());
        for event in events {
            writer.on_event(event);
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn renders_feature_banner_and_scenario_markers() {
        let feature = Feature::new("Calculator", vec![]);
        let scenario = Scenario::new("Add two numbers", vec![]);
        let result = ScenarioResult {
            name: "Add two numbers".to_owned(),
            steps: vec![StepOutcome::Passed],
            before_hook_error: None,
            after_hook_error: None,
        };
        let out = render(&[
            Event::SuiteStarted { features: 1 },
            Event::FeatureStarted(&feature),
            Event::ScenarioStarted(&scenario),
            Event::ScenarioFinished(&scenario, &result),
        ]);
        assert!(out.contains("Feature: Calculator"));
        assert!(out.contains("Scenario: Add two numbers"));
        assert!(out.contains("PASSED"));
    }

    #[test]
    fn failed_scenario_prints_the_error() {
        let scenario = Scenario::new("Divide by zero", vec![]);
        let result = ScenarioResult {
            name: "Divide by zero".to_owned(),
            steps: vec![StepOutcome::Failed(StepError::Fail(Failure::new(
                "Cannot divide by zero",
            )))],
            before_hook_error: None,
            after_hook_error: None,
        };
        let out = render(&[Event::ScenarioFinished(&scenario, &result)]);
        assert!(out.contains("FAILED"));
        assert!(out.contains("Error: Cannot divide by zero"));
    }

    #[test]
    fn undefined_scenario_lists_the_step_text_verbatim() {
        let scenario = Scenario::new("Login", vec![]);
        let result = ScenarioResult {
            name: "Login".to_owned(),
            steps: vec![
                StepOutcome::Passed,
                StepOutcome::Undefined(r#"I enter username "admin""#.to_owned()),
                StepOutcome::Skipped,
            ],
            before_hook_error: None,
            after_hook_error: None,
        };
        let out = render(&[Event::ScenarioFinished(&scenario, &result)]);
        assert!(out.contains("UNDEFINED"));
        assert!(out.contains(r#"Undefined step: I enter username "admin""#));
    }

    #[test]
    fn suite_summary_rolls_up_counts() {
        let suite = SuiteResult {
            features: vec![FeatureResult {
                name: "f".to_owned(),
                scenarios: vec![
                    ScenarioResult {
                        name: "a".to_owned(),
                        steps: vec![StepOutcome::Passed],
                        before_hook_error: None,
                        after_hook_error: None,
                    },
                    ScenarioResult::skipped("b", 1),
                ],
                before_hook_error: None,
                after_hook_error: None,
            }],
            before_hook_error: None,
            after_hook_error: None,
        };
        let out = render(&[
            Event::SuiteStarted { features: 1 },
            Event::SuiteFinished(&suite),
        ]);
        assert!(out.contains("1 passed, 0 failed, 1 skipped, 0 undefined"));
        assert!(out.contains("Test suite completed in"));
    }
}
