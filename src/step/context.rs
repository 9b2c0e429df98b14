//! Per-invocation payload handed to a step body.

use crate::{
    error::Failure,
    feature::ScenarioStep,
    pattern::Param,
    value::Value,
};

use super::table::Table;

/// Everything a step body gets to see about the step it was matched to:
/// the [`ScenarioStep`] itself and the parameters the pattern extracted.
#[derive(Clone, Debug)]
pub struct StepContext {
    /// The scenario step matched to the definition.
    step: ScenarioStep,

    /// Parameters bound by the pattern, in match order.
    params: Vec<Param>,
}

impl StepContext {
    /// Creates a new [`StepContext`].
    #[must_use]
    pub fn new(step: ScenarioStep, params: Vec<Param>) -> Self {
        Self { step, params }
    }

    /// Returns the matched [`ScenarioStep`].
    #[must_use]
    pub fn step(&self) -> &ScenarioStep {
        &self.step
    }

    /// Returns the literal step text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.step.text
    }

    /// Returns the data [`Table`] attached to the step, if any.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        self.step.table.as_ref()
    }

    /// Returns all extracted parameters in match order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the value of the parameter at `idx`, if it exists.
    #[must_use]
    pub fn param(&self, idx: usize) -> Option<&Value> {
        self.params.get(idx).map(|p| &p.value)
    }

    /// Returns the value of the named parameter, if it exists.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .map(|p| &p.value)
    }

    /// Returns the parameter at `idx` as an integer.
    ///
    /// # Errors
    ///
    /// [`Failure`] if the parameter is missing or not an integer.
    pub fn int(&self, idx: usize) -> Result<i64, Failure> {
        self.param(idx)
            .and_then(Value::as_int)
            .ok_or_else(|| Failure::new(format!("step argument {idx} is not an integer")))
    }

    /// Returns the parameter at `idx` as a float, widening integers.
    ///
    /// # Errors
    ///
    /// [`Failure`] if the parameter is missing or not a number.
    pub fn float(&self, idx: usize) -> Result<f64, Failure> {
        self.param(idx)
            .and_then(Value::as_float)
            .ok_or_else(|| Failure::new(format!("step argument {idx} is not a number")))
    }

    /// Returns the parameter at `idx` as text.
    ///
    /// # Errors
    ///
    /// [`Failure`] if the parameter is missing or not text.
    pub fn str(&self, idx: usize) -> Result<&str, Failure> {
        self.param(idx)
            .and_then(Value::as_str)
            .ok_or_else(|| Failure::new(format!("step argument {idx} is not text")))
    }
}
