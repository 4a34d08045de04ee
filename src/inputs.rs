use std::collections::HashMap;

use crate::error::{FuzzyError, Result};
use crate::variable::{LinguisticVariable, Variable, VariableKey};

/// Crisp input values keyed by antecedent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    /// Overwrites any previous value for `var`. Bounds are checked when the
    /// inputs are used.
    pub fn add(&mut self, var: Variable, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn get(&self, var: Variable) -> Option<f64> {
        self.0.get(&var.0).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What to do with a crisp input outside its variable's universe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputPolicy {
    /// Fail with [`FuzzyError::OutOfUniverse`]
    #[default]
    Reject,
    /// Pull the value onto the nearest universe bound
    Clamp,
}

impl InputPolicy {
    /// The value to store for `var`. NaN is rejected under either policy.
    pub(crate) fn admit(self, var: &LinguisticVariable, value: f64) -> Result<f64> {
        let universe = var.universe();

        if universe.contains(value) {
            return Ok(value);
        }

        match self {
            Self::Clamp if !value.is_nan() => {
                let clamped = value.clamp(universe.min(), universe.max());

                tracing::warn!(variable = var.name(), value, clamped, "input clamped to universe");

                Ok(clamped)
            },
            _ => Err(FuzzyError::OutOfUniverse {
                variable: var.name().to_owned(),
                value,
                min: universe.min(),
                max: universe.max(),
            }),
        }
    }
}
