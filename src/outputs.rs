use std::collections::BTreeMap;

use crate::variable::{Variable, VariableKey};

/// Everything one inference pass produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    defuzzified: BTreeMap<VariableKey, f64>,
    aggregated: BTreeMap<VariableKey, Vec<f64>>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(
        defuzzified: BTreeMap<VariableKey, f64>,
        aggregated: BTreeMap<VariableKey, Vec<f64>>,
        firing_strengths: Vec<f64>,
    ) -> Self {
        Self {
            defuzzified,
            aggregated,
            firing_strengths,
        }
    }

    /// Crisp value of a consequent.
    pub fn get(&self, var: Variable) -> Option<f64> {
        self.defuzzified.get(&var.0).copied()
    }

    /// Aggregated degrees of a consequent, one per universe sample.
    pub fn aggregated(&self, var: Variable) -> Option<&[f64]> {
        self.aggregated.get(&var.0).map(Vec::as_slice)
    }

    /// Firing strength of every rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.defuzzified.iter().map(|(key, value)| (Variable(*key), *value))
    }
}
