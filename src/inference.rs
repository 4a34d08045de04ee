use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use tracing::{debug, trace};

use crate::dsl::TermRef;
use crate::error::{FuzzyError, Result};
use crate::inputs::{InputPolicy, Inputs};
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rule;
use crate::variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};

/// Operators used by a [`ControlSystem`]. The default is classic Mamdani
/// inference: min/max premises, min implication (clipping), max aggregation
/// and centroid defuzzification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InferenceConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: AndOp,
    pub aggregation: ProductionLink,
    pub defuzzification: DefuzzificationOp,
}

impl InferenceConfig {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        implication: AndOp,
        aggregation: ProductionLink,
        defuzzification: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            implication,
            aggregation,
            defuzzification,
        }
    }
}

/// A validated, immutable rule base over a set of variables.
///
/// Build once, then share it (by reference or `Arc`) between as many
/// [`Simulation`](crate::Simulation)s and threads as needed.
#[derive(Clone, Debug)]
pub struct ControlSystem {
    variables: Variables,
    rules: Vec<Rule>,
    antecedents: BTreeSet<VariableKey>,
    consequents: BTreeSet<VariableKey>,
    config: InferenceConfig,
}

impl ControlSystem {
    pub fn new(variables: Variables, rules: impl IntoIterator<Item = Rule>) -> Result<Self> {
        let rules: Vec<Rule> = rules.into_iter().collect();

        if rules.is_empty() {
            return Err(FuzzyError::NoRules);
        }

        let mut antecedents = BTreeSet::new();
        let mut consequents = BTreeSet::new();

        for (i, rule) in rules.iter().enumerate() {
            let consequent = rule.consequent.as_ref().ok_or(FuzzyError::EmptyRule { rule: i })?;

            for term in rule.premise.propositions() {
                check_term(&variables, term, Role::Antecedent)?;
                antecedents.insert(term.var);
            }

            check_term(&variables, consequent, Role::Consequent)?;
            consequents.insert(consequent.var);
        }

        debug!(
            rules = rules.len(),
            antecedents = antecedents.len(),
            consequents = consequents.len(),
            "control system built"
        );

        Ok(Self {
            variables,
            rules,
            antecedents,
            consequents,
            config: InferenceConfig::default(),
        })
    }

    pub fn with_config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.lookup(name).ok().map(|(_, var)| var)
    }

    /// Antecedents referenced by at least one rule, in registration order.
    pub fn antecedents(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.antecedents
            .iter()
            .map(|&key| (Variable(key), &self.variables.arena[key]))
    }

    /// Consequents produced by at least one rule, in registration order.
    pub fn consequents(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.consequents
            .iter()
            .map(|&key| (Variable(key), &self.variables.arena[key]))
    }

    pub(crate) fn requires(&self, key: VariableKey) -> bool {
        self.antecedents.contains(&key)
    }

    pub(crate) fn produces(&self, key: VariableKey) -> bool {
        self.consequents.contains(&key)
    }

    /// Degree of `value` in every term of the named antecedent.
    pub fn fuzzify(&self, name: &str, value: f64) -> Result<Vec<(&str, f64)>> {
        let (_, var) = self.variables.lookup(name)?;
        let value = InputPolicy::Reject.admit(var, value)?;

        Ok(var.fuzzify(value))
    }

    /// Runs one full inference pass. Pure: the system is never modified.
    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs> {
        for (&key, &value) in &inputs.0 {
            InputPolicy::Reject.admit(self.variables.get_or_err(key)?, value)?;
        }

        if let Some(&missing) = self.antecedents.iter().find(|&&key| !inputs.0.contains_key(&key)) {
            return Err(FuzzyError::MissingInput {
                variable: self.variables.arena[missing].name().to_owned(),
            });
        }

        // Firing strength of every rule
        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let degree = rule.premise.evaluate(self.config.and_op, self.config.or_op, &mut |term: &TermRef| {
                self.term_degree(term, inputs)
            })?;
            let strength = degree * rule.weight;

            trace!(rule = i, degree, strength, "rule evaluated");
            firing_strengths.push(strength);
        }

        // Implication and aggregation, per consequent
        let mut aggregated = BTreeMap::new();

        for &key in &self.consequents {
            let var = &self.variables.arena[key];
            let mut collected: Option<Vec<f64>> = None;

            for (rule, &strength) in self.rules.iter().zip(&firing_strengths) {
                let Some(consequent) = rule.consequent.as_ref().filter(|c| c.var == key) else {
                    continue;
                };

                // Rules that did not fire contribute nothing
                if strength == 0. {
                    continue;
                }

                let membership = var.term_or_err(&consequent.term)?.samples().iter().copied();
                let implied = self.config.implication.call(iter::repeat(strength), membership);

                collected = Some(match collected {
                    None => implied.collect(),
                    Some(acc) => self.config.aggregation.call(acc, implied).collect(),
                });
            }

            let membership = collected.unwrap_or_else(|| vec![0.; var.universe().len()]);

            trace!(variable = var.name(), area = membership.iter().sum::<f64>(), "consequent aggregated");
            aggregated.insert(key, membership);
        }

        // Defuzzification
        let mut defuzzified = BTreeMap::new();

        for (&key, membership) in &aggregated {
            let var = &self.variables.arena[key];

            if membership.iter().sum::<f64>() == 0. {
                return Err(FuzzyError::NoRuleFired {
                    variable: var.name().to_owned(),
                });
            }

            let value = self.config.defuzzification.call(var.universe().samples(), membership);

            debug!(variable = var.name(), value, "consequent defuzzified");
            defuzzified.insert(key, value);
        }

        Ok(Outputs::new(defuzzified, aggregated, firing_strengths))
    }

    fn term_degree(&self, term: &TermRef, inputs: &Inputs) -> Result<f64> {
        let var = self.variables.get_or_err(term.var)?;
        let value = inputs.0.get(&term.var).ok_or_else(|| FuzzyError::MissingInput {
            variable: var.name().to_owned(),
        })?;

        Ok(var.term_or_err(&term.term)?.degree(*value))
    }
}

fn check_term(variables: &Variables, term: &TermRef, role: Role) -> Result<()> {
    let var = variables.get_or_err(term.var)?;

    if var.role() != role {
        return Err(FuzzyError::RoleConflict {
            variable: var.name().to_owned(),
        });
    }
    if var.terms().is_empty() {
        return Err(FuzzyError::NoTerms {
            variable: var.name().to_owned(),
        });
    }

    var.term_or_err(&term.term).map(|_| ())
}
