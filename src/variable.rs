use std::collections::HashMap;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::terms::{automf, AutoNames, MembershipFunction, Shape};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A cheap, copyable handle to a variable registered in [`Variables`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable(pub(crate) VariableKey);

/// Whether a variable feeds rules (input) or is produced by them (output).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Antecedent,
    Consequent,
}

/// A universe, its named terms and its role.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    // Insertion order is kept for plotting and fuzzification output
    terms: Vec<MembershipFunction>,
}

impl LinguisticVariable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[MembershipFunction] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|term| term.name() == name)
    }

    pub(crate) fn term_or_err(&self, name: &str) -> Result<&MembershipFunction> {
        self.term(name).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: name.to_owned(),
        })
    }

    /// Degree of `value` in every term, in definition order.
    pub fn fuzzify(&self, value: f64) -> Vec<(&str, f64)> {
        self.terms.iter().map(|term| (term.name(), term.degree(value))).collect()
    }

    fn push_term(&mut self, name: &str, shape: Shape) -> Result<()> {
        if self.term(name).is_some() {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name.to_owned(),
            });
        }

        let term = MembershipFunction::new(&self.name, name, shape, &self.universe)?;
        self.terms.push(term);

        Ok(())
    }
}

/// Arena of every variable a control system is built from.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    pub(crate) arena: SlotMap<VariableKey, LinguisticVariable>,
    by_name: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable whose universe runs over `universe_range` in increments of `step`.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        role: Role,
        universe_range: RangeInclusive<f64>,
        step: f64,
    ) -> Result<Variable> {
        let name = name.into();

        if self.by_name.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable { variable: name });
        }

        let universe = Universe::new(&name, universe_range, step)?;
        let key = self.arena.insert(LinguisticVariable {
            name: name.clone(),
            role,
            universe,
            terms: Vec::new(),
        });

        self.by_name.insert(name, key);

        Ok(Variable(key))
    }

    pub fn add_antecedent(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        step: f64,
    ) -> Result<Variable> {
        self.add(name, Role::Antecedent, universe_range, step)
    }

    pub fn add_consequent(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        step: f64,
    ) -> Result<Variable> {
        self.add(name, Role::Consequent, universe_range, step)
    }

    pub fn add_term(&mut self, var: Variable, name: &str, shape: Shape) -> Result<()> {
        self.get_mut(var)?.push_term(name, shape)
    }

    /// Fills the variable with `count` automatically placed terms named
    /// `poor`, `average`, `good` (and so on up to seven terms).
    pub fn automf(&mut self, var: Variable, count: usize) -> Result<()> {
        self.automf_with(var, count, &AutoNames::Quality)
    }

    pub fn automf_with(&mut self, var: Variable, count: usize, names: &AutoNames) -> Result<()> {
        let variable = self.get_mut(var)?;
        let terms = automf(&variable.universe, count, names)?;

        // Check up front so a clash leaves the variable untouched
        if let Some((name, _)) = terms.iter().find(|(name, _)| variable.term(name).is_some()) {
            return Err(FuzzyError::DuplicateTerm {
                variable: variable.name.clone(),
                term: name.clone(),
            });
        }

        for (name, shape) in terms {
            variable.push_term(&name, shape)?;
        }

        Ok(())
    }

    pub fn get(&self, var: Variable) -> Option<&LinguisticVariable> {
        self.arena.get(var.0)
    }

    pub fn by_name(&self, name: &str) -> Option<Variable> {
        self.by_name.get(name).copied().map(Variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.arena.iter().map(|(key, var)| (Variable(key), var))
    }

    pub(crate) fn get_or_err(&self, key: VariableKey) -> Result<&LinguisticVariable> {
        self.arena.get(key).ok_or_else(|| unknown(key))
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<(VariableKey, &LinguisticVariable)> {
        self.by_name
            .get(name)
            .and_then(|&key| self.arena.get(key).map(|var| (key, var)))
            .ok_or_else(|| FuzzyError::UnknownVariable {
                variable: name.to_owned(),
            })
    }

    fn get_mut(&mut self, var: Variable) -> Result<&mut LinguisticVariable> {
        self.arena.get_mut(var.0).ok_or_else(|| unknown(var.0))
    }
}

// Handles from another registry carry no name we could report
fn unknown(key: VariableKey) -> FuzzyError {
    FuzzyError::UnknownVariable {
        variable: format!("{key:?}"),
    }
}
