use crate::dsl::{Expr, TermRef};
use crate::error::{FuzzyError, Result};

/// `if premise then consequent`, with an implication weight in (0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequent: Option<TermRef>,
    pub(crate) weight: f64,
}

impl Rule {
    pub fn new(premise: Expr, consequent: TermRef) -> Self {
        Self::when(premise).then(consequent)
    }

    /// Starts a rule without a consequent; the control system refuses it until
    /// [`Rule::then`] is called.
    pub fn when(premise: Expr) -> Self {
        Rule {
            premise,
            consequent: None,
            weight: 1.,
        }
    }

    pub fn then(mut self, consequent: TermRef) -> Self {
        self.consequent = Some(consequent);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Result<Self> {
        // Also rejects NaN
        if !(weight > 0. && weight <= 1.) {
            return Err(FuzzyError::InvalidWeight { weight });
        }

        self.weight = weight;

        Ok(self)
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequent(&self) -> Option<&TermRef> {
        self.consequent.as_ref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
