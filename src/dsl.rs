use crate::error::Result;
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// One term of one variable, e.g. `time is night`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TermRef {
    pub(crate) var: VariableKey,
    pub(crate) term: String,
}

impl TermRef {
    pub fn variable(&self) -> Variable {
        Variable(self.var)
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

/// A rule premise: terms combined with fuzzy AND / OR.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(TermRef),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

pub fn and(lhs: Expr, rhs: Expr) -> Expr {
    Expr::And(Box::new(lhs), Box::new(rhs))
}

pub fn or(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Or(Box::new(lhs), Box::new(rhs))
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        and(self, rhs)
    }

    pub fn or(self, rhs: Expr) -> Self {
        or(self, rhs)
    }

    /// Every term referenced, left to right.
    pub fn propositions(&self) -> Vec<&TermRef> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<&'p TermRef>) {
            match expr {
                Expr::Is(term) => out.push(term),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
            }
        }

        parse(self, &mut props);

        props
    }

    /// Degree to which the premise holds, given the degree of each term.
    ///
    /// Both sides are always evaluated so a missing input anywhere in the
    /// premise is reported, whatever the other side came out as.
    pub fn evaluate<F>(&self, and_op: AndOp, or_op: OrOp, degree_of: &mut F) -> Result<f64>
    where
        F: FnMut(&TermRef) -> Result<f64>,
    {
        match self {
            Self::Is(term) => degree_of(term),
            Self::And(lhs, rhs) => {
                let left = lhs.evaluate(and_op, or_op, degree_of)?;
                let right = rhs.evaluate(and_op, or_op, degree_of)?;

                Ok(and_op.apply(left, right))
            },
            Self::Or(lhs, rhs) => {
                let left = lhs.evaluate(and_op, or_op, degree_of)?;
                let right = rhs.evaluate(and_op, or_op, degree_of)?;

                Ok(or_op.apply(left, right))
            },
        }
    }
}

impl Variable {
    /// Premise leaf `self is term`.
    pub fn is(self, term: impl Into<String>) -> Expr {
        Expr::Is(self.term(term))
    }

    /// Consequent `self is term`.
    pub fn term(self, term: impl Into<String>) -> TermRef {
        TermRef {
            var: self.0,
            term: term.into(),
        }
    }
}
