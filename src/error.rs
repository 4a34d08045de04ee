use thiserror::Error;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

/// Every failure the engine can report.
///
/// Construction problems (bad universes, shapes, weights, rule sets) are
/// raised while building variables, rules or the [`ControlSystem`]; only
/// input and output problems can come out of a [`Simulation`].
///
/// [`ControlSystem`]: crate::ControlSystem
/// [`Simulation`]: crate::Simulation
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("input {value} for `{variable}` lies outside its universe [{min}, {max}]")]
    OutOfUniverse {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no crisp input has been set for antecedent `{variable}`")]
    MissingInput { variable: String },

    #[error("no rule fired for consequent `{variable}`, its aggregated set is empty")]
    NoRuleFired { variable: String },

    #[error("rule weight {weight} is outside (0, 1]")]
    InvalidWeight { weight: f64 },

    #[error("rule #{rule} has no consequent")]
    EmptyRule { rule: usize },

    #[error("variable `{variable}` is used as both antecedent and consequent")]
    RoleConflict { variable: String },

    #[error("output `{variable}` was requested before a successful compute")]
    NotComputed { variable: String },

    #[error("unknown variable `{variable}`")]
    UnknownVariable { variable: String },

    #[error("variable `{variable}` has no term named `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("variable `{variable}` is already defined")]
    DuplicateVariable { variable: String },

    #[error("variable `{variable}` already has a term named `{term}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("invalid universe for `{variable}`: {reason}")]
    InvalidUniverse { variable: String, reason: String },

    #[error("invalid shape for `{variable}`[`{term}`]: {reason}")]
    InvalidShape {
        variable: String,
        term: String,
        reason: String,
    },

    #[error("cannot generate {count} automatic terms: {reason}")]
    InvalidTermCount { count: usize, reason: String },

    #[error("variable `{variable}` has no terms")]
    NoTerms { variable: String },

    #[error("a control system needs at least one rule")]
    NoRules,
}
