//! Mamdani fuzzy inference.
//!
//! Register linguistic variables and their terms in [`Variables`], write
//! [`Rule`]s over them, compile both into an immutable [`ControlSystem`] and
//! evaluate crisp inputs through a [`Simulation`]:
//!
//! ```
//! use fuzzy_control::{ControlSystem, Rule, Shape, Simulation, Variables};
//!
//! # fn main() -> fuzzy_control::Result<()> {
//! let mut vars = Variables::new();
//! let light = vars.add_antecedent("light", 0. ..=10., 1.)?;
//! let lamp = vars.add_consequent("lamp", 0. ..=100., 1.)?;
//!
//! vars.automf(light, 3)?;
//! vars.add_term(lamp, "dim", Shape::triangular(0., 20., 40.))?;
//! vars.add_term(lamp, "bright", Shape::triangular(60., 80., 100.))?;
//!
//! let system = ControlSystem::new(
//!     vars,
//!     [
//!         Rule::new(light.is("poor"), lamp.term("bright")),
//!         Rule::new(light.is("good"), lamp.term("dim")),
//!     ],
//! )?;
//!
//! let mut sim = Simulation::new(&system);
//! sim.set_input("light", 0.)?;
//! sim.compute()?;
//!
//! assert!((sim.output("lamp")? - 80.).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod simulation;
mod terms;
mod universe;
mod variable;

pub use dsl::{and, or, Expr, TermRef};
pub use error::{FuzzyError, Result};
pub use inference::{ControlSystem, InferenceConfig};
pub use inputs::{InputPolicy, Inputs};
pub use ops::{AndOp, DefuzzificationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::Rule;
pub use simulation::{Simulation, SimulationState};
pub use terms::{automf, AutoNames, MembershipFunction, Shape};
pub use universe::Universe;
pub use variable::{LinguisticVariable, Role, Variable, Variables};
