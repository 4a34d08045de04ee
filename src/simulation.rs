use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::inference::ControlSystem;
use crate::inputs::{InputPolicy, Inputs};
use crate::outputs::Outputs;
use crate::variable::{Role, Variable, VariableKey};

/// Where a simulation stands with respect to its inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimulationState {
    /// No input set yet
    Created,
    /// Some, but not all, antecedents used by the rules have a value
    InputsPartial,
    /// Every antecedent used by the rules has a value; `compute` may run
    InputsComplete,
}

/// One evaluation session over a shared [`ControlSystem`].
///
/// Outputs of the last successful [`compute`](Self::compute) stay readable
/// after inputs change, but are then reported as stale until the next compute.
#[derive(Clone, Debug)]
pub struct Simulation<'s> {
    system: &'s ControlSystem,
    policy: InputPolicy,
    inputs: Inputs,
    outputs: Option<Outputs>,
    stale: bool,
}

impl<'s> Simulation<'s> {
    pub fn new(system: &'s ControlSystem) -> Self {
        Self {
            system,
            policy: InputPolicy::default(),
            inputs: Inputs::new(),
            outputs: None,
            stale: false,
        }
    }

    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn system(&self) -> &'s ControlSystem {
        self.system
    }

    pub fn set_input(&mut self, variable: &str, value: f64) -> Result<()> {
        let (key, var) = self.system.variables().lookup(variable)?;

        if var.role() != Role::Antecedent {
            return Err(FuzzyError::RoleConflict {
                variable: variable.to_owned(),
            });
        }

        let value = self.policy.admit(var, value)?;

        self.inputs.0.insert(key, value);
        self.stale = self.outputs.is_some();

        Ok(())
    }

    /// Sets several inputs, stopping at the first one rejected.
    pub fn set_inputs<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a str, f64)>) -> Result<()> {
        inputs
            .into_iter()
            .try_for_each(|(variable, value)| self.set_input(variable, value))
    }

    pub fn input(&self, variable: &str) -> Option<f64> {
        let (key, _) = self.system.variables().lookup(variable).ok()?;

        self.inputs.0.get(&key).copied()
    }

    pub fn state(&self) -> SimulationState {
        let required = self.system.antecedents().count();
        let present = self.inputs.0.keys().filter(|&&key| self.system.requires(key)).count();

        if self.inputs.is_empty() {
            SimulationState::Created
        } else if present == required {
            SimulationState::InputsComplete
        } else {
            SimulationState::InputsPartial
        }
    }

    /// Runs inference on the current inputs. On failure the previous outputs
    /// are kept as they were.
    pub fn compute(&mut self) -> Result<()> {
        let outputs = self.system.infer(&self.inputs)?;

        debug!(outputs = ?outputs.iter().map(|(_, value)| value).collect::<Vec<_>>(), "simulation computed");

        self.outputs = Some(outputs);
        self.stale = false;

        Ok(())
    }

    /// True when inputs changed after the last successful compute.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn output(&self, variable: &str) -> Result<f64> {
        let key = self.output_key(variable)?;

        self.computed(variable)?
            .get(Variable(key))
            .ok_or_else(|| FuzzyError::NotComputed {
                variable: variable.to_owned(),
            })
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    /// `(x, degree)` pairs of the aggregated fuzzy set behind an output, for plotting.
    pub fn aggregated_set(&self, variable: &str) -> Result<Vec<(f64, f64)>> {
        let key = self.output_key(variable)?;
        let membership = self
            .computed(variable)?
            .aggregated(Variable(key))
            .ok_or_else(|| FuzzyError::NotComputed {
                variable: variable.to_owned(),
            })?;
        let universe = self.system.variables().get_or_err(key)?.universe();

        Ok(universe.samples().iter().copied().zip(membership.iter().copied()).collect())
    }

    /// Firing strength of each rule during the last successful compute.
    pub fn firing_strengths(&self) -> Option<&[f64]> {
        self.outputs.as_ref().map(Outputs::firing_strengths)
    }

    /// Drops inputs and outputs, back to [`SimulationState::Created`].
    pub fn reset(&mut self) {
        self.inputs = Inputs::new();
        self.outputs = None;
        self.stale = false;
    }

    fn output_key(&self, variable: &str) -> Result<VariableKey> {
        let (key, _) = self.system.variables().lookup(variable)?;

        if !self.system.produces(key) {
            return Err(FuzzyError::UnknownVariable {
                variable: variable.to_owned(),
            });
        }

        Ok(key)
    }

    fn computed(&self, variable: &str) -> Result<&Outputs> {
        self.outputs.as_ref().ok_or_else(|| FuzzyError::NotComputed {
            variable: variable.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{Rule, Shape, Variables};

    fn heater() -> ControlSystem {
        let mut vars = Variables::new();
        let temp = vars.add_antecedent("temp", 0. ..=30., 1.).unwrap();
        let humidity = vars.add_antecedent("humidity", 0. ..=100., 5.).unwrap();
        let power = vars.add_consequent("power", 0. ..=10., 1.).unwrap();

        vars.add_term(temp, "cold", Shape::trapezoidal(0., 0., 10., 20.)).unwrap();
        vars.add_term(temp, "warm", Shape::trapezoidal(10., 20., 30., 30.)).unwrap();
        vars.automf(humidity, 3).unwrap();
        vars.add_term(power, "low", Shape::triangular(0., 2., 4.)).unwrap();
        vars.add_term(power, "high", Shape::triangular(6., 8., 10.)).unwrap();

        let rules = [
            Rule::new(temp.is("cold").and(humidity.is("good")), power.term("high")),
            Rule::new(temp.is("warm").or(humidity.is("poor")), power.term("low")),
        ];

        ControlSystem::new(vars, rules).unwrap()
    }

    #[test]
    fn lifecycle() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        assert_eq!(sim.state(), SimulationState::Created);
        assert_eq!(
            sim.output("power"),
            Err(FuzzyError::NotComputed {
                variable: "power".into()
            })
        );

        sim.set_input("temp", 5.).unwrap();

        assert_eq!(sim.state(), SimulationState::InputsPartial);
        assert_eq!(
            sim.compute(),
            Err(FuzzyError::MissingInput {
                variable: "humidity".into()
            })
        );

        sim.set_input("humidity", 100.).unwrap();

        assert_eq!(sim.state(), SimulationState::InputsComplete);

        sim.compute().unwrap();

        assert_eq!(sim.state(), SimulationState::InputsComplete);
        assert!(!sim.is_stale());
        assert_relative_eq!(sim.output("power").unwrap(), 8., epsilon = 1e-12);
        assert_eq!(sim.firing_strengths(), Some(&[1., 0.][..]));
    }

    #[test]
    fn outputs_survive_input_changes_until_recompute() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        sim.set_inputs([("temp", 5.), ("humidity", 100.)]).unwrap();
        sim.compute().unwrap();

        let before = sim.output("power").unwrap();

        sim.set_input("temp", 30.).unwrap();

        assert!(sim.is_stale());
        assert_eq!(sim.output("power").unwrap(), before);

        sim.compute().unwrap();

        assert!(!sim.is_stale());
        assert_relative_eq!(sim.output("power").unwrap(), 2., epsilon = 1e-12);
    }

    #[test]
    fn failed_compute_keeps_previous_outputs() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        sim.set_inputs([("temp", 5.), ("humidity", 100.)]).unwrap();
        sim.compute().unwrap();

        // warm = 0 and poor = 0, cold = 1 but good = 0.5: only `high` fires at 0.5
        sim.set_input("humidity", 75.).unwrap();
        sim.compute().unwrap();

        assert_relative_eq!(sim.output("power").unwrap(), 8., epsilon = 1e-12);
        assert_eq!(sim.firing_strengths(), Some(&[0.5, 0.][..]));

        // Nothing fires at all
        sim.set_input("humidity", 50.).unwrap();

        assert_eq!(
            sim.compute(),
            Err(FuzzyError::NoRuleFired {
                variable: "power".into()
            })
        );
        assert!(sim.is_stale());
        assert_eq!(sim.firing_strengths(), Some(&[0.5, 0.][..]));
    }

    #[test]
    fn input_validation() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        assert!(matches!(sim.set_input("temp", 31.), Err(FuzzyError::OutOfUniverse { .. })));
        assert!(matches!(sim.set_input("temp", f64::NAN), Err(FuzzyError::OutOfUniverse { .. })));
        assert_eq!(
            sim.set_input("power", 3.),
            Err(FuzzyError::RoleConflict {
                variable: "power".into()
            })
        );
        assert_eq!(
            sim.set_input("pressure", 3.),
            Err(FuzzyError::UnknownVariable {
                variable: "pressure".into()
            })
        );
        assert_eq!(sim.state(), SimulationState::Created);

        let mut clamped = Simulation::new(&system).with_input_policy(InputPolicy::Clamp);

        clamped.set_input("temp", 45.).unwrap();

        assert_eq!(clamped.input("temp"), Some(30.));
    }

    #[test]
    fn aggregated_set_for_plotting() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        assert!(matches!(sim.aggregated_set("power"), Err(FuzzyError::NotComputed { .. })));

        sim.set_inputs([("temp", 5.), ("humidity", 75.)]).unwrap();
        sim.compute().unwrap();

        let set = sim.aggregated_set("power").unwrap();

        assert_eq!(set.len(), 11);
        assert_eq!(set[7], (7., 0.5));
        assert_eq!(set[8], (8., 0.5));
        assert_eq!(set[2], (2., 0.));
        assert!(matches!(sim.aggregated_set("temp"), Err(FuzzyError::UnknownVariable { .. })));
        assert!(matches!(sim.output("humidity"), Err(FuzzyError::UnknownVariable { .. })));
    }

    #[test]
    fn reset_clears_everything() {
        let system = heater();
        let mut sim = Simulation::new(&system);

        sim.set_inputs([("temp", 5.), ("humidity", 100.)]).unwrap();
        sim.compute().unwrap();
        sim.reset();

        assert_eq!(sim.state(), SimulationState::Created);
        assert!(sim.outputs().is_none());
        assert_eq!(sim.input("temp"), None);
    }
}
