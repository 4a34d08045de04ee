//! Lamp brightness from time of day, sunlight and room size.
//!
//! Run with `RUST_LOG=fuzzy_control=trace` to follow every rule.

use fuzzy_control::{ControlSystem, Rule, Shape, Simulation, Variables};
use tracing_subscriber::EnvFilter;

fn main() -> fuzzy_control::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut vars = Variables::new();
    let time = vars.add_antecedent("time", 0. ..=10., 1.)?;
    let intensity = vars.add_antecedent("intensity", 0. ..=10., 1.)?;
    let size = vars.add_antecedent("size", 0. ..=49., 1.)?;
    let bulb = vars.add_consequent("bulb", 0. ..=99., 1.)?;

    vars.add_term(time, "night", Shape::triangular(0., 0., 2.))?;
    vars.add_term(time, "morning", Shape::triangular(2., 3., 4.))?;
    vars.add_term(time, "midday", Shape::triangular(4., 6., 8.))?;
    vars.add_term(time, "evening", Shape::triangular(8., 9., 10.))?;
    vars.add_term(size, "small", Shape::triangular(0., 0., 6.))?;
    vars.add_term(size, "average", Shape::triangular(6., 13., 25.))?;
    vars.add_term(size, "big", Shape::triangular(25., 35., 49.))?;
    vars.automf(intensity, 3)?;
    vars.automf(bulb, 3)?;

    // (time, sun, room) -> bulb
    let table = [
        ("night", "poor", "small", "average"),
        ("night", "poor", "average", "average"),
        ("night", "poor", "big", "good"),
        ("morning", "poor", "small", "average"),
        ("morning", "poor", "average", "average"),
        ("morning", "poor", "big", "good"),
        ("midday", "poor", "small", "average"),
        ("midday", "average", "small", "poor"),
        ("midday", "good", "small", "poor"),
        ("midday", "poor", "average", "average"),
        ("midday", "average", "big", "good"),
        ("midday", "average", "average", "poor"),
        ("midday", "good", "average", "poor"),
        ("evening", "poor", "small", "average"),
        ("evening", "poor", "average", "average"),
        ("evening", "poor", "big", "good"),
        ("evening", "average", "small", "average"),
        ("evening", "average", "average", "average"),
        ("evening", "average", "big", "average"),
    ];
    let rules = table
        .iter()
        .map(|&(t, i, s, b)| Rule::new(time.is(t).and(intensity.is(i)).and(size.is(s)), bulb.term(b)));

    let system = ControlSystem::new(vars, rules)?;
    let mut sim = Simulation::new(&system);

    sim.set_inputs([("time", 5.), ("intensity", 5.), ("size", 13.5)])?;
    sim.compute()?;

    println!("bulb = {}", sim.output("bulb")?);

    for (x, degree) in sim.aggregated_set("bulb")? {
        if degree > 0. {
            println!("{x:>5} {degree:.3} {}", "#".repeat((degree * 40.).round() as usize));
        }
    }

    Ok(())
}
