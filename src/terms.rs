//! Membership functions and the automatic term partition.

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::math::{interp, interp_one};
use crate::universe::Universe;

/// The shape of a fuzzy set over a universe.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Rises from 0 at `a` to 1 at `b`, falls back to 0 at `c`
    Triangular(f64, f64, f64),
    /// Rises from 0 at `a` to 1 at `b`, stays at 1 until `c`, falls to 0 at `d`
    Trapezoidal(f64, f64, f64, f64),
    /// Piecewise linear through `(x, degree)` coordinates sorted by `x`
    Points(Vec<(f64, f64)>),
}

impl Shape {
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Self::Triangular(a, b, c)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::Trapezoidal(a, b, c, d)
    }

    pub fn points(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::Points(coords.into_iter().collect())
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Self::Triangular(a, b, c) => check_breakpoints(&[*a, *b, *c]),
            Self::Trapezoidal(a, b, c, d) => check_breakpoints(&[*a, *b, *c, *d]),
            Self::Points(coords) => {
                if coords.is_empty() {
                    return Err("needs at least one coordinate".into());
                }
                if coords.iter().any(|(x, y)| !x.is_finite() || !(0. ..=1.).contains(y)) {
                    return Err("coordinates need finite x and a degree in [0, 1]".into());
                }
                if coords.windows(2).any(|w| w[0].0 > w[1].0) {
                    return Err("coordinates must be sorted by x".into());
                }
                Ok(())
            },
        }
    }

    /// Degree of membership of `x`, always within [0, 1].
    pub fn degree(&self, x: f64) -> f64 {
        let degree = match *self {
            Self::Triangular(a, b, c) => trapezoid(x, a, b, b, c),
            Self::Trapezoidal(a, b, c, d) => trapezoid(x, a, b, c, d),
            Self::Points(ref coords) => interp_one(x, coords),
        };

        degree.clamp(0., 1.)
    }
}

fn check_breakpoints(points: &[f64]) -> std::result::Result<(), String> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(format!("breakpoints {points:?} must be finite"));
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(format!("breakpoints {points:?} must be non-decreasing"));
    }
    Ok(())
}

// Shoulders (a == b or c == d) are 1 on the flat side, so a == b == x gives 1, not 0
fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if b <= x && x <= c {
        1.
    } else if a < x && x < b {
        (x - a) / (b - a)
    } else if c < x && x < d {
        (d - x) / (d - c)
    } else {
        0.
    }
}

/// A named fuzzy set: its shape plus the degrees sampled at every universe point.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipFunction {
    name: String,
    shape: Shape,
    samples: Vec<f64>,
}

impl MembershipFunction {
    pub(crate) fn new(variable: &str, name: &str, shape: Shape, universe: &Universe) -> Result<Self> {
        shape.validate().map_err(|reason| FuzzyError::InvalidShape {
            variable: variable.to_owned(),
            term: name.to_owned(),
            reason,
        })?;

        let samples = match shape {
            Shape::Points(ref coords) => interp(universe.samples().iter().copied(), coords),
            _ => universe.samples().iter().map(|&x| shape.degree(x)).collect(),
        };

        Ok(Self {
            name: name.to_owned(),
            shape,
            samples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Degrees at each universe sample, in universe order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn degree(&self, x: f64) -> f64 {
        self.shape.degree(x)
    }
}

/// Naming scheme for [`automf`] partitions.
#[derive(Clone, Debug, PartialEq)]
pub enum AutoNames {
    /// poor, average, good for 3 terms; mediocre and decent join at 5, dismal and excellent at 7
    Quality,
    /// lowest, lower, low, average, high, higher, highest
    Quantity,
    Custom(Vec<String>),
}

const QUALITY: [&str; 7] = ["dismal", "poor", "mediocre", "average", "decent", "good", "excellent"];
const QUANTITY: [&str; 7] = ["lowest", "lower", "low", "average", "high", "higher", "highest"];

impl AutoNames {
    fn resolve(&self, count: usize) -> Result<Vec<String>> {
        let ladder = match self {
            Self::Quality => {
                let names: &[&str] = match count {
                    3 => &["poor", "average", "good"],
                    5 => &["poor", "mediocre", "average", "decent", "good"],
                    7 => &QUALITY,
                    _ => return Err(builtin_count(count)),
                };
                return Ok(names.iter().map(|name| name.to_string()).collect());
            },
            Self::Quantity => &QUANTITY,
            Self::Custom(names) => {
                if names.len() != count {
                    return Err(FuzzyError::InvalidTermCount {
                        count,
                        reason: format!("{} custom names were given", names.len()),
                    });
                }
                return Ok(names.clone());
            },
        };

        if count % 2 == 0 || count > ladder.len() {
            return Err(builtin_count(count));
        }

        // Trim both ends so "average" stays in the middle
        let skip = (ladder.len() - count) / 2;
        Ok(ladder[skip..skip + count].iter().map(|name| name.to_string()).collect())
    }
}

fn builtin_count(count: usize) -> FuzzyError {
    FuzzyError::InvalidTermCount {
        count,
        reason: "built-in names need 3, 5 or 7 terms".into(),
    }
}

/// Splits a universe into `count` evenly spaced, overlapping terms.
///
/// Centers sit at `min + i * w` with `w = (max - min) / (count - 1)`. Interior
/// terms are `Triangular(c - w, c, c + w)`, the edge terms are shoulders
/// (`Trapezoidal(min, min, min, min + w)` and `Trapezoidal(max - w, max, max, max)`).
/// Neighbours cross at 0.5 and the degrees of all terms sum to 1 everywhere.
pub fn automf(universe: &Universe, count: usize, names: &AutoNames) -> Result<Vec<(String, Shape)>> {
    if count < 2 {
        return Err(FuzzyError::InvalidTermCount {
            count,
            reason: "a partition needs at least two terms".into(),
        });
    }

    let names = names.resolve(count)?;
    let (min, max) = (universe.min(), universe.max());
    let width = (max - min) / (count - 1) as f64;

    let shapes = Linspace::new(min, max, count).enumerate().map(|(i, center)| match i {
        0 => Shape::Trapezoidal(min, min, min, min + width),
        i if i == count - 1 => Shape::Trapezoidal(max - width, max, max, max),
        _ => Shape::Triangular(center - width, center, center + width),
    });

    Ok(names.into_iter().zip(shapes).collect())
}
