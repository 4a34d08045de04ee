use std::iter::Sum;

use num::Float;

use crate::math::interp_one;

/// And operator (t-norm) for combining the propositions of a rule premise.
/// Also used as the implication operator: `Min` clips a consequent, `Prod` scales it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
            Self::BoundedProd => ProductionLink::BoundedProd.apply(u, v),
            Self::DrasticProd => ProductionLink::DrasticProd.apply(u, v),
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Or operator (t-conorm) for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.apply(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.apply(u, v),
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for aggregating the implied consequents of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProductionLink {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzifying the aggregated membership function.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DefuzzificationOp {
    /// Center of gravity over the samples: `Σ x μ(x) / Σ μ(x)`
    #[default]
    Centroid,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Crisp value of `membership` over `universe`.
    ///
    /// Callers must make sure the membership has some non-zero degree; an empty
    /// set has no meaningful defuzzified value.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> F {
        debug_assert_eq!(universe.len(), membership.len());

        match self {
            Self::Centroid => {
                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(&x, &mu)| x * mu)
                    .sum::<F>();
                let den = membership.iter().copied().sum::<F>();

                num / den
            },
            Self::Boa => {
                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(x, mu)| (mu[0] + mu[1]) * (x[1] - x[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    if cum_area + area >= target {
                        // Linear within the trapezoid that crosses half the area
                        let coords = [(cum_area, universe[i]), (cum_area + area, universe[i + 1])];

                        return interp_one(target, &coords);
                    }
                    cum_area = cum_area + area;
                }

                universe.last().copied().unwrap_or_else(F::zero)
            },
            Self::Mom => {
                let (count, sum) = maxima(universe, membership).fold((F::zero(), F::zero()), |(count, sum), x| {
                    (count + F::one(), sum + x)
                });

                sum / count
            },
            Self::Lom => maxima(universe, membership).fold(F::neg_infinity(), F::max),
            Self::Som => maxima(universe, membership).fold(F::infinity(), F::min),
        }
    }
}

fn maxima<'a, F: Float>(universe: &'a [F], membership: &'a [F]) -> impl Iterator<Item = F> + 'a {
    let maximum = membership.iter().copied().fold(F::zero(), F::max);

    universe
        .iter()
        .copied()
        .zip(membership.iter().copied())
        .filter_map(move |(u, m)| if m == maximum { Some(u) } else { None })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn t_norms() {
        assert_eq!(AndOp::Min.apply(0.3, 0.6), 0.3);
        assert_relative_eq!(AndOp::Prod.apply(0.5, 0.6), 0.3);
        assert_relative_eq!(AndOp::BoundedProd.apply(0.5, 0.6), 0.1, epsilon = 1e-12);
        assert_eq!(AndOp::BoundedProd.apply(0.2, 0.3), 0.);
        assert_eq!(AndOp::DrasticProd.apply(1., 0.4), 0.4);
        assert_eq!(AndOp::DrasticProd.apply(0.4, 1.), 0.4);
        assert_eq!(AndOp::DrasticProd.apply(0.9, 0.4), 0.);
    }

    #[test]
    fn t_conorms() {
        assert_eq!(OrOp::Max.apply(0.3, 0.6), 0.6);
        assert_relative_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
        assert_eq!(OrOp::BoundedSum.apply(0.7, 0.6), 1.);
        assert_eq!(OrOp::DrasticSum.apply(0., 0.4), 0.4);
        assert_eq!(OrOp::DrasticSum.apply(0.2, 0.4), 1.);
    }

    #[test]
    fn clip_then_aggregate() {
        let poor = [1., 0.5, 0., 0.];
        let good = [0., 0., 0.5, 1.];
        let clipped_poor: Vec<f64> = AndOp::Min.call([0.8; 4], poor).collect();
        let clipped_good: Vec<f64> = AndOp::Min.call([0.25; 4], good).collect();
        let aggregated: Vec<f64> = ProductionLink::Max.call(clipped_poor, clipped_good).collect();

        assert_eq!(aggregated, vec![0.8, 0.5, 0.25, 0.25]);

        let either: Vec<f64> = OrOp::Max.call(poor, good).collect();
        let probable: Vec<f64> = OrOp::ProbOr.call(poor, good).collect();

        assert_eq!(either, vec![1., 0.5, 0.5, 1.]);
        assert_eq!(probable, vec![1., 0.5, 0.5, 1.]);
    }

    #[test]
    fn centroid_of_symmetric_triangle() {
        let universe: Vec<f64> = (0..=10).map(f64::from).collect();
        let membership = [0., 0., 0., 0., 0., 0.5, 1., 0.5, 0., 0., 0.];

        assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 6.);
        assert_eq!(DefuzzificationOp::Boa.call(&universe, &membership), 6.);
        assert_eq!(DefuzzificationOp::Mom.call(&universe, &membership), 6.);
    }

    #[test]
    fn plateau_maxima() {
        let universe = [0., 1., 2., 3., 4.];
        let membership = [0.2, 0.6, 0.6, 0.6, 0.];

        assert_eq!(DefuzzificationOp::Som.call(&universe, &membership), 1.);
        assert_eq!(DefuzzificationOp::Lom.call(&universe, &membership), 3.);
        assert_eq!(DefuzzificationOp::Mom.call(&universe, &membership), 2.);
    }

    #[test]
    fn bisector_splits_area() {
        let universe = [0., 1., 2., 3., 4.];
        let membership = [1., 1., 1., 1., 1.];

        assert_relative_eq!(DefuzzificationOp::Boa.call(&universe, &membership), 2.);
        assert_relative_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 2.);
    }
}
