use num::Float;

/// Similar to numpy.interp: piecewise-linear through `coords` (sorted by x),
/// flat beyond the first and last coordinate.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases; NaN lands on the first coordinate
    if !(x > x_first) {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    // First coordinate strictly right of x; both neighbours exist thanks to the base cases
    let i = coords.partition_point(|&(xp, _)| xp <= x);
    let (x1, y1) = coords[i - 1];
    let (x2, y2) = coords[i];

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_degenerate() {
    assert_eq!(interp_one(4., &[]), 0.);
    assert_eq!(interp_one(4., &[(1., 0.25)]), 0.25);
    // Vertical step takes the right-hand value
    assert_eq!(interp_one(1., &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 1.);
}
