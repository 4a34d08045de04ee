/// `n` evenly spaced points from `start` to `end` inclusive, like numpy.linspace.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(start: f64, end: f64, n: usize) -> Self {
        let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0. };

        Linspace {
            start,
            end,
            step,
            index: 0,
            len: n,
        }
    }

    /// Points `step` apart from `start`, stopping at the last one not past `end`.
    pub fn stepped(start: f64, end: f64, step: f64) -> Self {
        // floor is closest approx to what numpy does for int() conversion; the epsilon
        // keeps 1.0 / 0.1 from landing on 9.999999999999998
        let steps = ((end - start) / step + 1e-9).floor() as usize;
        let last = start + step * steps as f64;

        // Snap onto `end` when the step divides the range up to rounding
        let last = if (last - end).abs() <= 1e-9 * (end - start).abs().max(1.) { end } else { last };

        Self::new(start, last, steps + 1)
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        // Multiply rather than accumulate so error does not build up along the way
        let value = if self.index + 1 == self.len && self.len > 1 {
            self.end
        } else {
            self.start + self.step * self.index as f64
        };
        self.index += 1;

        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}
