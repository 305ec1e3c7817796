// ---------------------------------------------------------------------------
// Tick steps
// ---------------------------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Step between roughly `count` ticks over `[start, stop]`, always
/// 1, 2 or 5 × 10^k.
///
/// Positive results are the step itself. Negative results are the negated
/// inverse of a fractional step (`-10.0` means `0.1`), which keeps tick
/// values exact when multiplied out.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Evenly spaced "round" values within `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let inc = tick_increment(lo, hi, count);
    if inc == 0.0 {
        return if lo == hi && lo.is_finite() { vec![lo] } else { Vec::new() };
    }

    let mut out = Vec::new();
    if inc > 0.0 {
        let i0 = (lo / inc).ceil() as i64;
        let i1 = (hi / inc).floor() as i64;
        for i in i0..=i1 {
            out.push(i as f64 * inc);
        }
    } else {
        let inv = -inc;
        let i0 = (lo * inv).ceil() as i64;
        let i1 = (hi * inv).floor() as i64;
        for i in i0..=i1 {
            out.push(i as f64 / inv);
        }
    }
    if start > stop {
        out.reverse();
    }
    out
}

// ---------------------------------------------------------------------------
// Linear scale
// ---------------------------------------------------------------------------

/// Continuous mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A degenerate domain maps
    /// everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Extend the domain outward so both ends land on tick values.
    pub fn nice(mut self, count: usize) -> Self {
        let [mut start, mut stop] = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        self.domain = if reversed { [stop, start] } else { [start, stop] };
        self
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count)
    }
}

// ---------------------------------------------------------------------------
// Ordinal scales
// ---------------------------------------------------------------------------

/// Splits a range into `n` equal bands separated by padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    n: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Band scale with equal inner and outer padding, centred.
    pub fn new(n: usize, range: [f64; 2], padding: f64) -> Self {
        Self::with_padding(n, range, padding, padding)
    }

    pub fn with_padding(n: usize, range: [f64; 2], inner: f64, outer: f64) -> Self {
        let [r0, r1] = range;
        let count = n as f64;
        let step = (r1 - r0) / (count - inner + 2.0 * outer).max(1.0);
        let start = r0 + (r1 - r0 - step * (count - inner)) * 0.5;
        Self {
            n,
            start,
            step,
            bandwidth: step * (1.0 - inner),
        }
    }

    /// Left edge of band `index`, or `None` past the end.
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.n).then(|| self.start + self.step * index as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Places `n` points evenly across a range, first and last at the ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale(BandScale);

impl PointScale {
    pub fn new(n: usize, range: [f64; 2]) -> Self {
        Self(BandScale::with_padding(n, range, 1.0, 0.0))
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.0.position(index)
    }
}

// ---------------------------------------------------------------------------
// Square-root scale
// ---------------------------------------------------------------------------

/// Linear interpolation over square-rooted domain values; used for bubble
/// radii so area tracks the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale(LinearScale);

impl SqrtScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self(LinearScale::new([signed_sqrt(domain[0]), signed_sqrt(domain[1])], range))
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.0.apply(signed_sqrt(value))
    }
}

fn signed_sqrt(v: f64) -> f64 {
    if v < 0.0 {
        -(-v).sqrt()
    } else {
        v.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_maps_inverted_range() {
        let y = LinearScale::new([0.0, 100.0], [400.0, 0.0]);
        assert!(approx(y.apply(0.0), 400.0));
        assert!(approx(y.apply(25.0), 300.0));
        assert!(approx(y.apply(100.0), 0.0));
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new([5.0, 5.0], [0.0, 10.0]);
        assert!(approx(s.apply(5.0), 5.0));
    }

    #[test]
    fn nice_rounds_domain_outward() {
        assert_eq!(LinearScale::new([0.0, 87.0], [0.0, 1.0]).nice(10).domain, [0.0, 90.0]);
        assert_eq!(
            LinearScale::new([0.0, 103_436_829.0], [0.0, 1.0]).nice(10).domain,
            [0.0, 110_000_000.0]
        );
        assert_eq!(LinearScale::new([0.3, 9.7], [0.0, 1.0]).nice(10).domain, [0.0, 10.0]);
    }

    #[test]
    fn ticks_use_one_two_five_steps() {
        assert_eq!(ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 90.0, 10), (0..=9).map(|i| f64::from(i) * 10.0).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(0.0, 250.0, 5), vec![0.0, 50.0, 100.0, 150.0, 200.0, 250.0]);
    }

    #[test]
    fn ticks_on_empty_span() {
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(ticks(f64::NAN, 1.0, 10).is_empty());
    }

    #[test]
    fn band_scale_matches_padding_layout() {
        // 10 bands over 710px with 0.2 padding: step = 710 / 10.2
        let x = BandScale::new(10, [0.0, 710.0], 0.2);
        let step = 710.0 / 10.2;
        assert!(approx(x.bandwidth(), step * 0.8));
        assert!(approx(x.position(0).unwrap(), step * 0.2));
        assert!(approx(x.position(9).unwrap(), step * 9.2));
        assert_eq!(x.position(10), None);
    }

    #[test]
    fn point_scale_spans_full_range() {
        let x = PointScale::new(5, [0.0, 100.0]);
        assert!(approx(x.position(0).unwrap(), 0.0));
        assert!(approx(x.position(2).unwrap(), 50.0));
        assert!(approx(x.position(4).unwrap(), 100.0));

        let single = PointScale::new(1, [0.0, 100.0]);
        assert!(approx(single.position(0).unwrap(), 50.0));
    }

    #[test]
    fn sqrt_scale_interpolates_roots() {
        let r = SqrtScale::new([0.0, 100.0], [5.0, 40.0]);
        assert!(approx(r.apply(0.0), 5.0));
        assert!(approx(r.apply(25.0), 22.5));
        assert!(approx(r.apply(100.0), 40.0));
    }
}
