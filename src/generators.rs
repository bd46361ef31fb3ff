//! Utilities for generating examples, benchmarks, and test cases.

use crate::curve::CurveDesc;

/// The "evens" are `n` parallel lines going up to the right, and the "odds"
/// are `n` parallel lines going down to the right.
///
/// Every even line crosses every odd line, at `n * n` distinct points. All
/// the coefficients and crossings are small integers or half-integers, so
/// the crossings are computed exactly.
pub fn slanties(n: usize) -> Vec<CurveDesc> {
    let w = 20.0 * n as f64;
    let mut ret = Vec::with_capacity(2 * n);
    for i in 0..n {
        let off = 20.0 * i as f64;
        ret.push(CurveDesc::line(1.0, -off, 0.0, w));
        ret.push(CurveDesc::line(-1.0, off + 10.0, 0.0, w));
    }
    ret
}

/// A row of `n` identical parabolas, shifted horizontally by one unit each.
///
/// The `j`th and `k`th parabolas meet once, at `x = (j + k) / 2`, giving
/// `n * (n - 1) / 2` distinct crossings.
pub fn parabola_row(n: usize) -> Vec<CurveDesc> {
    let end = n as f64;
    (0..n)
        .map(|k| {
            let k = k as f64;
            // (x - k)^2
            CurveDesc::new(1.0, -2.0 * k, k * k, -1.0, end)
        })
        .collect()
}

/// A stack of `n` parabolas with different curvatures, each opening upwards
/// and sitting one unit above the previous one, plus `n` horizontal lines
/// cutting through them.
///
/// This has lots of curves coming and going. The lines are short, and each
/// one only spans a few parabolas.
pub fn bowls_and_bars(n: usize) -> Vec<CurveDesc> {
    let mut ret = Vec::with_capacity(2 * n);
    for k in 0..n {
        let k = k as f64;
        ret.push(CurveDesc::new(0.25 + 0.125 * k, 0.0, k, -8.0, 8.0));
        ret.push(CurveDesc::line(0.0, k + 1.5, -6.0 + 0.5 * k, 2.0 + 0.5 * k));
    }
    ret
}
