//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::curve::CurveDesc;

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a float in some range, but give it a chance to be close to another float.
fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        Ok((orig * scale).clamp(start, end))
    } else {
        float_in_range(start, end, u)
    }
}

/// Generate a small "nice" number, which is more likely to produce exact
/// coincidences than a uniformly random float.
fn small_integer(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    Ok(f64::from(u.int_in_range(-4i8..=4)?))
}

/// Generate an arbitrary curve description, with coefficients of roughly the
/// scale `size` and a domain inside `-size..=size`.
pub fn curve_desc(size: f64, u: &mut Unstructured<'_>) -> Result<CurveDesc, arbitrary::Error> {
    let nice: bool = u.arbitrary()?;
    let linear: bool = u.arbitrary()?;
    let (a, b, c) = if nice {
        (
            if linear { 0.0 } else { small_integer(u)? },
            small_integer(u)?,
            small_integer(u)?,
        )
    } else {
        (
            if linear {
                0.0
            } else {
                float_in_range(-size, size, u)?
            },
            float_in_range(-size, size, u)?,
            float_in_range(-size, size, u)?,
        )
    };

    let t1 = float_in_range(-size, size, u)?;
    let t2 = float_in_range(-size, size, u)?;
    let (t1, t2) = if t1 < t2 {
        (t1, t2)
    } else if t2 < t1 {
        (t2, t1)
    } else {
        (t1, t1 + 1.0)
    };
    Ok(CurveDesc::new(a, b, c, t1, t2))
}

/// Generate a curve description that has a chance to share an endpoint or
/// a coefficient with `first`.
pub fn another_curve_desc(
    size: f64,
    first: &CurveDesc,
    u: &mut Unstructured<'_>,
) -> Result<CurveDesc, arbitrary::Error> {
    let mut ret = curve_desc(size, u)?;
    if u.arbitrary()? {
        ret.t1 = first.t1;
        ret.t2 = ret.t2.max(first.t1 + 1.0);
    }
    if u.arbitrary()? {
        ret.b = another_float_in_range(first.b, -size, size, u)?;
    }
    if u.arbitrary()? {
        ret.c = first.c;
    }
    Ok(ret)
}

/// Generate a collection of curve descriptions, all valid.
pub fn curve_descs(u: &mut Unstructured<'_>) -> Result<Vec<CurveDesc>, arbitrary::Error> {
    let size = 8.0;
    let len = u.int_in_range(0..=12)?;
    let mut ret: Vec<CurveDesc> = Vec::with_capacity(len);
    for _ in 0..len {
        let desc = match ret.last() {
            Some(prev) if u.arbitrary()? => another_curve_desc(size, prev, u)?,
            _ => curve_desc(size, u)?,
        };
        ret.push(desc);
    }
    Ok(ret)
}
