#![no_main]

use arbitrary::Unstructured;
use curvesweep::{
    arbitrary::{another_curve_desc, curve_desc, float_in_range},
    intersect::crossings,
    CurveIdx, Curves,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(d0) = curve_desc(1e3, &mut u) else {
        return;
    };
    let Ok(d1) = another_curve_desc(1e3, &d0, &mut u) else {
        return;
    };
    let x = float_in_range(-1e3, 1e3, &mut u).unwrap_or(f64::NEG_INFINITY);

    let curves = Curves::from_descs([d0, d1]).unwrap();
    let (c0, c1) = (&curves[CurveIdx(0)], &curves[CurveIdx(1)]);
    let found = crossings(c0, c1, x);
    assert_eq!(found, crossings(c1, c0, x));
    for t in found {
        assert!(t > x);
        assert!(c0.domain_contains(t) && c1.domain_contains(t));
    }
});
