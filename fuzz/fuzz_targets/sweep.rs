#![no_main]

use arbitrary::Unstructured;
use curvesweep::{arbitrary::curve_descs, Sweeper};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(descs) = curve_descs(&mut u) else {
        return;
    };

    let mut sweeper = Sweeper::from_descs(descs).unwrap();
    sweeper.check_invariants();
    while sweeper.step().is_ok() {
        sweeper.check_invariants();
    }
    assert!(sweeper.active().is_empty());
});
