#![no_main]

use libfuzzer_sys::fuzz_target;

// Scripts can be malformed, but they shouldn't cause panics.
fuzz_target!(|text: &str| {
    let _ = curvesweep::driver::run_script(text, std::io::sink());
});
