#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for call in jetter::variables::find_calls(input) {
            debug_assert!(call.start < call.end && call.end <= input.len());
        }
        let _ = jetter::fuzzing::evaluate_variable_input(input);
    }
});
