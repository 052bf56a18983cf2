#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(collection) = jetter::parser::parse_str(input) {
            let text = collection.to_scenario_text();
            let _ = jetter::parser::parse_str(&text);
        }
    }
});
