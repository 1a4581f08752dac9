#![no_main]

use libfuzzer_sys::fuzz_target;

use datetime_format::DateTimeFormatter;

fuzz_target!(|data: (&str, &str)| {
    let (pattern, text) = data;
    if let Ok(formatter) = DateTimeFormatter::of_pattern(pattern) {
        let _ = formatter.parse(text);
    }
});
