#![no_main]

use libfuzzer_sys::fuzz_target;

use datetime_format::DateTimeFormatter;

fuzz_target!(|text: &str| {
    let _ = DateTimeFormatter::iso_zoned_date_time().parse(text);
    let _ = DateTimeFormatter::iso_instant().parse(text);
    let _ = DateTimeFormatter::iso_week_date().parse(text);
    let _ = DateTimeFormatter::rfc_1123_date_time().parse(text);
});
