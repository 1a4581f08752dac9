//! Property tests for the parse/print invariants.

use quickcheck_macros::quickcheck;

use crate::date::IsoDate;
use crate::field::Field;
use crate::format::{DateTimeFormatter, FormatterBuilder, ParsePosition};
use crate::format::Parsed;
use crate::style::SignStyle;
use crate::tests::MockTemporal;

/// Build a formatter around a single offset element.
fn offset_formatter(pattern: &str) -> DateTimeFormatter {
    let mut builder = FormatterBuilder::new();
    builder.append_offset(pattern, "Z").unwrap();
    builder.to_formatter()
}

/// Snap an offset to the resolution a pattern can represent.
fn representable(pattern: &str, offset: i32) -> i32 {
    if pattern.contains("ss") || pattern.contains("SS") {
        offset
    } else if pattern.len() > 3 {
        offset / 60 * 60
    } else {
        offset / 3600 * 3600
    }
}

#[quickcheck]
fn prop_offset_id_symmetry(seed: i32) -> bool {
    let offset = seed.rem_euclid(2 * 64_800 + 1) - 64_800;
    crate::format::OFFSET_PATTERNS.iter().all(|pattern| {
        let snapped = representable(pattern, offset);
        let formatter = offset_formatter(pattern);
        let temporal = MockTemporal::default().with_offset(snapped);
        let text = formatter.format(&temporal).unwrap();
        let mut position = ParsePosition::default();
        let parsed: Parsed = formatter
            .parse_unresolved(&text, &mut position)
            .unwrap_or_else(|err| panic!("offset {snapped} failed to re-parse from {text:?}: {err}"));
        parsed.get(Field::OffsetSeconds) == Some(i64::from(snapped))
    })
}

#[quickcheck]
fn prop_adjacent_value_assigns_trailing_digits(year: u32, minute: u8) -> bool {
    let year = i64::from(year % 1_000_000) + 1;
    let minute = i64::from(minute % 60);

    let mut builder = FormatterBuilder::new();
    builder
        .append_value_with(Field::Year, 1, 19, SignStyle::Normal)
        .unwrap()
        .append_value_fixed(Field::MinuteOfHour, 2)
        .unwrap();
    let formatter = builder.to_formatter();

    let text = alloc::format!("{year}{minute:02}");
    let mut position = ParsePosition::default();
    let Ok(parsed) = formatter.parse_unresolved(&text, &mut position) else {
        return false;
    };
    position.index == text.len()
        && parsed.get(Field::Year) == Some(year)
        && parsed.get(Field::MinuteOfHour) == Some(minute)
}

#[quickcheck]
fn prop_reduced_two_digit_year_in_window(value: u8) -> bool {
    let value = u32::from(value) % 100;
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_reduced(Field::Year, 2, 4, 2000)
        .unwrap();
    let formatter = builder.to_formatter();

    let text = alloc::format!("{value:02}");
    let mut position = ParsePosition::default();
    let Ok(parsed) = formatter.parse_unresolved(&text, &mut position) else {
        return false;
    };
    let year = parsed.get(Field::Year).unwrap();
    (2000..=2099).contains(&year) && year % 100 == i64::from(value)
}

#[quickcheck]
fn prop_reduced_four_digit_year_is_literal(seed: u16) -> bool {
    let value = u32::from(seed) % 9_000 + 1_000;
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_reduced(Field::Year, 2, 4, 2000)
        .unwrap();
    let formatter = builder.to_formatter();

    let text = alloc::format!("{value}");
    let mut position = ParsePosition::default();
    let Ok(parsed) = formatter.parse_unresolved(&text, &mut position) else {
        return false;
    };
    parsed.get(Field::Year) == Some(i64::from(value))
}

#[quickcheck]
fn prop_iso_local_date_round_trip(seed: i32) -> bool {
    // cover roughly 1600..=2400
    let epoch_day = i64::from(seed) % 150_000;
    let date = IsoDate::from_epoch_day(epoch_day).unwrap();
    let temporal = MockTemporal {
        date: Some(date),
        ..MockTemporal::default()
    };
    let formatter = DateTimeFormatter::iso_local_date();
    let text = formatter.format(&temporal).unwrap();
    match formatter.parse(&text) {
        Ok(parsed) => parsed.to_date() == Some(date),
        Err(_) => false,
    }
}

#[quickcheck]
fn prop_iso_local_time_round_trip(nano_of_day: u64) -> bool {
    let nano_of_day = (nano_of_day % 86_400_000_000_000) as i64;
    let time = crate::date::IsoTime::of_nano_of_day(nano_of_day).unwrap();
    let temporal = MockTemporal {
        time: Some(time),
        ..MockTemporal::default()
    };
    let formatter = DateTimeFormatter::iso_local_time();
    let text = formatter.format(&temporal).unwrap();
    match formatter.parse(&text) {
        Ok(parsed) => parsed.to_time() == Some(time),
        Err(_) => false,
    }
}
