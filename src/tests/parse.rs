//! Parsing tests, covering the two-phase parse and its edge cases.

use crate::date::{IsoDate, IsoTime};
use crate::field::Field;
use crate::format::{DateTimeFormatter, FormatterBuilder, ParsePosition, Parsed};
use crate::style::SignStyle;
use crate::zone::{ZoneId, ZoneOffset};
use crate::Error;

fn parse_pattern(pattern: &str, text: &str) -> Result<Parsed, Error> {
    DateTimeFormatter::of_pattern(pattern).unwrap().parse(text)
}

fn error_index(result: Result<Parsed, Error>) -> usize {
    match result {
        Err(Error::Parse(err)) => err.error_index(),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_iso_date_pattern() {
    let parsed = parse_pattern("uuuu-MM-dd", "2012-07-27").unwrap();
    assert_eq!(parsed.get(Field::Year), Some(2012));
    assert_eq!(parsed.get(Field::MonthOfYear), Some(7));
    assert_eq!(parsed.get(Field::DayOfMonth), Some(27));
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2012, 7, 27).unwrap()));
    assert_eq!(parsed.to_offset(), None);
    assert_eq!(parsed.to_zone(), None);
}

#[test]
fn test_parse_date_time_with_fraction() {
    let parsed = parse_pattern("uuuu-MM-dd'T'HH:mm:ss.SSS", "2008-06-30T11:05:30.512").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 30).unwrap()));
    assert_eq!(
        parsed.to_time(),
        Some(IsoTime::new(11, 5, 30, 512_000_000).unwrap())
    );
}

#[test]
fn test_parse_error_position_and_text() {
    let result = parse_pattern("'ONE'uuuu MM dd", "ONE2012 07 XX");
    match result {
        Err(Error::Parse(err)) => {
            assert_eq!(err.error_index(), 11);
            assert_eq!(err.parsed_string(), "ONE2012 07 XX");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_unparsed_text_is_an_error() {
    let result = parse_pattern("uuuu", "2012-07");
    assert_eq!(error_index(result), 4);
}

#[test]
fn test_parse_best() {
    #[derive(Debug, PartialEq)]
    enum DateOrYearMonth {
        Date(IsoDate),
        YearMonth(i32, u8),
    }

    let formatter = DateTimeFormatter::of_pattern("uuuu-MM[-dd]").unwrap();
    let to_date = |parsed: &Parsed| parsed.to_date().map(DateOrYearMonth::Date);
    let to_year_month = |parsed: &Parsed| {
        match (parsed.get(Field::Year), parsed.get(Field::MonthOfYear)) {
            (Some(year), Some(month)) => Some(DateOrYearMonth::YearMonth(year as i32, month as u8)),
            _ => None,
        }
    };
    let queries: [&dyn Fn(&Parsed) -> Option<DateOrYearMonth>; 2] = [&to_date, &to_year_month];

    assert_eq!(
        formatter.parse_best("2011-06-30", &queries).unwrap(),
        DateOrYearMonth::Date(IsoDate::new(2011, 6, 30).unwrap())
    );
    assert_eq!(
        formatter.parse_best("2011-06", &queries).unwrap(),
        DateOrYearMonth::YearMonth(2011, 6)
    );
    assert!(matches!(
        formatter.parse_best("2011-06", &queries[..1]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_adjacent_values() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_with(Field::Year, 1, 19, SignStyle::Normal)
        .unwrap()
        .append_value_fixed(Field::MinuteOfHour, 2)
        .unwrap();
    let formatter = builder.to_formatter();

    // the trailing two digits belong to the fixed-width element
    let mut position = ParsePosition::default();
    let parsed = formatter.parse_unresolved("12345", &mut position).unwrap();
    assert_eq!(parsed.get(Field::Year), Some(123));
    assert_eq!(parsed.get(Field::MinuteOfHour), Some(45));
    assert_eq!(position.index, 5);

    let mut position = ParsePosition::default();
    let parsed = formatter.parse_unresolved("2012034", &mut position).unwrap();
    assert_eq!(parsed.get(Field::Year), Some(20_120));
    assert_eq!(parsed.get(Field::MinuteOfHour), Some(34));

    // too few digits for both elements; the fixed element fails after the
    // variable one gave up all but one digit
    let mut position = ParsePosition::default();
    assert!(formatter.parse_unresolved("12", &mut position).is_err());
    assert_eq!(position.error_index, Some(1));
}

#[test]
fn test_parse_reduced_year() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_reduced(Field::Year, 2, 4, 2000)
        .unwrap();
    let formatter = builder.to_formatter();

    let parse = |text: &str| {
        let mut position = ParsePosition::default();
        formatter
            .parse_unresolved(text, &mut position)
            .ok()
            .map(|parsed| parsed.get(Field::Year).unwrap())
    };

    assert_eq!(parse("00"), Some(2000));
    assert_eq!(parse("12"), Some(2012));
    assert_eq!(parse("99"), Some(2099));
    // longer runs are literal values
    assert_eq!(parse("1999"), Some(1999));
    assert_eq!(parse("2112"), Some(2112));
}

#[test]
fn test_parse_reduced_year_base_1980() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_reduced(Field::Year, 2, 2, 1980)
        .unwrap();
    let formatter = builder.to_formatter();

    let parse = |text: &str| {
        let mut position = ParsePosition::default();
        formatter
            .parse_unresolved(text, &mut position)
            .ok()
            .map(|parsed| parsed.get(Field::Year).unwrap())
    };

    assert_eq!(parse("00"), Some(2000));
    assert_eq!(parse("79"), Some(2079));
    assert_eq!(parse("80"), Some(1980));
    assert_eq!(parse("99"), Some(1999));
}

#[test]
fn test_parse_fraction_boundaries() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_fraction(Field::NanoOfSecond, 0, 9, true)
        .unwrap();
    let formatter = builder.to_formatter();

    // empty input: the field is absent but parsing succeeds
    let mut position = ParsePosition::default();
    let parsed = formatter.parse_unresolved("", &mut position).unwrap();
    assert_eq!(parsed.get(Field::NanoOfSecond), None);

    // a bare separator is an error
    let mut position = ParsePosition::default();
    assert!(formatter.parse_unresolved(".", &mut position).is_err());

    let mut position = ParsePosition::default();
    let parsed = formatter.parse_unresolved(".5", &mut position).unwrap();
    assert_eq!(parsed.get(Field::NanoOfSecond), Some(500_000_000));
    assert_eq!(position.index, 2);
}

#[test]
fn test_parse_optional_rollback() {
    let formatter = DateTimeFormatter::of_pattern("HH[:mm]").unwrap();
    let mut position = ParsePosition::default();
    let parsed = formatter.parse_unresolved("11:xx", &mut position).unwrap();
    // the optional section failed after ':' and was rolled back
    assert_eq!(position.index, 2);
    assert_eq!(parsed.get(Field::HourOfDay), Some(11));
    assert_eq!(parsed.get(Field::MinuteOfHour), None);
}

#[test]
fn test_parse_conflicting_fields() {
    let formatter = DateTimeFormatter::of_pattern("HH HH").unwrap();
    let mut position = ParsePosition::default();
    assert!(formatter.parse_unresolved("11 12", &mut position).is_err());
    // the error is reported at the second occurrence
    assert_eq!(position.error_index, Some(3));

    let mut position = ParsePosition::default();
    assert!(formatter.parse_unresolved("11 11", &mut position).is_ok());
}

#[test]
fn test_parse_case_sensitivity() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_literal('T')
        .append_value_fixed(Field::HourOfDay, 2)
        .unwrap();
    let formatter = builder.to_formatter();
    assert!(formatter.parse("t11").is_err());

    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_literal('T')
        .append_value_fixed(Field::HourOfDay, 2)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(
        formatter.parse("t11").unwrap().get(Field::HourOfDay),
        Some(11)
    );
}

#[test]
fn test_parse_strict_and_lenient_widths() {
    let formatter = DateTimeFormatter::of_pattern("HH").unwrap();
    // strict fixed width rejects a single digit
    assert!(formatter.parse("1").is_err());

    let mut builder = FormatterBuilder::new();
    builder
        .parse_lenient()
        .append_value_fixed(Field::HourOfDay, 2)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.parse("1").unwrap().get(Field::HourOfDay), Some(1));
}

#[test]
fn test_parse_defaulting() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_fixed(Field::HourOfDay, 2)
        .unwrap()
        .parse_defaulting(Field::MinuteOfHour, 0);
    let formatter = builder.to_formatter();
    let parsed = formatter.parse("11").unwrap();
    assert_eq!(parsed.to_time(), Some(IsoTime::new(11, 0, 0, 0).unwrap()));
}

#[test]
fn test_parse_text() {
    let parsed = parse_pattern("MMMM uuuu", "July 2012").unwrap();
    assert_eq!(parsed.get(Field::MonthOfYear), Some(7));

    // strict parsing requires the requested style
    assert!(parse_pattern("MMMM uuuu", "Jul 2012").is_err());

    // lenient parsing accepts any style
    let mut builder = FormatterBuilder::new();
    builder.parse_lenient();
    builder.append_pattern("MMMM uuuu").unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(
        formatter.parse("Jul 2012").unwrap().get(Field::MonthOfYear),
        Some(7)
    );
}

#[test]
fn test_parse_offsets() {
    let parsed = parse_pattern("HH:mmXXX", "11:05+01:30").unwrap();
    assert_eq!(parsed.get(Field::OffsetSeconds), Some(5400));
    assert_eq!(
        parsed.to_offset(),
        Some(ZoneOffset::of_total_seconds(5400).unwrap())
    );

    let parsed = parse_pattern("HH:mmXXX", "11:05Z").unwrap();
    assert_eq!(parsed.get(Field::OffsetSeconds), Some(0));

    let result = parse_pattern("HH:mmXXX", "11:05+01");
    assert_eq!(error_index(result), 5);

    let parsed = parse_pattern("HH:mmX", "11:05+0130").unwrap();
    assert_eq!(parsed.get(Field::OffsetSeconds), Some(5400));

    let parsed = parse_pattern("HH:mmO", "11:05GMT+8").unwrap();
    assert_eq!(parsed.get(Field::OffsetSeconds), Some(8 * 3600));

    let parsed = parse_pattern("HH:mmOOOO", "11:05GMT+08:00").unwrap();
    assert_eq!(parsed.get(Field::OffsetSeconds), Some(8 * 3600));
}

#[test]
fn test_parse_zone_ids() {
    let formatter = DateTimeFormatter::of_pattern("VV").unwrap();

    let parsed = formatter.parse("Europe/Paris").unwrap();
    assert_eq!(parsed.to_zone(), Some(ZoneId::region("Europe/Paris")));

    let parsed = formatter.parse("Z").unwrap();
    assert_eq!(parsed.to_zone(), Some(ZoneId::Offset(ZoneOffset::UTC)));

    let parsed = formatter.parse("+01:30").unwrap();
    assert_eq!(
        parsed.to_zone(),
        Some(ZoneId::Offset(ZoneOffset::of_total_seconds(5400).unwrap()))
    );

    let parsed = formatter.parse("UTC").unwrap();
    assert_eq!(parsed.to_zone().unwrap().id(), "UTC");

    let parsed = formatter.parse("GMT+02:00").unwrap();
    assert_eq!(parsed.to_zone().unwrap().id(), "GMT+02:00");

    let parsed = formatter.parse("UT+01:00").unwrap();
    assert_eq!(parsed.to_zone().unwrap().id(), "UT+01:00");

    assert!(formatter.parse("Nowhere/Special").is_err());
}

#[test]
fn test_parse_longest_zone_prefix_wins() {
    // Europe/Paris must not shadow a longer id sharing its prefix
    let formatter = DateTimeFormatter::of_pattern("VV").unwrap();
    let parsed = formatter.parse("Europe/Prague").unwrap();
    assert_eq!(parsed.to_zone(), Some(ZoneId::region("Europe/Prague")));
}

#[test]
fn test_parse_instant() {
    let formatter = DateTimeFormatter::iso_instant();

    let parsed = formatter.parse("2008-06-30T11:05:30Z").unwrap();
    let expected = IsoDate::new(2008, 6, 30).unwrap().to_epoch_day() * 86_400
        + (11 * 3600 + 5 * 60 + 30);
    assert_eq!(parsed.get(Field::InstantSeconds), Some(expected));
    assert_eq!(parsed.get(Field::NanoOfSecond), Some(0));

    let parsed = formatter.parse("2008-06-30T11:05:30.123456789Z").unwrap();
    assert_eq!(parsed.get(Field::NanoOfSecond), Some(123_456_789));

    // end-of-day rolls over to the next day
    let parsed = formatter.parse("2012-12-31T24:00:00Z").unwrap();
    let expected = IsoDate::new(2013, 1, 1).unwrap().to_epoch_day() * 86_400;
    assert_eq!(parsed.get(Field::InstantSeconds), Some(expected));

    // a leap second is recorded and parsed as the previous second
    let parsed = formatter.parse("1972-12-31T23:59:60Z").unwrap();
    assert!(parsed.leap_second());
    let expected = IsoDate::new(1972, 12, 31).unwrap().to_epoch_day() * 86_400
        + (23 * 3600 + 59 * 60 + 59);
    assert_eq!(parsed.get(Field::InstantSeconds), Some(expected));

    // case-insensitive separators
    let parsed = formatter.parse("2008-06-30t11:05:30z").unwrap();
    assert_eq!(parsed.get(Field::NanoOfSecond), Some(0));
}

#[test]
fn test_parse_instant_far_years() {
    let formatter = DateTimeFormatter::iso_instant();
    let parsed = formatter.parse("+20008-06-30T11:05:30Z").unwrap();
    let instant = parsed.get(Field::InstantSeconds).unwrap();
    let printed = formatter.format(&parsed).unwrap();
    assert_eq!(printed, "+20008-06-30T11:05:30Z");
    assert!(instant > 0);
}

#[test]
fn test_parse_resolver_strictness() {
    // 2011 was not a leap year
    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
    let strict = formatter.with_resolver_style(crate::style::ResolverStyle::Strict);
    assert!(strict.parse("2011-02-29").is_err());
    // smart resolution clamps to the end of the month
    let parsed = formatter.parse("2011-02-29").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2011, 2, 28).unwrap()));
}

#[test]
fn test_parse_resolver_wraps_error_with_text() {
    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd")
        .unwrap()
        .with_resolver_style(crate::style::ResolverStyle::Strict);
    match formatter.parse("2011-02-29") {
        Err(Error::Parse(err)) => {
            assert_eq!(err.parsed_string(), "2011-02-29");
            assert_eq!(err.error_index(), 0);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_unresolved_position() {
    let formatter = DateTimeFormatter::of_pattern("uuuu").unwrap();
    let mut position = ParsePosition::new(5);
    let parsed = formatter.parse_unresolved("date=2012-07", &mut position).unwrap();
    assert_eq!(parsed.get(Field::Year), Some(2012));
    assert_eq!(position.index, 9);

    // positions outside the text are rejected
    let mut position = ParsePosition::new(99);
    assert!(matches!(
        formatter.parse_unresolved("2012", &mut position),
        Err(Error::OutOfRange)
    ));
}

#[test]
fn test_parse_negative_zero_rejected_in_strict() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_with(Field::Year, 1, 19, SignStyle::Normal)
        .unwrap();
    let formatter = builder.to_formatter();
    assert!(formatter.parse("-0").is_err());

    let mut builder = FormatterBuilder::new();
    builder
        .parse_lenient()
        .append_value_with(Field::Year, 1, 19, SignStyle::Normal)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.parse("-0").unwrap().get(Field::Year), Some(0));
}
