//! Printing tests.

use crate::decimal::DecimalStyle;
use crate::field::Field;
use crate::format::{DateTimeFormatter, FormatterBuilder};
use crate::style::{SignStyle, TextStyle};
use crate::tests::MockTemporal;
use crate::Error;

fn check_pattern(temporal: &MockTemporal, pattern: &str, expected: &str) {
    let formatter = DateTimeFormatter::of_pattern(pattern).unwrap();
    assert_eq!(formatter.format(temporal).unwrap(), expected, "pattern {pattern}");
}

#[test]
fn test_format_date_patterns() {
    let temporal = MockTemporal::date(2012, 7, 27);

    check_pattern(&temporal, "uuuu-MM-dd", "2012-07-27");
    check_pattern(&temporal, "u/M/d", "2012/7/27");
    check_pattern(&temporal, "uu", "12");
    check_pattern(&temporal, "yyyy", "2012");
    check_pattern(&temporal, "G uuuu", "AD 2012");
    check_pattern(&temporal, "GGGG", "Anno Domini");
    check_pattern(&temporal, "MMM", "Jul");
    check_pattern(&temporal, "MMMM", "July");
    check_pattern(&temporal, "MMMMM", "J");
    check_pattern(&temporal, "LLL", "Jul");
    check_pattern(&temporal, "E", "Fri");
    check_pattern(&temporal, "EEEE", "Friday");
    check_pattern(&temporal, "e", "5");
    check_pattern(&temporal, "DDD", "209");
    check_pattern(&temporal, "QQQ", "Q3");
    check_pattern(&temporal, "QQQQ", "3rd quarter");
    check_pattern(&temporal, "Q", "3");
    check_pattern(&temporal, "YYYY-'W'ww-e", "2012-W30-5");
    check_pattern(&temporal, "YY", "12");
}

#[test]
fn test_format_time_patterns() {
    let temporal = MockTemporal::time(13, 5, 30, 512_000_000);

    check_pattern(&temporal, "HH:mm:ss", "13:05:30");
    check_pattern(&temporal, "H:m:s", "13:5:30");
    check_pattern(&temporal, "hh:mm a", "01:05 PM");
    check_pattern(&temporal, "KK:mm", "01:05");
    check_pattern(&temporal, "kk", "13");
    check_pattern(&temporal, "HH:mm:ss.SSS", "13:05:30.512");
    check_pattern(&temporal, "HH:mm:ss.SSSSSSSSS", "13:05:30.512000000");
    check_pattern(&temporal, "A", "47130512");
    check_pattern(&temporal, "n", "512000000");
}

#[test]
fn test_format_negative_year() {
    let temporal = MockTemporal::date(-94, 1, 2);

    check_pattern(&temporal, "uuuu-MM-dd", "-0094-01-02");
    check_pattern(&temporal, "u", "-94");
    // year-of-era inverts the sign for early eras
    check_pattern(&temporal, "y G", "95 BC");
}

#[test]
fn test_format_exceeds_pad_sign() {
    let temporal = MockTemporal::date(12345, 6, 7);
    check_pattern(&temporal, "uuuu-MM-dd", "+12345-06-07");
}

#[test]
fn test_format_offsets() {
    let offsets = [0, 3600, -18_000, 3600 + 1800, -(5 * 3600 + 30 * 60 + 15)];

    #[rustfmt::skip]
    let cases: [(&str, [&str; 5]); 5] = [
        ("X",     ["Z", "+01",       "-05",       "+0130",      "-0530"]),
        ("XX",    ["Z", "+0100",     "-0500",     "+0130",      "-0530"]),
        ("XXX",   ["Z", "+01:00",    "-05:00",    "+01:30",     "-05:30"]),
        ("XXXX",  ["Z", "+0100",     "-0500",     "+0130",      "-053015"]),
        ("XXXXX", ["Z", "+01:00",    "-05:00",    "+01:30",     "-05:30:15"]),
    ];

    for (pattern, expected) in cases {
        for (offset, expected) in offsets.iter().zip(expected) {
            let temporal = MockTemporal::default().with_offset(*offset);
            check_pattern(&temporal, pattern, expected);
        }
    }

    let temporal = MockTemporal::default().with_offset(0);
    check_pattern(&temporal, "x", "+00");
    check_pattern(&temporal, "xx", "+0000");
    check_pattern(&temporal, "xxx", "+00:00");
    check_pattern(&temporal, "ZZZ", "+0000");
    let temporal = MockTemporal::default().with_offset(-3600);
    check_pattern(&temporal, "Z", "-0100");
    check_pattern(&temporal, "ZZZZZ", "-01:00");
}

#[test]
fn test_format_localized_offset() {
    let temporal = MockTemporal::default().with_offset(8 * 3600);
    check_pattern(&temporal, "O", "GMT+8");
    check_pattern(&temporal, "OOOO", "GMT+08:00");
    let temporal = MockTemporal::default().with_offset(0);
    check_pattern(&temporal, "O", "GMT");
    let temporal = MockTemporal::default().with_offset(-(5 * 3600 + 45 * 60));
    check_pattern(&temporal, "O", "GMT-5:45");
    check_pattern(&temporal, "OOOO", "GMT-05:45");
}

#[test]
fn test_format_zone() {
    let temporal = MockTemporal::date(2008, 6, 30)
        .at(11, 5, 0, 0)
        .with_offset(3600)
        .with_zone("Europe/Paris");
    check_pattern(&temporal, "VV", "Europe/Paris");
    check_pattern(&temporal, "z", "Europe/Paris");

    let temporal = MockTemporal::default().with_offset(3600);
    // without a region zone the offset is used
    check_pattern(&temporal, "z", "+01:00");
}

#[test]
fn test_format_padding() {
    let temporal = MockTemporal::date(2012, 7, 3);
    check_pattern(&temporal, "pppd", "  3");
    check_pattern(&temporal, "ppdd", "03");

    let mut builder = FormatterBuilder::new();
    builder
        .pad_next_with(4, '0')
        .unwrap()
        .append_value(Field::DayOfMonth);
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&temporal).unwrap(), "0003");

    // output wider than the pad width is an error
    let mut builder = FormatterBuilder::new();
    builder.pad_next(2).unwrap().append_value(Field::Year);
    let formatter = builder.to_formatter();
    assert!(matches!(
        formatter.format(&temporal),
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn test_format_optional_sections() {
    let formatter = DateTimeFormatter::of_pattern("HH:mm[:ss]").unwrap();
    assert_eq!(
        formatter.format(&MockTemporal::time(11, 5, 30, 0)).unwrap(),
        "11:05:30"
    );
    // a date-only temporal cannot supply the optional seconds
    let formatter = DateTimeFormatter::of_pattern("uuuu[ HH]").unwrap();
    assert_eq!(
        formatter.format(&MockTemporal::date(2012, 7, 27)).unwrap(),
        "2012"
    );
}

#[test]
fn test_format_missing_field() {
    let formatter = DateTimeFormatter::of_pattern("HH:mm").unwrap();
    assert_eq!(
        formatter.format(&MockTemporal::date(2012, 7, 27)),
        Err(Error::MissingField(Field::HourOfDay))
    );
}

#[test]
fn test_format_sign_styles() {
    fn format_value(sign_style: SignStyle, value_year: i32) -> Result<alloc::string::String, Error> {
        let mut builder = FormatterBuilder::new();
        builder
            .append_value_with(Field::Year, 2, 19, sign_style)
            .unwrap();
        builder
            .to_formatter()
            .format(&MockTemporal::date(value_year, 1, 1))
    }

    assert_eq!(format_value(SignStyle::Normal, 2).unwrap(), "02");
    assert_eq!(format_value(SignStyle::Normal, -2).unwrap(), "-02");
    assert_eq!(format_value(SignStyle::Always, 2).unwrap(), "+02");
    assert_eq!(format_value(SignStyle::ExceedsPad, 2).unwrap(), "02");
    assert_eq!(format_value(SignStyle::ExceedsPad, 123).unwrap(), "+123");
    assert_eq!(format_value(SignStyle::ExceedsPad, -2).unwrap(), "-02");
    assert!(matches!(
        format_value(SignStyle::NotNegative, -2),
        Err(Error::Unsupported(_))
    ));
    assert!(matches!(
        format_value(SignStyle::Never, -2),
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn test_format_extreme_values() {
    struct Extreme(i64);

    impl crate::temporal::TemporalAccessor for Extreme {
        fn is_supported(&self, field: Field) -> bool {
            field == Field::InstantSeconds
        }

        fn get_field(&self, field: Field) -> Result<i64, Error> {
            if field == Field::InstantSeconds {
                Ok(self.0)
            } else {
                Err(Error::unsupported_field(field))
            }
        }
    }

    let mut builder = FormatterBuilder::new();
    builder
        .append_value_with(Field::InstantSeconds, 1, 19, SignStyle::Normal)
        .unwrap();
    let formatter = builder.to_formatter();

    assert_eq!(
        formatter.format(&Extreme(i64::MAX)).unwrap(),
        "9223372036854775807"
    );
    // the minimum renders its unsigned magnitude
    assert_eq!(
        formatter.format(&Extreme(i64::MIN)).unwrap(),
        "-9223372036854775808"
    );
}

#[test]
fn test_format_reduced_year() {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_reduced(Field::Year, 2, 2, 2000)
        .unwrap();
    let formatter = builder.to_formatter();

    assert_eq!(formatter.format(&MockTemporal::date(2012, 1, 1)).unwrap(), "12");
    assert_eq!(formatter.format(&MockTemporal::date(2000, 1, 1)).unwrap(), "00");
    assert_eq!(formatter.format(&MockTemporal::date(2099, 1, 1)).unwrap(), "99");
    // outside the window the low digits are printed
    assert_eq!(formatter.format(&MockTemporal::date(1999, 1, 1)).unwrap(), "99");
    assert_eq!(formatter.format(&MockTemporal::date(2100, 1, 1)).unwrap(), "00");
}

#[test]
fn test_format_fraction() {
    let temporal = MockTemporal::time(0, 0, 0, 500_000_000);
    let mut builder = FormatterBuilder::new();
    builder
        .append_fraction(Field::NanoOfSecond, 0, 9, true)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&temporal).unwrap(), ".5");

    // zero prints nothing when the minimum width is zero
    let temporal = MockTemporal::time(0, 0, 0, 0);
    assert_eq!(formatter.format(&temporal).unwrap(), "");

    let mut builder = FormatterBuilder::new();
    builder
        .append_fraction(Field::NanoOfSecond, 3, 6, true)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&temporal).unwrap(), ".000");
    let temporal = MockTemporal::time(0, 0, 0, 123_456_789);
    assert_eq!(formatter.format(&temporal).unwrap(), ".123456");
}

#[test]
fn test_format_text_numeric_fallback() {
    // day-of-month has no text, so the value is printed as digits
    let mut builder = FormatterBuilder::new();
    builder.append_text_styled(Field::DayOfMonth, TextStyle::Full);
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&MockTemporal::date(2012, 7, 27)).unwrap(), "27");
}

#[test]
fn test_format_decimal_style() {
    let arabic = DecimalStyle::new('\u{0660}', '+', '-', '.');
    let formatter = DateTimeFormatter::of_pattern("uuuu")
        .unwrap()
        .with_decimal_style(arabic);
    assert_eq!(
        formatter.format(&MockTemporal::date(2012, 7, 27)).unwrap(),
        "\u{0662}\u{0660}\u{0661}\u{0662}"
    );
}

#[test]
fn test_format_to_appends() {
    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
    let mut sink = alloc::string::String::from("date: ");
    formatter
        .format_to(&MockTemporal::date(2012, 7, 27), &mut sink)
        .unwrap();
    assert_eq!(sink, "date: 2012-07-27");

    let mut out = alloc::string::String::new();
    let mut adapter = crate::write::FmtWrite::new(&mut out);
    formatter
        .format_to(&MockTemporal::date(2012, 7, 27), &mut adapter)
        .unwrap();
    assert_eq!(out, "2012-07-27");
}

#[test]
fn test_format_chronology_id() {
    let mut builder = FormatterBuilder::new();
    builder.append_chronology_id();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&MockTemporal::date(2012, 7, 27)).unwrap(), "ISO");
}
