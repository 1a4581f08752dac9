//! Tests for the prebuilt ISO and RFC-1123 formatters.

use crate::date::{IsoDate, IsoTime};
use crate::field::Field;
use crate::format::DateTimeFormatter;
use crate::tests::MockTemporal;
use crate::zone::ZoneId;
use crate::Error;

#[test]
fn test_iso_local_date() {
    let formatter = DateTimeFormatter::iso_local_date();
    let temporal = MockTemporal::date(2008, 6, 3);
    assert_eq!(formatter.format(&temporal).unwrap(), "2008-06-03");

    let parsed = formatter.parse("2008-06-03").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 3).unwrap()));

    // strict resolution rejects impossible dates
    assert!(formatter.parse("2007-02-29").is_err());
}

#[test]
fn test_iso_local_time() {
    let formatter = DateTimeFormatter::iso_local_time();
    assert_eq!(
        formatter.format(&MockTemporal::time(11, 5, 0, 0)).unwrap(),
        "11:05:00"
    );
    assert_eq!(
        formatter
            .format(&MockTemporal::time(11, 5, 30, 512_000_000))
            .unwrap(),
        "11:05:30.512"
    );

    let parsed = formatter.parse("11:05").unwrap();
    assert_eq!(parsed.to_time(), Some(IsoTime::new(11, 5, 0, 0).unwrap()));
    let parsed = formatter.parse("11:05:30.512").unwrap();
    assert_eq!(
        parsed.to_time(),
        Some(IsoTime::new(11, 5, 30, 512_000_000).unwrap())
    );
}

#[test]
fn test_iso_offset_date_time() {
    let formatter = DateTimeFormatter::iso_offset_date_time();
    let temporal = MockTemporal::date(2008, 6, 30).at(11, 5, 0, 0).with_offset(3600);
    let text = formatter.format(&temporal).unwrap();
    assert_eq!(text, "2008-06-30T11:05:00+01:00");

    let parsed = formatter.parse(&text).unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 30).unwrap()));
    assert_eq!(parsed.to_time(), Some(IsoTime::new(11, 5, 0, 0).unwrap()));
    assert_eq!(parsed.to_offset().unwrap().total_seconds(), 3600);
    // the instant is synthesized from date, time and offset
    let expected = IsoDate::new(2008, 6, 30).unwrap().to_epoch_day() * 86_400
        + (11 * 3600 + 5 * 60)
        - 3600;
    assert_eq!(parsed.get(Field::InstantSeconds), Some(expected));
}

#[test]
fn test_iso_zoned_date_time_round_trip() {
    let formatter = DateTimeFormatter::iso_zoned_date_time();
    let temporal = MockTemporal::date(2008, 6, 30)
        .at(11, 5, 0, 0)
        .with_offset(3600)
        .with_zone("Europe/Paris");

    let text = formatter.format(&temporal).unwrap();
    assert_eq!(text, "2008-06-30T11:05:00+01:00[Europe/Paris]");

    let parsed = formatter.parse(&text).unwrap();
    assert_eq!(parsed.to_zone(), Some(ZoneId::region("Europe/Paris")));
    assert_eq!(parsed.to_offset().unwrap().total_seconds(), 3600);
    assert_eq!(formatter.format(&parsed).unwrap(), text);
}

#[test]
fn test_iso_zoned_date_time_without_zone() {
    // a bare offset is not printed as a bracketed zone
    let formatter = DateTimeFormatter::iso_zoned_date_time();
    let temporal = MockTemporal::date(2008, 6, 30).at(11, 5, 0, 0).with_offset(3600);
    assert_eq!(
        formatter.format(&temporal).unwrap(),
        "2008-06-30T11:05:00+01:00"
    );
}

#[test]
fn test_basic_iso_date() {
    let formatter = DateTimeFormatter::basic_iso_date();
    assert_eq!(
        formatter.format(&MockTemporal::date(2008, 6, 3)).unwrap(),
        "20080603"
    );

    let parsed = formatter.parse("20080603").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 3).unwrap()));

    match formatter.parse("+1234560603") {
        Err(Error::Parse(err)) => {
            assert_eq!(err.error_index(), 0);
            assert_eq!(err.parsed_string(), "+1234560603");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_iso_ordinal_date() {
    let formatter = DateTimeFormatter::iso_ordinal_date();
    let temporal = MockTemporal::date(2008, 6, 30);
    assert_eq!(formatter.format(&temporal).unwrap(), "2008-182");
    let parsed = formatter.parse("2008-182").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 30).unwrap()));
}

#[test]
fn test_iso_week_date() {
    let formatter = DateTimeFormatter::iso_week_date();
    let temporal = MockTemporal::date(2012, 7, 27);
    assert_eq!(formatter.format(&temporal).unwrap(), "2012-W30-5");
    let parsed = formatter.parse("2012-W30-5").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2012, 7, 27).unwrap()));

    // week 1 of 2009 begins in December 2008
    let parsed = formatter.parse("2009-W01-1").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 12, 29).unwrap()));
}

#[test]
fn test_iso_instant_round_trip() {
    let formatter = DateTimeFormatter::iso_instant();
    let temporal = MockTemporal::date(2008, 6, 30)
        .at(11, 5, 30, 512_000_000)
        .with_offset(0);
    let text = formatter.format(&temporal).unwrap();
    assert_eq!(text, "2008-06-30T11:05:30.512Z");

    let parsed = formatter.parse(&text).unwrap();
    assert_eq!(formatter.format(&parsed).unwrap(), text);
}

#[test]
fn test_iso_instant_offset_input() {
    // instants print against UTC whatever the source offset
    let formatter = DateTimeFormatter::iso_instant();
    let temporal = MockTemporal::date(2008, 6, 30).at(12, 5, 30, 0).with_offset(3600);
    assert_eq!(formatter.format(&temporal).unwrap(), "2008-06-30T11:05:30Z");
}

#[test]
fn test_rfc_1123() {
    let formatter = DateTimeFormatter::rfc_1123_date_time();
    let temporal = MockTemporal::date(2008, 6, 3).at(11, 5, 30, 0).with_offset(0);
    assert_eq!(
        formatter.format(&temporal).unwrap(),
        "Tue, 3 Jun 2008 11:05:30 GMT"
    );

    let parsed = formatter.parse("Tue, 3 Jun 2008 11:05:30 GMT").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 3).unwrap()));
    assert_eq!(parsed.to_time(), Some(IsoTime::new(11, 5, 30, 0).unwrap()));
    assert_eq!(parsed.to_offset().unwrap().total_seconds(), 0);

    // the day-of-week block is optional
    let parsed = formatter.parse("3 Jun 2008 11:05:30 GMT").unwrap();
    assert_eq!(parsed.to_date(), Some(IsoDate::new(2008, 6, 3).unwrap()));

    // seconds are optional and names are case-insensitive
    let parsed = formatter.parse("TUE, 3 JUN 2008 11:05 +0200").unwrap();
    assert_eq!(parsed.to_time(), Some(IsoTime::new(11, 5, 0, 0).unwrap()));
    assert_eq!(parsed.to_offset().unwrap().total_seconds(), 7200);

    // a mismatched weekday is a conflict
    assert!(formatter.parse("Mon, 3 Jun 2008 11:05:30 GMT").is_err());
}

#[test]
fn test_iso_date_optional_offset() {
    let formatter = DateTimeFormatter::iso_date();
    let parsed = formatter.parse("2008-06-03+01:00").unwrap();
    assert_eq!(parsed.to_offset().unwrap().total_seconds(), 3600);
    let parsed = formatter.parse("2008-06-03").unwrap();
    assert_eq!(parsed.to_offset(), None);
}

#[test]
fn test_with_zone_override_prints_instant_in_zone() {
    let formatter = DateTimeFormatter::iso_offset_date_time()
        .with_zone(ZoneId::Offset(crate::zone::ZoneOffset::of_hours(2).unwrap()));
    // 11:05:30 UTC viewed at +02:00
    let temporal = MockTemporal::date(2008, 6, 30).at(11, 5, 30, 0).with_offset(0);
    assert_eq!(
        formatter.format(&temporal).unwrap(),
        "2008-06-30T13:05:30+02:00"
    );
}
