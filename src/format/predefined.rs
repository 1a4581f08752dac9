//! The prebuilt ISO-8601 and RFC-1123 formatters.

use once_cell::sync::Lazy;

use crate::chronology::IsoChronology;
use crate::field::Field;
use crate::format::builder::FormatterBuilder;
use crate::format::DateTimeFormatter;
use crate::style::{ResolverStyle, SignStyle};

/// English weekday names for RFC-1123.
const RFC_DAYS: [(i64, &str); 7] = [
    (1, "Mon"),
    (2, "Tue"),
    (3, "Wed"),
    (4, "Thu"),
    (5, "Fri"),
    (6, "Sat"),
    (7, "Sun"),
];

/// English month names for RFC-1123.
const RFC_MONTHS: [(i64, &str); 12] = [
    (1, "Jan"),
    (2, "Feb"),
    (3, "Mar"),
    (4, "Apr"),
    (5, "May"),
    (6, "Jun"),
    (7, "Jul"),
    (8, "Aug"),
    (9, "Sep"),
    (10, "Oct"),
    (11, "Nov"),
    (12, "Dec"),
];

static ISO_LOCAL_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_with(Field::Year, 4, 10, SignStyle::ExceedsPad)
        .expect("widths are valid")
        .append_literal('-')
        .append_value_fixed(Field::MonthOfYear, 2)
        .expect("widths are valid")
        .append_literal('-')
        .append_value_fixed(Field::DayOfMonth, 2)
        .expect("widths are valid");
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_LOCAL_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .append_value_fixed(Field::HourOfDay, 2)
        .expect("widths are valid")
        .append_literal(':')
        .append_value_fixed(Field::MinuteOfHour, 2)
        .expect("widths are valid")
        .optional_start()
        .append_literal(':')
        .append_value_fixed(Field::SecondOfMinute, 2)
        .expect("widths are valid")
        .optional_start()
        .append_fraction(Field::NanoOfSecond, 0, 9, true)
        .expect("widths are valid");
    builder.to_formatter_with(ResolverStyle::Strict, None)
});

static ISO_LOCAL_DATE_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_date())
        .append_literal('T')
        .append_formatter(DateTimeFormatter::iso_local_time());
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_OFFSET_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_date())
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_OFFSET_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_time())
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, None)
});

static ISO_OFFSET_DATE_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_date_time())
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_ZONED_DATE_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .append_formatter(DateTimeFormatter::iso_offset_date_time())
        .optional_start()
        .append_literal('[')
        .parse_case_sensitive()
        .append_zone_region_id()
        .append_literal(']');
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_date())
        .optional_start()
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_time())
        .optional_start()
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, None)
});

static ISO_DATE_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(DateTimeFormatter::iso_local_date_time())
        .optional_start()
        .append_offset_id()
        .optional_start()
        .append_literal('[')
        .parse_case_sensitive()
        .append_zone_region_id()
        .append_literal(']');
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_ORDINAL_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_value_with(Field::Year, 4, 10, SignStyle::ExceedsPad)
        .expect("widths are valid")
        .append_literal('-')
        .append_value_fixed(Field::DayOfYear, 3)
        .expect("widths are valid")
        .optional_start()
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_WEEK_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_value_with(Field::WeekBasedYear, 4, 10, SignStyle::ExceedsPad)
        .expect("widths are valid")
        .append_literal_str("-W")
        .append_value_fixed(Field::WeekOfWeekBasedYear, 2)
        .expect("widths are valid")
        .append_literal('-')
        .append_value_fixed(Field::DayOfWeek, 1)
        .expect("widths are valid")
        .optional_start()
        .append_offset_id();
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static BASIC_ISO_DATE: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_value_fixed(Field::Year, 4)
        .expect("widths are valid")
        .append_value_fixed(Field::MonthOfYear, 2)
        .expect("widths are valid")
        .append_value_fixed(Field::DayOfMonth, 2)
        .expect("widths are valid")
        .optional_start();
    builder
        .append_offset("+HHMMss", "Z")
        .expect("pattern is valid");
    builder.to_formatter_with(ResolverStyle::Strict, Some(IsoChronology::INSTANCE))
});

static ISO_INSTANT: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder.parse_case_insensitive().append_instant();
    builder.to_formatter_with(ResolverStyle::Strict, None)
});

static RFC_1123_DATE_TIME: Lazy<DateTimeFormatter> = Lazy::new(|| {
    let mut builder = FormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .parse_lenient()
        .optional_start()
        .append_text_map(Field::DayOfWeek, &RFC_DAYS)
        .append_literal_str(", ");
    builder
        .optional_end()
        .expect("optional section is open")
        .append_value_with(Field::DayOfMonth, 1, 2, SignStyle::NotNegative)
        .expect("widths are valid")
        .append_literal(' ')
        .append_text_map(Field::MonthOfYear, &RFC_MONTHS)
        .append_literal(' ')
        .append_value_fixed(Field::Year, 4)
        .expect("widths are valid")
        .append_literal(' ')
        .append_value_fixed(Field::HourOfDay, 2)
        .expect("widths are valid")
        .append_literal(':')
        .append_value_fixed(Field::MinuteOfHour, 2)
        .expect("widths are valid")
        .optional_start()
        .append_literal(':')
        .append_value_fixed(Field::SecondOfMinute, 2)
        .expect("widths are valid");
    builder
        .optional_end()
        .expect("optional section is open")
        .append_literal(' ');
    builder
        .append_offset("+HHMM", "GMT")
        .expect("pattern is valid");
    builder.to_formatter_with(ResolverStyle::Smart, Some(IsoChronology::INSTANCE))
});

impl DateTimeFormatter {
    /// The ISO date without an offset, such as `2011-12-03`.
    #[must_use]
    pub fn iso_local_date() -> &'static DateTimeFormatter {
        &ISO_LOCAL_DATE
    }

    /// The ISO time without an offset, such as `10:15:30`.
    #[must_use]
    pub fn iso_local_time() -> &'static DateTimeFormatter {
        &ISO_LOCAL_TIME
    }

    /// The ISO date-time without an offset, such as `2011-12-03T10:15:30`.
    #[must_use]
    pub fn iso_local_date_time() -> &'static DateTimeFormatter {
        &ISO_LOCAL_DATE_TIME
    }

    /// The ISO date with an offset, such as `2011-12-03+01:00`.
    #[must_use]
    pub fn iso_offset_date() -> &'static DateTimeFormatter {
        &ISO_OFFSET_DATE
    }

    /// The ISO time with an offset, such as `10:15:30+01:00`.
    #[must_use]
    pub fn iso_offset_time() -> &'static DateTimeFormatter {
        &ISO_OFFSET_TIME
    }

    /// The ISO date-time with an offset, such as
    /// `2011-12-03T10:15:30+01:00`.
    #[must_use]
    pub fn iso_offset_date_time() -> &'static DateTimeFormatter {
        &ISO_OFFSET_DATE_TIME
    }

    /// The ISO date-time with offset and zone, such as
    /// `2011-12-03T10:15:30+01:00[Europe/Paris]`.
    #[must_use]
    pub fn iso_zoned_date_time() -> &'static DateTimeFormatter {
        &ISO_ZONED_DATE_TIME
    }

    /// The ISO date with an optional offset.
    #[must_use]
    pub fn iso_date() -> &'static DateTimeFormatter {
        &ISO_DATE
    }

    /// The ISO time with an optional offset.
    #[must_use]
    pub fn iso_time() -> &'static DateTimeFormatter {
        &ISO_TIME
    }

    /// The ISO date-time with optional offset and zone.
    #[must_use]
    pub fn iso_date_time() -> &'static DateTimeFormatter {
        &ISO_DATE_TIME
    }

    /// The ISO ordinal date, such as `2012-337`.
    #[must_use]
    pub fn iso_ordinal_date() -> &'static DateTimeFormatter {
        &ISO_ORDINAL_DATE
    }

    /// The ISO week date, such as `2012-W48-6`.
    #[must_use]
    pub fn iso_week_date() -> &'static DateTimeFormatter {
        &ISO_WEEK_DATE
    }

    /// The basic ISO date, such as `20111203`.
    #[must_use]
    pub fn basic_iso_date() -> &'static DateTimeFormatter {
        &BASIC_ISO_DATE
    }

    /// The ISO instant, such as `2011-12-03T10:15:30Z`.
    #[must_use]
    pub fn iso_instant() -> &'static DateTimeFormatter {
        &ISO_INSTANT
    }

    /// The RFC-1123 date-time, such as `Tue, 3 Jun 2008 11:05:30 GMT`.
    #[must_use]
    pub fn rfc_1123_date_time() -> &'static DateTimeFormatter {
        &RFC_1123_DATE_TIME
    }
}
