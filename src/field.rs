//! Temporal fields and their valid value ranges.

use core::fmt;

use bitflags::bitflags;

use crate::Error;

/// The range of valid values for a temporal field.
///
/// All four bounds are needed because some fields have ranges that vary by
/// date, such as the day-of-month which runs to 28, 29, 30 or 31 depending on
/// the month and year.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ValueRange {
    /// Smallest possible minimum.
    min_smallest: i64,
    /// Largest possible minimum.
    min_largest: i64,
    /// Smallest possible maximum.
    max_smallest: i64,
    /// Largest possible maximum.
    max_largest: i64,
}

impl ValueRange {
    /// Range with fixed minimum and maximum.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// Range with a fixed minimum and a variable maximum.
    pub const fn of_variable_max(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// Smallest possible minimum value.
    pub const fn min(&self) -> i64 {
        self.min_smallest
    }

    /// Largest possible maximum value.
    pub const fn max(&self) -> i64 {
        self.max_largest
    }

    /// Checks if the range is fixed, i.e. has identical smallest and largest
    /// bounds on both ends.
    pub const fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// Checks if all valid values fit in an `i32`.
    pub const fn is_int_value(&self) -> bool {
        self.min_smallest >= i32::MIN as i64 && self.max_largest <= i32::MAX as i64
    }

    /// Checks if the value is within the outer bounds of the range.
    pub const fn is_valid_value(&self, value: i64) -> bool {
        value >= self.min_smallest && value <= self.max_largest
    }

    /// Validates a value against the range, reporting the field in the error.
    pub fn check_valid_value(&self, value: i64, field: Field) -> Result<i64, Error> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(Error::resolve(alloc::format!(
                "invalid value for {field} (valid values {self}): {value}"
            )))
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_smallest != self.min_largest {
            write!(f, "{}/{}", self.min_smallest, self.min_largest)?;
        } else {
            write!(f, "{}", self.min_smallest)?;
        }
        f.write_str(" - ")?;
        if self.max_smallest != self.max_largest {
            write!(f, "{}/{}", self.max_smallest, self.max_largest)
        } else {
            write!(f, "{}", self.max_largest)
        }
    }
}

/// Maximum supported proleptic year.
pub(crate) const YEAR_MAX: i64 = 999_999_999;
/// Minimum supported proleptic year.
pub(crate) const YEAR_MIN: i64 = -999_999_999;

/// A closed set of temporal quantities used by printers, parsers and the
/// resolver.
///
/// Each field carries a valid value range and is classified as date-based or
/// time-based. Fields with a fixed range can take part in fractional output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[allow(clippy::enum_variant_names)]
#[non_exhaustive]
pub enum Field {
    /// Nanosecond within the second, `0..=999_999_999`.
    NanoOfSecond,
    /// Nanosecond within the day.
    NanoOfDay,
    /// Microsecond within the second, `0..=999_999`.
    MicroOfSecond,
    /// Microsecond within the day.
    MicroOfDay,
    /// Millisecond within the second, `0..=999`.
    MilliOfSecond,
    /// Millisecond within the day.
    MilliOfDay,
    /// Second within the minute, `0..=59`.
    SecondOfMinute,
    /// Second within the day.
    SecondOfDay,
    /// Minute within the hour, `0..=59`.
    MinuteOfHour,
    /// Minute within the day.
    MinuteOfDay,
    /// Hour within the AM/PM half-day, `0..=11`.
    HourOfAmpm,
    /// Clock hour within the AM/PM half-day, `1..=12`.
    ClockHourOfAmpm,
    /// Hour within the day, `0..=23`.
    HourOfDay,
    /// Clock hour within the day, `1..=24`.
    ClockHourOfDay,
    /// AM/PM half of the day, `0..=1`.
    AmpmOfDay,
    /// Day of the week, `1..=7` with Monday as `1`.
    DayOfWeek,
    /// Day within the aligned week of the month, `1..=7`.
    AlignedDayOfWeekInMonth,
    /// Day within the aligned week of the year, `1..=7`.
    AlignedDayOfWeekInYear,
    /// Day of the month, `1..=28/31`.
    DayOfMonth,
    /// Day of the year, `1..=365/366`.
    DayOfYear,
    /// Days since the epoch `1970-01-01`.
    EpochDay,
    /// Aligned week within the month, `1..=4/5`.
    AlignedWeekOfMonth,
    /// Aligned week within the year, `1..=53`.
    AlignedWeekOfYear,
    /// Month of the year, `1..=12`.
    MonthOfYear,
    /// Months since month 0 of year 0.
    ProlepticMonth,
    /// Year within the era, `1..=999_999_999`.
    YearOfEra,
    /// Proleptic year.
    Year,
    /// Era, `0..=1` with `1` as the current era.
    Era,
    /// Seconds since the epoch `1970-01-01T00:00:00Z`.
    InstantSeconds,
    /// Offset from UTC in seconds, `-64800..=64800`.
    OffsetSeconds,
    /// Quarter of the year, `1..=4`.
    QuarterOfYear,
    /// Year of the ISO week-based calendar.
    WeekBasedYear,
    /// Week of the ISO week-based year, `1..=52/53`.
    WeekOfWeekBasedYear,
}

impl Field {
    /// All fields, in resolution order (smallest unit first).
    pub(crate) const ALL: [Field; 33] = [
        Field::NanoOfSecond,
        Field::NanoOfDay,
        Field::MicroOfSecond,
        Field::MicroOfDay,
        Field::MilliOfSecond,
        Field::MilliOfDay,
        Field::SecondOfMinute,
        Field::SecondOfDay,
        Field::MinuteOfHour,
        Field::MinuteOfDay,
        Field::HourOfAmpm,
        Field::ClockHourOfAmpm,
        Field::HourOfDay,
        Field::ClockHourOfDay,
        Field::AmpmOfDay,
        Field::DayOfWeek,
        Field::AlignedDayOfWeekInMonth,
        Field::AlignedDayOfWeekInYear,
        Field::DayOfMonth,
        Field::DayOfYear,
        Field::EpochDay,
        Field::AlignedWeekOfMonth,
        Field::AlignedWeekOfYear,
        Field::MonthOfYear,
        Field::ProlepticMonth,
        Field::YearOfEra,
        Field::Year,
        Field::Era,
        Field::InstantSeconds,
        Field::OffsetSeconds,
        Field::QuarterOfYear,
        Field::WeekBasedYear,
        Field::WeekOfWeekBasedYear,
    ];

    /// The range of valid values for the field.
    pub const fn range(self) -> ValueRange {
        match self {
            Field::NanoOfSecond => ValueRange::of(0, 999_999_999),
            Field::NanoOfDay => ValueRange::of(0, 86_400 * 1_000_000_000 - 1),
            Field::MicroOfSecond => ValueRange::of(0, 999_999),
            Field::MicroOfDay => ValueRange::of(0, 86_400 * 1_000_000 - 1),
            Field::MilliOfSecond => ValueRange::of(0, 999),
            Field::MilliOfDay => ValueRange::of(0, 86_400 * 1_000 - 1),
            Field::SecondOfMinute | Field::MinuteOfHour => ValueRange::of(0, 59),
            Field::SecondOfDay => ValueRange::of(0, 86_399),
            Field::MinuteOfDay => ValueRange::of(0, 1439),
            Field::HourOfAmpm => ValueRange::of(0, 11),
            Field::ClockHourOfAmpm => ValueRange::of(1, 12),
            Field::HourOfDay => ValueRange::of(0, 23),
            Field::ClockHourOfDay => ValueRange::of(1, 24),
            Field::AmpmOfDay => ValueRange::of(0, 1),
            Field::DayOfWeek
            | Field::AlignedDayOfWeekInMonth
            | Field::AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            Field::DayOfMonth => ValueRange::of_variable_max(1, 28, 31),
            Field::DayOfYear => ValueRange::of_variable_max(1, 365, 366),
            Field::EpochDay => ValueRange::of(-365_243_219_162, 365_241_780_471),
            Field::AlignedWeekOfMonth => ValueRange::of_variable_max(1, 4, 5),
            Field::AlignedWeekOfYear => ValueRange::of(1, 53),
            Field::MonthOfYear => ValueRange::of(1, 12),
            Field::ProlepticMonth => ValueRange::of(YEAR_MIN * 12, YEAR_MAX * 12 + 11),
            Field::YearOfEra => ValueRange::of_variable_max(1, YEAR_MAX, YEAR_MAX + 1),
            Field::Year | Field::WeekBasedYear => ValueRange::of(YEAR_MIN, YEAR_MAX),
            Field::Era => ValueRange::of(0, 1),
            Field::InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            Field::OffsetSeconds => ValueRange::of(-18 * 3600, 18 * 3600),
            Field::QuarterOfYear => ValueRange::of(1, 4),
            Field::WeekOfWeekBasedYear => ValueRange::of_variable_max(1, 52, 53),
        }
    }

    /// Checks if the field represents a component of a date.
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Field::DayOfWeek
                | Field::AlignedDayOfWeekInMonth
                | Field::AlignedDayOfWeekInYear
                | Field::DayOfMonth
                | Field::DayOfYear
                | Field::EpochDay
                | Field::AlignedWeekOfMonth
                | Field::AlignedWeekOfYear
                | Field::MonthOfYear
                | Field::ProlepticMonth
                | Field::YearOfEra
                | Field::Year
                | Field::Era
                | Field::QuarterOfYear
                | Field::WeekBasedYear
                | Field::WeekOfWeekBasedYear
        )
    }

    /// Checks if the field represents a component of a time.
    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            Field::NanoOfSecond
                | Field::NanoOfDay
                | Field::MicroOfSecond
                | Field::MicroOfDay
                | Field::MilliOfSecond
                | Field::MilliOfDay
                | Field::SecondOfMinute
                | Field::SecondOfDay
                | Field::MinuteOfHour
                | Field::MinuteOfDay
                | Field::HourOfAmpm
                | Field::ClockHourOfAmpm
                | Field::HourOfDay
                | Field::ClockHourOfDay
                | Field::AmpmOfDay
        )
    }

    /// Validates a value against the field's range.
    pub fn check_valid_value(self, value: i64) -> Result<i64, Error> {
        self.range().check_valid_value(value, self)
    }

    /// The field name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Field::NanoOfSecond => "NanoOfSecond",
            Field::NanoOfDay => "NanoOfDay",
            Field::MicroOfSecond => "MicroOfSecond",
            Field::MicroOfDay => "MicroOfDay",
            Field::MilliOfSecond => "MilliOfSecond",
            Field::MilliOfDay => "MilliOfDay",
            Field::SecondOfMinute => "SecondOfMinute",
            Field::SecondOfDay => "SecondOfDay",
            Field::MinuteOfHour => "MinuteOfHour",
            Field::MinuteOfDay => "MinuteOfDay",
            Field::HourOfAmpm => "HourOfAmpm",
            Field::ClockHourOfAmpm => "ClockHourOfAmpm",
            Field::HourOfDay => "HourOfDay",
            Field::ClockHourOfDay => "ClockHourOfDay",
            Field::AmpmOfDay => "AmpmOfDay",
            Field::DayOfWeek => "DayOfWeek",
            Field::AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            Field::AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            Field::DayOfMonth => "DayOfMonth",
            Field::DayOfYear => "DayOfYear",
            Field::EpochDay => "EpochDay",
            Field::AlignedWeekOfMonth => "AlignedWeekOfMonth",
            Field::AlignedWeekOfYear => "AlignedWeekOfYear",
            Field::MonthOfYear => "MonthOfYear",
            Field::ProlepticMonth => "ProlepticMonth",
            Field::YearOfEra => "YearOfEra",
            Field::Year => "Year",
            Field::Era => "Era",
            Field::InstantSeconds => "InstantSeconds",
            Field::OffsetSeconds => "OffsetSeconds",
            Field::QuarterOfYear => "QuarterOfYear",
            Field::WeekBasedYear => "WeekBasedYear",
            Field::WeekOfWeekBasedYear => "WeekOfWeekBasedYear",
        }
    }

    /// Bit position of the field inside a [`FieldSet`].
    const fn bit(self) -> u64 {
        1 << (self as u64)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A compact set of [`Field`]s, one bit per field.
    ///
    /// Used for the resolver-field whitelist on a formatter.
    pub struct FieldSet: u64 {
        /// All fields.
        const ALL_FIELDS = (1 << 33) - 1;
    }
}

impl FieldSet {
    /// Set containing exactly one field.
    #[must_use]
    pub fn of(field: Field) -> Self {
        Self::from_bits_truncate(field.bit())
    }

    /// Set containing the provided fields.
    #[must_use]
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut set = Self::empty();
        for &field in fields {
            set |= Self::of(field);
        }
        set
    }

    /// Checks if the field is a member of the set.
    #[must_use]
    pub fn contains_field(&self, field: Field) -> bool {
        self.bits() & field.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ranges() {
        assert!(Field::NanoOfSecond.range().is_fixed());
        assert!(Field::SecondOfMinute.range().is_fixed());
        assert!(!Field::DayOfMonth.range().is_fixed());
        assert!(!Field::DayOfYear.range().is_fixed());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(Field::MonthOfYear.range().to_string(), "1 - 12");
        assert_eq!(Field::DayOfMonth.range().to_string(), "1 - 28/31");
    }

    #[test]
    fn test_date_time_classification() {
        for field in Field::ALL {
            let date = field.is_date_based();
            let time = field.is_time_based();
            assert!(!(date && time), "{field} is both date- and time-based");
        }
        assert!(Field::Year.is_date_based());
        assert!(Field::HourOfDay.is_time_based());
        assert!(!Field::OffsetSeconds.is_date_based());
        assert!(!Field::OffsetSeconds.is_time_based());
    }

    #[test]
    fn test_field_set() {
        let set = FieldSet::from_fields(&[Field::Year, Field::MonthOfYear]);
        assert!(set.contains_field(Field::Year));
        assert!(set.contains_field(Field::MonthOfYear));
        assert!(!set.contains_field(Field::DayOfMonth));
        assert!(FieldSet::ALL_FIELDS.contains_field(Field::WeekOfWeekBasedYear));
    }
}
