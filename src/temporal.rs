//! Read-side interface for temporal objects.

use crate::chronology::Chronology;
use crate::date::{IsoDate, IsoTime};
use crate::field::Field;
use crate::zone::{ZoneId, ZoneOffset};
use crate::Error;

/// The smallest unit a temporal object supports.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[non_exhaustive]
pub enum Precision {
    /// Nanosecond precision.
    Nanos,
    /// Microsecond precision.
    Micros,
    /// Millisecond precision.
    Millis,
    /// Second precision.
    Seconds,
    /// Minute precision.
    Minutes,
    /// Hour precision.
    Hours,
    /// Day precision.
    Days,
    /// Month precision.
    Months,
    /// Year precision.
    Years,
}

/// Read-only access to the fields of a date/time object.
///
/// This is the narrow interface the formatter consumes: a source of field
/// values plus a handful of queries for the non-numeric parts (zone, offset,
/// chronology, embedded date and time). The value types in this crate
/// ([`IsoDate`], [`IsoTime`], [`Parsed`](crate::format::Parsed)) implement
/// it, and applications implement it for their own date/time types.
pub trait TemporalAccessor {
    /// Checks if the field can be read from this object.
    fn is_supported(&self, field: Field) -> bool;

    /// Reads the value of the field.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the field is unsupported.
    fn get_field(&self, field: Field) -> Result<i64, Error>;

    /// The time zone, excluding bare offsets.
    fn query_zone_id(&self) -> Option<ZoneId> {
        None
    }

    /// The offset from UTC.
    fn query_offset(&self) -> Option<ZoneOffset> {
        if let Ok(secs) = self.get_field(Field::OffsetSeconds) {
            return ZoneOffset::of_total_seconds(secs as i32).ok();
        }
        None
    }

    /// The zone if present, falling back to the offset viewed as a zone.
    fn query_zone(&self) -> Option<ZoneId> {
        self.query_zone_id()
            .or_else(|| self.query_offset().map(ZoneId::Offset))
    }

    /// The calendar system.
    fn query_chronology(&self) -> Option<&'static dyn Chronology> {
        None
    }

    /// The embedded local date.
    fn query_local_date(&self) -> Option<IsoDate> {
        None
    }

    /// The embedded local time.
    fn query_local_time(&self) -> Option<IsoTime> {
        None
    }

    /// The precision of the object.
    fn query_precision(&self) -> Option<Precision> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OffsetOnly;

    impl TemporalAccessor for OffsetOnly {
        fn is_supported(&self, field: Field) -> bool {
            field == Field::OffsetSeconds
        }

        fn get_field(&self, field: Field) -> Result<i64, Error> {
            if field == Field::OffsetSeconds {
                Ok(3600)
            } else {
                Err(Error::unsupported_field(field))
            }
        }
    }

    #[test]
    fn test_default_queries() {
        let temporal = OffsetOnly;
        assert_eq!(temporal.query_zone_id(), None);
        let offset = temporal.query_offset().unwrap();
        assert_eq!(offset.total_seconds(), 3600);
        assert_eq!(temporal.query_zone(), Some(ZoneId::Offset(offset)));
        assert!(temporal.query_local_date().is_none());
    }
}
