//! A configurable temporal object for tests.

use crate::chronology::{Chronology, IsoChronology};
use crate::date::{IsoDate, IsoTime};
use crate::field::Field;
use crate::temporal::TemporalAccessor;
use crate::zone::{ZoneId, ZoneOffset};
use crate::Error;

/// A temporal assembled from optional date, time, offset and zone parts.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTemporal {
    /// Date part.
    pub(crate) date: Option<IsoDate>,
    /// Time part.
    pub(crate) time: Option<IsoTime>,
    /// Offset part.
    pub(crate) offset: Option<ZoneOffset>,
    /// Zone part.
    pub(crate) zone: Option<ZoneId>,
}

impl MockTemporal {
    /// A date-only temporal.
    pub(crate) fn date(year: i32, month: u8, day: u8) -> Self {
        Self {
            date: Some(IsoDate::new(year, month, day).unwrap()),
            ..Self::default()
        }
    }

    /// A time-only temporal.
    pub(crate) fn time(hour: u8, minute: u8, second: u8, nano: u32) -> Self {
        Self {
            time: Some(IsoTime::new(hour, minute, second, nano).unwrap()),
            ..Self::default()
        }
    }

    /// A copy with a time part.
    pub(crate) fn at(mut self, hour: u8, minute: u8, second: u8, nano: u32) -> Self {
        self.time = Some(IsoTime::new(hour, minute, second, nano).unwrap());
        self
    }

    /// A copy with an offset part, in seconds.
    pub(crate) fn with_offset(mut self, offset_seconds: i32) -> Self {
        self.offset = Some(ZoneOffset::of_total_seconds(offset_seconds).unwrap());
        self
    }

    /// A copy with a region zone part.
    pub(crate) fn with_zone(mut self, zone_id: &str) -> Self {
        self.zone = Some(ZoneId::region(zone_id));
        self
    }

    /// The field value, if this temporal can supply it.
    fn lookup(&self, field: Field) -> Option<i64> {
        if field == Field::OffsetSeconds {
            return self.offset.map(|offset| i64::from(offset.total_seconds()));
        }
        if field == Field::InstantSeconds {
            let (date, time, offset) = (self.date?, self.time?, self.offset?);
            let secs = date.to_epoch_day() * 86_400 + i64::from(time.second_of_day())
                - i64::from(offset.total_seconds());
            return Some(secs);
        }
        if let Some(value) = self.date.and_then(|date| date.field_value(field)) {
            return Some(value);
        }
        self.time.and_then(|time| time.field_value(field))
    }
}

impl TemporalAccessor for MockTemporal {
    fn is_supported(&self, field: Field) -> bool {
        self.lookup(field).is_some()
    }

    fn get_field(&self, field: Field) -> Result<i64, Error> {
        self.lookup(field)
            .ok_or_else(|| Error::unsupported_field(field))
    }

    fn query_zone_id(&self) -> Option<ZoneId> {
        self.zone.clone()
    }

    fn query_offset(&self) -> Option<ZoneOffset> {
        self.offset
    }

    fn query_chronology(&self) -> Option<&'static dyn Chronology> {
        self.date.map(|_| IsoChronology::INSTANCE as &'static dyn Chronology)
    }

    fn query_local_date(&self) -> Option<IsoDate> {
        self.date
    }

    fn query_local_time(&self) -> Option<IsoTime> {
        self.time
    }
}
