//! Second-phase resolution of parsed field values into canonical temporal
//! values.

use crate::chronology::IsoChronology;
use crate::date::{IsoDate, IsoTime};
use crate::field::{Field, FieldSet};
use crate::format::context::Parsed;
use crate::style::ResolverStyle;
use crate::zone::ZoneOffset;
use crate::Error;

/// Nanoseconds per day.
const NANOS_PER_DAY: i128 = 86_400_000_000_000;

impl Parsed {
    /// Resolve the parsed fields into date, time, offset and instant values.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] on conflicting or out-of-range fields.
    pub(crate) fn resolve(
        mut self,
        style: ResolverStyle,
        resolver_fields: Option<FieldSet>,
    ) -> Result<Self, Error> {
        if let Some(whitelist) = resolver_fields {
            self.fields.retain(|&field, _| whitelist.contains_field(field));
        }
        self.resolve_instant_fields(style)?;
        self.resolve_date_fields(style)?;
        self.resolve_time_fields(style)?;
        self.resolve_time_lenient(style)?;
        self.cross_check()?;
        self.resolve_period()?;
        self.resolve_fractional();
        self.resolve_instant()?;
        Ok(self)
    }

    /// Derive date and second-of-day from a parsed instant when an offset is
    /// known.
    ///
    /// Region zones carry no rules here, so an instant parsed together with
    /// a region id stays an instant.
    fn resolve_instant_fields(&mut self, _style: ResolverStyle) -> Result<(), Error> {
        if !self.fields.contains_key(&Field::InstantSeconds) {
            return Ok(());
        }
        let offset = self
            .zone
            .as_ref()
            .and_then(|zone| zone.normalized_offset())
            .map(|offset| i64::from(offset.total_seconds()))
            .or_else(|| {
                self.zone.is_none().then(|| self.fields.get(&Field::OffsetSeconds).copied()).flatten()
            });
        let Some(offset_secs) = offset else {
            return Ok(());
        };
        let instant = self
            .fields
            .remove(&Field::InstantSeconds)
            .expect("presence checked");
        let local = instant
            .checked_add(offset_secs)
            .ok_or_else(|| Error::resolve("instant out of range"))?;
        let date = IsoDate::from_epoch_day(local.div_euclid(86_400))?;
        self.update_check_date(Some(date))?;
        self.update_check_field(
            Field::InstantSeconds,
            Field::SecondOfDay,
            local.rem_euclid(86_400),
        )?;
        Ok(())
    }

    /// Resolve the date-forming fields through the chronology.
    fn resolve_date_fields(&mut self, style: ResolverStyle) -> Result<(), Error> {
        let chronology = self.chronology.unwrap_or(IsoChronology::INSTANCE);
        let date = chronology.resolve_date(&mut self.fields, style)?;
        self.update_check_date(date)
    }

    /// Resolve the time cascade: clock hours, am/pm, the `*_OF_DAY` splits
    /// and the fraction merges.
    #[allow(clippy::too_many_lines)]
    fn resolve_time_fields(&mut self, style: ResolverStyle) -> Result<(), Error> {
        let lenient = style == ResolverStyle::Lenient;
        if let Some(ch) = self.fields.remove(&Field::ClockHourOfDay) {
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && ch != 0) {
                Field::ClockHourOfDay.check_valid_value(ch)?;
            }
            let hour = if ch == 24 { 0 } else { ch };
            self.update_check_field(Field::ClockHourOfDay, Field::HourOfDay, hour)?;
        }
        if let Some(ch) = self.fields.remove(&Field::ClockHourOfAmpm) {
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && ch != 0) {
                Field::ClockHourOfAmpm.check_valid_value(ch)?;
            }
            let hour = if ch == 12 { 0 } else { ch };
            self.update_check_field(Field::ClockHourOfAmpm, Field::HourOfAmpm, hour)?;
        }
        if self.fields.contains_key(&Field::AmpmOfDay) && self.fields.contains_key(&Field::HourOfAmpm)
        {
            let ampm = self.fields.remove(&Field::AmpmOfDay).expect("presence checked");
            let hour = self.fields.remove(&Field::HourOfAmpm).expect("presence checked");
            if !lenient {
                Field::AmpmOfDay.check_valid_value(ampm)?;
                Field::HourOfAmpm.check_valid_value(hour)?;
            }
            let hour_of_day = ampm
                .checked_mul(12)
                .and_then(|half| half.checked_add(hour))
                .ok_or_else(|| Error::resolve("time arithmetic overflow"))?;
            self.update_check_field(Field::AmpmOfDay, Field::HourOfDay, hour_of_day)?;
        }
        if let Some(nod) = self.fields.remove(&Field::NanoOfDay) {
            if !lenient {
                Field::NanoOfDay.check_valid_value(nod)?;
            }
            self.update_check_field(Field::NanoOfDay, Field::HourOfDay, nod / 3_600_000_000_000)?;
            self.update_check_field(
                Field::NanoOfDay,
                Field::MinuteOfHour,
                nod / 60_000_000_000 % 60,
            )?;
            self.update_check_field(
                Field::NanoOfDay,
                Field::SecondOfMinute,
                nod / 1_000_000_000 % 60,
            )?;
            self.update_check_field(Field::NanoOfDay, Field::NanoOfSecond, nod % 1_000_000_000)?;
        }
        if let Some(cod) = self.fields.remove(&Field::MicroOfDay) {
            if !lenient {
                Field::MicroOfDay.check_valid_value(cod)?;
            }
            self.update_check_field(Field::MicroOfDay, Field::SecondOfDay, cod / 1_000_000)?;
            self.update_check_field(Field::MicroOfDay, Field::MicroOfSecond, cod % 1_000_000)?;
        }
        if let Some(lod) = self.fields.remove(&Field::MilliOfDay) {
            if !lenient {
                Field::MilliOfDay.check_valid_value(lod)?;
            }
            self.update_check_field(Field::MilliOfDay, Field::SecondOfDay, lod / 1_000)?;
            self.update_check_field(Field::MilliOfDay, Field::MilliOfSecond, lod % 1_000)?;
        }
        if let Some(sod) = self.fields.remove(&Field::SecondOfDay) {
            if !lenient {
                Field::SecondOfDay.check_valid_value(sod)?;
            }
            self.update_check_field(Field::SecondOfDay, Field::HourOfDay, sod / 3600)?;
            self.update_check_field(Field::SecondOfDay, Field::MinuteOfHour, sod / 60 % 60)?;
            self.update_check_field(Field::SecondOfDay, Field::SecondOfMinute, sod % 60)?;
        }
        if let Some(min_of_day) = self.fields.remove(&Field::MinuteOfDay) {
            if !lenient {
                Field::MinuteOfDay.check_valid_value(min_of_day)?;
            }
            self.update_check_field(Field::MinuteOfDay, Field::HourOfDay, min_of_day / 60)?;
            self.update_check_field(Field::MinuteOfDay, Field::MinuteOfHour, min_of_day % 60)?;
        }
        if !lenient {
            for field in [
                Field::MilliOfSecond,
                Field::MicroOfSecond,
                Field::NanoOfSecond,
            ] {
                if let Some(&value) = self.fields.get(&field) {
                    field.check_valid_value(value)?;
                }
            }
        }
        if self.fields.contains_key(&Field::MilliOfSecond)
            && self.fields.contains_key(&Field::MicroOfSecond)
        {
            let milli = self.fields.remove(&Field::MilliOfSecond).expect("presence checked");
            let micro = self.fields[&Field::MicroOfSecond];
            self.update_check_field(
                Field::MilliOfSecond,
                Field::MicroOfSecond,
                milli * 1_000 + micro % 1_000,
            )?;
        }
        if self.fields.contains_key(&Field::MicroOfSecond)
            && self.fields.contains_key(&Field::NanoOfSecond)
        {
            let nano = self.fields[&Field::NanoOfSecond];
            let micro = self.fields.remove(&Field::MicroOfSecond).expect("presence checked");
            self.update_check_field(
                Field::MicroOfSecond,
                Field::NanoOfSecond,
                micro * 1_000 + nano % 1_000,
            )?;
        }
        if self.fields.contains_key(&Field::MilliOfSecond)
            && self.fields.contains_key(&Field::NanoOfSecond)
        {
            let nano = self.fields[&Field::NanoOfSecond];
            let milli = self.fields.remove(&Field::MilliOfSecond).expect("presence checked");
            self.update_check_field(
                Field::MilliOfSecond,
                Field::NanoOfSecond,
                milli * 1_000_000 + nano % 1_000_000,
            )?;
        }
        if let Some(micro) = self.fields.remove(&Field::MicroOfSecond) {
            self.update_check_field(Field::MicroOfSecond, Field::NanoOfSecond, micro * 1_000)?;
        } else if let Some(milli) = self.fields.remove(&Field::MilliOfSecond) {
            self.update_check_field(Field::MilliOfSecond, Field::NanoOfSecond, milli * 1_000_000)?;
        }
        Ok(())
    }

    /// Merge hour, minute, second and nano into a time, defaulting trailing
    /// components to zero.
    fn resolve_time_lenient(&mut self, style: ResolverStyle) -> Result<(), Error> {
        if self.time.is_some() {
            return Ok(());
        }
        let Some(&hour) = self.fields.get(&Field::HourOfDay) else {
            return Ok(());
        };
        let minute = self.fields.get(&Field::MinuteOfHour).copied();
        let second = self.fields.get(&Field::SecondOfMinute).copied();
        let nano = self.fields.get(&Field::NanoOfSecond).copied();
        // a gap in the cascade cannot be defaulted
        if (minute.is_none() && (second.is_some() || nano.is_some()))
            || (minute.is_some() && second.is_none() && nano.is_some())
        {
            return Ok(());
        }
        self.resolve_time(
            style,
            hour,
            minute.unwrap_or_default(),
            second.unwrap_or_default(),
            nano.unwrap_or_default(),
        )?;
        self.fields.remove(&Field::HourOfDay);
        self.fields.remove(&Field::MinuteOfHour);
        self.fields.remove(&Field::SecondOfMinute);
        self.fields.remove(&Field::NanoOfSecond);
        Ok(())
    }

    /// Build the time value, handling lenient overflow and the smart
    /// end-of-day rollover.
    fn resolve_time(
        &mut self,
        style: ResolverStyle,
        hour: i64,
        minute: i64,
        second: i64,
        nano: i64,
    ) -> Result<(), Error> {
        if style == ResolverStyle::Lenient {
            let total = i128::from(hour) * 3_600_000_000_000
                + i128::from(minute) * 60_000_000_000
                + i128::from(second) * 1_000_000_000
                + i128::from(nano);
            let excess_days = total.div_euclid(NANOS_PER_DAY);
            let nano_of_day = total.rem_euclid(NANOS_PER_DAY);
            let excess_days = i64::try_from(excess_days)
                .map_err(|_| Error::resolve("time arithmetic overflow"))?;
            let time = IsoTime::of_nano_of_day(nano_of_day as i64)?;
            self.update_check_time(time, excess_days)
        } else {
            let mut hour = hour;
            let mut excess_days = 0;
            Field::MinuteOfHour.check_valid_value(minute)?;
            Field::NanoOfSecond.check_valid_value(nano)?;
            if style == ResolverStyle::Smart
                && hour == 24
                && minute == 0
                && second == 0
                && nano == 0
            {
                // 24:00 is the start of the next day
                hour = 0;
                excess_days = 1;
            }
            Field::HourOfDay.check_valid_value(hour)?;
            Field::SecondOfMinute.check_valid_value(second)?;
            let time = IsoTime::new(hour as u8, minute as u8, second as u8, nano as u32)?;
            self.update_check_time(time, excess_days)
        }
    }

    /// Check leftover fields against the resolved date and time, removing
    /// the ones that agree.
    fn cross_check(&mut self) -> Result<(), Error> {
        if self.fields.is_empty() {
            return Ok(());
        }
        let date = self.date;
        let time = self.time;
        let mut conflict = None;
        self.fields.retain(|&field, &mut value| {
            let derived = date
                .and_then(|date| date.field_value(field))
                .or_else(|| time.and_then(|time| time.field_value(field)));
            match derived {
                Some(derived) if derived == value => false,
                Some(derived) => {
                    if conflict.is_none() {
                        conflict = Some((field, derived, value));
                    }
                    true
                }
                None => true,
            }
        });
        match conflict {
            Some((field, derived, value)) => Err(Error::conflicting_field(field, derived, value)),
            None => Ok(()),
        }
    }

    /// Fold excess days into the date once both date and time are known.
    fn resolve_period(&mut self) -> Result<(), Error> {
        if let (Some(date), Some(_)) = (self.date, self.time) {
            if self.excess_days != 0 {
                self.date = Some(date.plus_days(self.excess_days)?);
                self.excess_days = 0;
            }
        }
        Ok(())
    }

    /// Back-fill fraction fields when seconds are present without a time.
    fn resolve_fractional(&mut self) {
        if self.time.is_none()
            && (self.fields.contains_key(&Field::InstantSeconds)
                || self.fields.contains_key(&Field::SecondOfDay)
                || self.fields.contains_key(&Field::SecondOfMinute))
        {
            if let Some(&nano) = self.fields.get(&Field::NanoOfSecond) {
                self.fields.insert(Field::MicroOfSecond, nano / 1_000);
                self.fields.insert(Field::MilliOfSecond, nano / 1_000_000);
            } else {
                self.fields.insert(Field::NanoOfSecond, 0);
                self.fields.insert(Field::MicroOfSecond, 0);
                self.fields.insert(Field::MilliOfSecond, 0);
            }
        }
    }

    /// Synthesize the instant when date, time and an offset are all known.
    fn resolve_instant(&mut self) -> Result<(), Error> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Ok(());
        };
        let offset = self
            .zone
            .as_ref()
            .and_then(|zone| zone.normalized_offset())
            .or_else(|| {
                self.fields
                    .get(&Field::OffsetSeconds)
                    .and_then(|&secs| ZoneOffset::of_total_seconds(secs as i32).ok())
            });
        let Some(offset) = offset else {
            return Ok(());
        };
        let instant = date
            .to_epoch_day()
            .checked_mul(86_400)
            .and_then(|secs| secs.checked_add(i64::from(time.second_of_day())))
            .and_then(|secs| secs.checked_sub(i64::from(offset.total_seconds())))
            .ok_or_else(|| Error::resolve("instant out of range"))?;
        self.fields.insert(Field::InstantSeconds, instant);
        Ok(())
    }

    /// Store a derived field value, detecting conflicts with earlier values.
    fn update_check_field(
        &mut self,
        _target: Field,
        change: Field,
        value: i64,
    ) -> Result<(), Error> {
        let old = self.fields.insert(change, value);
        match old {
            Some(old) if old != value => Err(Error::conflicting_field(change, old, value)),
            _ => Ok(()),
        }
    }

    /// Store a resolved date, detecting conflicts with an earlier one.
    fn update_check_date(&mut self, date: Option<IsoDate>) -> Result<(), Error> {
        match (self.date, date) {
            (Some(existing), Some(new)) if existing != new => Err(Error::resolve(alloc::format!(
                "conflict found: fields resolved to two different dates: {existing} {new}"
            ))),
            (None, Some(new)) => {
                self.date = Some(new);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Store a resolved time and excess days, detecting conflicts.
    fn update_check_time(&mut self, time: IsoTime, excess_days: i64) -> Result<(), Error> {
        if let Some(existing) = self.time {
            if existing != time {
                return Err(Error::resolve(alloc::format!(
                    "conflict found: fields resolved to two different times: {existing} {time}"
                )));
            }
            if self.excess_days != 0 && excess_days != 0 && self.excess_days != excess_days {
                return Err(Error::resolve(
                    "conflict found: fields resolved to two different excess periods",
                ));
            }
        }
        self.time = Some(time);
        self.excess_days = excess_days;
        Ok(())
    }
}
