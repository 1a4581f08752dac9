//! Calendar systems.
//!
//! Only the ISO calendar ships with the crate; other chronologies are
//! external collaborators that implement the [`Chronology`] trait.

use alloc::collections::BTreeMap;
use core::fmt;

use crate::date::{days_in_month, IsoDate};
use crate::field::Field;
use crate::style::ResolverStyle;
use crate::Error;

/// A calendar system able to construct dates from resolved field values.
pub trait Chronology: fmt::Debug + Send + Sync {
    /// The chronology identifier, such as `ISO`.
    fn id(&self) -> &'static str;

    /// Construct a date from a count of days since 1970-01-01.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the epoch day is out of range.
    fn date_from_epoch_day(&self, epoch_day: i64) -> Result<IsoDate, Error>;

    /// Resolve a date from the field map, removing the fields used.
    ///
    /// Returns `Ok(None)` if the map holds no combination that forms a date.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] on conflicting or out-of-range values.
    fn resolve_date(
        &self,
        fields: &mut BTreeMap<Field, i64>,
        style: ResolverStyle,
    ) -> Result<Option<IsoDate>, Error>;
}

/// Compare two chronologies by identifier.
pub(crate) fn chronology_eq(a: &dyn Chronology, b: &dyn Chronology) -> bool {
    a.id() == b.id()
}

/// The ISO-8601 calendar system, i.e. the proleptic Gregorian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IsoChronology;

impl IsoChronology {
    /// The shared instance.
    pub const INSTANCE: &'static IsoChronology = &IsoChronology;
}

impl Chronology for IsoChronology {
    fn id(&self) -> &'static str {
        "ISO"
    }

    fn date_from_epoch_day(&self, epoch_day: i64) -> Result<IsoDate, Error> {
        IsoDate::from_epoch_day(epoch_day)
    }

    fn resolve_date(
        &self,
        fields: &mut BTreeMap<Field, i64>,
        style: ResolverStyle,
    ) -> Result<Option<IsoDate>, Error> {
        if let Some(epoch_day) = fields.remove(&Field::EpochDay) {
            return IsoDate::from_epoch_day(epoch_day).map(Some);
        }
        resolve_proleptic_month(fields, style)?;
        resolve_year_of_era(fields, style)?;
        if fields.contains_key(&Field::Year) {
            if fields.contains_key(&Field::MonthOfYear) {
                if fields.contains_key(&Field::DayOfMonth) {
                    return resolve_ymd(fields, style).map(Some);
                }
                if fields.contains_key(&Field::AlignedWeekOfMonth) {
                    if fields.contains_key(&Field::AlignedDayOfWeekInMonth) {
                        return resolve_aligned(fields, style, AlignedForm::MonthAlignedDay)
                            .map(Some);
                    }
                    if fields.contains_key(&Field::DayOfWeek) {
                        return resolve_aligned(fields, style, AlignedForm::MonthDayOfWeek)
                            .map(Some);
                    }
                }
            }
            if fields.contains_key(&Field::DayOfYear) {
                return resolve_yd(fields, style).map(Some);
            }
            if fields.contains_key(&Field::AlignedWeekOfYear) {
                if fields.contains_key(&Field::AlignedDayOfWeekInYear) {
                    return resolve_aligned(fields, style, AlignedForm::YearAlignedDay).map(Some);
                }
                if fields.contains_key(&Field::DayOfWeek) {
                    return resolve_aligned(fields, style, AlignedForm::YearDayOfWeek).map(Some);
                }
            }
        }
        if fields.contains_key(&Field::WeekBasedYear)
            && fields.contains_key(&Field::WeekOfWeekBasedYear)
            && fields.contains_key(&Field::DayOfWeek)
        {
            return resolve_week_based(fields, style).map(Some);
        }
        Ok(None)
    }
}

/// Insert a derived field value, detecting conflicts with earlier values.
fn add_field_value(
    fields: &mut BTreeMap<Field, i64>,
    field: Field,
    value: i64,
) -> Result<(), Error> {
    if let Some(&old) = fields.get(&field) {
        if old != value {
            return Err(Error::conflicting_field(field, old, value));
        }
    }
    fields.insert(field, value);
    Ok(())
}

/// Split a proleptic-month value into year and month-of-year.
fn resolve_proleptic_month(
    fields: &mut BTreeMap<Field, i64>,
    style: ResolverStyle,
) -> Result<(), Error> {
    if let Some(pmonth) = fields.remove(&Field::ProlepticMonth) {
        if style != ResolverStyle::Lenient {
            Field::ProlepticMonth.check_valid_value(pmonth)?;
        }
        add_field_value(fields, Field::MonthOfYear, pmonth.rem_euclid(12) + 1)?;
        add_field_value(fields, Field::Year, pmonth.div_euclid(12))?;
    }
    Ok(())
}

/// Combine year-of-era and era into a proleptic year.
fn resolve_year_of_era(
    fields: &mut BTreeMap<Field, i64>,
    style: ResolverStyle,
) -> Result<(), Error> {
    let Some(yoe) = fields.remove(&Field::YearOfEra) else {
        if let Some(&era) = fields.get(&Field::Era) {
            Field::Era.check_valid_value(era)?;
        }
        return Ok(());
    };
    if style != ResolverStyle::Lenient {
        Field::YearOfEra.check_valid_value(yoe)?;
    }
    match fields.remove(&Field::Era) {
        None => {
            let year = fields.get(&Field::Year).copied();
            if style == ResolverStyle::Strict {
                // era unknown in strict mode; only combine when a year fixes it
                if let Some(year) = year {
                    let proleptic = if year > 0 { yoe } else { checked_sub(1, yoe)? };
                    add_field_value(fields, Field::Year, proleptic)?;
                } else {
                    fields.insert(Field::YearOfEra, yoe);
                }
            } else {
                let proleptic = match year {
                    None => yoe,
                    Some(year) if year > 0 => yoe,
                    Some(_) => checked_sub(1, yoe)?,
                };
                add_field_value(fields, Field::Year, proleptic)?;
            }
        }
        Some(1) => add_field_value(fields, Field::Year, yoe)?,
        Some(0) => add_field_value(fields, Field::Year, checked_sub(1, yoe)?)?,
        Some(era) => {
            return Err(Error::resolve(alloc::format!(
                "invalid value for Era: {era}"
            )));
        }
    }
    Ok(())
}

/// Resolve year + month + day-of-month.
fn resolve_ymd(fields: &mut BTreeMap<Field, i64>, style: ResolverStyle) -> Result<IsoDate, Error> {
    let year = Field::Year.check_valid_value(remove(fields, Field::Year))?;
    if style == ResolverStyle::Lenient {
        let months = checked_sub(remove(fields, Field::MonthOfYear), 1)?;
        let days = checked_sub(remove(fields, Field::DayOfMonth), 1)?;
        return IsoDate::new(year as i32, 1, 1)?
            .plus_months(months)?
            .plus_days(days);
    }
    let month = Field::MonthOfYear.check_valid_value(remove(fields, Field::MonthOfYear))?;
    let mut day = Field::DayOfMonth.check_valid_value(remove(fields, Field::DayOfMonth))?;
    if style == ResolverStyle::Smart {
        day = day.min(i64::from(days_in_month(year, month as u8)));
    }
    IsoDate::new(year as i32, month as u8, day as u8)
}

/// Resolve year + day-of-year.
fn resolve_yd(fields: &mut BTreeMap<Field, i64>, style: ResolverStyle) -> Result<IsoDate, Error> {
    let year = Field::Year.check_valid_value(remove(fields, Field::Year))?;
    if style == ResolverStyle::Lenient {
        let days = checked_sub(remove(fields, Field::DayOfYear), 1)?;
        return IsoDate::new(year as i32, 1, 1)?.plus_days(days);
    }
    let doy = Field::DayOfYear.check_valid_value(remove(fields, Field::DayOfYear))?;
    IsoDate::of_year_day(year as i32, doy as u16)
}

/// The four aligned-week date forms.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum AlignedForm {
    /// Year + month + aligned-week + aligned-day.
    MonthAlignedDay,
    /// Year + month + aligned-week + day-of-week.
    MonthDayOfWeek,
    /// Year + aligned-week-of-year + aligned-day.
    YearAlignedDay,
    /// Year + aligned-week-of-year + day-of-week.
    YearDayOfWeek,
}

/// Resolve the aligned-week date forms.
fn resolve_aligned(
    fields: &mut BTreeMap<Field, i64>,
    style: ResolverStyle,
    form: AlignedForm,
) -> Result<IsoDate, Error> {
    let in_month = matches!(
        form,
        AlignedForm::MonthAlignedDay | AlignedForm::MonthDayOfWeek
    );
    let week_field = if in_month {
        Field::AlignedWeekOfMonth
    } else {
        Field::AlignedWeekOfYear
    };
    let day_field = match form {
        AlignedForm::MonthAlignedDay => Field::AlignedDayOfWeekInMonth,
        AlignedForm::YearAlignedDay => Field::AlignedDayOfWeekInYear,
        AlignedForm::MonthDayOfWeek | AlignedForm::YearDayOfWeek => Field::DayOfWeek,
    };
    let year = Field::Year.check_valid_value(remove(fields, Field::Year))?;
    if style == ResolverStyle::Lenient {
        let months = if in_month {
            checked_sub(remove(fields, Field::MonthOfYear), 1)?
        } else {
            0
        };
        let weeks = checked_sub(remove(fields, week_field), 1)?;
        let days = checked_sub(remove(fields, day_field), 1)?;
        let base = IsoDate::new(year as i32, 1, 1)?.plus_months(months)?;
        return base.plus_days(checked_add(checked_mul(weeks, 7)?, days)?);
    }
    let month = if in_month {
        Field::MonthOfYear.check_valid_value(remove(fields, Field::MonthOfYear))? as u8
    } else {
        1
    };
    let week = week_field.check_valid_value(remove(fields, week_field))?;
    let day = day_field.check_valid_value(remove(fields, day_field))?;
    let base = IsoDate::new(year as i32, month, 1)?;
    let date = match form {
        AlignedForm::MonthAlignedDay | AlignedForm::YearAlignedDay => {
            base.plus_days((week - 1) * 7 + (day - 1))?
        }
        AlignedForm::MonthDayOfWeek | AlignedForm::YearDayOfWeek => base
            .plus_days((week - 1) * 7)?
            .next_or_same_day_of_week(day as u8)?,
    };
    if style == ResolverStyle::Strict {
        if in_month && i64::from(date.month()) != i64::from(month) {
            return Err(Error::resolve(
                "strict resolution rejected a date in a different month",
            ));
        }
        if !in_month && i64::from(date.year()) != year {
            return Err(Error::resolve(
                "strict resolution rejected a date in a different year",
            ));
        }
    }
    Ok(date)
}

/// Resolve week-based-year + week + day-of-week.
fn resolve_week_based(
    fields: &mut BTreeMap<Field, i64>,
    style: ResolverStyle,
) -> Result<IsoDate, Error> {
    let wby = Field::WeekBasedYear.check_valid_value(remove(fields, Field::WeekBasedYear))?;
    let week = remove(fields, Field::WeekOfWeekBasedYear);
    let dow = remove(fields, Field::DayOfWeek);
    // The first week of the week-based year contains January 4th.
    let jan4 = IsoDate::new(wby as i32, 1, 4)?;
    let week_one = jan4.plus_days(1 - i64::from(jan4.day_of_week()))?;
    if style == ResolverStyle::Lenient {
        let days = checked_add(checked_mul(checked_sub(week, 1)?, 7)?, checked_sub(dow, 1)?)?;
        return week_one.plus_days(days);
    }
    let week = Field::WeekOfWeekBasedYear.check_valid_value(week)?;
    let dow = Field::DayOfWeek.check_valid_value(dow)?;
    let date = week_one.plus_days((week - 1) * 7 + (dow - 1))?;
    if style == ResolverStyle::Strict && i64::from(date.week_based_year_and_week().0) != wby {
        return Err(Error::resolve(
            "strict resolution rejected a date in a different week-based year",
        ));
    }
    Ok(date)
}

/// Remove a field the caller has already checked is present.
fn remove(fields: &mut BTreeMap<Field, i64>, field: Field) -> i64 {
    fields.remove(&field).unwrap_or_default()
}

/// Checked arithmetic mapped onto resolver errors.
fn checked_sub(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_sub(b)
        .ok_or_else(|| Error::resolve("date arithmetic overflow"))
}

fn checked_add(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_add(b)
        .ok_or_else(|| Error::resolve("date arithmetic overflow"))
}

fn checked_mul(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_mul(b)
        .ok_or_else(|| Error::resolve("date arithmetic overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        pairs: &[(Field, i64)],
        style: ResolverStyle,
    ) -> Result<Option<IsoDate>, Error> {
        let mut fields: BTreeMap<Field, i64> = pairs.iter().copied().collect();
        IsoChronology::INSTANCE.resolve_date(&mut fields, style)
    }

    #[test]
    fn test_resolve_ymd() {
        let date = resolve(
            &[
                (Field::Year, 2012),
                (Field::MonthOfYear, 7),
                (Field::DayOfMonth, 27),
            ],
            ResolverStyle::Strict,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(2012, 7, 27).unwrap());
    }

    #[test]
    fn test_resolve_ymd_styles() {
        let fields = [
            (Field::Year, 2011),
            (Field::MonthOfYear, 2),
            (Field::DayOfMonth, 29),
        ];
        assert!(resolve(&fields, ResolverStyle::Strict).is_err());
        // SMART clamps to the end of February.
        let date = resolve(&fields, ResolverStyle::Smart).unwrap().unwrap();
        assert_eq!(date, IsoDate::new(2011, 2, 28).unwrap());
        // LENIENT counts on from the first of the month.
        let date = resolve(&fields, ResolverStyle::Lenient).unwrap().unwrap();
        assert_eq!(date, IsoDate::new(2011, 3, 1).unwrap());
    }

    #[test]
    fn test_resolve_epoch_day() {
        let date = resolve(&[(Field::EpochDay, 14_060)], ResolverStyle::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(date, IsoDate::new(2008, 6, 30).unwrap());
    }

    #[test]
    fn test_resolve_proleptic_month() {
        let date = resolve(
            &[(Field::ProlepticMonth, 2012 * 12 + 6), (Field::DayOfMonth, 27)],
            ResolverStyle::Strict,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(2012, 7, 27).unwrap());
    }

    #[test]
    fn test_resolve_year_of_era() {
        let date = resolve(
            &[
                (Field::Era, 0),
                (Field::YearOfEra, 95),
                (Field::MonthOfYear, 1),
                (Field::DayOfMonth, 2),
            ],
            ResolverStyle::Strict,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(-94, 1, 2).unwrap());
        assert!(resolve(&[(Field::Era, 2)], ResolverStyle::Strict).is_err());
    }

    #[test]
    fn test_resolve_year_day() {
        let date = resolve(
            &[(Field::Year, 2008), (Field::DayOfYear, 182)],
            ResolverStyle::Strict,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(2008, 6, 30).unwrap());
        assert!(resolve(
            &[(Field::Year, 2007), (Field::DayOfYear, 366)],
            ResolverStyle::Smart
        )
        .is_err());
    }

    #[test]
    fn test_resolve_week_based() {
        let date = resolve(
            &[
                (Field::WeekBasedYear, 2009),
                (Field::WeekOfWeekBasedYear, 1),
                (Field::DayOfWeek, 1),
            ],
            ResolverStyle::Strict,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(2008, 12, 29).unwrap());
    }

    #[test]
    fn test_resolve_aligned_week() {
        let date = resolve(
            &[
                (Field::Year, 2012),
                (Field::MonthOfYear, 7),
                (Field::AlignedWeekOfMonth, 4),
                (Field::DayOfWeek, 5),
            ],
            ResolverStyle::Smart,
        )
        .unwrap()
        .unwrap();
        assert_eq!(date, IsoDate::new(2012, 7, 27).unwrap());
    }

    #[test]
    fn test_conflict_detection() {
        let result = resolve(
            &[
                (Field::ProlepticMonth, 2012 * 12 + 6),
                (Field::Year, 2013),
                (Field::DayOfMonth, 1),
            ],
            ResolverStyle::Strict,
        );
        assert!(matches!(result, Err(Error::ConflictingField { .. })));
    }
}
