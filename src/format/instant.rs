//! The ISO-8601 instant element.

use alloc::string::{String, ToString};
use alloc::vec;

use crate::date::{IsoDate, IsoTime};
use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::format::element::{CompositeElement, Element};
use crate::format::numeric::{FractionElement, NumberElement};
use crate::style::SignStyle;
use crate::Error;

/// Seconds in 10,000 proleptic Gregorian years.
const SECONDS_PER_10000_YEARS: i64 = 146_097 * 25 * 86_400;

/// Seconds from year 0 to the epoch 1970-01-01.
const SECONDS_0000_TO_1970: i64 = ((146_097 * 5) - (30 * 365 + 7)) * 86_400;

/// An element printing and parsing an ISO instant against UTC.
///
/// The epoch is split into 10,000-year blocks so years beyond the
/// four-digit range print and parse without a wider date representation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct InstantElement {
    /// Fraction digits: `-2` for groups of three, `-1` for minimal, `0..=9`
    /// for a fixed count.
    pub(crate) fractional_digits: i8,
}

impl InstantElement {
    /// Construct an instant element, validating the digit selector.
    pub(crate) fn new(fractional_digits: i8) -> Result<Self, Error> {
        if !(-2..=9).contains(&fractional_digits) {
            return Err(Error::invalid_argument(alloc::format!(
                "invalid fractional digits: {fractional_digits}"
            )));
        }
        Ok(Self { fractional_digits })
    }

    /// Print the instant.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(in_secs) = ctx.value(Field::InstantSeconds)? else {
            return Ok(false);
        };
        let in_nanos = if ctx.temporal().is_supported(Field::NanoOfSecond) {
            ctx.temporal().get_field(Field::NanoOfSecond).unwrap_or(0)
        } else {
            0
        };
        let in_nano = Field::NanoOfSecond.check_valid_value(in_nanos)?;
        if in_secs >= -SECONDS_0000_TO_1970 {
            // current era
            let zero_secs = in_secs - SECONDS_PER_10000_YEARS + SECONDS_0000_TO_1970;
            let hi = zero_secs.div_euclid(SECONDS_PER_10000_YEARS) + 1;
            let lo = zero_secs.rem_euclid(SECONDS_PER_10000_YEARS);
            let (date, time) = split_epoch_second(lo - SECONDS_0000_TO_1970)?;
            if hi > 0 {
                buf.push('+');
                buf.push_str(&hi.to_string());
            }
            push_date_time(buf, date, time);
        } else {
            // before the current era
            let zero_secs = in_secs + SECONDS_0000_TO_1970;
            let hi = zero_secs / SECONDS_PER_10000_YEARS;
            let lo = zero_secs % SECONDS_PER_10000_YEARS;
            let (date, time) = split_epoch_second(lo - SECONDS_0000_TO_1970)?;
            let pre_len = buf.len();
            push_date_time(buf, date, time);
            if hi < 0 {
                if date.year() == -10_000 {
                    buf.replace_range(pre_len..pre_len + 2, &(hi - 1).to_string());
                } else if lo == 0 {
                    buf.insert_str(pre_len, &hi.to_string());
                } else {
                    buf.insert_str(pre_len + 1, &hi.abs().to_string());
                }
            }
        }
        self.push_fraction(buf, in_nano as u32);
        buf.push('Z');
        Ok(true)
    }

    /// Append the fraction part selected by `fractional_digits`.
    fn push_fraction(&self, buf: &mut String, nano: u32) {
        match self.fractional_digits {
            -2 => {
                if nano != 0 {
                    buf.push('.');
                    if nano % 1_000_000 == 0 {
                        buf.push_str(&alloc::format!("{:03}", nano / 1_000_000));
                    } else if nano % 1_000 == 0 {
                        buf.push_str(&alloc::format!("{:06}", nano / 1_000));
                    } else {
                        buf.push_str(&alloc::format!("{nano:09}"));
                    }
                }
            }
            digits if digits > 0 || (digits == -1 && nano > 0) => {
                buf.push('.');
                let mut div = 100_000_000;
                let mut nano = nano;
                let mut printed = 0;
                while (self.fractional_digits == -1 && nano > 0)
                    || printed < i32::from(self.fractional_digits.max(0))
                {
                    let digit = nano / div;
                    buf.push(char::from(b'0' + digit as u8));
                    nano -= digit * div;
                    div /= 10;
                    printed += 1;
                }
            }
            _ => {}
        }
    }

    /// Parse an ISO instant into instant-seconds and nano-of-second.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        // parse into a fresh frame so the date/time fields do not pollute
        // the surrounding parse
        let (min_digits, max_digits) = if self.fractional_digits < 0 {
            (0, 9)
        } else {
            (self.fractional_digits as u8, self.fractional_digits as u8)
        };
        let parser = instant_parser(min_digits, max_digits);
        let mut sub_ctx = ctx.fresh();
        let end_pos = parser.parse(&mut sub_ctx, text, position);
        if end_pos < 0 {
            return end_pos;
        }
        let frame = sub_ctx.current();
        let get = |field: Field| frame.fields.get(&field).copied().unwrap_or_default();
        let year_parsed = get(Field::Year);
        let month = get(Field::MonthOfYear);
        let day = get(Field::DayOfMonth);
        let mut hour = get(Field::HourOfDay);
        let minute = get(Field::MinuteOfHour);
        let mut second = get(Field::SecondOfMinute);
        let nano = get(Field::NanoOfSecond);
        let mut days = 0;
        if hour == 24 && minute == 0 && second == 0 && nano == 0 {
            hour = 0;
            days = 1;
        } else if hour == 23 && minute == 59 && second == 60 {
            ctx.set_parsed_leap_second();
            second = 59;
        }
        let year = (year_parsed % 10_000) as i32;
        let Ok(instant_secs) = instant_seconds(
            year, month, day, hour, minute, second, days, year_parsed / 10_000,
        ) else {
            return !position;
        };
        let pos = position as usize;
        let success = ctx.set_parsed_field(Field::InstantSeconds, instant_secs, pos, end_pos as usize);
        if success < 0 {
            return success;
        }
        ctx.set_parsed_field(Field::NanoOfSecond, nano, pos, success as usize)
    }
}

/// Split an epoch second into a date and time against UTC.
fn split_epoch_second(epoch_second: i64) -> Result<(IsoDate, IsoTime), Error> {
    let epoch_day = epoch_second.div_euclid(86_400);
    let second_of_day = epoch_second.rem_euclid(86_400);
    let date = IsoDate::from_epoch_day(epoch_day)?;
    let time = IsoTime::of_nano_of_day(second_of_day * 1_000_000_000)?;
    Ok((date, time))
}

/// Append `date`T`HH:MM:SS` with seconds always present.
fn push_date_time(buf: &mut String, date: IsoDate, time: IsoTime) {
    buf.push_str(&alloc::format!(
        "{date}T{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    ));
}

/// Compute instant seconds from parsed components.
#[allow(clippy::too_many_arguments)]
fn instant_seconds(
    year: i32,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    extra_days: i64,
    hi_blocks: i64,
) -> Result<i64, Error> {
    Field::HourOfDay.check_valid_value(hour)?;
    Field::MinuteOfHour.check_valid_value(minute)?;
    Field::SecondOfMinute.check_valid_value(second)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(Error::resolve("invalid instant date"));
    }
    let date = IsoDate::new(year, month as u8, day as u8)?.plus_days(extra_days)?;
    let instant = date
        .to_epoch_day()
        .checked_mul(86_400)
        .and_then(|secs| secs.checked_add(hour * 3600 + minute * 60 + second))
        .and_then(|secs| {
            hi_blocks
                .checked_mul(SECONDS_PER_10000_YEARS)
                .and_then(|blocks| secs.checked_add(blocks))
        })
        .ok_or_else(|| Error::resolve("instant out of range"))?;
    Ok(instant)
}

/// The fixed pipeline an instant is parsed with.
fn instant_parser(min_digits: u8, max_digits: u8) -> CompositeElement {
    let two = |field| NumberElement::new(field, 2, 2, SignStyle::NotNegative);
    CompositeElement {
        children: vec![
            Element::Number(NumberElement::new(Field::Year, 4, 10, SignStyle::ExceedsPad)),
            Element::Literal('-'),
            Element::Number(two(Field::MonthOfYear)),
            Element::Literal('-'),
            Element::Number(two(Field::DayOfMonth)),
            Element::Literal('T'),
            Element::Number(two(Field::HourOfDay)),
            Element::Literal(':'),
            Element::Number(two(Field::MinuteOfHour)),
            Element::Literal(':'),
            Element::Number(two(Field::SecondOfMinute)),
            Element::Fraction(FractionElement {
                field: Field::NanoOfSecond,
                min_width: min_digits,
                max_width: max_digits,
                decimal_point: true,
            }),
            Element::Literal('Z'),
        ],
        optional: false,
    }
}
