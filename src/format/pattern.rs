//! The pattern-letter compiler, translating pattern strings into builder
//! calls.

use alloc::string::String;
use alloc::vec::Vec;

use crate::date::IsoDate;
use crate::field::Field;
use crate::format::builder::FormatterBuilder;
use crate::format::offset::OFFSET_PATTERNS;
use crate::style::{SignStyle, TextStyle};
use crate::Error;

/// The base date two-digit years are reduced against.
fn reduced_base_date() -> IsoDate {
    IsoDate::new(2000, 1, 1).expect("base date is valid")
}

/// The field a pattern letter maps to, for the letters compiled through
/// [`parse_field`].
fn field_for(letter: char) -> Option<Field> {
    let field = match letter {
        'G' => Field::Era,
        'y' => Field::YearOfEra,
        'u' => Field::Year,
        'Q' | 'q' => Field::QuarterOfYear,
        'M' | 'L' => Field::MonthOfYear,
        'D' => Field::DayOfYear,
        'd' => Field::DayOfMonth,
        'F' => Field::AlignedDayOfWeekInMonth,
        'E' | 'e' | 'c' => Field::DayOfWeek,
        'a' => Field::AmpmOfDay,
        'H' => Field::HourOfDay,
        'k' => Field::ClockHourOfDay,
        'K' => Field::HourOfAmpm,
        'h' => Field::ClockHourOfAmpm,
        'm' => Field::MinuteOfHour,
        's' => Field::SecondOfMinute,
        'S' => Field::NanoOfSecond,
        'A' => Field::MilliOfDay,
        'n' => Field::NanoOfSecond,
        'N' => Field::NanoOfDay,
        _ => return None,
    };
    Some(field)
}

/// Reject letter runs too long to be a numeric width.
fn width_u8(letter: char, count: usize) -> Result<u8, Error> {
    u8::try_from(count)
        .ok()
        .filter(|&width| width <= 19)
        .ok_or_else(|| too_many(letter))
}

/// The error for an over-long letter run.
fn too_many(letter: char) -> Error {
    Error::invalid_argument(alloc::format!("too many pattern letters: {letter}"))
}

/// Compile a pattern string into builder calls.
pub(crate) fn compile(builder: &mut FormatterBuilder, pattern: &str) -> Result<(), Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut pos = 0;
    while pos < chars.len() {
        let mut cur = chars[pos];
        if cur.is_ascii_alphabetic() {
            let start = pos;
            pos += 1;
            while pos < chars.len() && chars[pos] == cur {
                pos += 1;
            }
            let mut count = pos - start;
            // the pad modifier applies to the next letter's element
            if cur == 'p' {
                let mut pad = 0;
                if pos < chars.len() && chars[pos].is_ascii_alphabetic() {
                    pad = count;
                    cur = chars[pos];
                    let letter_start = pos;
                    pos += 1;
                    while pos < chars.len() && chars[pos] == cur {
                        pos += 1;
                    }
                    count = pos - letter_start;
                }
                if pad == 0 {
                    return Err(Error::invalid_argument(alloc::format!(
                        "pad letter 'p' must be followed by valid pad pattern: {pattern}"
                    )));
                }
                let pad = u8::try_from(pad).map_err(|_| {
                    Error::invalid_argument(alloc::format!("pad width too large: {pad}"))
                })?;
                builder.pad_next(pad)?;
            }
            compile_letter(builder, cur, count)?;
        } else if cur == '\'' {
            let start = pos;
            pos += 1;
            while pos < chars.len() {
                if chars[pos] == '\'' {
                    if pos + 1 < chars.len() && chars[pos + 1] == '\'' {
                        pos += 2;
                        continue;
                    }
                    break;
                }
                pos += 1;
            }
            if pos >= chars.len() {
                return Err(Error::invalid_argument(alloc::format!(
                    "pattern ends with an incomplete string literal: {pattern}"
                )));
            }
            let literal: String = chars[start + 1..pos].iter().collect();
            pos += 1;
            if literal.is_empty() {
                builder.append_literal('\'');
            } else {
                builder.append_literal_str(&literal.replace("''", "'"));
            }
        } else if cur == '[' {
            builder.optional_start();
            pos += 1;
        } else if cur == ']' {
            builder.optional_end().map_err(|_| {
                Error::invalid_argument("pattern invalid as it contains ] without previous [")
            })?;
            pos += 1;
        } else if cur == '{' || cur == '}' || cur == '#' {
            return Err(Error::invalid_argument(alloc::format!(
                "pattern includes reserved character: '{cur}'"
            )));
        } else {
            builder.append_literal(cur);
            pos += 1;
        }
    }
    Ok(())
}

/// Compile one letter run.
fn compile_letter(builder: &mut FormatterBuilder, cur: char, count: usize) -> Result<(), Error> {
    if let Some(field) = field_for(cur) {
        return parse_field(builder, cur, count, field);
    }
    match cur {
        'z' => {
            if count > 4 {
                return Err(too_many(cur));
            }
            let style = if count == 4 {
                TextStyle::Full
            } else {
                TextStyle::Short
            };
            builder.append_zone_text(style)?;
        }
        'V' => {
            if count != 2 {
                return Err(Error::invalid_argument("pattern letter count must be 2: V"));
            }
            builder.append_zone_id();
        }
        'Z' => match count {
            1..=3 => {
                builder.append_offset("+HHMM", "+0000")?;
            }
            4 => {
                builder.append_localized_offset(TextStyle::Full)?;
            }
            5 => {
                builder.append_offset("+HH:MM:ss", "Z")?;
            }
            _ => return Err(too_many(cur)),
        },
        'O' => match count {
            1 => {
                builder.append_localized_offset(TextStyle::Short)?;
            }
            4 => {
                builder.append_localized_offset(TextStyle::Full)?;
            }
            _ => {
                return Err(Error::invalid_argument(
                    "pattern letter count must be 1 or 4: O",
                ));
            }
        },
        'X' => {
            if count > 5 {
                return Err(too_many(cur));
            }
            builder.append_offset(OFFSET_PATTERNS[count + usize::from(count != 1)], "Z")?;
        }
        'x' => {
            if count > 5 {
                return Err(too_many(cur));
            }
            let zero = if count == 1 {
                "+00"
            } else if count % 2 == 0 {
                "+0000"
            } else {
                "+00:00"
            };
            builder.append_offset(OFFSET_PATTERNS[count + usize::from(count != 1)], zero)?;
        }
        'W' => {
            if count > 1 {
                return Err(too_many(cur));
            }
            builder.append_value_with(Field::AlignedWeekOfMonth, 1, 2, SignStyle::NotNegative)?;
        }
        'w' => {
            if count > 2 {
                return Err(too_many(cur));
            }
            builder.append_value_with(
                Field::WeekOfWeekBasedYear,
                width_u8(cur, count)?,
                2,
                SignStyle::NotNegative,
            )?;
        }
        'Y' => {
            if count == 2 {
                builder.append_value_reduced_by_date(
                    Field::WeekBasedYear,
                    2,
                    2,
                    reduced_base_date(),
                )?;
            } else {
                let sign = if count < 4 {
                    SignStyle::Normal
                } else {
                    SignStyle::ExceedsPad
                };
                builder.append_value_with(Field::WeekBasedYear, width_u8(cur, count)?, 19, sign)?;
            }
        }
        _ => {
            return Err(Error::invalid_argument(alloc::format!(
                "unknown pattern letter: {cur}"
            )));
        }
    }
    Ok(())
}

/// Compile a letter run whose field is known.
fn parse_field(
    builder: &mut FormatterBuilder,
    cur: char,
    count: usize,
    field: Field,
) -> Result<(), Error> {
    match cur {
        'u' | 'y' => {
            if count == 2 {
                builder.append_value_reduced_by_date(field, 2, 2, reduced_base_date())?;
            } else {
                let sign = if count < 4 {
                    SignStyle::Normal
                } else {
                    SignStyle::ExceedsPad
                };
                builder.append_value_with(field, width_u8(cur, count)?, 19, sign)?;
            }
        }
        'c' | 'L' | 'q' | 'M' | 'Q' | 'E' | 'e' => {
            if cur == 'c' && count == 2 {
                return Err(Error::invalid_argument("invalid pattern \"cc\""));
            }
            let standalone = matches!(cur, 'c' | 'L' | 'q');
            match count {
                1 | 2 => {
                    if cur == 'c' || cur == 'e' {
                        builder.append_value_with(
                            field,
                            count as u8,
                            2,
                            SignStyle::NotNegative,
                        )?;
                    } else if cur == 'E' {
                        builder.append_text_styled(field, TextStyle::Short);
                    } else if count == 1 {
                        builder.append_value(field);
                    } else {
                        builder.append_value_fixed(field, 2)?;
                    }
                }
                3 => {
                    builder.append_text_styled(
                        field,
                        if standalone {
                            TextStyle::ShortStandalone
                        } else {
                            TextStyle::Short
                        },
                    );
                }
                4 => {
                    builder.append_text_styled(
                        field,
                        if standalone {
                            TextStyle::FullStandalone
                        } else {
                            TextStyle::Full
                        },
                    );
                }
                5 => {
                    builder.append_text_styled(
                        field,
                        if standalone {
                            TextStyle::NarrowStandalone
                        } else {
                            TextStyle::Narrow
                        },
                    );
                }
                _ => return Err(too_many(cur)),
            }
        }
        'G' => match count {
            1..=3 => {
                builder.append_text_styled(field, TextStyle::Short);
            }
            4 => {
                builder.append_text_styled(field, TextStyle::Full);
            }
            5 => {
                builder.append_text_styled(field, TextStyle::Narrow);
            }
            _ => return Err(too_many(cur)),
        },
        'S' => {
            builder.append_fraction(Field::NanoOfSecond, width_u8(cur, count)?, width_u8(cur, count)?, false)?;
        }
        'F' => {
            if count == 1 {
                builder.append_value(field);
            } else {
                return Err(too_many(cur));
            }
        }
        'd' | 'h' | 'H' | 'k' | 'K' | 'm' | 's' => {
            if count == 1 {
                builder.append_value(field);
            } else if count == 2 {
                builder.append_value_fixed(field, 2)?;
            } else {
                return Err(too_many(cur));
            }
        }
        'D' => {
            if count == 1 {
                builder.append_value(field);
            } else if count <= 3 {
                builder.append_value_fixed(field, count as u8)?;
            } else {
                return Err(too_many(cur));
            }
        }
        _ => {
            if count == 1 {
                builder.append_value(field);
            } else {
                builder.append_value_fixed(field, width_u8(cur, count)?)?;
            }
        }
    }
    Ok(())
}
