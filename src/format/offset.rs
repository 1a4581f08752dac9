//! Offset-id elements: the nine `+HH...` patterns and the localized
//! `GMT+...` form.

use alloc::boxed::Box;
use alloc::string::String;

use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::style::TextStyle;
use crate::Error;

/// The recognized offset patterns.
///
/// Lowercase letters mark components omitted when zero, uppercase letters
/// components that are always emitted; even indexes past the first use colon
/// separators.
pub(crate) const OFFSET_PATTERNS: [&str; 9] = [
    "+HH",
    "+HHmm",
    "+HH:mm",
    "+HHMM",
    "+HH:MM",
    "+HHMMss",
    "+HH:MM:ss",
    "+HHMMSS",
    "+HH:MM:SS",
];

/// Append a two-digit number.
fn push_two_digits(buf: &mut String, value: i32) {
    buf.push(char::from(b'0' + (value / 10) as u8));
    buf.push(char::from(b'0' + (value % 10) as u8));
}

/// Read a two-digit number in `0..=59` at a byte position.
fn two_digits(text: &str, pos: usize) -> Option<(i32, usize)> {
    let bytes = text.as_bytes();
    let first = *bytes.get(pos)?;
    let second = *bytes.get(pos + 1)?;
    if !first.is_ascii_digit() || !second.is_ascii_digit() {
        return None;
    }
    let value = i32::from(first - b'0') * 10 + i32::from(second - b'0');
    if value > 59 {
        return None;
    }
    Some((value, pos + 2))
}

/// An offset element using one of the nine `+HH...` patterns.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct OffsetElement {
    /// Text printed and parsed for a zero offset, such as `Z`.
    pub(crate) no_offset_text: Box<str>,
    /// Index into [`OFFSET_PATTERNS`].
    pub(crate) pattern_type: u8,
}

/// Offset parse state: current position plus hour, minute and second.
struct OffsetParse {
    /// Current byte position.
    pos: usize,
    /// Parsed hour, minute and second components.
    values: [i32; 3],
}

impl OffsetElement {
    /// Construct an offset element, validating the pattern.
    pub(crate) fn new(pattern: &str, no_offset_text: &str) -> Result<Self, Error> {
        let pattern_type = OFFSET_PATTERNS
            .iter()
            .position(|&candidate| candidate == pattern)
            .ok_or_else(|| {
                Error::invalid_argument(alloc::format!("invalid zone offset pattern: {pattern}"))
            })?;
        Ok(Self {
            no_offset_text: no_offset_text.into(),
            pattern_type: pattern_type as u8,
        })
    }

    /// The `+HH:MM:ss` element with `Z` for zero, used by the ISO
    /// formatters.
    pub(crate) fn iso() -> Self {
        Self {
            no_offset_text: "Z".into(),
            pattern_type: 6,
        }
    }

    /// Print the offset.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(offset_secs) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        let total = offset_secs as i32;
        if total == 0 {
            buf.push_str(&self.no_offset_text);
            return Ok(true);
        }
        let ty = i32::from(self.pattern_type);
        let abs_hours = (total / 3600).abs() % 100;
        let abs_minutes = (total / 60).abs() % 60;
        let abs_seconds = total.abs() % 60;
        let buf_pos = buf.len();
        let mut output = abs_hours;
        buf.push(if total < 0 { '-' } else { '+' });
        push_two_digits(buf, abs_hours);
        if ty >= 3 || (ty >= 1 && abs_minutes > 0) {
            if ty % 2 == 0 {
                buf.push(':');
            }
            push_two_digits(buf, abs_minutes);
            output += abs_minutes;
            if ty >= 7 || (ty >= 5 && abs_seconds > 0) {
                if ty % 2 == 0 {
                    buf.push(':');
                }
                push_two_digits(buf, abs_seconds);
                output += abs_seconds;
            }
        }
        if output == 0 {
            // every printed component was suppressed or zero
            buf.truncate(buf_pos);
            buf.push_str(&self.no_offset_text);
        }
        Ok(true)
    }

    /// Parse the offset.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let length = text.len();
        let pos = position as usize;
        let no_offset_len = self.no_offset_text.len();
        if no_offset_len == 0 {
            if pos == length {
                return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, pos);
            }
        } else {
            if pos == length {
                return !position;
            }
            if let Some(end) = ctx.match_literal(text, pos, &self.no_offset_text) {
                return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, end);
            }
        }
        let sign = text[pos..].chars().next();
        if let Some(sign @ ('+' | '-')) = sign {
            let negative = if sign == '-' { -1_i64 } else { 1 };
            let mut state = OffsetParse {
                pos: pos + 1,
                values: [0; 3],
            };
            let error = self.parse_component(&mut state, 1, text, true)
                || self.parse_component(&mut state, 2, text, self.pattern_type >= 3)
                || self.parse_component(&mut state, 3, text, false);
            if !error {
                let [hours, minutes, seconds] = state.values;
                let offset_secs = negative
                    * (i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds));
                return ctx.set_parsed_field(Field::OffsetSeconds, offset_secs, pos, state.pos);
            }
        }
        if no_offset_len == 0 {
            return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, pos);
        }
        !position
    }

    /// Parse one two-digit component; returns `true` on error.
    fn parse_component(
        &self,
        state: &mut OffsetParse,
        index: i32,
        text: &str,
        required: bool,
    ) -> bool {
        let ty = i32::from(self.pattern_type);
        if (ty + 3) / 2 < index {
            // pattern does not include this component
            return false;
        }
        let mut pos = state.pos;
        if ty % 2 == 0 && index > 1 {
            if !text[pos..].starts_with(':') {
                return required;
            }
            pos += 1;
        }
        let Some((value, end)) = two_digits(text, pos) else {
            return required;
        };
        state.values[(index - 1) as usize] = value;
        state.pos = end;
        false
    }
}

/// The localized offset element, printing `GMT`, `GMT+8` or `GMT+08:00`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct LocalizedOffsetElement {
    /// `Full` prints `GMT+08:00`; `Short` prints `GMT+8`.
    pub(crate) style: TextStyle,
}

impl LocalizedOffsetElement {
    /// Print the offset behind a `GMT` prefix.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(offset_secs) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        buf.push_str("GMT");
        let total = offset_secs as i32;
        if total == 0 {
            return Ok(true);
        }
        let abs_hours = (total / 3600).abs() % 100;
        let abs_minutes = (total / 60).abs() % 60;
        let abs_seconds = total.abs() % 60;
        buf.push(if total < 0 { '-' } else { '+' });
        if self.style == TextStyle::Full {
            push_two_digits(buf, abs_hours);
            buf.push(':');
            push_two_digits(buf, abs_minutes);
            if abs_seconds > 0 {
                buf.push(':');
                push_two_digits(buf, abs_seconds);
            }
        } else {
            if abs_hours >= 10 {
                buf.push(char::from(b'0' + (abs_hours / 10) as u8));
            }
            buf.push(char::from(b'0' + (abs_hours % 10) as u8));
            if abs_minutes > 0 || abs_seconds > 0 {
                buf.push(':');
                push_two_digits(buf, abs_minutes);
                if abs_seconds > 0 {
                    buf.push(':');
                    push_two_digits(buf, abs_seconds);
                }
            }
        }
        Ok(true)
    }

    /// Parse a `GMT`-prefixed offset.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let pos = position as usize;
        let Some(mut cursor) = ctx.match_literal(text, pos, "GMT") else {
            return !position;
        };
        let sign = match text[cursor..].chars().next() {
            Some(sign @ ('+' | '-')) => sign,
            _ => return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, cursor),
        };
        let negative = if sign == '-' { -1_i64 } else { 1 };
        cursor += 1;
        let mut hours;
        let mut minutes = 0;
        let mut seconds = 0;
        let bytes = text.as_bytes();
        if self.style == TextStyle::Full {
            // fixed two-digit hour, colon, two-digit minute
            let Some((parsed_hours, after)) = two_digits(text, cursor) else {
                return !position;
            };
            hours = parsed_hours;
            if !text[after..].starts_with(':') {
                return !position;
            }
            let Some((parsed_minutes, after)) = two_digits(text, after + 1) else {
                return !position;
            };
            minutes = parsed_minutes;
            cursor = after;
            if text[cursor..].starts_with(':') {
                if let Some((parsed_seconds, after)) = two_digits(text, cursor + 1) {
                    seconds = parsed_seconds;
                    cursor = after;
                }
            }
        } else {
            // one- or two-digit hour, optional colon-separated minute and
            // second
            match bytes.get(cursor) {
                Some(digit) if digit.is_ascii_digit() => {
                    hours = i32::from(digit - b'0');
                    cursor += 1;
                }
                _ => return !position,
            }
            if let Some(digit) = bytes.get(cursor) {
                if digit.is_ascii_digit() {
                    hours = hours * 10 + i32::from(digit - b'0');
                    cursor += 1;
                }
            }
            if text[cursor..].starts_with(':') {
                if let Some((parsed_minutes, after)) = two_digits(text, cursor + 1) {
                    minutes = parsed_minutes;
                    cursor = after;
                    if text[cursor..].starts_with(':') {
                        if let Some((parsed_seconds, after)) = two_digits(text, cursor + 1) {
                            seconds = parsed_seconds;
                            cursor = after;
                        }
                    }
                }
            }
        }
        let offset_secs =
            negative * (i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds));
        ctx.set_parsed_field(Field::OffsetSeconds, offset_secs, pos, cursor)
    }
}
