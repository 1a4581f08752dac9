//! Numeric printer/parser elements: plain values, reduced values and
//! fractions.

use alloc::string::{String, ToString};

use crate::date::IsoDate;
use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::style::SignStyle;
use crate::Error;

/// Powers of ten up to `10^18`.
pub(crate) const POW10: [i64; 19] = {
    let mut table = [1_i64; 19];
    let mut i = 1;
    while i < 19 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// A numeric field element.
///
/// `subsequent_width` implements adjacent-value parsing: `-1` marks an
/// element whose width is fixed because it follows a variable-width element,
/// while a positive value is the total width of following fixed elements
/// this element must leave digits for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct NumberElement {
    /// Field to print and parse.
    pub(crate) field: Field,
    /// Minimum number of digits, `1..=19`.
    pub(crate) min_width: u8,
    /// Maximum number of digits, `min_width..=19`.
    pub(crate) max_width: u8,
    /// Sign policy.
    pub(crate) sign_style: SignStyle,
    /// Adjacent-parsing state; see the type docs.
    pub(crate) subsequent_width: i16,
}

impl NumberElement {
    /// Construct a numeric element with no adjacent-parsing state.
    pub(crate) fn new(field: Field, min_width: u8, max_width: u8, sign_style: SignStyle) -> Self {
        Self {
            field,
            min_width,
            max_width,
            sign_style,
            subsequent_width: 0,
        }
    }

    /// A copy marked as fixed-width for adjacent parsing.
    pub(crate) fn with_fixed_width(mut self) -> Self {
        self.subsequent_width = -1;
        self
    }

    /// A copy reserving `width` further digits for following fixed-width
    /// elements.
    pub(crate) fn with_subsequent_width(mut self, width: u8) -> Self {
        self.subsequent_width += i16::from(width);
        self
    }

    /// Whether the element parses a fixed run of digits.
    fn is_fixed_width(&self) -> bool {
        self.subsequent_width == -1
            || (self.subsequent_width > 0
                && self.min_width == self.max_width
                && self.sign_style == SignStyle::NotNegative)
    }

    /// Print the field value.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.field)? else {
            return Ok(false);
        };
        self.print_value(ctx, buf, value)?;
        Ok(true)
    }

    /// Print an already-read value with this element's width and sign rules.
    pub(crate) fn print_value(
        &self,
        ctx: &PrintContext<'_>,
        buf: &mut String,
        value: i64,
    ) -> Result<(), Error> {
        let symbols = ctx.symbols();
        let digits = value.unsigned_abs().to_string();
        if digits.len() > usize::from(self.max_width) {
            return Err(Error::Unsupported(alloc::format!(
                "field {} cannot be printed as the value {} exceeds the maximum print width of {}",
                self.field,
                value,
                self.max_width
            )));
        }
        if value >= 0 {
            match self.sign_style {
                SignStyle::ExceedsPad
                    if self.min_width < 19 && value >= POW10[usize::from(self.min_width)] =>
                {
                    buf.push(symbols.positive_sign());
                }
                SignStyle::Always => buf.push(symbols.positive_sign()),
                _ => {}
            }
        } else {
            match self.sign_style {
                SignStyle::Normal | SignStyle::ExceedsPad | SignStyle::Always => {
                    buf.push(symbols.negative_sign());
                }
                SignStyle::NotNegative | SignStyle::Never => {
                    return Err(Error::Unsupported(alloc::format!(
                        "field {} cannot be printed as the value {} is negative",
                        self.field,
                        value
                    )));
                }
            }
        }
        for _ in digits.len()..usize::from(self.min_width) {
            buf.push(symbols.zero_digit());
        }
        buf.push_str(&symbols.convert_number_to_i18n(&digits));
        Ok(())
    }

    /// Parse digits into the field.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        parse_number(self, ctx, text, position, |ctx, value, error_pos, success_pos, _| {
            ctx.set_parsed_field(self.field, value, error_pos, success_pos)
        })
    }
}

/// Shared numeric parse algorithm.
///
/// `set_value` receives the context, the signed value, the error and success
/// byte positions, and the count of digits consumed.
fn parse_number(
    element: &NumberElement,
    ctx: &mut ParseContext,
    text: &str,
    position: isize,
    set_value: impl FnOnce(&mut ParseContext, i64, usize, usize, u32) -> isize,
) -> isize {
    parse_number_fixed(element, element.is_fixed_width(), ctx, text, position, set_value)
}

/// Numeric parse algorithm with an explicit fixed-width policy, so the
/// reduced element can relax fixed-width handling in lenient mode.
fn parse_number_fixed(
    element: &NumberElement,
    fixed: bool,
    ctx: &mut ParseContext,
    text: &str,
    position: isize,
    set_value: impl FnOnce(&mut ParseContext, i64, usize, usize, u32) -> isize,
) -> isize {
    let length = text.len();
    let sign_pos = position as usize;
    if sign_pos >= length {
        return !position;
    }
    let symbols = ctx.symbols();
    let first = match text[sign_pos..].chars().next() {
        Some(ch) => ch,
        None => return !position,
    };
    let mut negative = false;
    let mut positive = false;
    let mut digit_start = sign_pos;
    if first == symbols.positive_sign() || first == symbols.negative_sign() {
        let is_positive = first == symbols.positive_sign();
        if !element.sign_style.parse(
            is_positive,
            ctx.is_strict(),
            element.min_width == element.max_width,
        ) {
            return !position;
        }
        positive = is_positive;
        negative = !is_positive;
        digit_start += first.len_utf8();
    } else if element.sign_style == SignStyle::Always && ctx.is_strict() {
        return !position;
    }
    let strict_widths = ctx.is_strict() || fixed;
    let effective_min = if strict_widths {
        i32::from(element.min_width)
    } else {
        1
    };
    let mut effective_max = if strict_widths {
        i32::from(element.max_width)
    } else {
        9
    } + i32::from(element.subsequent_width.max(0));
    let mut total: i128 = 0;
    let mut pos = digit_start;
    let mut count = 0_i32;
    let mut last_digit_len = 1;
    for pass in 0..2 {
        total = 0;
        pos = digit_start;
        count = 0;
        while count < effective_max {
            let Some(ch) = text[pos..].chars().next() else {
                break;
            };
            let digit = symbols.convert_to_digit(ch);
            if digit < 0 {
                break;
            }
            total = total
                .checked_mul(10)
                .and_then(|t| t.checked_add(i128::from(digit)))
                .unwrap_or(i128::MAX);
            last_digit_len = ch.len_utf8();
            pos += last_digit_len;
            count += 1;
        }
        if count < effective_min {
            return !(digit_start as isize);
        }
        if pass == 0 && element.subsequent_width > 0 {
            // leave digits for the following fixed-width elements, then
            // rescan with the corrected maximum
            effective_max = (count - i32::from(element.subsequent_width)).max(effective_min);
        } else {
            break;
        }
    }
    if negative {
        if total == 0 && ctx.is_strict() {
            // negative zero is not a number
            return !(sign_pos as isize);
        }
    } else if element.sign_style == SignStyle::ExceedsPad && ctx.is_strict() {
        if positive {
            if count <= i32::from(element.min_width) {
                return !(sign_pos as isize);
            }
        } else if count > i32::from(element.min_width) {
            return !(digit_start as isize);
        }
    }
    let limit = i128::from(i64::MAX) + i128::from(negative);
    if total > limit {
        total /= 10;
        pos -= last_digit_len;
        count -= 1;
    }
    let signed = if negative { -total } else { total };
    set_value(ctx, signed as i64, digit_start, pos, count as u32)
}

/// A reduced numeric element, typically a two-digit year.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct ReducedElement {
    /// Underlying numeric element; its sign style is always `NotNegative`.
    pub(crate) number: NumberElement,
    /// Width of the reduced form, `1..=10`.
    pub(crate) width: u8,
    /// Base value the reduced digits are expanded against.
    pub(crate) base_value: i64,
    /// Base date resolving the base value through the effective chronology.
    pub(crate) base_date: Option<IsoDate>,
}

impl ReducedElement {
    /// Construct a reduced element.
    pub(crate) fn new(
        field: Field,
        width: u8,
        max_width: u8,
        base_value: i64,
        base_date: Option<IsoDate>,
    ) -> Self {
        Self {
            number: NumberElement::new(field, width, max_width, SignStyle::NotNegative),
            width,
            base_value,
            base_date,
        }
    }

    /// A copy marked as fixed-width for adjacent parsing.
    pub(crate) fn with_fixed_width(mut self) -> Self {
        self.number = self.number.with_fixed_width();
        self
    }

    /// A copy reserving `width` further digits.
    pub(crate) fn with_subsequent_width(mut self, width: u8) -> Self {
        self.number = self.number.with_subsequent_width(width);
        self
    }

    /// The base value, resolved through the base date when one is set.
    fn effective_base(&self) -> i64 {
        match self.base_date {
            Some(date) => date.field_value(self.number.field).unwrap_or(self.base_value),
            None => self.base_value,
        }
    }

    /// Print the reduced form of the field value.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.number.field)? else {
            return Ok(false);
        };
        let base = self.effective_base();
        let range = POW10[usize::from(self.width)];
        let reduced = if value >= base && value < base + range {
            value.abs() % range
        } else {
            value.abs() % POW10[usize::from(self.number.max_width)]
        };
        self.number.print_value(ctx, buf, reduced)?;
        Ok(true)
    }

    /// Parse digits, expanding a width-sized run against the base value.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        // fixed-width handling only applies to the reduced form in strict
        // mode, so a lenient parse can still pick up a full-length value
        let fixed = ctx.is_strict() && self.number.is_fixed_width();
        let field = self.number.field;
        let width = self.width;
        let base = self.effective_base();
        parse_number_fixed(
            &self.number,
            fixed,
            ctx,
            text,
            position,
            move |ctx, value, error_pos, success_pos, digits| {
                let mut value = value;
                if digits == u32::from(width) && value >= 0 {
                    let range = POW10[usize::from(width)];
                    let last_part = base % range;
                    let base_part = base - last_part;
                    value = if base > 0 {
                        base_part + value
                    } else {
                        base_part - value
                    };
                    if value < base {
                        value += range;
                    }
                }
                ctx.set_parsed_field(field, value, error_pos, success_pos)
            },
        )
    }
}

/// A fractional element over a fixed-range field.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct FractionElement {
    /// Field to print and parse; must have a fixed range.
    pub(crate) field: Field,
    /// Minimum number of fraction digits, `0..=9`.
    pub(crate) min_width: u8,
    /// Maximum number of fraction digits, `1..=9`.
    pub(crate) max_width: u8,
    /// Whether the decimal separator is printed and required.
    pub(crate) decimal_point: bool,
}

impl FractionElement {
    /// Print the field value as a fraction of its range.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.field)? else {
            return Ok(false);
        };
        self.field.check_valid_value(value)?;
        let symbols = ctx.symbols();
        let range = self.field.range();
        let span = i128::from(range.max()) - i128::from(range.min()) + 1;
        let mut numerator = i128::from(value) - i128::from(range.min());
        // fraction digits by long division, truncating like a floor-rounded
        // scale-nine decimal
        let mut digits = [0_u8; 9];
        let mut scale = 0;
        for (index, digit) in digits.iter_mut().enumerate() {
            numerator *= 10;
            *digit = (numerator / span) as u8;
            numerator %= span;
            if *digit != 0 {
                scale = index + 1;
            }
        }
        if scale == 0 {
            if self.min_width > 0 {
                if self.decimal_point {
                    buf.push(symbols.decimal_separator());
                }
                for _ in 0..self.min_width {
                    buf.push(symbols.zero_digit());
                }
            }
            return Ok(true);
        }
        let output_scale = scale
            .max(usize::from(self.min_width))
            .min(usize::from(self.max_width));
        if self.decimal_point {
            buf.push(symbols.decimal_separator());
        }
        let ascii: String = digits[..output_scale]
            .iter()
            .map(|&digit| char::from(b'0' + digit))
            .collect();
        buf.push_str(&symbols.convert_number_to_i18n(&ascii));
        Ok(true)
    }

    /// Parse a fraction into the field.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let effective_min = if ctx.is_strict() {
            u32::from(self.min_width)
        } else {
            0
        };
        let effective_max = if ctx.is_strict() {
            u32::from(self.max_width)
        } else {
            9
        };
        let length = text.len();
        let mut pos = position as usize;
        if pos == length {
            // valid if the whole field is optional, invalid if a minimum
            // width is required
            return if effective_min > 0 { !position } else { position };
        }
        let symbols = ctx.symbols();
        if self.decimal_point {
            let Some(ch) = text[pos..].chars().next() else {
                return !position;
            };
            if ch != symbols.decimal_separator() {
                return if effective_min > 0 { !position } else { position };
            }
            pos += ch.len_utf8();
        }
        let digit_start = pos;
        let mut total: i128 = 0;
        let mut count = 0_u32;
        while count < effective_max {
            let Some(ch) = text[pos..].chars().next() else {
                break;
            };
            let digit = symbols.convert_to_digit(ch);
            if digit < 0 {
                break;
            }
            total = total * 10 + i128::from(digit);
            pos += ch.len_utf8();
            count += 1;
        }
        if count < effective_min {
            return !(digit_start as isize);
        }
        if self.decimal_point && count == 0 {
            // a bare decimal separator is not a fraction
            return !(digit_start as isize);
        }
        let range = self.field.range();
        let span = i128::from(range.max()) - i128::from(range.min()) + 1;
        let value = total * span / i128::from(POW10[count as usize]) + i128::from(range.min());
        ctx.set_parsed_field(self.field, value as i64, digit_start, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(POW10[0], 1);
        assert_eq!(POW10[4], 10_000);
        assert_eq!(POW10[18], 1_000_000_000_000_000_000);
    }
}
