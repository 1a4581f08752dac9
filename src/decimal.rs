//! Characters used for numeric input and output.

use alloc::string::String;

/// The set of characters a formatter uses for numeric I/O.
///
/// The standard set uses ASCII `'0'`, `'+'`, `'-'` and `'.'`; alternative
/// instances remap the zero digit, signs and decimal separator so numbers can
/// be printed and parsed in other numbering systems.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DecimalStyle {
    /// Character representing zero.
    zero_digit: char,
    /// Character representing a positive sign.
    positive_sign: char,
    /// Character representing a negative sign.
    negative_sign: char,
    /// Character representing the decimal separator.
    decimal_separator: char,
}

impl Default for DecimalStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DecimalStyle {
    /// Style using ASCII digits and punctuation.
    pub const STANDARD: Self = Self {
        zero_digit: '0',
        positive_sign: '+',
        negative_sign: '-',
        decimal_separator: '.',
    };

    /// Construct a style from its four characters.
    #[must_use]
    pub const fn new(
        zero_digit: char,
        positive_sign: char,
        negative_sign: char,
        decimal_separator: char,
    ) -> Self {
        Self {
            zero_digit,
            positive_sign,
            negative_sign,
            decimal_separator,
        }
    }

    /// The character representing zero.
    #[must_use]
    pub const fn zero_digit(&self) -> char {
        self.zero_digit
    }

    /// The character representing a positive sign.
    #[must_use]
    pub const fn positive_sign(&self) -> char {
        self.positive_sign
    }

    /// The character representing a negative sign.
    #[must_use]
    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    /// The character representing the decimal separator.
    #[must_use]
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Convert a character to its digit value, or `-1` if it is not a digit
    /// of this style.
    #[must_use]
    pub fn convert_to_digit(&self, ch: char) -> i32 {
        let val = (ch as i32) - (self.zero_digit as i32);
        if (0..=9).contains(&val) {
            val
        } else {
            -1
        }
    }

    /// Convert a string of ASCII digits to the digits of this style.
    #[must_use]
    pub fn convert_number_to_i18n(&self, ascii_digits: &str) -> String {
        if self.zero_digit == '0' {
            return String::from(ascii_digits);
        }
        let diff = (self.zero_digit as u32) - ('0' as u32);
        ascii_digits
            .chars()
            .map(|ch| {
                if ch.is_ascii_digit() {
                    char::from_u32(ch as u32 + diff).unwrap_or(ch)
                } else {
                    ch
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_digits() {
        let style = DecimalStyle::STANDARD;
        assert_eq!(style.convert_to_digit('0'), 0);
        assert_eq!(style.convert_to_digit('9'), 9);
        assert_eq!(style.convert_to_digit('a'), -1);
        assert_eq!(style.convert_number_to_i18n("0123"), "0123");
    }

    #[test]
    fn test_remapped_digits() {
        // Arabic-Indic digits.
        let style = DecimalStyle::new('\u{0660}', '+', '-', '.');
        assert_eq!(style.convert_to_digit('\u{0660}'), 0);
        assert_eq!(style.convert_to_digit('\u{0669}'), 9);
        assert_eq!(style.convert_to_digit('0'), -1);
        assert_eq!(style.convert_number_to_i18n("12"), "\u{0661}\u{0662}");
    }
}
