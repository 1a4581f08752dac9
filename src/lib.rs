#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
// Enable feature callouts in generated documentation:
// https://doc.rust-lang.org/beta/unstable-book/language-features/doc-cfg.html
//
// This approach is borrowed from tokio.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_alias))]

/*!
This crate provides a composable date/time printing and parsing pipeline in
the tradition of ISO-8601 formatters.

A [`DateTimeFormatter`] is an immutable tree of printer/parser elements,
assembled either with the fluent [`FormatterBuilder`] or compiled from a
pattern string. Printing walks the tree appending to a text buffer; parsing
walks the tree consuming text into a field-value map, which a second
resolution phase cross-checks and combines into canonical date, time, offset
and zone values.

```
use datetime_format::{DateTimeFormatter, Field};

# fn main() -> Result<(), datetime_format::Error> {
let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd")?;

let parsed = formatter.parse("2012-07-27")?;
assert_eq!(parsed.get(Field::Year), Some(2012));
assert_eq!(parsed.get(Field::MonthOfYear), Some(7));
assert_eq!(parsed.get(Field::DayOfMonth), Some(27));

assert_eq!(formatter.format(&parsed)?, "2012-07-27");
# Ok(())
# }
```

## Pattern letters

Patterns are sequences of letters with the following meanings; the count of
repeated letters selects the width or text style:

| Letter | Meaning                    | Presentation | Examples                 |
|--------|----------------------------|--------------|--------------------------|
|  `G`   | era                        | text         | `AD`; `Anno Domini`      |
|  `u`   | year                       | year         | `2004`; `04`             |
|  `y`   | year of era                | year         | `2004`; `04`             |
|  `D`   | day of year                | number       | `189`                    |
| `M`/`L`| month of year              | number/text  | `7`; `07`; `Jul`; `July` |
|  `d`   | day of month               | number       | `10`                     |
| `Q`/`q`| quarter of year            | number/text  | `3`; `03`; `Q3`          |
|  `Y`   | week-based year            | year         | `1996`; `96`             |
|  `w`   | week of week-based year    | number       | `27`                     |
|  `W`   | week of month              | number       | `4`                      |
|  `E`   | day of week                | text         | `Tue`; `Tuesday`; `T`    |
| `e`/`c`| day of week                | number/text  | `2`; `Tuesday`; `T`      |
|  `F`   | aligned day of week in month | number     | `3`                      |
|  `a`   | am/pm of day               | text         | `PM`                     |
|  `h`   | clock hour of am/pm (1-12) | number       | `12`                     |
|  `K`   | hour of am/pm (0-11)       | number       | `0`                      |
|  `k`   | clock hour of day (1-24)   | number       | `24`                     |
|  `H`   | hour of day (0-23)         | number       | `0`                      |
|  `m`   | minute of hour             | number       | `30`                     |
|  `s`   | second of minute           | number       | `55`                     |
|  `S`   | fraction of second         | fraction     | `978`                    |
|  `A`   | millisecond of day         | number       | `1234`                   |
|  `n`   | nanosecond of second       | number       | `987654321`              |
|  `N`   | nanosecond of day          | number       | `1234000000`             |
|  `V`   | zone id (must be `VV`)     | zone-id      | `America/Los_Angeles`    |
|  `z`   | zone name                  | zone-name    | `Europe/Paris`           |
|  `O`   | localized offset           | offset-O     | `GMT+8`; `GMT+08:00`     |
|  `X`   | offset, `Z` for zero       | offset-X     | `Z`; `-08`; `-0830`      |
|  `x`   | offset                     | offset-x     | `+0000`; `-08`           |
|  `Z`   | offset                     | offset-Z     | `+0000`; `-0800`         |
|  `p`   | pad next element           | pad modifier | `1`                      |
|  `'`   | escape for literal text    | delimiter    |                          |
|  `''`  | literal single quote       | literal      | `'`                      |
|  `[`   | optional section start     |              |                          |
|  `]`   | optional section end       |              |                          |

`{`, `}` and `#` are reserved for future use and rejected.
*/

#![doc(html_root_url = "https://docs.rs/datetime-format/0.1.0")]

extern crate alloc;

// Ensure code blocks in `README.md` compile
#[cfg(all(doctest, feature = "std"))]
#[doc = include_str!("../README.md")]
mod readme {}

pub mod chronology;
pub mod date;
pub mod decimal;
pub mod field;
pub mod format;
pub mod locale;
pub mod style;
pub mod temporal;
pub mod text;
pub mod write;
pub mod zone;

mod classic;

#[cfg(test)]
mod tests;

pub use chronology::{Chronology, IsoChronology};
pub use classic::{ClassicFormat, FieldPosition};
pub use date::{IsoDate, IsoTime};
pub use decimal::DecimalStyle;
pub use field::{Field, FieldSet, ValueRange};
pub use format::{DateTimeFormatter, FormatterBuilder, ParsePosition, Parsed};
pub use locale::Locale;
pub use style::{FormatStyle, ResolverStyle, SignStyle, TextStyle};
pub use temporal::{Precision, TemporalAccessor};
pub use text::{DefaultTextProvider, MapTextProvider, TextProvider};
pub use zone::{ZoneId, ZoneIdProvider, ZoneOffset};

use alloc::string::String;
use core::fmt;

/// Error type returned by the formatting and parsing functions.
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A builder, pattern or formatter was misused, such as a width outside
    /// its documented bounds or an unknown pattern letter.
    InvalidArgument(String),
    /// Printing required a field the temporal object cannot supply outside
    /// an optional section.
    MissingField(Field),
    /// A field or query was requested from a temporal object that lacks the
    /// capability.
    Unsupported(String),
    /// Text failed to parse; carries the parse position and the abbreviated
    /// input.
    Parse(ParseError),
    /// The same field resolved to two different values.
    ConflictingField {
        /// The field parsed twice.
        field: Field,
        /// The value seen first.
        first: i64,
        /// The conflicting later value.
        second: i64,
    },
    /// Parsed fields were inconsistent or outside the chronology's valid
    /// range.
    Resolve(String),
    /// A parse position outside the bounds of the input.
    OutOfRange,
    /// The output sink failed.
    Io,
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`].
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Shorthand for an [`Error::Resolve`].
    pub(crate) fn resolve(message: impl Into<String>) -> Self {
        Error::Resolve(message.into())
    }

    /// Shorthand for an [`Error::Unsupported`] naming a field.
    pub(crate) fn unsupported_field(field: Field) -> Self {
        Error::Unsupported(alloc::format!("unsupported field: {field}"))
    }

    /// Shorthand for an [`Error::ConflictingField`].
    pub(crate) fn conflicting_field(field: Field, first: i64, second: i64) -> Self {
        Error::ConflictingField {
            field,
            first,
            second,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) | Error::Unsupported(message) => f.write_str(message),
            Error::MissingField(field) => {
                write!(f, "unable to extract {field} from the temporal object")
            }
            Error::Parse(err) => err.fmt(f),
            Error::ConflictingField {
                field,
                first,
                second,
            } => write!(
                f,
                "conflict found: {field} {first} differs from {field} {second}"
            ),
            Error::Resolve(message) => f.write_str(message),
            Error::OutOfRange => f.write_str("parse position out of range"),
            Error::Io => f.write_str("failed to write to the output sink"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Details of a failed parse: the input (abbreviated to 64 characters), the
/// zero-based position of the failure, and a description.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    /// The abbreviated input text.
    parsed: String,
    /// Zero-based index at which parsing failed.
    index: usize,
    /// Description of the failure.
    message: String,
}

impl ParseError {
    /// Construct a parse error, abbreviating the input.
    pub(crate) fn new(text: &str, index: usize, message: String) -> Self {
        Self {
            parsed: abbreviate(text),
            index,
            message,
        }
    }

    /// The input that failed to parse, abbreviated to 64 characters plus
    /// `...` when longer.
    #[must_use]
    pub fn parsed_string(&self) -> &str {
        &self.parsed
    }

    /// The zero-based index at which parsing failed.
    #[must_use]
    pub fn error_index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for ParseError {}

/// Abbreviate a parse input to 64 characters, appending `...` when longer.
fn abbreviate(text: &str) -> String {
    let mut iter = text.char_indices();
    match iter.nth(64) {
        None => String::from(text),
        Some((cut, _)) => {
            let mut abbreviated = String::from(&text[..cut]);
            abbreviated.push_str("...");
            abbreviated
        }
    }
}
