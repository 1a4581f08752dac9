//! An adapter presenting a formatter through a classic mutable-position
//! format/parse interface.

use alloc::string::String;

use crate::format::{DateTimeFormatter, ParsePosition, Parsed};
use crate::temporal::TemporalAccessor;
use crate::Error;

/// Begin and end indexes of a formatted field, kept for interface
/// compatibility; this adapter always reports zero for both.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FieldPosition {
    /// Begin index of the requested field.
    pub begin: usize,
    /// End index of the requested field.
    pub end: usize,
}

/// Adapter exposing a [`DateTimeFormatter`] through format/parse-object
/// operations with mutable positions.
///
/// The adapter is as thread-safe as the wrapped formatter: it holds no
/// mutable state of its own.
#[derive(Debug, Clone)]
pub struct ClassicFormat {
    /// The wrapped formatter.
    formatter: DateTimeFormatter,
}

impl ClassicFormat {
    /// Wrap a formatter.
    #[must_use]
    pub fn new(formatter: DateTimeFormatter) -> Self {
        Self { formatter }
    }

    /// The wrapped formatter.
    #[must_use]
    pub fn formatter(&self) -> &DateTimeFormatter {
        &self.formatter
    }

    /// Format a temporal object into the sink, appending to prior content.
    ///
    /// The field position is reset to zeros; per-field position tracking is
    /// not supported.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] when formatting fails.
    pub fn format(
        &self,
        temporal: &dyn TemporalAccessor,
        sink: &mut String,
        field_position: &mut FieldPosition,
    ) -> Result<(), Error> {
        field_position.begin = 0;
        field_position.end = 0;
        self.formatter.format_to(temporal, sink)
    }

    /// Parse complete text into a resolved [`Parsed`].
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] when parsing or resolution fails.
    pub fn parse_object(&self, text: &str) -> Result<Parsed, Error> {
        self.formatter.parse(text)
    }

    /// Parse text from a position, resolving the result.
    ///
    /// On failure the position's error index is set and `None` returned;
    /// trailing unparsed text is not an error.
    pub fn parse_object_with_position(
        &self,
        text: &str,
        position: &mut ParsePosition,
    ) -> Option<Parsed> {
        let unresolved = match self.formatter.parse_unresolved(text, position) {
            Ok(unresolved) => unresolved,
            Err(Error::OutOfRange) => {
                position.error_index = Some(position.index);
                return None;
            }
            Err(_) => return None,
        };
        match unresolved.resolve(
            self.formatter.resolver_style(),
            self.formatter.resolver_fields(),
        ) {
            Ok(resolved) => Some(resolved),
            Err(_) => {
                position.error_index = Some(0);
                None
            }
        }
    }
}

impl DateTimeFormatter {
    /// Wrap this formatter in a [`ClassicFormat`] adapter.
    #[must_use]
    pub fn to_format(&self) -> ClassicFormat {
        ClassicFormat::new(self.clone())
    }
}
