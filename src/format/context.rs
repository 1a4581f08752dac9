//! Mutable state carried through a single print or parse call.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::chronology::{Chronology, IsoChronology};
use crate::date::{IsoDate, IsoTime};
use crate::decimal::DecimalStyle;
use crate::field::Field;
use crate::locale::Locale;
use crate::temporal::TemporalAccessor;
use crate::zone::{ZoneId, ZoneOffset};
use crate::Error;

/// Context used when printing a temporal object.
///
/// Single-threaded and short-lived: one is created per print call. The
/// optional depth tracks nesting inside optional sections, where a missing
/// field skips the section instead of failing the print.
pub(crate) struct PrintContext<'a> {
    /// The temporal being printed, already adjusted for overrides.
    temporal: &'a dyn TemporalAccessor,
    /// Locale for text lookup.
    locale: Locale,
    /// Characters for numeric output.
    symbols: DecimalStyle,
    /// Depth of optional-section nesting.
    optional: u32,
}

impl<'a> PrintContext<'a> {
    /// Construct a new `PrintContext`.
    pub(crate) fn new(
        temporal: &'a dyn TemporalAccessor,
        locale: Locale,
        symbols: DecimalStyle,
    ) -> Self {
        Self {
            temporal,
            locale,
            symbols,
            optional: 0,
        }
    }

    /// The temporal being printed.
    pub(crate) fn temporal(&self) -> &dyn TemporalAccessor {
        self.temporal
    }

    /// The locale for text lookup.
    pub(crate) fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The characters for numeric output.
    pub(crate) fn symbols(&self) -> DecimalStyle {
        self.symbols
    }

    /// Enter an optional section.
    pub(crate) fn start_optional(&mut self) {
        self.optional += 1;
    }

    /// Leave an optional section.
    pub(crate) fn end_optional(&mut self) {
        self.optional -= 1;
    }

    /// Read a field value.
    ///
    /// Inside an optional section an unreadable field yields `Ok(None)`,
    /// telling the enclosing composite to skip; at the top level it is an
    /// error.
    pub(crate) fn value(&self, field: Field) -> Result<Option<i64>, Error> {
        match self.temporal.get_field(field) {
            Ok(value) => Ok(Some(value)),
            Err(_) if self.optional > 0 => Ok(None),
            Err(_) => Err(Error::MissingField(field)),
        }
    }

    /// Run a query against the temporal, with the same optional-section
    /// rules as [`value`](Self::value).
    pub(crate) fn query<T>(
        &self,
        query: impl FnOnce(&dyn TemporalAccessor) -> Option<T>,
        description: &str,
    ) -> Result<Option<T>, Error> {
        match query(self.temporal) {
            Some(value) => Ok(Some(value)),
            None if self.optional > 0 => Ok(None),
            None => Err(Error::Unsupported(alloc::format!(
                "unable to extract {description} from the temporal object"
            ))),
        }
    }
}

impl core::fmt::Debug for PrintContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrintContext")
            .field("locale", &self.locale)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

/// Context used when parsing text.
///
/// Holds the case and strictness flags mutated by settings elements, and a
/// stack of [`Parsed`] frames supporting speculative parsing of optional
/// sections.
#[derive(Debug)]
pub(crate) struct ParseContext {
    /// Locale for text lookup.
    locale: Locale,
    /// Characters for numeric input.
    symbols: DecimalStyle,
    /// Chronology override from the formatter.
    override_chronology: Option<&'static dyn Chronology>,
    /// Zone override from the formatter.
    override_zone: Option<ZoneId>,
    /// Whether text comparison is exact.
    case_sensitive: bool,
    /// Whether widths and signs are enforced exactly.
    strict: bool,
    /// Stack of parse frames; never empty.
    parsed: Vec<Parsed>,
}

impl ParseContext {
    /// Construct a new `ParseContext`.
    pub(crate) fn new(
        locale: Locale,
        symbols: DecimalStyle,
        override_chronology: Option<&'static dyn Chronology>,
        override_zone: Option<ZoneId>,
    ) -> Self {
        let mut parsed = Vec::with_capacity(4);
        parsed.push(Parsed::new());
        Self {
            locale,
            symbols,
            override_chronology,
            override_zone,
            case_sensitive: true,
            strict: true,
            parsed,
        }
    }

    /// A fresh context with the same settings and an empty frame, used for
    /// speculative sub-parses.
    pub(crate) fn fresh(&self) -> Self {
        let mut copy = Self::new(
            self.locale.clone(),
            self.symbols,
            self.override_chronology,
            self.override_zone.clone(),
        );
        copy.case_sensitive = self.case_sensitive;
        copy.strict = self.strict;
        copy
    }

    /// The locale for text lookup.
    pub(crate) fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The characters for numeric input.
    pub(crate) fn symbols(&self) -> DecimalStyle {
        self.symbols
    }

    /// Whether text comparison is exact.
    pub(crate) fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Set whether text comparison is exact.
    pub(crate) fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Whether widths and signs are enforced exactly.
    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    /// Set whether widths and signs are enforced exactly.
    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// The top parse frame.
    pub(crate) fn current(&self) -> &Parsed {
        self.parsed.last().expect("parse stack is never empty")
    }

    /// The top parse frame, mutably.
    pub(crate) fn current_mut(&mut self) -> &mut Parsed {
        self.parsed.last_mut().expect("parse stack is never empty")
    }

    /// Push a copy of the top frame for a speculative parse.
    pub(crate) fn start_optional(&mut self) {
        let copy = self.current().clone();
        self.parsed.push(copy);
    }

    /// Commit or discard the top frame pushed by
    /// [`start_optional`](Self::start_optional).
    pub(crate) fn end_optional(&mut self, successful: bool) {
        if successful {
            let index = self.parsed.len() - 2;
            self.parsed.remove(index);
        } else {
            self.parsed.pop();
        }
    }

    /// Compare two characters under the context's case policy.
    pub(crate) fn char_equals(&self, a: char, b: char) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a == b || a.eq_ignore_ascii_case(&b)
        }
    }

    /// Match a literal at a byte position, returning the position after it.
    pub(crate) fn match_literal(&self, text: &str, pos: usize, literal: &str) -> Option<usize> {
        let mut text_pos = pos;
        for expected in literal.chars() {
            let actual = text.get(text_pos..)?.chars().next()?;
            if !self.char_equals(actual, expected) {
                return None;
            }
            text_pos += actual.len_utf8();
        }
        Some(text_pos)
    }

    /// Store a parsed field value.
    ///
    /// Returns `success_pos` on success or the complement of `error_pos` if
    /// the field was already parsed with a different value.
    pub(crate) fn set_parsed_field(
        &mut self,
        field: Field,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> isize {
        let old = self.current_mut().fields.insert(field, value);
        match old {
            Some(old) if old != value => !(error_pos as isize),
            _ => success_pos as isize,
        }
    }

    /// Store the parsed zone.
    pub(crate) fn set_parsed_zone(&mut self, zone: ZoneId) {
        self.current_mut().zone = Some(zone);
    }

    /// Store the parsed chronology.
    pub(crate) fn set_parsed_chronology(&mut self, chronology: &'static dyn Chronology) {
        self.current_mut().chronology = Some(chronology);
    }

    /// Record that a leap second was parsed.
    pub(crate) fn set_parsed_leap_second(&mut self) {
        self.current_mut().leap_second = true;
    }

    /// The chronology in effect: parsed, then override, then ISO.
    pub(crate) fn effective_chronology(&self) -> &'static dyn Chronology {
        self.current()
            .chronology
            .or(self.override_chronology)
            .unwrap_or(IsoChronology::INSTANCE)
    }

    /// Freeze the top frame for resolution, applying the formatter defaults.
    pub(crate) fn to_parsed(mut self) -> Parsed {
        let mut parsed = self.parsed.pop().expect("parse stack is never empty");
        parsed.chronology = parsed.chronology.or(self.override_chronology);
        if parsed.zone.is_none() {
            parsed.zone = self.override_zone;
        }
        parsed
    }
}

/// The accumulated result of a parse.
///
/// During parsing this is the mutable frame elements write into; after
/// resolution it holds the canonical date, time, zone and any leftover
/// fields, and can be read through [`TemporalAccessor`] or re-formatted.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    /// Raw parsed field values.
    pub(crate) fields: BTreeMap<Field, i64>,
    /// Parsed or defaulted zone.
    pub(crate) zone: Option<ZoneId>,
    /// Parsed or defaulted chronology.
    pub(crate) chronology: Option<&'static dyn Chronology>,
    /// Whether a leap second was consumed.
    pub(crate) leap_second: bool,
    /// Whole days carried over by lenient time resolution.
    pub(crate) excess_days: i64,
    /// Resolved date.
    pub(crate) date: Option<IsoDate>,
    /// Resolved time.
    pub(crate) time: Option<IsoTime>,
}

impl Parsed {
    /// An empty frame.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Read a field, consulting raw values first and then the resolved date
    /// and time.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<i64> {
        if let Some(&value) = self.fields.get(&field) {
            return Some(value);
        }
        if let Some(value) = self.date.and_then(|date| date.field_value(field)) {
            return Some(value);
        }
        self.time.and_then(|time| time.field_value(field))
    }

    /// The resolved date, if any.
    #[must_use]
    pub fn to_date(&self) -> Option<IsoDate> {
        self.date
    }

    /// The resolved time, if any.
    #[must_use]
    pub fn to_time(&self) -> Option<IsoTime> {
        self.time
    }

    /// The parsed offset, if any.
    #[must_use]
    pub fn to_offset(&self) -> Option<ZoneOffset> {
        let seconds = self.fields.get(&Field::OffsetSeconds)?;
        ZoneOffset::of_total_seconds(*seconds as i32).ok()
    }

    /// The parsed zone, if any.
    #[must_use]
    pub fn to_zone(&self) -> Option<ZoneId> {
        self.zone.clone()
    }

    /// The parsed chronology, if any.
    #[must_use]
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    /// Whether the parse consumed a leap second, i.e. a second-of-minute of
    /// sixty.
    #[must_use]
    pub fn leap_second(&self) -> bool {
        self.leap_second
    }

    /// Whole days carried over by lenient time resolution, such as the day
    /// added when `24:00` rolls over.
    #[must_use]
    pub fn excess_days(&self) -> i64 {
        self.excess_days
    }
}

impl TemporalAccessor for Parsed {
    fn is_supported(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    fn get_field(&self, field: Field) -> Result<i64, Error> {
        self.get(field).ok_or_else(|| Error::unsupported_field(field))
    }

    fn query_zone_id(&self) -> Option<ZoneId> {
        self.zone.clone()
    }

    fn query_chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    fn query_local_date(&self) -> Option<IsoDate> {
        self.date
    }

    fn query_local_time(&self) -> Option<IsoTime> {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParseContext {
        ParseContext::new(Locale::ENGLISH, DecimalStyle::STANDARD, None, None)
    }

    #[test]
    fn test_conflicting_field_complements_error_pos() {
        let mut ctx = context();
        assert_eq!(ctx.set_parsed_field(Field::Year, 2012, 0, 4), 4);
        assert_eq!(ctx.set_parsed_field(Field::Year, 2012, 5, 9), 9);
        assert_eq!(ctx.set_parsed_field(Field::Year, 2013, 10, 14), !10);
    }

    #[test]
    fn test_optional_frames_roll_back() {
        let mut ctx = context();
        ctx.set_parsed_field(Field::Year, 2012, 0, 4);
        ctx.start_optional();
        ctx.set_parsed_field(Field::MonthOfYear, 7, 5, 7);
        ctx.end_optional(false);
        assert_eq!(ctx.current().fields.get(&Field::MonthOfYear), None);
        ctx.start_optional();
        ctx.set_parsed_field(Field::MonthOfYear, 7, 5, 7);
        ctx.end_optional(true);
        assert_eq!(ctx.current().fields.get(&Field::MonthOfYear), Some(&7));
        assert_eq!(ctx.current().fields.get(&Field::Year), Some(&2012));
    }

    #[test]
    fn test_case_insensitive_literal() {
        let mut ctx = context();
        assert_eq!(ctx.match_literal("GMT+8", 0, "GMT"), Some(3));
        assert_eq!(ctx.match_literal("gmt+8", 0, "GMT"), None);
        ctx.set_case_sensitive(false);
        assert_eq!(ctx.match_literal("gmt+8", 0, "GMT"), Some(3));
    }
}
