//! The composable printer/parser pipeline.
//!
//! [`DateTimeFormatter`] is an immutable tree of elements assembled by
//! [`FormatterBuilder`] or compiled from a pattern. Parsing happens in two
//! phases: the element tree consumes text into a [`Parsed`] field map, then
//! the resolver cross-checks and combines the fields into canonical values.

mod builder;
mod context;
mod element;
mod instant;
mod numeric;
mod offset;
mod pattern;
#[cfg(feature = "std")]
mod predefined;
mod resolver;
mod textel;
mod zoneel;

pub use builder::FormatterBuilder;
pub use context::Parsed;

#[cfg(test)]
pub(crate) use offset::OFFSET_PATTERNS;

use alloc::string::String;

use crate::chronology::{chronology_eq, Chronology};
use crate::date::{IsoDate, IsoTime};
use crate::decimal::DecimalStyle;
use crate::field::{Field, FieldSet};
use crate::locale::Locale;
use crate::style::{FormatStyle, ResolverStyle};
use crate::temporal::{Precision, TemporalAccessor};
use crate::write::Write;
use crate::zone::{ZoneId, ZoneOffset};
use crate::{Error, ParseError};

use context::{ParseContext, PrintContext};
use element::CompositeElement;

/// A parse cursor: the index to continue from and the index of the first
/// error, if any.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ParsePosition {
    /// Index parsing continues from.
    pub index: usize,
    /// Index of the first parse failure.
    pub error_index: Option<usize>,
}

impl ParsePosition {
    /// A cursor at an index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            error_index: None,
        }
    }
}

/// An immutable, composed printer/parser for date/time text.
///
/// Formatters are cheap to clone and safe to share between threads. The
/// `with_*` methods derive new formatters with changed overrides.
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    /// The frozen element tree.
    root: CompositeElement,
    /// Locale for text lookup.
    locale: Locale,
    /// Characters for numeric I/O.
    decimal_style: DecimalStyle,
    /// How parsed fields are resolved.
    resolver_style: ResolverStyle,
    /// Whitelist of fields the resolver may consume.
    resolver_fields: Option<FieldSet>,
    /// Chronology override.
    chronology: Option<&'static dyn Chronology>,
    /// Zone override.
    zone: Option<ZoneId>,
}

impl DateTimeFormatter {
    /// Construct a formatter from its parts; used by the builder.
    pub(crate) fn from_parts(
        root: CompositeElement,
        locale: Locale,
        decimal_style: DecimalStyle,
        resolver_style: ResolverStyle,
        resolver_fields: Option<FieldSet>,
        chronology: Option<&'static dyn Chronology>,
        zone: Option<ZoneId>,
    ) -> Self {
        Self {
            root,
            locale,
            decimal_style,
            resolver_style,
            resolver_fields,
            chronology,
            zone,
        }
    }

    /// The frozen element tree.
    pub(crate) fn root(&self) -> &CompositeElement {
        &self.root
    }

    /// Compile a pattern into a formatter.
    ///
    /// See the [crate-level documentation](crate) for the pattern letters.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern is invalid.
    pub fn of_pattern(pattern: &str) -> Result<Self, Error> {
        let mut builder = FormatterBuilder::new();
        builder.append_pattern(pattern)?;
        Ok(builder.to_formatter())
    }

    /// A date formatter for a localized style, using the built-in English
    /// patterns.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern fails to compile.
    pub fn of_localized_date(style: FormatStyle) -> Result<Self, Error> {
        Self::of_pattern(match style {
            FormatStyle::Full => "EEEE, MMMM d, uuuu",
            FormatStyle::Long => "MMMM d, uuuu",
            FormatStyle::Medium => "MMM d, uuuu",
            FormatStyle::Short => "M/d/uu",
        })
    }

    /// A time formatter for a localized style, using the built-in English
    /// patterns.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern fails to compile.
    pub fn of_localized_time(style: FormatStyle) -> Result<Self, Error> {
        Self::of_pattern(match style {
            FormatStyle::Full | FormatStyle::Long | FormatStyle::Medium => "h:mm:ss a",
            FormatStyle::Short => "h:mm a",
        })
    }

    /// A date-time formatter for a localized style, using the built-in
    /// English patterns.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern fails to compile.
    pub fn of_localized_date_time(style: FormatStyle) -> Result<Self, Error> {
        let date = Self::of_localized_date(style)?;
        let time = Self::of_localized_time(style)?;
        let mut builder = FormatterBuilder::new();
        builder
            .append_formatter(&date)
            .append_literal_str(", ")
            .append_formatter(&time);
        Ok(builder.to_formatter())
    }

    /// The locale for text lookup.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The characters used for numeric I/O.
    #[must_use]
    pub fn decimal_style(&self) -> DecimalStyle {
        self.decimal_style
    }

    /// The resolver style.
    #[must_use]
    pub fn resolver_style(&self) -> ResolverStyle {
        self.resolver_style
    }

    /// The resolver-field whitelist, if set.
    #[must_use]
    pub fn resolver_fields(&self) -> Option<FieldSet> {
        self.resolver_fields
    }

    /// The chronology override, if set.
    #[must_use]
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    /// The zone override, if set.
    #[must_use]
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// A copy with a different locale.
    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }

    /// A copy with a different decimal style.
    #[must_use]
    pub fn with_decimal_style(&self, decimal_style: DecimalStyle) -> Self {
        Self {
            decimal_style,
            ..self.clone()
        }
    }

    /// A copy with a different resolver style.
    #[must_use]
    pub fn with_resolver_style(&self, resolver_style: ResolverStyle) -> Self {
        Self {
            resolver_style,
            ..self.clone()
        }
    }

    /// A copy with a resolver-field whitelist.
    #[must_use]
    pub fn with_resolver_fields(&self, resolver_fields: Option<FieldSet>) -> Self {
        Self {
            resolver_fields,
            ..self.clone()
        }
    }

    /// A copy with an override chronology.
    #[must_use]
    pub fn with_chronology(&self, chronology: &'static dyn Chronology) -> Self {
        Self {
            chronology: Some(chronology),
            ..self.clone()
        }
    }

    /// A copy with an override zone.
    #[must_use]
    pub fn with_zone(&self, zone: ZoneId) -> Self {
        Self {
            zone: Some(zone),
            ..self.clone()
        }
    }

    /// Format a temporal object to a string.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if a required field is unavailable or a
    /// value cannot be represented by the pipeline.
    pub fn format(&self, temporal: &dyn TemporalAccessor) -> Result<String, Error> {
        let adjusted = adjust(temporal, self)?;
        let mut ctx = PrintContext::new(&adjusted, self.locale.clone(), self.decimal_style);
        let mut buf = String::new();
        self.root.print(&mut ctx, &mut buf)?;
        Ok(buf)
    }

    /// Format a temporal object into a sink, appending to any prior
    /// content.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if formatting fails or the sink fails.
    pub fn format_to<W: Write + ?Sized>(
        &self,
        temporal: &dyn TemporalAccessor,
        sink: &mut W,
    ) -> Result<(), Error> {
        let text = self.format(temporal)?;
        sink.write_str(&text)
    }

    /// Parse complete text into a resolved [`Parsed`].
    ///
    /// # Errors
    ///
    /// Can produce an [`Error::Parse`] if the text does not fully match or
    /// the parsed fields do not resolve.
    pub fn parse(&self, text: &str) -> Result<Parsed, Error> {
        let mut ctx = self.parse_context();
        let result = self.root.parse(&mut ctx, text, 0);
        if result < 0 {
            let index = (!result) as usize;
            return Err(parse_error_at(text, index));
        }
        let index = result as usize;
        if index < text.len() {
            return Err(Error::Parse(ParseError::new(
                text,
                index,
                alloc::format!(
                    "text '{}' could not be parsed, unparsed text found at index {index}",
                    crate::abbreviate(text)
                ),
            )));
        }
        ctx.to_parsed()
            .resolve(self.resolver_style, self.resolver_fields)
            .map_err(|cause| {
                Error::Parse(ParseError::new(
                    text,
                    0,
                    alloc::format!(
                        "text '{}' could not be parsed: {cause}",
                        crate::abbreviate(text)
                    ),
                ))
            })
    }

    /// Parse complete text and project it with a query.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if parsing fails or the query yields
    /// nothing.
    pub fn parse_query<T>(
        &self,
        text: &str,
        query: impl FnOnce(&Parsed) -> Option<T>,
    ) -> Result<T, Error> {
        let parsed = self.parse(text)?;
        query(&parsed).ok_or_else(|| {
            Error::Parse(ParseError::new(
                text,
                0,
                alloc::format!(
                    "text '{}' could not be parsed to the requested type",
                    crate::abbreviate(text)
                ),
            ))
        })
    }

    /// Parse complete text with the first of several queries that succeeds.
    ///
    /// At least two queries must be provided; use
    /// [`parse_query`](Self::parse_query) for a single one.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if parsing fails or no query yields a
    /// value.
    pub fn parse_best<T>(
        &self,
        text: &str,
        queries: &[&dyn Fn(&Parsed) -> Option<T>],
    ) -> Result<T, Error> {
        if queries.len() < 2 {
            return Err(Error::invalid_argument(
                "at least two queries must be specified",
            ));
        }
        let parsed = self.parse(text)?;
        for query in queries {
            if let Some(value) = query(&parsed) {
                return Ok(value);
            }
        }
        Err(Error::Parse(ParseError::new(
            text,
            0,
            alloc::format!(
                "text '{}' could not be parsed to any of the specified types",
                crate::abbreviate(text)
            ),
        )))
    }

    /// Parse text from a position without resolving, leaving the raw field
    /// values in the returned [`Parsed`].
    ///
    /// On success the position index is advanced past the consumed text; on
    /// failure the error index is set as well. Unlike
    /// [`parse`](Self::parse), trailing unparsed text is not an error.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error::OutOfRange`] if the position is outside the
    /// text, or an [`Error::Parse`] if the text does not match.
    pub fn parse_unresolved(
        &self,
        text: &str,
        position: &mut ParsePosition,
    ) -> Result<Parsed, Error> {
        if position.index > text.len() || !text.is_char_boundary(position.index) {
            return Err(Error::OutOfRange);
        }
        let mut ctx = self.parse_context();
        let result = self.root.parse(&mut ctx, text, position.index as isize);
        if result < 0 {
            let index = (!result) as usize;
            position.error_index = Some(index);
            return Err(parse_error_at(text, index));
        }
        position.index = result as usize;
        Ok(ctx.to_parsed())
    }

    /// A parse context seeded with this formatter's settings.
    fn parse_context(&self) -> ParseContext {
        ParseContext::new(
            self.locale.clone(),
            self.decimal_style,
            self.chronology,
            self.zone.clone(),
        )
    }
}

/// Build the standard positional parse error.
fn parse_error_at(text: &str, index: usize) -> Error {
    Error::Parse(ParseError::new(
        text,
        index,
        alloc::format!(
            "text '{}' could not be parsed at index {index}",
            crate::abbreviate(text)
        ),
    ))
}

/// A temporal view with the formatter overrides applied.
enum Adjusted<'a> {
    /// No override applies.
    Plain(&'a dyn TemporalAccessor),
    /// A zone override on a temporal without an instant.
    Zone {
        /// The underlying temporal.
        inner: &'a dyn TemporalAccessor,
        /// The override zone.
        zone: ZoneId,
    },
    /// A chronology override replacing the date.
    Date {
        /// The underlying temporal.
        inner: &'a dyn TemporalAccessor,
        /// The converted date.
        date: IsoDate,
        /// The override chronology.
        chronology: &'static dyn Chronology,
    },
    /// A zone override applied to an instant-bearing temporal.
    Instant {
        /// Local date in the override zone.
        date: IsoDate,
        /// Local time in the override zone.
        time: IsoTime,
        /// Offset of the override zone.
        offset: ZoneOffset,
        /// The override zone.
        zone: ZoneId,
        /// The instant, in epoch seconds.
        instant: i64,
    },
}

impl core::fmt::Debug for Adjusted<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Adjusted::Plain(_) => f.debug_tuple("Plain").field(&"<dyn TemporalAccessor>").finish(),
            Adjusted::Zone { zone, .. } => f
                .debug_struct("Zone")
                .field("inner", &"<dyn TemporalAccessor>")
                .field("zone", zone)
                .finish(),
            Adjusted::Date { date, chronology, .. } => f
                .debug_struct("Date")
                .field("inner", &"<dyn TemporalAccessor>")
                .field("date", date)
                .field("chronology", chronology)
                .finish(),
            Adjusted::Instant { date, time, offset, zone, instant } => f
                .debug_struct("Instant")
                .field("date", date)
                .field("time", time)
                .field("offset", offset)
                .field("zone", zone)
                .field("instant", instant)
                .finish(),
        }
    }
}

impl TemporalAccessor for Adjusted<'_> {
    fn is_supported(&self, field: Field) -> bool {
        match self {
            Adjusted::Plain(inner) | Adjusted::Zone { inner, .. } => inner.is_supported(field),
            Adjusted::Date { inner, date, .. } => {
                date.field_value(field).is_some() || inner.is_supported(field)
            }
            Adjusted::Instant { date, time, .. } => {
                matches!(field, Field::OffsetSeconds | Field::InstantSeconds)
                    || date.field_value(field).is_some()
                    || time.field_value(field).is_some()
            }
        }
    }

    fn get_field(&self, field: Field) -> Result<i64, Error> {
        match self {
            Adjusted::Plain(inner) | Adjusted::Zone { inner, .. } => inner.get_field(field),
            Adjusted::Date { inner, date, .. } => match date.field_value(field) {
                Some(value) => Ok(value),
                None => inner.get_field(field),
            },
            Adjusted::Instant {
                date,
                time,
                offset,
                instant,
                ..
            } => match field {
                Field::OffsetSeconds => Ok(i64::from(offset.total_seconds())),
                Field::InstantSeconds => Ok(*instant),
                _ => date
                    .field_value(field)
                    .or_else(|| time.field_value(field))
                    .ok_or_else(|| Error::unsupported_field(field)),
            },
        }
    }

    fn query_zone_id(&self) -> Option<ZoneId> {
        match self {
            Adjusted::Plain(inner) | Adjusted::Date { inner, .. } => inner.query_zone_id(),
            Adjusted::Zone { zone, .. } | Adjusted::Instant { zone, .. } => Some(zone.clone()),
        }
    }

    fn query_chronology(&self) -> Option<&'static dyn Chronology> {
        match self {
            Adjusted::Plain(inner) | Adjusted::Zone { inner, .. } => inner.query_chronology(),
            Adjusted::Date { chronology, .. } => Some(*chronology),
            Adjusted::Instant { .. } => None,
        }
    }

    fn query_local_date(&self) -> Option<IsoDate> {
        match self {
            Adjusted::Plain(inner) | Adjusted::Zone { inner, .. } => inner.query_local_date(),
            Adjusted::Date { date, .. } | Adjusted::Instant { date, .. } => Some(*date),
        }
    }

    fn query_local_time(&self) -> Option<IsoTime> {
        match self {
            Adjusted::Plain(inner)
            | Adjusted::Zone { inner, .. }
            | Adjusted::Date { inner, .. } => inner.query_local_time(),
            Adjusted::Instant { time, .. } => Some(*time),
        }
    }

    fn query_precision(&self) -> Option<Precision> {
        match self {
            Adjusted::Plain(inner)
            | Adjusted::Zone { inner, .. }
            | Adjusted::Date { inner, .. } => inner.query_precision(),
            Adjusted::Instant { .. } => Some(Precision::Nanos),
        }
    }
}

/// Apply the formatter's chronology and zone overrides to the printed
/// temporal.
fn adjust<'a>(
    temporal: &'a dyn TemporalAccessor,
    formatter: &DateTimeFormatter,
) -> Result<Adjusted<'a>, Error> {
    let mut override_chronology = formatter.chronology;
    let mut override_zone = formatter.zone.clone();
    if override_chronology.is_none() && override_zone.is_none() {
        return Ok(Adjusted::Plain(temporal));
    }
    if let (Some(overriding), Some(own)) = (override_chronology, temporal.query_chronology()) {
        if chronology_eq(overriding, own) {
            override_chronology = None;
        }
    }
    if override_zone == temporal.query_zone_id() {
        override_zone = None;
    }
    if let Some(zone) = override_zone {
        if temporal.is_supported(Field::InstantSeconds) {
            let Some(offset) = zone.normalized_offset() else {
                return Err(Error::Unsupported(alloc::format!(
                    "unable to apply override zone '{zone}' without zone rules"
                )));
            };
            let instant = temporal.get_field(Field::InstantSeconds)?;
            let nano = if temporal.is_supported(Field::NanoOfSecond) {
                temporal.get_field(Field::NanoOfSecond)?
            } else {
                0
            };
            let local = instant
                .checked_add(i64::from(offset.total_seconds()))
                .ok_or_else(|| Error::resolve("instant out of range"))?;
            let date = IsoDate::from_epoch_day(local.div_euclid(86_400))?;
            let time =
                IsoTime::of_nano_of_day(local.rem_euclid(86_400) * 1_000_000_000 + nano)?;
            return Ok(Adjusted::Instant {
                date,
                time,
                offset,
                zone,
                instant,
            });
        }
        // without an instant the zone can only replace an equal offset
        if let (Some(normalized), Some(own_offset)) =
            (zone.normalized_offset(), temporal.query_offset())
        {
            if normalized != own_offset {
                return Err(Error::Unsupported(alloc::format!(
                    "unable to apply override zone '{zone}' because the temporal excludes an \
                     instant but contains an offset"
                )));
            }
        }
        return Ok(Adjusted::Zone {
            inner: temporal,
            zone,
        });
    }
    if let Some(chronology) = override_chronology {
        if temporal.is_supported(Field::EpochDay) {
            let date = chronology.date_from_epoch_day(temporal.get_field(Field::EpochDay)?)?;
            return Ok(Adjusted::Date {
                inner: temporal,
                date,
                chronology,
            });
        }
        return Err(Error::Unsupported(alloc::format!(
            "unable to apply override chronology '{}' because the temporal has no date",
            chronology.id()
        )));
    }
    Ok(Adjusted::Plain(temporal))
}
