//! Fluent assembly of formatter element trees.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::chronology::Chronology;
use crate::date::IsoDate;
use crate::decimal::DecimalStyle;
use crate::field::Field;
use crate::format::element::{CompositeElement, Element, PadElement, Setting};
use crate::format::instant::InstantElement;
use crate::format::numeric::{FractionElement, NumberElement, ReducedElement};
use crate::format::offset::{LocalizedOffsetElement, OffsetElement};
use crate::format::pattern;
use crate::format::textel::TextElement;
use crate::format::zoneel::{ZoneIdElement, ZoneKind};
use crate::format::DateTimeFormatter;
use crate::locale::Locale;
use crate::style::{ResolverStyle, SignStyle, TextStyle};
use crate::text::{DefaultTextProvider, MapTextProvider, TextProvider};
use crate::Error;

/// One nesting level of the builder: the elements collected so far plus the
/// pad and adjacent-value state local to the level.
#[derive(Debug, Default)]
struct BuilderLevel {
    /// Elements appended at this level.
    elements: Vec<Element>,
    /// Pending pad width from `pad_next`.
    pad_next_width: u8,
    /// Pending pad character from `pad_next`.
    pad_next_char: char,
    /// Index of the last variable-width numeric element, for adjacent-value
    /// parsing.
    value_parser_index: Option<usize>,
}

/// Builder assembling printer/parser elements into a [`DateTimeFormatter`].
///
/// Elements are appended in order; `optional_start`/`optional_end` nest
/// optional sections, and `pad_next` pads the next appended element.
/// Appending a fixed-width value directly after another value engages
/// adjacent-value parsing, where the earlier variable-width value reserves
/// digits for the later fixed-width ones.
#[derive(Debug)]
pub struct FormatterBuilder {
    /// Stack of open levels; the last entry is the active one.
    stack: Vec<BuilderLevel>,
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterBuilder {
    /// Construct an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: alloc::vec![BuilderLevel::default()],
        }
    }

    /// The active level.
    fn active(&mut self) -> &mut BuilderLevel {
        self.stack.last_mut().expect("builder stack is never empty")
    }

    /// Append an element, wrapping it in any pending padding.
    ///
    /// Returns the index of the appended element in the active level.
    fn append_internal(&mut self, element: Element) -> usize {
        let active = self.active();
        let element = if active.pad_next_width > 0 {
            let pad = PadElement {
                child: alloc::boxed::Box::new(element),
                pad_width: active.pad_next_width,
                pad_char: active.pad_next_char,
            };
            active.pad_next_width = 0;
            active.pad_next_char = ' ';
            Element::Pad(pad)
        } else {
            element
        };
        active.elements.push(element);
        active.value_parser_index = None;
        active.elements.len() - 1
    }

    /// Append a numeric element, maintaining the adjacent-value state.
    fn append_number(&mut self, number: NumberElement) -> &mut Self {
        let active_index = self.active().value_parser_index;
        let adjacent_base = active_index.filter(|&index| {
            matches!(
                self.active().elements.get(index),
                Some(Element::Number(_) | Element::Reduced(_))
            )
        });
        if let Some(base_index) = adjacent_base {
            if number.min_width == number.max_width
                && number.sign_style == SignStyle::NotNegative
            {
                // the base element reserves digits for the new fixed one
                bump_subsequent_width(
                    &mut self.active().elements[base_index],
                    number.max_width,
                );
                self.append_internal(Element::Number(number.with_fixed_width()));
                self.active().value_parser_index = Some(base_index);
            } else {
                // a second variable-width value fixes the widths of the base
                make_fixed_width(&mut self.active().elements[base_index]);
                let index = self.append_internal(Element::Number(number));
                self.active().value_parser_index = Some(index);
            }
        } else {
            let index = self.append_internal(Element::Number(number));
            self.active().value_parser_index = Some(index);
        }
        self
    }

    /// Make text comparison exact during parsing. This is the default.
    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.append_internal(Element::Settings(Setting::CaseSensitive));
        self
    }

    /// Make text comparison case-insensitive during parsing.
    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.append_internal(Element::Settings(Setting::CaseInsensitive));
        self
    }

    /// Enforce widths and signs exactly during parsing. This is the default.
    pub fn parse_strict(&mut self) -> &mut Self {
        self.append_internal(Element::Settings(Setting::Strict));
        self
    }

    /// Relax width and sign enforcement during parsing.
    pub fn parse_lenient(&mut self) -> &mut Self {
        self.append_internal(Element::Settings(Setting::Lenient));
        self
    }

    /// Inject a default field value when parsing did not supply one.
    pub fn parse_defaulting(&mut self, field: Field, value: i64) -> &mut Self {
        self.append_internal(Element::Defaulting(field, value));
        self
    }

    /// Append a variable-width value, one to nineteen digits with a normal
    /// sign.
    pub fn append_value(&mut self, field: Field) -> &mut Self {
        self.append_number(NumberElement::new(field, 1, 19, SignStyle::Normal))
    }

    /// Append a fixed-width, zero-padded, non-negative value.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the width is outside `1..=19`.
    pub fn append_value_fixed(&mut self, field: Field, width: u8) -> Result<&mut Self, Error> {
        check_width("width", width, 1, 19)?;
        Ok(self.append_number(NumberElement::new(field, width, width, SignStyle::NotNegative)))
    }

    /// Append a value with explicit widths and sign style.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if a width is outside `1..=19` or the
    /// maximum is below the minimum.
    pub fn append_value_with(
        &mut self,
        field: Field,
        min_width: u8,
        max_width: u8,
        sign_style: SignStyle,
    ) -> Result<&mut Self, Error> {
        if min_width == max_width && sign_style == SignStyle::NotNegative {
            return self.append_value_fixed(field, max_width);
        }
        check_width("minimum width", min_width, 1, 19)?;
        check_width("maximum width", max_width, 1, 19)?;
        if max_width < min_width {
            return Err(Error::invalid_argument(alloc::format!(
                "maximum width must exceed the minimum width but {max_width} < {min_width}"
            )));
        }
        Ok(self.append_number(NumberElement::new(field, min_width, max_width, sign_style)))
    }

    /// Append a reduced value expanded against a fixed base value.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if a width is outside `1..=10` or the base
    /// value is outside the field's range.
    pub fn append_value_reduced(
        &mut self,
        field: Field,
        width: u8,
        max_width: u8,
        base_value: i64,
    ) -> Result<&mut Self, Error> {
        check_reduced_widths(width, max_width)?;
        if !field.range().is_valid_value(base_value) {
            return Err(Error::invalid_argument(alloc::format!(
                "base value {base_value} is outside the range of {field}"
            )));
        }
        let element = ReducedElement::new(field, width, max_width, base_value, None);
        Ok(self.append_reduced(element))
    }

    /// Append a reduced value whose base is taken from a date through the
    /// effective chronology.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if a width is outside `1..=10`.
    pub fn append_value_reduced_by_date(
        &mut self,
        field: Field,
        width: u8,
        max_width: u8,
        base_date: IsoDate,
    ) -> Result<&mut Self, Error> {
        check_reduced_widths(width, max_width)?;
        let element = ReducedElement::new(field, width, max_width, 0, Some(base_date));
        Ok(self.append_reduced(element))
    }

    /// Append a reduced element, maintaining the adjacent-value state.
    fn append_reduced(&mut self, reduced: ReducedElement) -> &mut Self {
        let active_index = self.active().value_parser_index;
        let adjacent_base = active_index.filter(|&index| {
            matches!(
                self.active().elements.get(index),
                Some(Element::Number(_) | Element::Reduced(_))
            )
        });
        // a reduced element is always fixed-width and non-negative
        if let Some(base_index) = adjacent_base {
            bump_subsequent_width(&mut self.active().elements[base_index], reduced.number.max_width);
            self.append_internal(Element::Reduced(reduced.with_fixed_width()));
            self.active().value_parser_index = Some(base_index);
        } else {
            let index = self.append_internal(Element::Reduced(reduced));
            self.active().value_parser_index = Some(index);
        }
        self
    }

    /// Append a fraction of a fixed-range field.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the widths are out of range or the field
    /// does not have a fixed range.
    pub fn append_fraction(
        &mut self,
        field: Field,
        min_width: u8,
        max_width: u8,
        decimal_point: bool,
    ) -> Result<&mut Self, Error> {
        if !field.range().is_fixed() {
            return Err(Error::invalid_argument(alloc::format!(
                "fractional output requires a fixed value range: {field}"
            )));
        }
        check_width("minimum width", min_width, 0, 9)?;
        check_width("maximum width", max_width, 1, 9)?;
        if max_width < min_width {
            return Err(Error::invalid_argument(alloc::format!(
                "maximum width must exceed the minimum width but {max_width} < {min_width}"
            )));
        }
        self.append_internal(Element::Fraction(FractionElement {
            field,
            min_width,
            max_width,
            decimal_point,
        }));
        Ok(self)
    }

    /// Append the full text of a field.
    pub fn append_text(&mut self, field: Field) -> &mut Self {
        self.append_text_styled(field, TextStyle::Full)
    }

    /// Append the text of a field in a style, using the built-in English
    /// names.
    pub fn append_text_styled(&mut self, field: Field, style: TextStyle) -> &mut Self {
        self.append_text_with(field, style, Arc::new(DefaultTextProvider))
    }

    /// Append the text of a field backed by a value-to-text map.
    pub fn append_text_map(&mut self, field: Field, pairs: &[(i64, &str)]) -> &mut Self {
        self.append_text_with(field, TextStyle::Full, Arc::new(MapTextProvider::new(pairs)))
    }

    /// Append the text of a field with a caller-supplied provider.
    pub fn append_text_with(
        &mut self,
        field: Field,
        style: TextStyle,
        provider: Arc<dyn TextProvider>,
    ) -> &mut Self {
        self.append_internal(Element::Text(TextElement {
            field,
            style,
            provider,
        }));
        self
    }

    /// Append an ISO instant with fraction digits in groups of three.
    pub fn append_instant(&mut self) -> &mut Self {
        self.append_internal(Element::Instant(InstantElement { fractional_digits: -2 }));
        self
    }

    /// Append an ISO instant with explicit fraction digits: `-2` for groups
    /// of three, `-1` for minimal, `0..=9` for a fixed count.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the digit selector is out of range.
    pub fn append_instant_digits(&mut self, fractional_digits: i8) -> Result<&mut Self, Error> {
        let element = InstantElement::new(fractional_digits)?;
        self.append_internal(Element::Instant(element));
        Ok(self)
    }

    /// Append the `+HH:MM:ss` offset with `Z` for zero, as used by the ISO
    /// formatters.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_internal(Element::OffsetId(OffsetElement::iso()));
        self
    }

    /// Append an offset in one of the nine `+HH...` patterns.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern is not one of the nine.
    pub fn append_offset(
        &mut self,
        pattern: &str,
        no_offset_text: &str,
    ) -> Result<&mut Self, Error> {
        let element = OffsetElement::new(pattern, no_offset_text)?;
        self.append_internal(Element::OffsetId(element));
        Ok(self)
    }

    /// Append a `GMT`-prefixed localized offset.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the style is not full or short.
    pub fn append_localized_offset(&mut self, style: TextStyle) -> Result<&mut Self, Error> {
        if !matches!(style, TextStyle::Full | TextStyle::Short) {
            return Err(Error::invalid_argument(
                "localized offset style must be full or short",
            ));
        }
        self.append_internal(Element::LocalizedOffset(LocalizedOffsetElement { style }));
        Ok(self)
    }

    /// Append the strict zone id of the temporal.
    pub fn append_zone_id(&mut self) -> &mut Self {
        self.append_internal(Element::ZoneId(ZoneIdElement {
            kind: ZoneKind::ZoneId,
        }));
        self
    }

    /// Append the zone id, falling back to the offset viewed as a zone.
    pub fn append_zone_or_offset_id(&mut self) -> &mut Self {
        self.append_internal(Element::ZoneId(ZoneIdElement {
            kind: ZoneKind::ZoneOrOffset,
        }));
        self
    }

    /// Append the region zone id, printing nothing for bare offsets.
    pub fn append_zone_region_id(&mut self) -> &mut Self {
        self.append_internal(Element::ZoneId(ZoneIdElement {
            kind: ZoneKind::RegionOnly,
        }));
        self
    }

    /// Append the zone name. Zone names are looked up as untranslated zone
    /// ids, so every style prints and parses the id.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the style is not full or short.
    pub fn append_zone_text(&mut self, style: TextStyle) -> Result<&mut Self, Error> {
        if !matches!(style.as_normal(), TextStyle::Full | TextStyle::Short) {
            return Err(Error::invalid_argument("zone text style must be full or short"));
        }
        Ok(self.append_zone_or_offset_id())
    }

    /// Append the chronology id.
    pub fn append_chronology_id(&mut self) -> &mut Self {
        self.append_internal(Element::ChronologyId);
        self
    }

    /// Append a literal character.
    pub fn append_literal(&mut self, literal: char) -> &mut Self {
        self.append_internal(Element::Literal(literal));
        self
    }

    /// Append a literal string; an empty string appends nothing.
    pub fn append_literal_str(&mut self, literal: &str) -> &mut Self {
        match literal.chars().count() {
            0 => {}
            1 => {
                let ch = literal.chars().next().expect("length checked");
                self.append_internal(Element::Literal(ch));
            }
            _ => {
                self.append_internal(Element::LiteralStr(literal.into()));
            }
        }
        self
    }

    /// Append all elements of another formatter.
    pub fn append_formatter(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        self.append_internal(Element::Composite(formatter.root().clone()));
        self
    }

    /// Compile a pattern string into builder calls.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the pattern is invalid.
    pub fn append_pattern(&mut self, pattern: &str) -> Result<&mut Self, Error> {
        pattern::compile(self, pattern)?;
        Ok(self)
    }

    /// Pad the next appended element with spaces to a width.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the width is zero.
    pub fn pad_next(&mut self, pad_width: u8) -> Result<&mut Self, Error> {
        self.pad_next_with(pad_width, ' ')
    }

    /// Pad the next appended element with a character to a width.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the width is zero.
    pub fn pad_next_with(&mut self, pad_width: u8, pad_char: char) -> Result<&mut Self, Error> {
        if pad_width < 1 {
            return Err(Error::invalid_argument(alloc::format!(
                "pad width must be at least one but was {pad_width}"
            )));
        }
        let active = self.active();
        active.pad_next_width = pad_width;
        active.pad_next_char = pad_char;
        Ok(self)
    }

    /// Open an optional section.
    pub fn optional_start(&mut self) -> &mut Self {
        self.stack.push(BuilderLevel::default());
        self
    }

    /// Close the most recent optional section.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if no optional section is open.
    pub fn optional_end(&mut self) -> Result<&mut Self, Error> {
        if self.stack.len() == 1 {
            return Err(Error::invalid_argument(
                "cannot end an optional section before starting one",
            ));
        }
        let level = self.stack.pop().expect("stack length checked");
        if !level.elements.is_empty() {
            let composite = CompositeElement {
                children: level.elements,
                optional: true,
            };
            self.append_internal(Element::Composite(composite));
        }
        Ok(self)
    }

    /// Freeze the elements into a formatter with smart resolution and the
    /// default locale.
    #[must_use]
    pub fn to_formatter(self) -> DateTimeFormatter {
        self.to_formatter_with(ResolverStyle::Smart, None)
    }

    /// Freeze the elements into a formatter with a resolver style and an
    /// optional override chronology.
    #[must_use]
    pub fn to_formatter_with(
        mut self,
        resolver_style: ResolverStyle,
        chronology: Option<&'static dyn Chronology>,
    ) -> DateTimeFormatter {
        while self.stack.len() > 1 {
            self.optional_end().expect("stack length checked");
        }
        let root = CompositeElement {
            children: self.stack.pop().expect("builder stack is never empty").elements,
            optional: false,
        };
        DateTimeFormatter::from_parts(
            root,
            Locale::default(),
            DecimalStyle::STANDARD,
            resolver_style,
            None,
            chronology,
            None,
        )
    }
}

/// Accumulate reserved digits on an adjacent-parsing base element.
fn bump_subsequent_width(element: &mut Element, width: u8) {
    match element {
        Element::Number(base) => *base = base.with_subsequent_width(width),
        Element::Reduced(base) => *base = base.with_subsequent_width(width),
        _ => unreachable!("adjacent base is always numeric"),
    }
}

/// Mark an adjacent-parsing base element as fixed width.
fn make_fixed_width(element: &mut Element) {
    match element {
        Element::Number(base) => *base = base.with_fixed_width(),
        Element::Reduced(base) => *base = base.with_fixed_width(),
        _ => unreachable!("adjacent base is always numeric"),
    }
}

/// Validate a width argument.
fn check_width(what: &str, width: u8, min: u8, max: u8) -> Result<(), Error> {
    if width < min || width > max {
        return Err(Error::invalid_argument(alloc::format!(
            "{what} must be from {min} to {max} inclusive but was {width}"
        )));
    }
    Ok(())
}

/// Validate reduced-value widths.
fn check_reduced_widths(width: u8, max_width: u8) -> Result<(), Error> {
    check_width("width", width, 1, 10)?;
    check_width("maximum width", max_width, 1, 10)?;
    if max_width < width {
        return Err(Error::invalid_argument(alloc::format!(
            "maximum width must exceed the width but {max_width} < {width}"
        )));
    }
    Ok(())
}
