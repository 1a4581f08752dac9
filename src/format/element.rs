//! The printer/parser element tree.
//!
//! Atomic elements print one piece of a temporal and parse it back;
//! composites sequence children and give optional sections their rollback
//! semantics; the pad decorator wraps a child in fixed-width padding.
//!
//! Parsers follow the signed-position convention: a non-negative return is
//! the new position, a negative return is the bitwise complement of the
//! error position. The complement is its own inverse, so composites can
//! recover the position for rollback without unwinding.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::iter;

use crate::chronology::{Chronology, IsoChronology};
use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::format::instant::InstantElement;
use crate::format::numeric::{FractionElement, NumberElement, ReducedElement};
use crate::format::offset::{LocalizedOffsetElement, OffsetElement};
use crate::format::textel::TextElement;
use crate::format::zoneel::ZoneIdElement;
use crate::Error;

/// A parse-context mutation applied by a settings element.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Setting {
    /// Make text comparison exact.
    CaseSensitive,
    /// Make text comparison case-insensitive.
    CaseInsensitive,
    /// Enforce widths and signs exactly.
    Strict,
    /// Relax widths and signs.
    Lenient,
}

/// One node of the element tree.
#[derive(Debug, Clone)]
pub(crate) enum Element {
    /// A single literal character.
    Literal(char),
    /// A literal string.
    LiteralStr(Box<str>),
    /// A numeric field value.
    Number(NumberElement),
    /// A reduced numeric value, such as a two-digit year.
    Reduced(ReducedElement),
    /// A fraction of a fixed-range field.
    Fraction(FractionElement),
    /// A field printed as text.
    Text(TextElement),
    /// An ISO instant.
    Instant(InstantElement),
    /// An offset id in one of the nine patterns.
    OffsetId(OffsetElement),
    /// A `GMT`-prefixed localized offset.
    LocalizedOffset(LocalizedOffsetElement),
    /// A zone id.
    ZoneId(ZoneIdElement),
    /// A chronology id.
    ChronologyId,
    /// A padded child element.
    Pad(PadElement),
    /// A sequence of children, possibly optional.
    Composite(CompositeElement),
    /// A parse-context mutation.
    Settings(Setting),
    /// A default value injected when the field was not parsed.
    Defaulting(Field, i64),
}

impl Element {
    /// Print this element.
    ///
    /// `Ok(false)` means a value was unavailable inside an optional section;
    /// the enclosing composite rolls the buffer back and skips the section.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        match self {
            Element::Literal(ch) => {
                buf.push(*ch);
                Ok(true)
            }
            Element::LiteralStr(literal) => {
                buf.push_str(literal);
                Ok(true)
            }
            Element::Number(element) => element.print(ctx, buf),
            Element::Reduced(element) => element.print(ctx, buf),
            Element::Fraction(element) => element.print(ctx, buf),
            Element::Text(element) => element.print(ctx, buf),
            Element::Instant(element) => element.print(ctx, buf),
            Element::OffsetId(element) => element.print(ctx, buf),
            Element::LocalizedOffset(element) => element.print(ctx, buf),
            Element::ZoneId(element) => element.print(ctx, buf),
            Element::ChronologyId => {
                let Some(chronology) =
                    ctx.query(|temporal| temporal.query_chronology(), "chronology")?
                else {
                    return Ok(false);
                };
                buf.push_str(chronology.id());
                Ok(true)
            }
            Element::Pad(element) => element.print(ctx, buf),
            Element::Composite(element) => element.print(ctx, buf),
            Element::Settings(_) | Element::Defaulting(..) => Ok(true),
        }
    }

    /// Parse this element at a byte position.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        match self {
            Element::Literal(ch) => {
                let pos = position as usize;
                match text.get(pos..).and_then(|rest| rest.chars().next()) {
                    Some(actual) if ctx.char_equals(actual, *ch) => {
                        (pos + actual.len_utf8()) as isize
                    }
                    _ => !position,
                }
            }
            Element::LiteralStr(literal) => {
                let pos = position as usize;
                if pos > text.len() {
                    return !position;
                }
                match ctx.match_literal(text, pos, literal) {
                    Some(end) => end as isize,
                    None => !position,
                }
            }
            Element::Number(element) => element.parse(ctx, text, position),
            Element::Reduced(element) => element.parse(ctx, text, position),
            Element::Fraction(element) => element.parse(ctx, text, position),
            Element::Text(element) => element.parse(ctx, text, position),
            Element::Instant(element) => element.parse(ctx, text, position),
            Element::OffsetId(element) => element.parse(ctx, text, position),
            Element::LocalizedOffset(element) => element.parse(ctx, text, position),
            Element::ZoneId(element) => element.parse(ctx, text, position),
            Element::ChronologyId => {
                let pos = position as usize;
                match ctx.match_literal(text, pos, IsoChronology::INSTANCE.id()) {
                    Some(end) => {
                        ctx.set_parsed_chronology(IsoChronology::INSTANCE);
                        end as isize
                    }
                    None => !position,
                }
            }
            Element::Pad(element) => element.parse(ctx, text, position),
            Element::Composite(element) => element.parse(ctx, text, position),
            Element::Settings(setting) => {
                match setting {
                    Setting::CaseSensitive => ctx.set_case_sensitive(true),
                    Setting::CaseInsensitive => ctx.set_case_sensitive(false),
                    Setting::Strict => ctx.set_strict(true),
                    Setting::Lenient => ctx.set_strict(false),
                }
                position
            }
            Element::Defaulting(field, value) => {
                if ctx.current().fields.get(field).is_none() {
                    let pos = position as usize;
                    return ctx.set_parsed_field(*field, *value, pos, pos);
                }
                position
            }
        }
    }
}

/// A child element wrapped in fixed-width padding.
#[derive(Debug, Clone)]
pub(crate) struct PadElement {
    /// The padded element.
    pub(crate) child: Box<Element>,
    /// Width the output is padded to, in characters.
    pub(crate) pad_width: u8,
    /// The padding character.
    pub(crate) pad_char: char,
}

impl PadElement {
    /// Print the child, left-padding its output.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let pre_len = buf.len();
        if !self.child.print(ctx, buf)? {
            return Ok(false);
        }
        let printed = buf[pre_len..].chars().count();
        let width = usize::from(self.pad_width);
        if printed > width {
            return Err(Error::Unsupported(alloc::format!(
                "output of {printed} characters exceeds pad width of {width}"
            )));
        }
        let padding: String = iter::repeat(self.pad_char).take(width - printed).collect();
        buf.insert_str(pre_len, &padding);
        Ok(true)
    }

    /// Parse within a window of `pad_width` characters, consuming leading
    /// pad characters first.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let strict = ctx.is_strict();
        let start = position as usize;
        if start >= text.len() {
            return !position;
        }
        // locate the end of the pad window, counting characters
        let mut window_end = start;
        let mut chars = 0;
        for ch in text[start..].chars() {
            if chars == usize::from(self.pad_width) {
                break;
            }
            window_end += ch.len_utf8();
            chars += 1;
        }
        if chars < usize::from(self.pad_width) {
            if strict {
                // not enough characters to meet the parse width
                return !position;
            }
            window_end = text.len();
        }
        let mut pos = start;
        while pos < window_end {
            let Some(ch) = text[pos..].chars().next() else {
                break;
            };
            if !ctx.char_equals(ch, self.pad_char) {
                break;
            }
            pos += ch.len_utf8();
        }
        let window = &text[..window_end];
        let result_pos = self.child.parse(ctx, window, pos as isize);
        if result_pos != window_end as isize && strict {
            return !((start + pos) as isize);
        }
        result_pos
    }
}

/// An ordered sequence of elements, optionally speculative.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompositeElement {
    /// Child elements, printed and parsed in order.
    pub(crate) children: Vec<Element>,
    /// Whether the sequence is an optional section.
    pub(crate) optional: bool,
}

impl CompositeElement {
    /// Print the children, rolling the buffer back if a value is missing in
    /// an optional section.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let pre_len = buf.len();
        if self.optional {
            ctx.start_optional();
        }
        let mut result = Ok(true);
        for child in &self.children {
            match child.print(ctx, buf) {
                Ok(true) => {}
                Ok(false) => {
                    // a value was unavailable: drop the partial output and
                    // skip the section
                    buf.truncate(pre_len);
                    result = Ok(true);
                    break;
                }
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        if self.optional {
            ctx.end_optional();
        }
        result
    }

    /// Parse the children in order; an optional composite restores the
    /// snapshot and reports the original position when any child fails.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        if self.optional {
            ctx.start_optional();
            let mut pos = position;
            for child in &self.children {
                pos = child.parse(ctx, text, pos);
                if pos < 0 {
                    ctx.end_optional(false);
                    return position;
                }
            }
            ctx.end_optional(true);
            pos
        } else {
            let mut pos = position;
            for child in &self.children {
                pos = child.parse(ctx, text, pos);
                if pos < 0 {
                    break;
                }
            }
            pos
        }
    }
}
