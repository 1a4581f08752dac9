//! The text element, converting between field values and display names.

use alloc::string::String;
use alloc::sync::Arc;

use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::format::numeric::NumberElement;
use crate::style::{SignStyle, TextStyle};
use crate::text::TextProvider;
use crate::Error;

/// A field printed and parsed as text, with a numeric fallback.
#[derive(Debug, Clone)]
pub(crate) struct TextElement {
    /// Field to print and parse.
    pub(crate) field: Field,
    /// Requested text style.
    pub(crate) style: TextStyle,
    /// Name lookup.
    pub(crate) provider: Arc<dyn TextProvider>,
}

impl TextElement {
    /// The numeric element used when no text is available.
    fn number(&self) -> NumberElement {
        NumberElement::new(self.field, 1, 19, SignStyle::Normal)
    }

    /// Print the name of the field value, falling back to digits.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.field)? else {
            return Ok(false);
        };
        match self.provider.text(self.field, value, self.style, ctx.locale()) {
            Some(text) => {
                buf.push_str(text);
                Ok(true)
            }
            None => {
                self.number().print_value(ctx, buf, value)?;
                Ok(true)
            }
        }
    }

    /// Parse a name, longest candidates first, falling back to digits.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let pos = position as usize;
        if pos > text.len() {
            return !position;
        }
        // lenient parsing matches names of any style
        let style = if ctx.is_strict() { Some(self.style) } else { None };
        if let Some(entries) = self.provider.parse_entries(self.field, style, ctx.locale()) {
            for (candidate, value) in entries {
                if let Some(end) = ctx.match_literal(text, pos, candidate) {
                    return ctx.set_parsed_field(self.field, value, pos, end);
                }
            }
            if ctx.is_strict() {
                return !position;
            }
        }
        self.number().parse(ctx, text, position)
    }
}
