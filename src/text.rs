//! Textual names for field values.
//!
//! The formatter looks names up through the [`TextProvider`] trait so
//! applications can plug in localized resources. The built-in provider
//! carries locale-independent English names only.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::field::Field;
use crate::locale::Locale;
use crate::style::TextStyle;

/// List of full month names.
const MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// List of abbreviated month names.
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// List of narrow month names.
const MONTHS_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

/// List of full weekday names, Monday first.
const DAYS_FULL: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// List of abbreviated weekday names, Monday first.
const DAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// List of narrow weekday names, Monday first.
const DAYS_NARROW: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

/// Meridiem indicators.
const AMPM: [&str; 2] = ["AM", "PM"];

/// Abbreviated era names.
const ERAS_SHORT: [&str; 2] = ["BC", "AD"];

/// Full era names.
const ERAS_FULL: [&str; 2] = ["Before Christ", "Anno Domini"];

/// Narrow era names.
const ERAS_NARROW: [&str; 2] = ["B", "A"];

/// Abbreviated quarter names.
const QUARTERS_SHORT: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Full quarter names.
const QUARTERS_FULL: [&str; 4] = ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];

/// A lookup from field values to display names and back.
pub trait TextProvider: fmt::Debug + Send + Sync {
    /// The text for a field value in a style, if any.
    fn text(&self, field: Field, value: i64, style: TextStyle, locale: &Locale) -> Option<&str>;

    /// The `(text, value)` pairs to try while parsing, longest text first.
    ///
    /// `style` is `None` when parsing leniently, in which case entries of all
    /// styles are returned. `None` as a result means the field has no text
    /// and the caller should fall back to numeric parsing.
    fn parse_entries(
        &self,
        field: Field,
        style: Option<TextStyle>,
        locale: &Locale,
    ) -> Option<Vec<(&str, i64)>>;
}

/// Sort parse entries longest-first, preserving insertion order for ties.
fn sort_longest_first(entries: &mut [(&str, i64)]) {
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
}

/// The built-in provider of locale-independent English names.
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultTextProvider;

impl DefaultTextProvider {
    /// The shared instance.
    pub const INSTANCE: &'static DefaultTextProvider = &DefaultTextProvider;

    /// The name table for a field and style, with the value of the first
    /// entry.
    fn table(field: Field, style: TextStyle) -> Option<(&'static [&'static str], i64)> {
        let table: &[&str] = match (field, style.as_normal()) {
            (Field::MonthOfYear, TextStyle::Full) => &MONTHS_FULL,
            (Field::MonthOfYear, TextStyle::Short) => &MONTHS_SHORT,
            (Field::MonthOfYear, TextStyle::Narrow) => &MONTHS_NARROW,
            (Field::DayOfWeek, TextStyle::Full) => &DAYS_FULL,
            (Field::DayOfWeek, TextStyle::Short) => &DAYS_SHORT,
            (Field::DayOfWeek, TextStyle::Narrow) => &DAYS_NARROW,
            (Field::AmpmOfDay, TextStyle::Full | TextStyle::Short | TextStyle::Narrow) => &AMPM,
            (Field::Era, TextStyle::Full) => &ERAS_FULL,
            (Field::Era, TextStyle::Short) => &ERAS_SHORT,
            (Field::Era, TextStyle::Narrow) => &ERAS_NARROW,
            (Field::QuarterOfYear, TextStyle::Full) => &QUARTERS_FULL,
            (Field::QuarterOfYear, TextStyle::Short | TextStyle::Narrow) => &QUARTERS_SHORT,
            _ => return None,
        };
        let first_value = match field {
            Field::AmpmOfDay | Field::Era => 0,
            _ => 1,
        };
        Some((table, first_value))
    }
}

impl TextProvider for DefaultTextProvider {
    fn text(&self, field: Field, value: i64, style: TextStyle, _locale: &Locale) -> Option<&str> {
        let (table, first) = Self::table(field, style)?;
        let index = usize::try_from(value.checked_sub(first)?).ok()?;
        table.get(index).copied()
    }

    fn parse_entries(
        &self,
        field: Field,
        style: Option<TextStyle>,
        _locale: &Locale,
    ) -> Option<Vec<(&str, i64)>> {
        let styles: &[TextStyle] = match style {
            Some(TextStyle::Full | TextStyle::FullStandalone) => &[TextStyle::Full],
            Some(TextStyle::Short | TextStyle::ShortStandalone) => &[TextStyle::Short],
            Some(TextStyle::Narrow | TextStyle::NarrowStandalone) => &[TextStyle::Narrow],
            None => &[TextStyle::Full, TextStyle::Short, TextStyle::Narrow],
        };
        let mut entries = Vec::new();
        for &style in styles {
            if let Some((table, first)) = Self::table(field, style) {
                for (index, &text) in table.iter().enumerate() {
                    entries.push((text, first + index as i64));
                }
            }
        }
        if entries.is_empty() {
            return None;
        }
        sort_longest_first(&mut entries);
        Some(entries)
    }
}

/// A provider backed by a user-supplied value-to-text map.
///
/// The same names are used for every style and locale.
#[derive(Debug, Clone)]
pub struct MapTextProvider {
    /// The `(value, text)` pairs.
    entries: Vec<(i64, Box<str>)>,
}

impl MapTextProvider {
    /// Construct a provider from `(value, text)` pairs.
    #[must_use]
    pub fn new(pairs: &[(i64, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|&(value, text)| (value, Box::from(text)))
            .collect();
        Self { entries }
    }
}

impl TextProvider for MapTextProvider {
    fn text(&self, _field: Field, value: i64, _style: TextStyle, _locale: &Locale) -> Option<&str> {
        self.entries
            .iter()
            .find(|&&(entry_value, _)| entry_value == value)
            .map(|(_, text)| &**text)
    }

    fn parse_entries(
        &self,
        _field: Field,
        _style: Option<TextStyle>,
        _locale: &Locale,
    ) -> Option<Vec<(&str, i64)>> {
        let mut entries: Vec<(&str, i64)> = self
            .entries
            .iter()
            .map(|(value, text)| (&**text, *value))
            .collect();
        sort_longest_first(&mut entries);
        Some(entries)
    }
}
