//! Minimal locale identifier.

use alloc::borrow::Cow;

/// A locale tag carried through print and parse contexts.
///
/// The crate itself ships only locale-independent English text; the locale is
/// passed to [`TextProvider`](crate::text::TextProvider) implementations so
/// applications can plug in translated name lookups.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Locale {
    /// ISO 639 language code, lowercase.
    language: Cow<'static, str>,
    /// ISO 3166 region code, uppercase, possibly empty.
    region: Cow<'static, str>,
}

impl Locale {
    /// The root locale, with empty language and region.
    pub const ROOT: Self = Self {
        language: Cow::Borrowed(""),
        region: Cow::Borrowed(""),
    };

    /// The English language locale.
    pub const ENGLISH: Self = Self {
        language: Cow::Borrowed("en"),
        region: Cow::Borrowed(""),
    };

    /// Construct a locale from language and region codes.
    #[must_use]
    pub fn new(language: &str, region: &str) -> Self {
        Self {
            language: Cow::Owned(language.to_ascii_lowercase()),
            region: Cow::Owned(region.to_ascii_uppercase()),
        }
    }

    /// The language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region code, possibly empty.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ENGLISH
    }
}
