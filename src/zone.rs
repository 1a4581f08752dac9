//! Time-zone identifiers and offsets.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::Error;

/// Maximum absolute offset from UTC, eighteen hours in seconds.
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A fixed offset from UTC.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZoneOffset {
    /// Total offset in seconds, within eighteen hours of UTC.
    total_seconds: i32,
}

impl ZoneOffset {
    /// The UTC offset.
    pub const UTC: Self = Self { total_seconds: 0 };

    /// Construct an offset from a total number of seconds.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the offset exceeds eighteen hours.
    pub fn of_total_seconds(total_seconds: i32) -> Result<Self, Error> {
        if total_seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(Error::resolve(alloc::format!(
                "zone offset not in -18:00 to +18:00: {total_seconds}s"
            )));
        }
        Ok(Self { total_seconds })
    }

    /// Construct an offset from hours.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the offset exceeds eighteen hours.
    pub fn of_hours(hours: i32) -> Result<Self, Error> {
        Self::of_total_seconds(hours * 3600)
    }

    /// Construct an offset from hours and minutes, which must share a sign.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] if the offset exceeds eighteen hours.
    pub fn of_hours_minutes(hours: i32, minutes: i32) -> Result<Self, Error> {
        Self::of_total_seconds(hours * 3600 + minutes * 60)
    }

    /// The total offset in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> i32 {
        self.total_seconds
    }

    /// The canonical identifier, `Z` for UTC or `+HH:MM[:SS]`.
    #[must_use]
    pub fn id(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_seconds == 0 {
            return f.write_str("Z");
        }
        let abs = self.total_seconds.unsigned_abs();
        let sign = if self.total_seconds < 0 { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, abs / 3600, abs / 60 % 60)?;
        if abs % 60 != 0 {
            write!(f, ":{:02}", abs % 60)?;
        }
        Ok(())
    }
}

/// A time-zone identifier: a fixed offset, an offset behind a `UT`/`UTC`/`GMT`
/// prefix, or a region id such as `Europe/Paris`.
///
/// Region ids carry no rules; converting an instant through a region zone is
/// the job of an external zone-rules provider.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ZoneId {
    /// A fixed offset from UTC.
    Offset(ZoneOffset),
    /// An offset rendered behind a prefix, such as `GMT+02:00`.
    Prefixed {
        /// One of `UT`, `UTC` or `GMT`.
        prefix: Box<str>,
        /// The offset following the prefix.
        offset: ZoneOffset,
    },
    /// A region id from the zone database.
    Region(Box<str>),
}

impl ZoneId {
    /// Construct a region zone id.
    #[must_use]
    pub fn region(id: &str) -> Self {
        ZoneId::Region(id.into())
    }

    /// Construct a prefixed offset zone id; an empty prefix yields a plain
    /// offset zone.
    #[must_use]
    pub fn of_offset(prefix: &str, offset: ZoneOffset) -> Self {
        if prefix.is_empty() {
            ZoneId::Offset(offset)
        } else {
            ZoneId::Prefixed {
                prefix: prefix.into(),
                offset,
            }
        }
    }

    /// The full textual identifier.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            ZoneId::Offset(offset) => offset.id(),
            ZoneId::Prefixed { prefix, offset } => {
                if offset.total_seconds() == 0 {
                    String::from(&**prefix)
                } else {
                    alloc::format!("{prefix}{offset}")
                }
            }
            ZoneId::Region(id) => String::from(&**id),
        }
    }

    /// The offset, if this zone is a fixed offset in disguise.
    #[must_use]
    pub fn normalized_offset(&self) -> Option<ZoneOffset> {
        match self {
            ZoneId::Offset(offset) | ZoneId::Prefixed { offset, .. } => Some(*offset),
            ZoneId::Region(_) => None,
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// A source of region zone ids for zone-id parsing.
///
/// The built-in registry carries a compact set of well-known ids;
/// applications backed by a full zone database install their own provider
/// with [`set_zone_id_provider`].
pub trait ZoneIdProvider: Send + Sync {
    /// All region zone ids known to the provider.
    fn zone_ids(&self) -> Vec<String>;
}

/// Well-known region ids used when no provider is installed.
static DEFAULT_ZONE_IDS: &[&str] = &[
    "Africa/Cairo",
    "Africa/Johannesburg",
    "Africa/Lagos",
    "Africa/Nairobi",
    "America/Anchorage",
    "America/Argentina/Buenos_Aires",
    "America/Bogota",
    "America/Chicago",
    "America/Denver",
    "America/Halifax",
    "America/Lima",
    "America/Los_Angeles",
    "America/Mexico_City",
    "America/New_York",
    "America/Phoenix",
    "America/Santiago",
    "America/Sao_Paulo",
    "America/St_Johns",
    "America/Toronto",
    "America/Vancouver",
    "Asia/Bangkok",
    "Asia/Dhaka",
    "Asia/Dubai",
    "Asia/Hong_Kong",
    "Asia/Jakarta",
    "Asia/Jerusalem",
    "Asia/Karachi",
    "Asia/Kathmandu",
    "Asia/Kolkata",
    "Asia/Manila",
    "Asia/Riyadh",
    "Asia/Seoul",
    "Asia/Shanghai",
    "Asia/Singapore",
    "Asia/Taipei",
    "Asia/Tehran",
    "Asia/Tokyo",
    "Atlantic/Azores",
    "Atlantic/Reykjavik",
    "Australia/Adelaide",
    "Australia/Brisbane",
    "Australia/Darwin",
    "Australia/Melbourne",
    "Australia/Perth",
    "Australia/Sydney",
    "Europe/Amsterdam",
    "Europe/Athens",
    "Europe/Berlin",
    "Europe/Brussels",
    "Europe/Bucharest",
    "Europe/Budapest",
    "Europe/Dublin",
    "Europe/Helsinki",
    "Europe/Istanbul",
    "Europe/Kyiv",
    "Europe/Lisbon",
    "Europe/London",
    "Europe/Madrid",
    "Europe/Moscow",
    "Europe/Oslo",
    "Europe/Paris",
    "Europe/Prague",
    "Europe/Rome",
    "Europe/Stockholm",
    "Europe/Vienna",
    "Europe/Warsaw",
    "Europe/Zurich",
    "Pacific/Auckland",
    "Pacific/Fiji",
    "Pacific/Honolulu",
    "UTC",
];

#[cfg(feature = "std")]
mod registry {
    use alloc::sync::Arc;
    use std::sync::RwLock;

    use super::ZoneIdProvider;

    /// Installed provider, if any.
    static PROVIDER: RwLock<Option<Arc<dyn ZoneIdProvider>>> = RwLock::new(None);

    /// Install a process-wide zone-id provider for region-id parsing.
    pub fn set_zone_id_provider(provider: Arc<dyn ZoneIdProvider>) {
        *PROVIDER.write().expect("zone provider lock poisoned") = Some(provider);
    }

    pub(crate) fn installed_provider() -> Option<Arc<dyn ZoneIdProvider>> {
        PROVIDER.read().expect("zone provider lock poisoned").clone()
    }
}

#[cfg(feature = "std")]
pub use registry::set_zone_id_provider;

/// The region zone ids available for parsing.
pub(crate) fn available_zone_ids() -> Vec<String> {
    #[cfg(feature = "std")]
    if let Some(provider) = registry::installed_provider() {
        return provider.zone_ids();
    }
    DEFAULT_ZONE_IDS.iter().map(|&id| id.to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_display() {
        assert_eq!(ZoneOffset::UTC.id(), "Z");
        assert_eq!(ZoneOffset::of_hours(1).unwrap().id(), "+01:00");
        assert_eq!(ZoneOffset::of_hours(-5).unwrap().id(), "-05:00");
        assert_eq!(
            ZoneOffset::of_total_seconds(-(5 * 3600 + 30 * 60 + 15))
                .unwrap()
                .id(),
            "-05:30:15"
        );
        assert!(ZoneOffset::of_hours(19).is_err());
    }

    #[test]
    fn test_zone_id() {
        let offset = ZoneOffset::of_hours(2).unwrap();
        assert_eq!(ZoneId::of_offset("", offset).id(), "+02:00");
        assert_eq!(ZoneId::of_offset("GMT", offset).id(), "GMT+02:00");
        assert_eq!(ZoneId::of_offset("UTC", ZoneOffset::UTC).id(), "UTC");
        assert_eq!(ZoneId::region("Europe/Paris").id(), "Europe/Paris");
        assert_eq!(
            ZoneId::of_offset("GMT", offset).normalized_offset(),
            Some(offset)
        );
        assert_eq!(ZoneId::region("Europe/Paris").normalized_offset(), None);
    }

    #[test]
    fn test_default_zone_ids_sorted() {
        let ids = available_zone_ids();
        assert!(ids.iter().any(|id| id == "Europe/Paris"));
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
