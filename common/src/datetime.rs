//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Parses a [`DateTime`] from an [ISO 8601] string.
    ///
    /// Unlike [`DateTimeOf::from_rfc3339()`], the offset may be omitted, in
    /// which case the date and time is assumed to be in UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date and time.
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        if let Ok(dt) = Self::from_rfc3339(input) {
            return Ok(dt);
        }
        match time::OffsetDateTime::parse(input, &Iso8601::DEFAULT) {
            Ok(dt) => dt.try_into().map_err(E::ComponentRange),
            Err(_) => time::PrimitiveDateTime::parse(input, &Iso8601::DEFAULT)
                .map_err(E::Parse)?
                .assume_utc()
                .try_into()
                .map_err(E::ComponentRange),
        }
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the calendar date of this [`DateTime`] in `YYYY-MM-DD` format.
    #[must_use]
    pub fn date(&self) -> String {
        self.inner.date().to_string()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod iso8601 {
        //! Module providing serialization and deserialization of
        //! [`DateTimeOf`] as an ISO 8601 string.

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as an RFC 3339 string.
        ///
        /// # Errors
        ///
        /// Never errors on its own, only propagates [`Serializer`] errors.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_str(&dt.to_rfc3339())
        }

        /// Deserializes an ISO 8601 string into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string is not a valid date and time.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            let s = String::deserialize(deserializer)?;
            DateTimeOf::parse(&s).map_err(|e| {
                Error::custom(format!("invalid date and time `{s}`: {e}"))
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn parses_rfc3339() {
        let dt = DateTime::parse("2024-01-01T10:00:00+02:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-01-01T08:00:00Z");
        assert_eq!(dt.date(), "2024-01-01");
    }

    #[test]
    fn parses_without_offset_as_utc() {
        let dt = DateTime::parse("2024-03-05T23:15:00.123456").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-03-05T23:15:00.123456Z");
        assert_eq!(dt.date(), "2024-03-05");
    }

    #[test]
    fn rejects_garbage() {
        assert!(DateTime::parse("yesterday").is_err());
        assert!(DateTime::parse("").is_err());
    }

    #[test]
    fn orders_chronologically() {
        let earlier = DateTime::parse("2024-01-01T00:00:00Z").unwrap();
        let later = DateTime::parse("2024-01-02T00:00:00Z").unwrap();

        assert!(earlier < later);
        assert!(DateTime::UNIX_EPOCH < earlier);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json_string() {
        let mut de =
            serde_json::Deserializer::from_str("\"2024-01-01T10:00:00\"");
        let dt: DateTime = super::serde::iso8601::deserialize(&mut de).unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-01-01T10:00:00Z");
    }
}
