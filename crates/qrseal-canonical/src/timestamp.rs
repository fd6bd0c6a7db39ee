use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::validation::ValidationError;

/// RFC 3339 date-time with an explicit UTC offset, kept verbatim.
///
/// The text is what gets signed, so it is never re-rendered after parsing:
/// `2025-01-01T10:00:00+07:00` and `2025-01-01T03:00:00Z` are the same
/// instant but produce different canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: String,
    at: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parses a timestamp, reporting failures against the `timestamp` field.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse_field("timestamp", value)
    }

    /// Parses a timestamp, reporting failures against `field`.
    pub fn parse_field(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Ok(Self { raw, at }),
            Err(_) => Err(ValidationError::InvalidDateTime { field, value: raw }),
        }
    }

    /// Renders a date-time at whole-second precision with a numeric offset
    /// (`+00:00` rather than `Z`).
    pub fn from_datetime(at: DateTime<FixedOffset>) -> Self {
        let at = at.with_nanosecond(0).unwrap_or(at);
        Self {
            raw: at.to_rfc3339_opts(SecondsFormat::Secs, false),
            at,
        }
    }

    /// The exact text that participates in canonical bytes.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The instant this timestamp denotes, in its own offset.
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.at
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn keeps_received_text_verbatim() {
        let ts = Timestamp::parse("2025-01-01T10:00:00.123456+07:00").unwrap();
        assert_eq!(ts.as_str(), "2025-01-01T10:00:00.123456+07:00");
        assert_eq!(ts.instant().offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn rejects_missing_offset() {
        let err = Timestamp::parse_field("expires_at", "2025-01-01T10:00:00").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateTime { field: "expires_at", .. }));
    }

    #[test]
    fn renders_numeric_utc_offset_at_second_precision() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let at = utc
            .with_ymd_and_hms(2025, 3, 4, 5, 6, 7)
            .unwrap()
            .with_nanosecond(987_000_000)
            .unwrap();
        let ts = Timestamp::from_datetime(at);
        assert_eq!(ts.as_str(), "2025-03-04T05:06:07+00:00");
        assert_eq!(ts.instant().nanosecond(), 0);
    }
}
