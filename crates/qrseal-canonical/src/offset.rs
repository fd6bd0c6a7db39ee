use chrono::{DateTime, FixedOffset, Offset, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::validation::ValidationError;

const SECONDS_PER_HOUR: i32 = 3600;

fn offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:UTC|GMT)?([+-])(\d{1,2})(?::?(\d{2}))?$").expect("invalid regex")
    })
}

/// A fixed UTC offset used to stamp `timestamp` and interpret `expires_at`.
///
/// Accepts `UTC`, the Indonesian zone names `WIB` (+07:00), `WITA` (+08:00)
/// and `WIT` (+09:00), or a numeric offset such as `+7`, `+05:30`,
/// `-0800` or `UTC+9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneOffset {
    offset: FixedOffset,
}

impl TimezoneOffset {
    /// UTC itself.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// A whole-hour offset east of UTC (negative for west).
    pub fn from_hours(hours: i32) -> Result<Self, ValidationError> {
        Self::from_seconds(hours.saturating_mul(SECONDS_PER_HOUR))
    }

    fn from_seconds(seconds: i32) -> Result<Self, ValidationError> {
        FixedOffset::east_opt(seconds)
            .map(|offset| Self { offset })
            .ok_or_else(|| ValidationError::OutOfBounds {
                field: "timezone",
                value: seconds.to_string(),
            })
    }

    /// The chrono offset.
    pub fn fixed(&self) -> FixedOffset {
        self.offset
    }

    /// Converts an instant into this offset.
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self::utc()
    }
}

impl FromStr for TimezoneOffset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "UTC" | "GMT" | "Z" => return Ok(Self::utc()),
            "WIB" => return Self::from_hours(7),
            "WITA" => return Self::from_hours(8),
            "WIT" => return Self::from_hours(9),
            _ => {}
        }

        let mismatch = || ValidationError::PatternMismatch {
            field: "timezone",
            value: trimmed.to_string(),
        };
        let caps = offset_pattern().captures(trimmed).ok_or_else(mismatch)?;
        let hours: i32 = caps[2].parse().map_err(|_| mismatch())?;
        let minutes: i32 = match caps.get(3) {
            Some(m) => m.as_str().parse().map_err(|_| mismatch())?,
            None => 0,
        };
        if hours > 23 || minutes > 59 {
            return Err(ValidationError::OutOfBounds {
                field: "timezone",
                value: trimmed.to_string(),
            });
        }
        let magnitude = hours * SECONDS_PER_HOUR + minutes * 60;
        let seconds = if &caps[1] == "-" { -magnitude } else { magnitude };
        Self::from_seconds(seconds)
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset.local_minus_utc() == 0 {
            f.write_str("UTC")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

impl Serialize for TimezoneOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimezoneOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
