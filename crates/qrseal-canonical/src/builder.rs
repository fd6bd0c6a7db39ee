use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::offset::TimezoneOffset;
use crate::payload::Payload;
use crate::timestamp::Timestamp;
use crate::validation::ValidationError;

/// Signing-time stamping options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Record the signing time in `timestamp`.
    pub timestamp: bool,
    /// Offset used for `timestamp` and for interpreting the expiration.
    pub timezone: TimezoneOffset,
    /// Record `expires_at`. Only honoured together with `timestamp`.
    pub expiration: bool,
}

/// Inputs for building a payload.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Content being attested; trimmed before use.
    pub data: String,
    /// Optional document identifier; empty means absent.
    pub doc_id: Option<String>,
    /// Optional attestation author; empty means absent.
    pub created_by: Option<String>,
    /// Stamping options.
    pub stamp: StampConfig,
    /// Wall-clock expiration, read in `stamp.timezone`.
    pub expiration: Option<NaiveDateTime>,
}

/// Builds a payload stamped with the current system time.
pub fn build(request: &BuildRequest) -> Result<Payload, ValidationError> {
    build_at(request, Utc::now())
}

/// Builds a payload stamped with `now`.
///
/// `expires_at` depends on `timestamp`: asking for an expiration without a
/// timestamp leaves both out rather than failing, since an expiry with no
/// issue time is not something the verifier is meant to see.
pub fn build_at(request: &BuildRequest, now: DateTime<Utc>) -> Result<Payload, ValidationError> {
    let data = request.data.trim();
    if data.is_empty() {
        return Err(ValidationError::EmptyField { field: "data" });
    }

    let mut payload = Payload::new(data)?;
    if let Some(doc_id) = non_empty(&request.doc_id) {
        payload = payload.with_doc_id(doc_id);
    }
    if let Some(created_by) = non_empty(&request.created_by) {
        payload = payload.with_created_by(created_by);
    }

    let stamp = request.stamp;
    if !stamp.timestamp {
        if stamp.expiration {
            tracing::debug!("expiration requested without timestamp; not recorded");
        }
        return Ok(payload);
    }

    let issued = Timestamp::from_datetime(stamp.timezone.at(now));
    payload = payload.with_timestamp(issued.clone());

    if stamp.expiration {
        let wall = request
            .expiration
            .ok_or(ValidationError::MissingField {
                field: "expiration_datetime",
            })?;
        let expires = stamp
            .timezone
            .fixed()
            .from_local_datetime(&wall)
            .single()
            .ok_or_else(|| ValidationError::InvalidDateTime {
                field: "expiration_datetime",
                value: wall.to_string(),
            })?;
        let expires = Timestamp::from_datetime(expires);
        if expires.instant() <= issued.instant() {
            tracing::warn!(
                expires_at = %expires,
                timestamp = %issued,
                "expiration is not after the signing time"
            );
        }
        payload = payload.with_expires_at(expires);
    }

    Ok(payload)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn empty_optionals_are_absent() {
        let request = BuildRequest {
            data: "hello".into(),
            doc_id: Some(String::new()),
            created_by: None,
            ..Default::default()
        };
        let payload = build(&request).unwrap();
        assert_eq!(payload.doc_id(), None);
        assert_eq!(payload.created_by(), None);
    }

    #[test]
    fn whitespace_only_data_is_rejected() {
        let request = BuildRequest {
            data: " \n\t ".into(),
            ..Default::default()
        };
        assert_eq!(
            build(&request).unwrap_err(),
            ValidationError::EmptyField { field: "data" }
        );
    }

    #[test]
    fn missing_expiration_datetime_is_reported() {
        let request = BuildRequest {
            data: "x".into(),
            stamp: StampConfig {
                timestamp: true,
                expiration: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            build(&request).unwrap_err(),
            ValidationError::MissingField {
                field: "expiration_datetime"
            }
        );
    }

    #[test]
    fn expiration_is_read_in_the_stamp_offset() {
        let request = BuildRequest {
            data: "x".into(),
            stamp: StampConfig {
                timestamp: true,
                timezone: "WITA".parse().unwrap(),
                expiration: true,
            },
            expiration: Some(at(2030, 1, 2, 3, 4)),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2029, 12, 31, 16, 0, 0).unwrap();
        let payload = build_at(&request, now).unwrap();
        assert_eq!(
            payload.timestamp().unwrap().as_str(),
            "2030-01-01T00:00:00+08:00"
        );
        assert_eq!(
            payload.expires_at().unwrap().as_str(),
            "2030-01-02T03:04:00+08:00"
        );
    }
}
