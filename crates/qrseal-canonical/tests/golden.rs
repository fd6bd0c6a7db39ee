use chrono::{NaiveDate, TimeZone, Utc};
use qrseal_canonical::{
    build_at, canonicalize, parse_artifact, BuildRequest, Digest, DigestAlg, ParseError, Payload,
    SignatureBytes, SignedArtifact, StampConfig, Timestamp,
};

fn full_payload() -> Payload {
    Payload::new("Surat Keterangan — Jakarta")
        .unwrap()
        .with_doc_id("DOC-001")
        .with_created_by("Dinas")
        .with_timestamp(Timestamp::parse("2025-01-01T10:00:00+07:00").unwrap())
        .with_expires_at(Timestamp::parse("2025-06-01T00:00:00+07:00").unwrap())
}

#[test]
fn data_only_payload_has_exact_bytes() {
    let payload = Payload::new("hello").unwrap();
    let bytes = canonicalize(&payload).unwrap();
    assert_eq!(bytes.as_bytes(), br#"{"data":"hello"}"#);
}

#[test]
fn fields_follow_fixed_order_not_alphabetical() {
    let bytes = canonicalize(&full_payload()).unwrap();
    assert_eq!(
        String::from_utf8(bytes.as_bytes().to_vec()).unwrap(),
        r#"{"data":"Surat Keterangan — Jakarta","doc_id":"DOC-001","created_by":"Dinas","timestamp":"2025-01-01T10:00:00+07:00","expires_at":"2025-06-01T00:00:00+07:00"}"#
    );
}

#[test]
fn non_ascii_is_literal_and_control_characters_are_escaped() {
    let payload = Payload::new("café\tñ\n日本 🚀").unwrap();
    let bytes = canonicalize(&payload).unwrap();
    assert_eq!(
        String::from_utf8(bytes.as_bytes().to_vec()).unwrap(),
        "{\"data\":\"café\\tñ\\n日本 🚀\"}"
    );
}

#[test]
fn signed_artifact_puts_signature_last() {
    let artifact = SignedArtifact::new(Payload::new("hello").unwrap().with_doc_id("A1"), &[1, 2, 3]);
    assert_eq!(
        artifact.to_json().unwrap(),
        r#"{"data":"hello","doc_id":"A1","signature":"AQID"}"#
    );
}

#[test]
fn parse_rebuilds_canonical_bytes_regardless_of_wire_order() {
    let reordered = r#"{
        "signature": "AQID",
        "expires_at": "2025-06-01T00:00:00+07:00",
        "created_by": "Dinas",
        "timestamp": "2025-01-01T10:00:00+07:00",
        "doc_id": "DOC-001",
        "data": "Surat Keterangan — Jakarta"
    }"#;
    let received = parse_artifact(reordered).unwrap();
    assert_eq!(received.signature.as_deref(), Some("AQID"));
    assert_eq!(
        received.signature_bytes().unwrap(),
        Some(SignatureBytes::Decoded(vec![1, 2, 3]))
    );
    assert_eq!(
        canonicalize(&received.payload).unwrap(),
        canonicalize(&full_payload()).unwrap()
    );
}

#[test]
fn parse_reports_structural_problems() {
    assert!(matches!(parse_artifact("not json"), Err(ParseError::Json { line: 1, .. })));
    assert_eq!(parse_artifact("[1,2]"), Err(ParseError::NotAnObject));
    assert_eq!(
        parse_artifact(r#"{"doc_id":"x","signature":"AA=="}"#),
        Err(ParseError::MissingField { field: "data" })
    );
    assert_eq!(
        parse_artifact(r#"{"data":"  "}"#),
        Err(ParseError::EmptyField { field: "data" })
    );
    assert_eq!(
        parse_artifact(r#"{"data":"x","doc_id":7}"#),
        Err(ParseError::WrongType { field: "doc_id" })
    );
    assert_eq!(
        parse_artifact(r#"{"data":"x","note":"extra"}"#),
        Err(ParseError::UnknownField("note".into()))
    );
    assert!(matches!(
        parse_artifact(r#"{"data":"x","expires_at":"tomorrow"}"#),
        Err(ParseError::InvalidTimestamp { field: "expires_at", .. })
    ));
}

#[test]
fn signature_must_be_standard_base64() {
    let received = parse_artifact(r#"{"data":"x","signature":"not*base64"}"#).unwrap();
    assert!(matches!(
        received.signature_bytes(),
        Err(ParseError::InvalidSignatureEncoding(_))
    ));
    let url_safe = parse_artifact(r#"{"data":"x","signature":"-_-_"}"#).unwrap();
    assert!(url_safe.signature_bytes().is_err());
}

#[test]
fn corrupted_base64_within_alphabet_is_malformed() {
    // Bad trailing bits, stray padding, wrong length.
    for sig in ["AQJ=", "AQ=D", "AQIDB", "AQIDBA="] {
        let text = format!(r#"{{"data":"x","signature":"{sig}"}}"#);
        let received = parse_artifact(&text).unwrap();
        assert_eq!(
            received.signature_bytes().unwrap(),
            Some(SignatureBytes::Malformed),
            "{sig}"
        );
    }
}

#[test]
fn missing_signature_parses_as_none() {
    let received = parse_artifact(r#"{"data":"hello"}"#).unwrap();
    assert_eq!(received.signature, None);
    assert_eq!(received.signature_bytes().unwrap(), None);
}

#[test]
fn expiration_without_timestamp_is_dropped() {
    let request = BuildRequest {
        data: "  hello  ".into(),
        stamp: StampConfig {
            timestamp: false,
            expiration: true,
            ..Default::default()
        },
        expiration: NaiveDate::from_ymd_opt(2030, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        ..Default::default()
    };
    let payload = build_at(&request, Utc::now()).unwrap();
    assert_eq!(canonicalize(&payload).unwrap().as_bytes(), br#"{"data":"hello"}"#);
}

#[test]
fn stamped_payload_uses_requested_offset() {
    let request = BuildRequest {
        data: "hello".into(),
        doc_id: Some("D-9".into()),
        created_by: Some("Registry".into()),
        stamp: StampConfig {
            timestamp: true,
            timezone: "WIB".parse().unwrap(),
            expiration: false,
        },
        expiration: None,
    };
    let now = Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap();
    let payload = build_at(&request, now).unwrap();
    assert_eq!(
        canonicalize(&payload).unwrap().as_bytes(),
        br#"{"data":"hello","doc_id":"D-9","created_by":"Registry","timestamp":"2025-05-06T14:08:09+07:00"}"#
    );
}

#[test]
fn digest_serializes_to_golden_json() {
    let bytes = canonicalize(&Payload::new("hello").unwrap()).unwrap();
    let digest = Digest::of(&bytes);
    assert_eq!(digest.alg, DigestAlg::Sha256);
    assert_eq!(digest.b64.len(), 43);
    let json = serde_json::to_value(&digest).unwrap();
    assert_eq!(json["alg"], "sha-256");
    assert!(digest.to_string().starts_with("sha-256:"));
}
