//! Output formatting utilities.

use qrseal_canonical::{Digest, Payload};
use qrseal_core::{VerificationOutcome, VerificationReport};
use serde::Serialize;

#[derive(Serialize)]
struct ReportJson<'a> {
    #[serde(flatten)]
    outcome: &'a VerificationOutcome,
    fingerprint: &'a Digest,
    payload: &'a Payload,
}

/// Formats a verification report as pretty JSON.
pub fn format_report_json(report: &VerificationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportJson {
        outcome: &report.outcome,
        fingerprint: &report.fingerprint,
        payload: &report.payload,
    })
}

/// One-line summary of an outcome.
pub fn outcome_label(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Invalid => "INVALID (signature does not match)".to_string(),
        VerificationOutcome::ValidNoExpiry => "VALID (no expiry)".to_string(),
        VerificationOutcome::ValidActive { expires_at } => {
            format!("VALID (active until {expires_at})")
        }
        VerificationOutcome::ValidExpired { expires_at } => {
            format!("VALID but EXPIRED (expired at {expires_at})")
        }
    }
}

/// Formats a verification report for a terminal.
pub fn format_report(report: &VerificationReport) -> String {
    let mut lines = vec![
        format_row("Result", &outcome_label(&report.outcome)),
        format_row("Fingerprint", &report.fingerprint.to_string()),
    ];
    if !report.outcome.is_authentic() {
        lines.push("Claimed payload (not authenticated):".to_string());
    }
    lines.extend(format_payload(&report.payload));
    lines.join("\n")
}

/// Formats payload fields as aligned rows, absent fields omitted.
pub fn format_payload(payload: &Payload) -> Vec<String> {
    let mut rows = vec![format_row("data", payload.data())];
    if let Some(doc_id) = payload.doc_id() {
        rows.push(format_row("doc_id", doc_id));
    }
    if let Some(created_by) = payload.created_by() {
        rows.push(format_row("created_by", created_by));
    }
    if let Some(timestamp) = payload.timestamp() {
        rows.push(format_row("timestamp", timestamp.as_str()));
    }
    if let Some(expires_at) = payload.expires_at() {
        rows.push(format_row("expires_at", expires_at.as_str()));
    }
    rows
}

fn format_row(label: &str, value: &str) -> String {
    format!("{:<12} {}", format!("{label}:"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned() {
        assert_eq!(format_row("data", "x"), "data:        x");
        assert_eq!(format_row("Fingerprint", "y"), "Fingerprint: y");
    }

    #[test]
    fn payload_rows_skip_absent_fields() {
        let payload = Payload::new("hello").unwrap().with_created_by("Dinas");
        assert_eq!(
            format_payload(&payload),
            vec!["data:        hello", "created_by:  Dinas"]
        );
    }
}
