//! Verify command implementation.

use chrono::{DateTime, Utc};
use qrseal_core::{PublicKey, VerificationOutcome, Verifier};
use std::path::PathBuf;

use super::read_input;
use crate::output::{format_report, format_report_json};

/// Exit status for `--strict` when the signature does not check.
const EXIT_INVALID: i32 = 2;
/// Exit status for `--strict` when the signature checks but has expired.
const EXIT_EXPIRED: i32 = 3;

pub fn run(
    key: PathBuf,
    input: Option<PathBuf>,
    json_output: bool,
    strict: bool,
    at: Option<DateTime<Utc>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let verifier = Verifier::new(PublicKey::load_pem(&key)?);
    let text = read_input(input.as_deref())?;

    let report = verifier.verify_at(&text, at.unwrap_or_else(Utc::now))?;

    if json_output {
        println!("{}", format_report_json(&report)?);
    } else {
        println!("{}", format_report(&report));
    }

    if strict {
        match report.outcome {
            VerificationOutcome::Invalid => std::process::exit(EXIT_INVALID),
            VerificationOutcome::ValidExpired { .. } => std::process::exit(EXIT_EXPIRED),
            VerificationOutcome::ValidNoExpiry | VerificationOutcome::ValidActive { .. } => {}
        }
    }

    Ok(())
}
