//! Canonicalize command implementation.

use qrseal_canonical::{parse_artifact, Digest};
use std::path::PathBuf;

use super::read_input;

pub fn run(input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input.as_deref())?;

    // Any signature present is dropped; only payload fields are canonical.
    let received = parse_artifact(&text).map_err(|e| format!("Invalid payload: {}", e))?;
    let canonical = received
        .payload
        .canonical_bytes()
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(canonical.as_bytes()));
    println!("{}", Digest::of(&canonical));
    Ok(())
}
