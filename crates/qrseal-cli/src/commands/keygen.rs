//! Keygen command implementation.

use qrseal_core::PrivateKey;
use std::path::{Path, PathBuf};

pub fn run(out: PathBuf, public: Option<PathBuf>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let public = public.unwrap_or_else(|| public_path_for(&out));
    if !force {
        for path in [&out, &public] {
            if path.exists() {
                return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
            }
        }
    }

    let key = PrivateKey::generate();
    key.write_pem(&out, force)?;
    key.public_key().write_pem(&public, force)?;

    println!("Private key: {}", out.display());
    println!("Public key:  {}", public.display());
    Ok(())
}

/// `keys/signer.pem` -> `keys/signer.pub.pem`.
fn public_path_for(private: &Path) -> PathBuf {
    let stem = private
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "signer".to_string());
    private.with_file_name(format!("{stem}.pub.pem"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_path_sits_next_to_private() {
        assert_eq!(
            public_path_for(Path::new("keys/signer.pem")),
            PathBuf::from("keys/signer.pub.pem")
        );
        assert_eq!(public_path_for(Path::new("issuer")), PathBuf::from("issuer.pub.pem"));
    }
}
