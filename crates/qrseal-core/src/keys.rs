use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use p256::SecretKey;
use rand_core::OsRng;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::errors::CoreError;

const IN_MEMORY: &str = "<memory>";
const SEC1_LABEL: &str = "BEGIN EC PRIVATE KEY";

/// A P-256 private key for signing.
///
/// Does not implement `Serialize`, and `Debug` shows only the public half.
/// Held for the duration of a signing call; callers load it per session.
pub struct PrivateKey {
    inner: SigningKey,
}

/// A P-256 public key for verification.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PrivateKey {
    /// Generates a fresh key from the operating system RNG.
    pub fn generate() -> Self {
        Self {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Reads a PEM private key from disk.
    pub fn load_pem(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let pem = read_key_file(path)?;
        Self::decode(&pem, &path.display().to_string())
    }

    /// Parses a PEM private key held in memory.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        Self::decode(pem, IN_MEMORY)
    }

    fn decode(pem: &str, origin: &str) -> Result<Self, CoreError> {
        let inner = if pem.contains(SEC1_LABEL) {
            SecretKey::from_sec1_pem(pem)
                .map(SigningKey::from)
                .map_err(|err| key_load(origin, format!("not a P-256 SEC1 key: {err}")))?
        } else {
            SigningKey::from_pkcs8_pem(pem)
                .map_err(|err| key_load(origin, format!("not a P-256 PKCS#8 key: {err}")))?
        };
        tracing::debug!(origin, "loaded private key");
        Ok(Self { inner })
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key().clone(),
        }
    }

    /// Writes the key as PKCS#8 PEM, readable by the owner only on Unix.
    pub fn write_pem(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), CoreError> {
        let path = path.as_ref();
        let pem = self
            .inner
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|err| key_write(path, err.to_string()))?;
        write_key_file(path, pem.as_bytes(), overwrite, 0o600)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Reads a PEM (SPKI) public key from disk.
    pub fn load_pem(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let pem = read_key_file(path)?;
        Self::decode(&pem, &path.display().to_string())
    }

    /// Parses a PEM (SPKI) public key held in memory.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        Self::decode(pem, IN_MEMORY)
    }

    fn decode(pem: &str, origin: &str) -> Result<Self, CoreError> {
        let inner = VerifyingKey::from_public_key_pem(pem)
            .map_err(|err| key_load(origin, format!("not a P-256 public key: {err}")))?;
        Ok(Self { inner })
    }

    /// Encodes the key as SPKI PEM.
    pub fn to_pem(&self) -> Result<String, CoreError> {
        self.inner
            .to_public_key_pem(LineEnding::LF)
            .map_err(|err| CoreError::KeyWrite {
                path: IN_MEMORY.to_string(),
                reason: err.to_string(),
            })
    }

    /// Writes the key as SPKI PEM.
    pub fn write_pem(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), CoreError> {
        let path = path.as_ref();
        let pem = self.to_pem()?;
        write_key_file(path, pem.as_bytes(), overwrite, 0o644)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.inner.to_encoded_point(true);
        let hex: String = point.as_bytes().iter().take(8).map(|b| format!("{b:02x}")).collect();
        write!(f, "PublicKey({hex}...)")
    }
}

fn read_key_file(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|err| key_load(&path.display().to_string(), err.to_string()))
}

fn write_key_file(path: &Path, contents: &[u8], overwrite: bool, mode: u32) -> Result<(), CoreError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).map_err(|err| key_write(path, err.to_string()))?;
    file.write_all(contents)
        .and_then(|()| file.sync_all())
        .map_err(|err| key_write(path, err.to_string()))
}

fn key_load(origin: &str, reason: String) -> CoreError {
    CoreError::KeyLoad {
        path: origin.to_string(),
        reason,
    }
}

fn key_write(path: &Path, reason: String) -> CoreError {
    CoreError::KeyWrite {
        path: path.display().to_string(),
        reason,
    }
}
