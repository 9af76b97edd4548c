//! Hash strategies injected into the engine.

use std::{error::Error as StdError, fmt};

use sha2::{Digest, Sha256};

/// Failure reported by a hash backend.
///
/// The backend's own error is kept as the [`source`](StdError::source) so
/// callers can downcast it.
#[derive(Debug)]
pub struct HashError {
    source: Box<dyn StdError + Send + Sync>,
}

impl HashError {
    /// Wrap a backend error.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }

    /// The backend's error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hash function failed: {}", self.source)
    }
}

impl StdError for HashError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// A string-to-string hash function.
///
/// Implementations must be deterministic: the engine relies on identical
/// inputs producing identical outputs to rebuild roots from partial data.
pub trait MerkleHasher {
    /// Hash `input` and return its digest as a string.
    fn hash(&self, input: &str) -> Result<String, HashError>;
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        (**self).hash(input)
    }
}

/// Lowercase hex SHA-256 of the UTF-8 input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        Ok(hex::encode(Sha256::digest(input.as_bytes())))
    }
}

/// Lowercase hex Blake3 of the UTF-8 input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        Ok(blake3::hash(input.as_bytes()).to_hex().to_string())
    }
}

/// Adapts a closure into a [`MerkleHasher`].
#[derive(Clone, Copy)]
pub struct FnHasher<F>(pub F);

impl<F> MerkleHasher for FnHasher<F>
where
    F: Fn(&str) -> Result<String, HashError>,
{
    fn hash(&self, input: &str) -> Result<String, HashError> {
        (self.0)(input)
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHasher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            Sha256Hasher.hash("a").unwrap(),
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        assert_eq!(
            Sha256Hasher.hash("-").unwrap(),
            "3973e022e93220f9212c18d0d0c543ae7c309e46640da93a4a0314de999f5112"
        );
    }

    #[test]
    fn test_blake3_hex() {
        let expected = blake3::hash(b"a").to_hex().to_string();
        assert_eq!(Blake3Hasher.hash("a").unwrap(), expected);
        assert_eq!(expected.len(), 64);
    }

    #[test]
    fn test_fn_hasher_error_keeps_source() {
        let hasher = FnHasher(|_: &str| -> Result<String, HashError> {
            Err(HashError::new(std::io::Error::other("device offline")))
        });
        let err = hasher.hash("x").unwrap_err();
        assert!(err.to_string().contains("device offline"));
        assert!(err.inner().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_reference_is_a_hasher() {
        let hasher = &Sha256Hasher;
        assert_eq!(hasher.hash("b").unwrap(), Sha256Hasher.hash("b").unwrap());
    }
}
