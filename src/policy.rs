//! Signing policy: the approved hash set and minimum modulus size.
//!
//! Both knobs are deployment configuration, injected into the signer factory
//! rather than hard-coded in it. The defaults follow common hardening
//! guidance: a 2048-bit modulus floor and the SHA-2 family only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Hash algorithms a signer can be asked to use.
///
/// SHA-1 is listed so a policy can name (and reject) it; it is excluded from
/// [`SigningPolicy::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Digest output length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        };
        write!(f, "{}", s)
    }
}

/// Default minimum modulus bit length.
pub const DEFAULT_MIN_MODULUS_BITS: usize = 2048;

/// Key acceptance policy applied before any signer is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPolicy {
    /// Minimum modulus size in bits.
    pub min_modulus_bits: usize,
    /// Hash algorithms signers are allowed to use.
    pub approved_hashes: Vec<HashAlgorithm>,
}

impl Default for SigningPolicy {
    fn default() -> Self {
        Self {
            min_modulus_bits: DEFAULT_MIN_MODULUS_BITS,
            approved_hashes: vec![
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha384,
                HashAlgorithm::Sha512,
            ],
        }
    }
}

impl SigningPolicy {
    /// Check a hash selector against the approved set and return the resolved
    /// selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedHash`] if the algorithm is not approved.
    pub fn validate_hash(&self, hash: HashAlgorithm) -> Result<HashAlgorithm, Error> {
        if self.approved_hashes.contains(&hash) {
            Ok(hash)
        } else {
            Err(Error::UnsupportedHash(hash))
        }
    }

    /// Check a modulus bit length against the policy minimum.
    ///
    /// Pure and side-effect free, so callers can use it as a pre-flight check
    /// before assembling any key material.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModulusTooSmall`] if `bit_length` is below the
    /// minimum.
    pub fn validate_modulus_size(&self, bit_length: usize) -> Result<(), Error> {
        if bit_length < self.min_modulus_bits {
            Err(Error::ModulusTooSmall {
                bits: bit_length,
                min: self.min_modulus_bits,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_hash_set() {
        let policy = SigningPolicy::default();
        assert!(policy.validate_hash(HashAlgorithm::Sha256).is_ok());
        assert!(policy.validate_hash(HashAlgorithm::Sha384).is_ok());
        assert!(policy.validate_hash(HashAlgorithm::Sha512).is_ok());
        assert!(matches!(
            policy.validate_hash(HashAlgorithm::Sha1),
            Err(Error::UnsupportedHash(HashAlgorithm::Sha1))
        ));
    }

    #[test]
    fn test_modulus_size_boundary() {
        let policy = SigningPolicy::default();
        assert!(policy.validate_modulus_size(2048).is_ok());
        assert!(policy.validate_modulus_size(4096).is_ok());
        assert!(matches!(
            policy.validate_modulus_size(2047),
            Err(Error::ModulusTooSmall { bits: 2047, min: 2048 })
        ));
        assert!(policy.validate_modulus_size(512).is_err());
    }

    #[test]
    fn test_custom_policy_can_admit_legacy_hash() {
        let policy = SigningPolicy {
            min_modulus_bits: 1024,
            approved_hashes: vec![HashAlgorithm::Sha1, HashAlgorithm::Sha256],
        };
        assert!(policy.validate_hash(HashAlgorithm::Sha1).is_ok());
        assert!(policy.validate_hash(HashAlgorithm::Sha512).is_err());
        assert!(policy.validate_modulus_size(1024).is_ok());
    }

    #[test]
    fn test_policy_serde_round_trip() {
        let policy = SigningPolicy::default();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"SHA-256\""));
        let back: SigningPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, back);
    }

    #[test]
    fn test_hash_display_and_digest_len() {
        assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA-256");
        assert_eq!(HashAlgorithm::Sha256.digest_len(), 32);
        assert_eq!(HashAlgorithm::Sha384.digest_len(), 48);
        assert_eq!(HashAlgorithm::Sha512.digest_len(), 64);
        assert_eq!(HashAlgorithm::Sha1.digest_len(), 20);
    }
}
