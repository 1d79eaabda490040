//! Raw RSA private-key material and key-pair generation.

use std::fmt;

use rand::rngs::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;

/// Raw RSA private-key components.
///
/// Every field is an arbitrary-precision unsigned integer encoded big-endian.
/// The struct zeroes its contents on drop; `Debug` prints only the public
/// half.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RsaKeyMaterial {
    /// Modulus.
    pub n: Vec<u8>,
    /// Public exponent.
    pub e: Vec<u8>,
    /// Private exponent.
    pub d: Vec<u8>,
    /// First prime factor.
    pub p: Vec<u8>,
    /// Second prime factor.
    pub q: Vec<u8>,
    /// `d mod (p - 1)`.
    pub dp: Vec<u8>,
    /// `d mod (q - 1)`.
    pub dq: Vec<u8>,
    /// `q^-1 mod p`.
    pub qinv: Vec<u8>,
}

impl RsaKeyMaterial {
    /// Generate a fresh key pair and export all eight components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the underlying key generator fails.
    pub fn generate(bits: usize) -> Result<Self, Error> {
        let mut rng = OsRng;
        let key = RsaPrivateKey::new(&mut rng, bits).map_err(|_| Error::Internal)?;
        Self::from_key(&key)
    }

    /// Export the components of an existing private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key does not carry exactly two
    /// prime factors.
    pub fn from_key(key: &RsaPrivateKey) -> Result<Self, Error> {
        let primes = key.primes();
        if primes.len() != 2 {
            return Err(Error::InvalidKey);
        }
        let p = &primes[0];
        let q = &primes[1];

        let one = BigUint::from(1u32);
        let two = BigUint::from(2u32);
        let dp = key.d() % &(p - &one);
        let dq = key.d() % &(q - &one);
        // p is prime, so Fermat gives the inverse of q mod p.
        let qinv = q.modpow(&(p - &two), p);

        Ok(Self {
            n: key.n().to_bytes_be(),
            e: key.e().to_bytes_be(),
            d: key.d().to_bytes_be(),
            p: p.to_bytes_be(),
            q: q.to_bytes_be(),
            dp: dp.to_bytes_be(),
            dq: dq.to_bytes_be(),
            qinv: qinv.to_bytes_be(),
        })
    }

    /// SHA-256 fingerprint of the public components, as `sha256:<hex>`.
    pub fn fingerprint(&self) -> String {
        public_key_fingerprint(&self.n, &self.e)
    }
}

impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("modulus_bytes", &self.n.len())
            .field("e", &hex::encode(&self.e))
            .finish_non_exhaustive()
    }
}

/// SHA-256 fingerprint of a public key given its big-endian components,
/// formatted as `sha256:<hex>`.
pub fn public_key_fingerprint(n: &[u8], e: &[u8]) -> String {
    let mut hasher = Sha256::new();
    // Length-prefixed so the component boundary is unambiguous.
    hasher.update((n.len() as u64).to_be_bytes());
    hasher.update(n);
    hasher.update((e.len() as u64).to_be_bytes());
    hasher.update(e);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Parse one big-endian component into a big integer.
///
/// An empty byte string and an all-zero value are both rejected: no RSA key
/// component is ever zero, and accepting either would push a malformed key
/// into the arithmetic layer.
pub(crate) fn parse_component(bytes: &[u8]) -> Result<BigUint, Error> {
    if bytes.is_empty() {
        return Err(Error::InvalidKeyEncoding);
    }
    let value = BigUint::from_bytes_be(bytes);
    if value.bits() == 0 {
        return Err(Error::InvalidKeyEncoding);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exports_all_components() {
        let material = RsaKeyMaterial::generate(1024).unwrap();
        assert!(!material.n.is_empty());
        assert!(!material.e.is_empty());
        assert!(!material.d.is_empty());
        assert!(!material.p.is_empty());
        assert!(!material.q.is_empty());
        assert!(!material.dp.is_empty());
        assert!(!material.dq.is_empty());
        assert!(!material.qinv.is_empty());

        // n = p * q must hold for freshly generated material.
        let n = BigUint::from_bytes_be(&material.n);
        let p = BigUint::from_bytes_be(&material.p);
        let q = BigUint::from_bytes_be(&material.q);
        assert_eq!(n, p * q);
    }

    #[test]
    fn test_generated_crt_components_are_consistent() {
        let material = RsaKeyMaterial::generate(1024).unwrap();
        let d = BigUint::from_bytes_be(&material.d);
        let p = BigUint::from_bytes_be(&material.p);
        let q = BigUint::from_bytes_be(&material.q);
        let dp = BigUint::from_bytes_be(&material.dp);
        let dq = BigUint::from_bytes_be(&material.dq);
        let qinv = BigUint::from_bytes_be(&material.qinv);

        let one = BigUint::from(1u32);
        assert_eq!(dp, &d % &(&p - &one));
        assert_eq!(dq, &d % &(&q - &one));
        assert_eq!((qinv * q) % p, one);
    }

    #[test]
    fn test_fingerprint_format_and_determinism() {
        let material = RsaKeyMaterial::generate(1024).unwrap();
        let fp = material.fingerprint();
        assert!(fp.starts_with("sha256:"));
        assert_eq!(fp.len(), 71);
        assert_eq!(fp, material.fingerprint());

        let other = RsaKeyMaterial::generate(1024).unwrap();
        assert_ne!(fp, other.fingerprint());
    }

    #[test]
    fn test_parse_component_rejects_empty_and_zero() {
        assert!(matches!(
            parse_component(&[]),
            Err(Error::InvalidKeyEncoding)
        ));
        assert!(matches!(
            parse_component(&[0, 0, 0]),
            Err(Error::InvalidKeyEncoding)
        ));
        assert_eq!(parse_component(&[1, 0]).unwrap(), BigUint::from(256u32));
    }

    #[test]
    fn test_debug_redacts_private_components() {
        let material = RsaKeyMaterial::generate(1024).unwrap();
        let printed = format!("{:?}", material);
        assert!(!printed.contains(&hex::encode(&material.d)));
        assert!(!printed.contains(&hex::encode(&material.p)));
        assert!(printed.contains("modulus_bytes"));
    }
}
