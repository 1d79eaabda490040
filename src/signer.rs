//! Signer construction and PKCS#1 v1.5 signature generation.
//!
//! [`Signer::new`] is the only way to obtain a [`Signer`]: it validates the
//! hash selection and key material against the injected [`SigningPolicy`],
//! assembles the private key, and runs the full consistency check before
//! anything signable exists. A signer is immutable once built and can be
//! shared freely across threads.

use base64::{engine::general_purpose, Engine as _};
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::Error;
use crate::material::{parse_component, RsaKeyMaterial};
use crate::policy::{HashAlgorithm, SigningPolicy};

/// Signing parameters, immutable once chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningParams {
    /// Hash algorithm used for the PKCS#1 v1.5 DigestInfo encoding.
    pub hash: HashAlgorithm,
}

/// Private key with its hash algorithm resolved at construction time.
enum HashedKey {
    Sha1(SigningKey<Sha1>),
    Sha256(SigningKey<Sha256>),
    Sha384(SigningKey<Sha384>),
    Sha512(SigningKey<Sha512>),
}

/// A validated, reusable RSA PKCS#1 v1.5 signer.
pub struct Signer {
    key: HashedKey,
    hash: HashAlgorithm,
    modulus_len: usize,
}

impl Signer {
    /// Build a signer from raw key components.
    ///
    /// Validation is short-circuiting and runs in a fixed order: hash policy,
    /// modulus encoding, modulus size, remaining component encodings, then
    /// the full key consistency check. No partially-constructed signer is
    /// ever observable.
    ///
    /// # Errors
    ///
    /// * [`Error::UnsupportedHash`] — hash not in the policy's approved set
    /// * [`Error::InvalidKeyEncoding`] — a component failed to parse
    /// * [`Error::ModulusTooSmall`] — modulus below the policy minimum
    /// * [`Error::InvalidKey`] — components are inconsistent or the key does
    ///   not meet the hardened validation profile
    pub fn new(
        material: &RsaKeyMaterial,
        params: &SigningParams,
        policy: &SigningPolicy,
    ) -> Result<Self, Error> {
        let hash = policy.validate_hash(params.hash)?;

        let n = parse_component(&material.n)?;
        policy.validate_modulus_size(n.bits())?;

        let e = parse_component(&material.e)?;
        let d = parse_component(&material.d)?;
        let p = parse_component(&material.p)?;
        let q = parse_component(&material.q)?;
        let dp = parse_component(&material.dp)?;
        let dq = parse_component(&material.dq)?;
        let qinv = parse_component(&material.qinv)?;

        let key = RsaPrivateKey::from_components(
            n,
            e.clone(),
            d.clone(),
            vec![p.clone(), q.clone()],
        )
        .map_err(|_| Error::InvalidKey)?;
        key.validate().map_err(|_| Error::InvalidKey)?;
        check_hardened_profile(&e, &d, &p, &q, &dp, &dq, &qinv)?;

        let modulus_len = key.size();
        let key = match hash {
            HashAlgorithm::Sha1 => HashedKey::Sha1(SigningKey::new(key)),
            HashAlgorithm::Sha256 => HashedKey::Sha256(SigningKey::new(key)),
            HashAlgorithm::Sha384 => HashedKey::Sha384(SigningKey::new(key)),
            HashAlgorithm::Sha512 => HashedKey::Sha512(SigningKey::new(key)),
        };

        Ok(Self {
            key,
            hash,
            modulus_len,
        })
    }

    /// Sign a message.
    ///
    /// The message is hashed with the signer's resolved algorithm, wrapped in
    /// the PKCS#1 v1.5 DigestInfo structure, and run through the private-key
    /// transform. The empty message is a fully supported input. Output is
    /// deterministic and always exactly [`Signer::signature_len`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SigningFailure`] if the signing primitive fails.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let signature = match &self.key {
            HashedKey::Sha1(key) => key.try_sign(message),
            HashedKey::Sha256(key) => key.try_sign(message),
            HashedKey::Sha384(key) => key.try_sign(message),
            HashedKey::Sha512(key) => key.try_sign(message),
        }
        // The underlying error value can depend on key state; drop it.
        .map_err(|_| Error::SigningFailure)?;
        Ok(signature.to_vec())
    }

    /// Sign a message and return the signature Base64-encoded.
    pub fn sign_base64(&self, message: &[u8]) -> Result<String, Error> {
        Ok(general_purpose::STANDARD.encode(self.sign(message)?))
    }

    /// Signature length in bytes: the modulus length, `⌈bits(n)/8⌉`.
    pub fn signature_len(&self) -> usize {
        self.modulus_len
    }

    /// The hash algorithm resolved at construction.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }
}

/// Checks beyond arithmetic consistency that a key must pass before signing:
/// the public exponent must be odd and inside the (2^16, 2^256) window, and
/// the caller-supplied CRT parameters must match recomputation from `d`, `p`
/// and `q`.
fn check_hardened_profile(
    e: &BigUint,
    d: &BigUint,
    p: &BigUint,
    q: &BigUint,
    dp: &BigUint,
    dq: &BigUint,
    qinv: &BigUint,
) -> Result<(), Error> {
    if e.bits() < 17 || e.bits() > 256 || !is_odd(e) {
        return Err(Error::InvalidKey);
    }

    let one = BigUint::from(1u32);
    if *dp != d % &(p - &one) || *dq != d % &(q - &one) {
        return Err(Error::InvalidKey);
    }
    if (qinv * q) % p != one {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

fn is_odd(value: &BigUint) -> bool {
    value.to_bytes_be().last().is_some_and(|b| b & 1 == 1)
}
