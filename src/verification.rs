//! PKCS#1 v1.5 signature verification from raw public-key components.
//!
//! The verifying side of the crate's signer: it exists for interop checks
//! and round-trip testing, and applies no key policy of its own — policy
//! enforcement is a signing-side concern.

use base64::{engine::general_purpose, Engine as _};
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::Error;
use crate::material::parse_component;
use crate::policy::HashAlgorithm;

/// Verify a PKCS#1 v1.5 signature against the public key `(n, e)`, both
/// big-endian byte strings.
///
/// Returns `Ok(false)` for a signature that does not verify (including one
/// of the wrong length); errors are reserved for malformed public keys.
pub fn verify_signature(
    n: &[u8],
    e: &[u8],
    hash: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, Error> {
    let n = parse_component(n)?;
    let e = parse_component(e)?;
    let public_key = RsaPublicKey::new(n, e).map_err(|_| Error::InvalidKey)?;

    let signature = match Signature::try_from(signature) {
        Ok(s) => s,
        Err(_) => return Ok(false),
    };

    let valid = match hash {
        HashAlgorithm::Sha1 => VerifyingKey::<Sha1>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
        HashAlgorithm::Sha256 => VerifyingKey::<Sha256>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
        HashAlgorithm::Sha384 => VerifyingKey::<Sha384>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
        HashAlgorithm::Sha512 => VerifyingKey::<Sha512>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
    };
    Ok(valid)
}

/// Verify a Base64-encoded PKCS#1 v1.5 signature.
///
/// # Errors
///
/// Returns [`Error::Base64`] if the signature is not valid Base64, in
/// addition to the error cases of [`verify_signature`].
pub fn verify_signature_base64(
    n: &[u8],
    e: &[u8],
    hash: HashAlgorithm,
    message: &[u8],
    signature_b64: &str,
) -> Result<bool, Error> {
    let signature = general_purpose::STANDARD.decode(signature_b64)?;
    verify_signature(n, e, hash, message, &signature)
}
