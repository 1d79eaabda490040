use thiserror::Error;

use crate::policy::HashAlgorithm;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested hash algorithm is not in the policy's approved set.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHash(HashAlgorithm),

    /// The key's modulus is below the policy's minimum bit length.
    #[error("modulus size {bits} bits is below the policy minimum of {min} bits")]
    ModulusTooSmall { bits: usize, min: usize },

    /// A key component byte string could not be parsed.
    #[error("invalid key component encoding")]
    InvalidKeyEncoding,

    /// The assembled key failed validation. Carries no detail about which
    /// component was at fault.
    #[error("RSA key validation failed")]
    InvalidKey,

    /// The underlying cryptographic library failed in a way not attributable
    /// to the supplied input.
    #[error("could not initialize RSA key")]
    Internal,

    /// The signing primitive failed. Carries no detail from the underlying
    /// library.
    #[error("signing failed")]
    SigningFailure,

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl Error {
    /// Whether the caller can recover by correcting its input.
    ///
    /// [`Error::Internal`] and [`Error::SigningFailure`] are internal faults
    /// that should be surfaced to an operator rather than retried; every
    /// other kind indicates rejected input. Retrying with the *same* input
    /// never changes the outcome.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Internal | Error::SigningFailure)
    }
}
