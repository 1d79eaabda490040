//! # sigforge
//!
//! Policy-enforced RSA PKCS#1 v1.5 signature generation.
//!
//! sigforge builds a validated [`Signer`] from raw RSA private-key
//! components and a chosen hash algorithm, then produces deterministic
//! fixed-length signatures over arbitrary byte strings. A signer either
//! passes the full validation pipeline — hash policy, modulus size, component
//! parsing, arithmetic consistency, hardened-profile checks — or is never
//! constructed at all; no half-built key state is observable.
//!
//! ## Features
//!
//! - **Fallible factory construction**: [`Signer::new`] returns a fully
//!   validated signer or an error, never a partial object
//! - **Injected policy**: minimum modulus size and the approved hash set come
//!   from a [`SigningPolicy`] value, not constants baked into the code
//! - **Deterministic signing**: PKCS#1 v1.5 introduces no randomness, so a
//!   fixed (key, hash, message) triple always yields the same bytes
//! - **Lock-free sharing**: a [`Signer`] is immutable and `Send + Sync`
//! - **Key hygiene**: raw key material zeroes itself on drop
//!
//! ## Quick Start
//!
//! ```rust
//! use sigforge::verification::verify_signature;
//! use sigforge::{HashAlgorithm, RsaKeyMaterial, Signer, SigningParams, SigningPolicy};
//!
//! // Generate a key pair (or supply components from elsewhere)
//! let material = RsaKeyMaterial::generate(2048).unwrap();
//!
//! // Build a validated signer
//! let params = SigningParams { hash: HashAlgorithm::Sha256 };
//! let signer = Signer::new(&material, &params, &SigningPolicy::default()).unwrap();
//!
//! // Sign: output length equals the modulus length
//! let signature = signer.sign(b"Hello, World!").unwrap();
//! assert_eq!(signature.len(), 256);
//!
//! // Verify against the public components
//! let ok = verify_signature(
//!     &material.n,
//!     &material.e,
//!     HashAlgorithm::Sha256,
//!     b"Hello, World!",
//!     &signature,
//! )
//! .unwrap();
//! assert!(ok);
//! ```
//!
//! ## Security
//!
//! This implementation uses:
//! - RSASSA-PKCS1-v1_5 (RFC 8017) via the RustCrypto `rsa` crate
//! - SHA-256 / SHA-384 / SHA-512 digests (SHA-1 only by explicit policy
//!   opt-in)
//! - A hardened key profile: 2048-bit default modulus floor, public exponent
//!   restricted to odd values in (2^16, 2^256), CRT parameters cross-checked
//!   against the private exponent
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`. Construction errors describe
//! rejected input and are safe to retry with corrected material;
//! [`Error::Internal`] and [`Error::SigningFailure`] are internal faults and
//! deliberately carry no detail from the underlying library. See
//! [`Error::is_retryable`].

pub mod error;
pub mod material;
pub mod policy;
pub mod signer;
pub mod verification;

pub use error::Error;
pub use material::{public_key_fingerprint, RsaKeyMaterial};
pub use policy::{HashAlgorithm, SigningPolicy, DEFAULT_MIN_MODULUS_BITS};
pub use signer::{Signer, SigningParams};
