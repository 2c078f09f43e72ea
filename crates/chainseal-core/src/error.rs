//! # Error Types — Shared Error Hierarchy
//!
//! Defines the error types used by the core value types and the crypto
//! layer. All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! The notarization protocol itself uses a separate multi-error report model
//! (see `chainseal-notary`); the errors here are the hard failures beneath
//! it — canonicalization faults, key material faults, and malformed inputs.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Attribute values must be strings, integers, booleans, or nested
    /// structures of those.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
///
/// Lives in core rather than `chainseal-crypto` so that digest parsing and
/// the crypto layer share one error type, mirroring how the digest and
/// signature text encodings share one format.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation, parsing, or derivation failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Decryption of sealed key material failed. A wrong password and a
    /// tampered ciphertext are indistinguishable at this boundary.
    #[error("unseal failed: {0}")]
    UnsealFailed(String),

    /// A digest string could not be parsed.
    #[error("digest error: {0}")]
    DigestError(String),
}

/// Error constructing or parsing a resource location.
#[derive(Error, Debug)]
pub enum LocationError {
    /// The location string is empty.
    #[error("resource location must not be empty")]
    Empty,

    /// The location string has no URI scheme.
    #[error("resource location must carry a URI scheme: {0:?}")]
    MissingScheme(String),
}

/// Error constructing or parsing a timestamp.
#[derive(Error, Debug)]
pub enum TemporalError {
    /// The string is not a valid RFC 3339 timestamp.
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    InvalidFormat {
        /// The rejected input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The timestamp uses a non-UTC offset.
    #[error("timestamp must use Z suffix (UTC only), got: {0:?}")]
    NonUtc(String),

    /// The epoch value is outside the representable range.
    #[error("epoch seconds out of range: {0}")]
    OutOfRange(i64),
}
