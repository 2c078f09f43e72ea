//! # chainseal-crypto — Cryptographic Provider
//!
//! Provides the cryptographic capability the notarization protocol depends
//! on, behind types that make misuse hard:
//!
//! - **Ed25519** (`ed25519.rs`): key pair generation, signing, and
//!   verification. Signing input must be `CanonicalBytes` — raw bytes
//!   cannot be signed, so every signature in the system covers a
//!   deterministic canonical encoding.
//!
//! - **Keystore** (`keystore.rs`): password protection for private key
//!   seeds at rest. Argon2id password-derived keys, ChaCha20-Poly1305
//!   authenticated encryption, `zeroize`d buffers.
//!
//! ## Crate Policy
//!
//! - Depends only on `chainseal-core` internally.
//! - Private key material never implements `Serialize` and never appears
//!   in `Debug` output.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   canonical bytes, real Ed25519, real AEAD.

pub mod ed25519;
pub mod keystore;

pub use ed25519::{verify, NotarySignature, SigningKeyPair, VerificationKey};
pub use keystore::{seal_signing_key, unseal_signing_key, SealedSigningKey};
