//! # chainseal-core — Foundational Types for the chainseal Digital Notary
//!
//! This crate is the bedrock of the chainseal workspace. It defines the
//! value-type primitives that the signing protocol is built on and enforces
//! the correctness-critical ones at compile time. Both other crates in the
//! workspace depend on `chainseal-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** Every signature and every record digest
//!    in the workspace is computed over `CanonicalBytes`, which can only be
//!    produced by the JCS canonicalization pipeline. No raw
//!    `serde_json::to_vec()` for signing input. Ever.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, so the same instant always canonicalizes
//!    to the same bytes.
//!
//! 3. **Tagged digests.** `ContentDigest` carries its algorithm tag so a
//!    future scheme migration cannot silently reinterpret old hashes.
//!
//! 4. **Validated locations.** `ResourceLocation` is a newtype over a URI
//!    string with a validated constructor. No bare strings for locations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `chainseal-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod location;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_text_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CryptoError, LocationError, TemporalError};
pub use location::ResourceLocation;
pub use temporal::Timestamp;
