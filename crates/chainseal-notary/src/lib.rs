//! # chainseal-notary — Chained Digital Notarization
//!
//! Implements a digital notarization protocol without a centralized
//! certificate authority: trust is rooted in a prior key in a
//! self-extending chain of key replacements.
//!
//! - **Watermark** (`watermark.rs`): validity windows and algorithm-version
//!   tagging for keys, certificates, and seals.
//! - **Citation** (`citation.rs`): location + content-hash pairs binding
//!   references to exact document bytes.
//! - **Certificate** (`certificate.rs`): chained notary certificates with
//!   self-signatures and cross-certification seals; single-link chain
//!   validation.
//! - **Seal** (`seal.rs`): notarizing documents and verifying seals
//!   against certificates.
//! - **Key** (`key.rs`): key generation and rotation, plus
//!   password-protected persistence through the `chainseal-crypto`
//!   keystore.
//! - **Report** (`report.rs`): the multi-error accumulation model shared
//!   by every validator, and the two boundary error kinds.
//!
//! ## Verification model
//!
//! Validators append findings to a caller-owned [`ErrorReport`] and never
//! raise on the first problem; [`ensure_valid()`] is the single point where
//! a non-empty report becomes a [`NotaryError`]. Chain validation covers
//! one link per call — callers walk the chain explicitly for full-chain
//! trust, and callers resolve citations themselves (the core never
//! fetches).
//!
//! ## Concurrency
//!
//! All operations are synchronous, CPU-bound, and free of shared mutable
//! state; the crate is safe for concurrent use from multiple threads.

pub mod certificate;
pub mod citation;
pub mod key;
pub mod report;
pub mod seal;
pub mod watermark;

pub use certificate::{validate_notary_certificate, CertificateAttributes, NotaryCertificate};
pub use citation::{generate_document_citation, validate_document_citation, DocumentCitation};
pub use key::{
    deserialize_notary_key, generate_notary_key, serialize_notary_key, EncodedNotaryKey, NotaryKey,
};
pub use report::{ensure_valid, transaction_failure, ErrorEntry, ErrorReport, NotaryError};
pub use seal::{
    notarize_document, validate_document, NotarySeal, SealAttributes,
    CERTIFICATION_DOCUMENT_TYPE,
};
pub use watermark::{
    generate_watermark, validate_watermark, Watermark, SIGNING_ALGORITHM_VERSION,
    VALID_FOR_FOREVER, VALID_FOR_ONE_DAY, VALID_FOR_ONE_HOUR, VALID_FOR_ONE_MINUTE,
    VALID_FOR_ONE_MONTH, VALID_FOR_ONE_WEEK, VALID_FOR_ONE_YEAR,
};
