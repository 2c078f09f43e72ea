//! # Notary Seals — Document Notarization and Verification
//!
//! A seal binds a document's content hash, a type classification, a
//! notarization instant, and a validity window to a signer's key. The seal
//! engine does not re-walk the certificate chain and does not resolve the
//! verification citation — the caller confirms that the certificate it
//! passes in is the one the seal's citation points at, and validates that
//! certificate separately.

use serde::{Deserialize, Serialize};

use chainseal_core::{sha256_text_digest, CanonicalBytes, ContentDigest, Timestamp};
use chainseal_crypto::{verify, NotarySignature};

use crate::certificate::NotaryCertificate;
use crate::citation::DocumentCitation;
use crate::key::NotaryKey;
use crate::report::{transaction_failure, ErrorReport, NotaryError};
use crate::watermark::{validate_watermark, Watermark};

/// The fixed document type of cross-certification seals: a seal of this
/// type notarizes the hex text of a successor certificate's self-signature.
pub const CERTIFICATION_DOCUMENT_TYPE: &str = "Notary Certification";

/// The signed attributes of a notary seal.
///
/// Unknown wire fields land in the flattened extension map and round-trip
/// verbatim; the core never interprets them, but they are covered by the
/// seal's signature like every other attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealAttributes {
    /// The notarization instant.
    pub timestamp: Timestamp,
    /// Caller-supplied classification of the notarized document.
    #[serde(rename = "documentType")]
    pub document_type: String,
    /// Digest of the notarized document's UTF-8 bytes.
    #[serde(rename = "documentHash")]
    pub document_hash: ContentDigest,
    /// Citation to the certificate that can verify this seal.
    #[serde(rename = "verificationCitation")]
    pub verification_citation: DocumentCitation,
    /// Validity window and algorithm version inherited from the signer's key.
    pub watermark: Watermark,
    /// Extension attributes, preserved verbatim through round-trips.
    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// A digital seal over a document: signed attributes plus the signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotarySeal {
    /// The signed attribute block.
    pub attributes: SealAttributes,
    /// Signature over the canonical encoding of `attributes`, produced with
    /// the signer's private key.
    #[serde(rename = "selfSignature")]
    pub self_signature: NotarySignature,
}

/// Notarize a document with a notary key.
///
/// Hashes the document's UTF-8 bytes, assembles the seal attributes
/// (timestamp = now; citation and watermark copied from the key), and signs
/// their canonical encoding with the key's private half. No side effects
/// beyond the returned seal.
pub fn notarize_document(
    document_type: &str,
    document: &str,
    notary_key: &NotaryKey,
) -> Result<NotarySeal, NotaryError> {
    let attributes = SealAttributes {
        timestamp: Timestamp::now(),
        document_type: document_type.to_string(),
        document_hash: sha256_text_digest(document),
        verification_citation: notary_key.verification_citation.clone(),
        watermark: notary_key.watermark.clone(),
        additional: serde_json::Map::new(),
    };
    let canonical = CanonicalBytes::new(&attributes)
        .map_err(|e| transaction_failure("notarizeDocument", "seal.encoding", e.to_string()))?;
    let self_signature = notary_key.signing_key.sign(&canonical);
    Ok(NotarySeal {
        attributes,
        self_signature,
    })
}

/// Verify a seal against a document and the signer's certificate.
///
/// Reports `"document.hash"` if the document no longer matches the sealed
/// hash, propagates watermark findings, and reports `"document.signature"`
/// if the seal's signature does not verify under the certificate's key.
/// The certificate itself is validated separately (see
/// [`crate::certificate::validate_notary_certificate`]).
pub fn validate_document(
    document: &str,
    seal: &NotarySeal,
    certificate: &NotaryCertificate,
    report: &mut ErrorReport,
) {
    if sha256_text_digest(document) != seal.attributes.document_hash {
        report.report(
            "document.hash",
            "document does not match the hash sealed into it",
        );
    }

    validate_watermark(&seal.attributes.watermark, report);

    match CanonicalBytes::new(&seal.attributes) {
        Ok(canonical) => {
            if verify(
                &canonical,
                &seal.self_signature,
                &certificate.attributes.verification_key,
            )
            .is_err()
            {
                report.report(
                    "document.signature",
                    "seal signature does not verify under the certificate's key",
                );
            }
        }
        Err(e) => {
            report.report(
                "document.signature",
                format!("seal attributes could not be canonicalized: {e}"),
            );
        }
    }
}
