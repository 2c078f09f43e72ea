//! # Document Citations — Hash-Bound References
//!
//! A citation pairs the location of a document with a digest of its exact
//! byte content. The core never fetches the location; the caller resolves
//! it and supplies the bytes, and the citation proves they are the bytes
//! the citing party saw.

use serde::{Deserialize, Serialize};

use chainseal_core::{sha256_text_digest, ContentDigest, ResourceLocation};

use crate::report::ErrorReport;

/// A location + content-hash pair binding a reference to exact document
/// bytes. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCitation {
    /// Where the cited document can be fetched.
    #[serde(rename = "documentLocation")]
    pub document_location: ResourceLocation,
    /// Digest of the document's UTF-8 byte encoding.
    #[serde(rename = "documentHash")]
    pub document_hash: ContentDigest,
}

/// Generate a citation for a document at the given location.
pub fn generate_document_citation(
    location: ResourceLocation,
    document: &str,
) -> DocumentCitation {
    DocumentCitation {
        document_location: location,
        document_hash: sha256_text_digest(document),
    }
}

/// Check a citation against the current content of the cited document.
///
/// A mismatch means the document was modified (or the wrong document was
/// supplied) and is reported under `"citation.hash"`.
pub fn validate_document_citation(
    citation: &DocumentCitation,
    document: &str,
    report: &mut ErrorReport,
) {
    if sha256_text_digest(document) != citation.document_hash {
        report.report(
            "citation.hash",
            format!(
                "document at {} does not match its citation hash",
                citation.document_location
            ),
        );
    }
}
