//! # Content Digests — Tamper-Evident Document Binding
//!
//! Defines `ContentDigest` and `DigestAlgorithm`, the hash half of the
//! notarization protocol. A digest binds a citation or a seal to the exact
//! byte sequence of a document; any later change to the document breaks the
//! binding.
//!
//! ## Two digest paths
//!
//! - [`sha256_digest()`] hashes `CanonicalBytes` — used wherever a notary
//!   record (certificate, attribute block) is itself the hashed content.
//! - [`sha256_text_digest()`] hashes the raw UTF-8 bytes of a document
//!   string — notarized documents are opaque text supplied by the caller
//!   and are hashed exactly as given, without re-encoding.
//!
//! ## Wire format
//!
//! Digests serialize as the string `sha256:<64 lowercase hex chars>`. The
//! algorithm tag travels with the value so a future scheme migration cannot
//! silently reinterpret old hashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CryptoError;

/// The hash algorithm used to produce a content digest.
///
/// Only SHA-256 is produced today; the tag exists so every persisted digest
/// is self-describing when a successor algorithm is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-256 — the current content-hash scheme.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Parse an algorithm tag.
    pub fn parse(s: &str) -> Result<Self, CryptoError> {
        match s {
            "sha256" => Ok(Self::Sha256),
            other => Err(CryptoError::DigestError(format!(
                "unrecognized digest algorithm: {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
///
/// Produced by [`sha256_digest()`] or [`sha256_text_digest()`]; serializes
/// as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Render the digest value as a lowercase hex string (no algorithm tag).
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from its `algorithm:hex` text form.
    pub fn parse(s: &str) -> Result<Self, CryptoError> {
        let (tag, hex) = s.split_once(':').ok_or_else(|| {
            CryptoError::DigestError(format!("digest must be algorithm:hex, got {s:?}"))
        })?;
        let algorithm = DigestAlgorithm::parse(tag)?;
        if hex.len() != 64 {
            return Err(CryptoError::DigestError(format!(
                "digest hex must be 64 chars, got {}",
                hex.len()
            )));
        }
        let raw = hex_to_bytes(hex).map_err(CryptoError::DigestError)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        Ok(Self { algorithm, bytes })
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute a SHA-256 digest of a canonical record.
///
/// The signature accepts only `&CanonicalBytes`, so a record can never be
/// hashed through a non-canonical serialization path.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    sha256_of(data.as_bytes())
}

/// Compute a SHA-256 digest of an opaque document string.
///
/// Notarized documents are hashed over their raw UTF-8 bytes, exactly as
/// supplied by the caller. This is the document-content path; records go
/// through [`sha256_digest()`].
pub fn sha256_text_digest(text: &str) -> ContentDigest {
    sha256_of(text.as_bytes())
}

fn sha256_of(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest {
        algorithm: DigestAlgorithm::Sha256,
        bytes,
    }
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    // Byte-wise decode: indexing the &str directly could land inside a
    // multi-byte character on hostile wire input.
    if !hex.is_ascii() {
        return Err("hex string must be ASCII".to_string());
    }
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_digest_deterministic() {
        let a = sha256_text_digest("hello");
        let b = sha256_text_digest("hello");
        assert_eq!(a, b);
        assert_eq!(a.algorithm, DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_different_documents_different_digests() {
        assert_ne!(sha256_text_digest("hello"), sha256_text_digest("hello!"));
    }

    #[test]
    fn test_known_sha256_vector() {
        // SHA256("hello") — verified against sha256sum.
        let d = sha256_text_digest("hello");
        assert_eq!(
            d.to_hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_canonical_and_text_paths_agree_on_same_bytes() {
        // The canonical text of a record, hashed as a document, equals the
        // record digest. Certificates are cited this way.
        let record = serde_json::json!({"a": 1});
        let cb = CanonicalBytes::new(&record).unwrap();
        assert_eq!(sha256_digest(&cb), sha256_text_digest(cb.as_text()));
    }

    #[test]
    fn test_display_and_parse_roundtrip() {
        let d = sha256_text_digest("roundtrip");
        let s = d.to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
        let parsed = ContentDigest::parse(&s).unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_serde_string_form() {
        let d = sha256_text_digest("serde");
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.starts_with("\"sha256:"));
        let back: ContentDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        let hex = "00".repeat(32);
        assert!(ContentDigest::parse(&format!("md5:{hex}")).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(ContentDigest::parse("sha256").is_err());
        assert!(ContentDigest::parse("sha256:abcd").is_err());
        assert!(ContentDigest::parse(&format!("sha256:{}", "zz".repeat(32))).is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii_hex() {
        // 3-byte "€" characters make a 64-byte string that passes the
        // length guard without being valid hex; parsing must error, not
        // panic on a mid-character slice.
        let hex = format!("€€{}", "a".repeat(58));
        assert_eq!(hex.len(), 64);
        assert!(ContentDigest::parse(&format!("sha256:{hex}")).is_err());
    }
}
