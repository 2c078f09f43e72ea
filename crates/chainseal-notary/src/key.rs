//! # Notary Keys — Generation, Rotation, and Protected Persistence
//!
//! A notary key is the in-memory pairing of a private signing key with the
//! certificate for its public half. Keys form a singly-linked chain per
//! identity: the root key (sequence 0) is self-certified only, and each
//! rotation produces a successor whose certificate carries a certification
//! seal from its predecessor.
//!
//! ## The two key forms
//!
//! [`NotaryKey`] is the in-memory form and deliberately does not implement
//! `Serialize` — persisting a plaintext private key is a compile error, not
//! a code-review finding. [`EncodedNotaryKey`] is the at-rest form, in
//! which the private half appears only as keystore ciphertext.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chainseal_core::{CanonicalBytes, ResourceLocation};
use chainseal_crypto::{seal_signing_key, unseal_signing_key, SealedSigningKey, SigningKeyPair};

use crate::certificate::{CertificateAttributes, NotaryCertificate};
use crate::citation::{generate_document_citation, DocumentCitation};
use crate::report::{transaction_failure, NotaryError};
use crate::seal::{notarize_document, CERTIFICATION_DOCUMENT_TYPE};
use crate::watermark::{generate_watermark, Watermark, VALID_FOR_ONE_YEAR};

/// A notary key held in memory.
///
/// Immutable once constructed; rotation produces a new key rather than
/// modifying this one. Not serializable — see [`EncodedNotaryKey`] for the
/// persisted form.
pub struct NotaryKey {
    /// The private half, used for signing.
    pub signing_key: SigningKeyPair,
    /// Validity window and algorithm version of this key.
    pub watermark: Watermark,
    /// The certificate for this key's public half.
    pub verification_certificate: NotaryCertificate,
    /// Citation to where this key's certificate can be independently
    /// fetched for verification.
    pub verification_citation: DocumentCitation,
}

impl std::fmt::Debug for NotaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotaryKey")
            .field("signing_key", &self.signing_key)
            .field("sequence_number", &self.verification_certificate.attributes.sequence_number)
            .field("self_location", &self.verification_certificate.attributes.self_location)
            .finish_non_exhaustive()
    }
}

/// The at-rest form of a notary key.
///
/// The private half appears only as `signingKeyCiphertext`; everything else
/// is public material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedNotaryKey {
    /// Password-sealed private key seed (salt and nonce included).
    #[serde(rename = "signingKeyCiphertext")]
    pub signing_key_ciphertext: SealedSigningKey,
    /// Validity window and algorithm version of the key.
    pub watermark: Watermark,
    /// The certificate for the key's public half.
    #[serde(rename = "verificationCertificate")]
    pub verification_certificate: NotaryCertificate,
    /// Citation to the certificate.
    #[serde(rename = "verificationCitation")]
    pub verification_citation: DocumentCitation,
}

/// Generate a new notary key, optionally chained to a previous key.
///
/// With no `previous_key` this creates a root key: sequence 0, self-signed
/// only. With one, it creates the next link in the chain: the sequence
/// number advances by 1 and the previous key notarizes the new
/// certificate's self-signature into a certification seal. Extension
/// attributes are merged into the certificate attributes and covered by
/// the self-signature.
///
/// No persistence happens here; the only effect is the returned key.
pub fn generate_notary_key(
    base_uri: &ResourceLocation,
    additional_attributes: Option<serde_json::Map<String, serde_json::Value>>,
    previous_key: Option<&NotaryKey>,
) -> Result<NotaryKey, NotaryError> {
    let signing_key = SigningKeyPair::generate();
    let sequence_number = match previous_key {
        Some(previous) => previous
            .verification_certificate
            .attributes
            .sequence_number
            .checked_add(1)
            .ok_or_else(|| {
                transaction_failure(
                    "generateNotaryKey",
                    "certificate.sequence",
                    "key chain sequence number overflow",
                )
            })?,
        None => 0,
    };
    let watermark = generate_watermark(VALID_FOR_ONE_YEAR);
    let self_location = base_uri.join(&format!("certificates/{}", Uuid::new_v4()));

    let attributes = CertificateAttributes {
        self_location,
        identity_location: base_uri.clone(),
        sequence_number,
        verification_key: signing_key.verification_key(),
        watermark: watermark.clone(),
        additional: additional_attributes.unwrap_or_default(),
    };

    // Proof of possession: the NEW private key signs its own attributes.
    let canonical = CanonicalBytes::new(&attributes).map_err(|e| {
        transaction_failure("generateNotaryKey", "certificate.encoding", e.to_string())
    })?;
    let self_signature = signing_key.sign(&canonical);

    // Proof of continuity: the PREVIOUS key notarizes the new
    // self-signature's hex text.
    let certification_seal = match previous_key {
        Some(previous) => Some(notarize_document(
            CERTIFICATION_DOCUMENT_TYPE,
            &self_signature.to_hex(),
            previous,
        )?),
        None => None,
    };

    let verification_certificate = NotaryCertificate {
        attributes,
        self_signature,
        certification_seal,
    };

    // The citation hashes the certificate's canonical JSON text, the form
    // a verifier fetches from the registry.
    let certificate_text = CanonicalBytes::new(&verification_certificate).map_err(|e| {
        transaction_failure("generateNotaryKey", "certificate.encoding", e.to_string())
    })?;
    let verification_citation = generate_document_citation(
        verification_certificate.attributes.self_location.clone(),
        certificate_text.as_text(),
    );

    tracing::debug!(
        sequence = sequence_number,
        location = %verification_certificate.attributes.self_location,
        "generated notary key"
    );

    Ok(NotaryKey {
        signing_key,
        watermark,
        verification_certificate,
        verification_citation,
    })
}

/// Serialize a notary key to JSON with its private half sealed under a
/// password.
///
/// The password is borrowed and not retained; scrubbing it after use is
/// the caller's responsibility.
pub fn serialize_notary_key(
    notary_key: &NotaryKey,
    password: &str,
) -> Result<String, NotaryError> {
    let signing_key_ciphertext = seal_signing_key(&notary_key.signing_key, password)
        .map_err(|e| transaction_failure("serializeNotaryKey", "key.password", e.to_string()))?;
    let encoded = EncodedNotaryKey {
        signing_key_ciphertext,
        watermark: notary_key.watermark.clone(),
        verification_certificate: notary_key.verification_certificate.clone(),
        verification_citation: notary_key.verification_citation.clone(),
    };
    tracing::debug!(
        location = %encoded.verification_certificate.attributes.self_location,
        "serialized notary key"
    );
    serde_json::to_string_pretty(&encoded)
        .map_err(|e| transaction_failure("serializeNotaryKey", "key.encoding", e.to_string()))
}

/// Reconstitute a notary key from its serialized form.
///
/// Fails with a transaction error if the JSON is malformed
/// (`"key.malformed"`), if decryption fails (`"key.decryption"` — a wrong
/// password and corrupted key material are indistinguishable), or if the
/// decrypted private half does not match the certificate's public half
/// (`"key.mismatch"`).
pub fn deserialize_notary_key(json: &str, password: &str) -> Result<NotaryKey, NotaryError> {
    let encoded: EncodedNotaryKey = serde_json::from_str(json)
        .map_err(|e| transaction_failure("deserializeNotaryKey", "key.malformed", e.to_string()))?;
    let signing_key = unseal_signing_key(&encoded.signing_key_ciphertext, password)
        .map_err(|e| transaction_failure("deserializeNotaryKey", "key.decryption", e.to_string()))?;

    // Structural check: the recovered private half must belong to the
    // certificate this key claims to be verifiable by.
    if signing_key.verification_key() != encoded.verification_certificate.attributes.verification_key
    {
        return Err(transaction_failure(
            "deserializeNotaryKey",
            "key.mismatch",
            "decrypted signing key does not match the certificate's verification key",
        ));
    }

    tracing::debug!(
        location = %encoded.verification_certificate.attributes.self_location,
        "deserialized notary key"
    );

    Ok(NotaryKey {
        signing_key,
        watermark: encoded.watermark,
        verification_certificate: encoded.verification_certificate,
        verification_citation: encoded.verification_citation,
    })
}
