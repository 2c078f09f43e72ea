//! # Notary Certificates — The Chain of Trust
//!
//! A notary certificate carries a key's public half, its position in the
//! owning identity's key chain, and two proofs:
//!
//! - a **self-signature** over the attributes, produced with the same key
//!   pair's private half — proof of possession;
//! - a **certification seal**, produced by the previous key in the chain
//!   over this certificate's self-signature — proof of chain continuity.
//!   Absent only for the root certificate (sequence 0).
//!
//! Trust in certificate N reduces to trust in certificate N−1's public key
//! plus a valid certification seal, recursively down to the root.
//! Validation here covers a single link; verifying a chain end-to-end means
//! invoking it once per link in ascending order. Callers walk the chain
//! explicitly — nothing recurses.

use serde::{Deserialize, Serialize};

use chainseal_core::{CanonicalBytes, ResourceLocation};
use chainseal_crypto::{verify, NotarySignature, VerificationKey};

use crate::report::ErrorReport;
use crate::seal::{validate_document, NotarySeal, CERTIFICATION_DOCUMENT_TYPE};
use crate::watermark::{validate_watermark, Watermark};

/// The signed attributes of a notary certificate.
///
/// Unknown wire fields land in the flattened extension map and round-trip
/// verbatim; they are covered by the self-signature like every other
/// attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateAttributes {
    /// Where this certificate can be fetched.
    #[serde(rename = "selfLocation")]
    pub self_location: ResourceLocation,
    /// The identity that owns this certificate.
    #[serde(rename = "identityLocation")]
    pub identity_location: ResourceLocation,
    /// Position in the owning identity's key chain; 0 for the root key,
    /// increasing by exactly 1 per rotation.
    #[serde(rename = "sequenceNumber")]
    pub sequence_number: u64,
    /// The public half of the key pair.
    #[serde(rename = "verificationKey")]
    pub verification_key: VerificationKey,
    /// Validity window and algorithm version of the key.
    pub watermark: Watermark,
    /// Extension attributes, preserved verbatim through round-trips.
    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// A notary certificate: signed attributes, proof of possession, and (for
/// non-root certificates) proof of chain continuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaryCertificate {
    /// The signed attribute block.
    pub attributes: CertificateAttributes,
    /// Signature over the canonical encoding of `attributes`, produced
    /// with this certificate's own private key.
    #[serde(rename = "selfSignature")]
    pub self_signature: NotarySignature,
    /// Seal by the previous key in the chain over this certificate's
    /// self-signature. Omitted from the wire for root certificates.
    #[serde(
        rename = "certificationSeal",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub certification_seal: Option<NotarySeal>,
}

/// Validate one link of a certificate chain.
///
/// Always checks the self-signature (`"certificate.selfSignature"`) and the
/// watermark. With a `previous` certificate, additionally requires the
/// sequence number to advance by exactly 1 (`"certificate.sequence"`) and
/// the certification seal to verify under the previous certificate's key
/// over this certificate's self-signature (`"certificate.certification"`).
/// Without one, requires a root shape: sequence 0 and no certification seal
/// (`"certificate.orphan"`).
pub fn validate_notary_certificate(
    certificate: &NotaryCertificate,
    previous: Option<&NotaryCertificate>,
    report: &mut ErrorReport,
) {
    match CanonicalBytes::new(&certificate.attributes) {
        Ok(canonical) => {
            if verify(
                &canonical,
                &certificate.self_signature,
                &certificate.attributes.verification_key,
            )
            .is_err()
            {
                report.report(
                    "certificate.selfSignature",
                    "self-signature does not verify under the certificate's own key",
                );
            }
        }
        Err(e) => {
            report.report(
                "certificate.selfSignature",
                format!("certificate attributes could not be canonicalized: {e}"),
            );
        }
    }

    validate_watermark(&certificate.attributes.watermark, report);

    match previous {
        Some(previous) => validate_chain_link(certificate, previous, report),
        None => {
            if certificate.attributes.sequence_number != 0
                || certificate.certification_seal.is_some()
            {
                report.report(
                    "certificate.orphan",
                    "certificate is not a root but no previous certificate was supplied",
                );
            }
        }
    }
}

/// Check continuity between a certificate and its predecessor.
fn validate_chain_link(
    certificate: &NotaryCertificate,
    previous: &NotaryCertificate,
    report: &mut ErrorReport,
) {
    let expected = previous.attributes.sequence_number.checked_add(1);
    if Some(certificate.attributes.sequence_number) != expected {
        report.report(
            "certificate.sequence",
            format!(
                "sequence number {} does not follow predecessor {}",
                certificate.attributes.sequence_number, previous.attributes.sequence_number
            ),
        );
    }

    let Some(seal) = &certificate.certification_seal else {
        report.report(
            "certificate.certification",
            "certification seal is missing",
        );
        return;
    };

    // The sealed document is the hex text of this certificate's
    // self-signature, and the seal must verify under the PREVIOUS key.
    let mut link = ErrorReport::new();
    if seal.attributes.document_type != CERTIFICATION_DOCUMENT_TYPE {
        link.report(
            "document.type",
            format!(
                "expected {CERTIFICATION_DOCUMENT_TYPE:?}, got {:?}",
                seal.attributes.document_type
            ),
        );
    }
    validate_document(
        &certificate.self_signature.to_hex(),
        seal,
        previous,
        &mut link,
    );
    if !link.is_empty() {
        report.report(
            "certificate.certification",
            format!("certification seal is invalid: {link}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::generate_notary_key;
    use chainseal_core::ResourceLocation;

    fn base_uri() -> ResourceLocation {
        ResourceLocation::new("https://registry.example.com/identities/alice").unwrap()
    }

    #[test]
    fn test_root_certificate_valid() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let mut report = ErrorReport::new();
        validate_notary_certificate(&root.verification_certificate, None, &mut report);
        assert!(report.is_empty(), "unexpected findings: {report}");
    }

    #[test]
    fn test_rotated_certificate_valid_against_predecessor() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let next = generate_notary_key(&base_uri(), None, Some(&root)).unwrap();

        let mut report = ErrorReport::new();
        validate_notary_certificate(
            &next.verification_certificate,
            Some(&root.verification_certificate),
            &mut report,
        );
        assert!(report.is_empty(), "unexpected findings: {report}");
    }

    #[test]
    fn test_rotated_certificate_without_predecessor_is_orphan() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let next = generate_notary_key(&base_uri(), None, Some(&root)).unwrap();

        let mut report = ErrorReport::new();
        validate_notary_certificate(&next.verification_certificate, None, &mut report);
        assert!(report.contains_key("certificate.orphan"));
    }

    #[test]
    fn test_unrelated_predecessor_fails_certification() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let next = generate_notary_key(&base_uri(), None, Some(&root)).unwrap();
        let stranger_uri =
            ResourceLocation::new("https://registry.example.com/identities/mallory").unwrap();
        let stranger = generate_notary_key(&stranger_uri, None, None).unwrap();

        let mut report = ErrorReport::new();
        validate_notary_certificate(
            &next.verification_certificate,
            Some(&stranger.verification_certificate),
            &mut report,
        );
        assert!(report.contains_key("certificate.certification"));
    }

    #[test]
    fn test_sequence_gap_reported() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let k1 = generate_notary_key(&base_uri(), None, Some(&root)).unwrap();
        let k2 = generate_notary_key(&base_uri(), None, Some(&k1)).unwrap();

        // Validating k2 directly against the root skips a link.
        let mut report = ErrorReport::new();
        validate_notary_certificate(
            &k2.verification_certificate,
            Some(&root.verification_certificate),
            &mut report,
        );
        assert!(report.contains_key("certificate.sequence"));
    }

    #[test]
    fn test_tampered_attributes_break_self_signature() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let mut cert = root.verification_certificate.clone();
        cert.attributes.sequence_number = 7;

        let mut report = ErrorReport::new();
        validate_notary_certificate(&cert, None, &mut report);
        assert!(report.contains_key("certificate.selfSignature"));
    }

    #[test]
    fn test_missing_certification_seal_reported() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let next = generate_notary_key(&base_uri(), None, Some(&root)).unwrap();
        let mut cert = next.verification_certificate.clone();
        cert.certification_seal = None;

        let mut report = ErrorReport::new();
        validate_notary_certificate(
            &cert,
            Some(&root.verification_certificate),
            &mut report,
        );
        assert!(report.contains_key("certificate.certification"));
    }

    #[test]
    fn test_root_wire_form_omits_certification_seal() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let json = serde_json::to_value(&root.verification_certificate).unwrap();
        assert!(json.get("certificationSeal").is_none());
        assert!(json.get("selfSignature").is_some());

        let back: NotaryCertificate = serde_json::from_value(json).unwrap();
        assert_eq!(back, root.verification_certificate);
    }

    #[test]
    fn test_unknown_wire_fields_roundtrip() {
        let root = generate_notary_key(&base_uri(), None, None).unwrap();
        let mut json = serde_json::to_value(&root.verification_certificate).unwrap();
        json["attributes"]["department"] = serde_json::json!("records");

        let cert: NotaryCertificate = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(
            cert.attributes.additional.get("department"),
            Some(&serde_json::json!("records"))
        );
        assert_eq!(serde_json::to_value(&cert).unwrap(), json);
    }
}
