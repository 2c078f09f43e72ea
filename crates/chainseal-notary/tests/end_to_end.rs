//! End-to-end exercise of the notarization protocol: key generation,
//! notarization, rotation, chain walking, protected persistence, and
//! tamper detection, all through the public API.

use chainseal_core::ResourceLocation;
use chainseal_notary::{
    deserialize_notary_key, ensure_valid, generate_notary_key, generate_watermark,
    notarize_document, serialize_notary_key, validate_document, validate_notary_certificate,
    validate_watermark, ErrorReport, NotaryError, VALID_FOR_FOREVER,
};

fn registry(identity: &str) -> ResourceLocation {
    ResourceLocation::new(format!("https://registry.example.com/identities/{identity}")).unwrap()
}

#[test]
fn notarize_validate_rotate_cross_validate() {
    // Generate a root key and notarize a document with it.
    let root = generate_notary_key(&registry("alice"), None, None).unwrap();
    let seal = notarize_document("Note", "hello", &root).unwrap();

    let mut report = ErrorReport::new();
    validate_document("hello", &seal, &root.verification_certificate, &mut report);
    ensure_valid("validateDocument", &report).expect("seal should validate");

    // Rotate to a second key referencing the first; the new certificate
    // must validate against its predecessor.
    let next = generate_notary_key(&registry("alice"), None, Some(&root)).unwrap();
    let mut report = ErrorReport::new();
    validate_notary_certificate(
        &next.verification_certificate,
        Some(&root.verification_certificate),
        &mut report,
    );
    ensure_valid("validateNotaryCertificate", &report).expect("chain link should validate");

    // Against an unrelated third-party root it must fail certification.
    let stranger = generate_notary_key(&registry("mallory"), None, None).unwrap();
    let mut report = ErrorReport::new();
    validate_notary_certificate(
        &next.verification_certificate,
        Some(&stranger.verification_certificate),
        &mut report,
    );
    assert!(report.contains_key("certificate.certification"));
    assert!(ensure_valid("validateNotaryCertificate", &report).is_err());
}

#[test]
fn full_chain_walk_validates_every_link() {
    let base = registry("bob");
    let mut chain = vec![generate_notary_key(&base, None, None).unwrap()];
    for _ in 0..4 {
        let next = generate_notary_key(&base, None, Some(chain.last().unwrap())).unwrap();
        chain.push(next);
    }

    // Root validates with no predecessor.
    let mut report = ErrorReport::new();
    validate_notary_certificate(&chain[0].verification_certificate, None, &mut report);
    assert!(report.is_empty(), "root: {report}");

    // Every subsequent link validates against its immediate predecessor.
    for i in 1..chain.len() {
        let mut report = ErrorReport::new();
        validate_notary_certificate(
            &chain[i].verification_certificate,
            Some(&chain[i - 1].verification_certificate),
            &mut report,
        );
        assert!(report.is_empty(), "link {i}: {report}");
        assert_eq!(
            chain[i].verification_certificate.attributes.sequence_number,
            i as u64
        );
    }
}

#[test]
fn persisted_key_still_notarizes() {
    let key = generate_notary_key(&registry("carol"), None, None).unwrap();
    let json = serialize_notary_key(&key, "hunter2 but better").unwrap();
    let restored = deserialize_notary_key(&json, "hunter2 but better").unwrap();

    // A seal produced by the restored key validates against the original
    // certificate, proving the private half survived the round-trip.
    let seal = notarize_document("Contract", "the terms", &restored).unwrap();
    let mut report = ErrorReport::new();
    validate_document("the terms", &seal, &key.verification_certificate, &mut report);
    assert!(report.is_empty(), "unexpected findings: {report}");
}

#[test]
fn wrong_password_never_yields_a_key() {
    let key = generate_notary_key(&registry("dave"), None, None).unwrap();
    let json = serialize_notary_key(&key, "correct").unwrap();
    match deserialize_notary_key(&json, "incorrect") {
        Err(NotaryError::Transaction { report, .. }) => {
            assert!(report.contains_key("key.decryption"));
        }
        Err(other) => panic!("expected Transaction error, got {other:?}"),
        Ok(_) => panic!("wrong password must never return key material"),
    }
}

#[test]
fn non_ascii_key_hex_is_rejected_as_malformed() {
    // Multi-byte characters keep the byte length of a valid hex key, so
    // the field survives shape checks until hex decoding; the outcome must
    // be a transaction error, never a panic.
    let key = generate_notary_key(&registry("frank"), None, None).unwrap();
    let json = serialize_notary_key(&key, "pw").unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["verificationCertificate"]["attributes"]["verificationKey"] =
        serde_json::json!(format!("€€{}", "a".repeat(58)));
    let tampered = serde_json::to_string(&value).unwrap();

    match deserialize_notary_key(&tampered, "pw") {
        Err(NotaryError::Transaction { report, .. }) => {
            assert!(report.contains_key("key.malformed"));
        }
        Err(other) => panic!("expected Transaction error, got {other:?}"),
        Ok(_) => panic!("non-hex verification key must not deserialize"),
    }
}

#[test]
fn one_second_watermark_expires() {
    let wm = generate_watermark(1);
    std::thread::sleep(std::time::Duration::from_secs(2));
    let mut report = ErrorReport::new();
    validate_watermark(&wm, &mut report);
    assert!(report.contains_key("watermark.expired"));

    // The forever sentinel never expires.
    let forever = generate_watermark(VALID_FOR_FOREVER);
    let mut report = ErrorReport::new();
    validate_watermark(&forever, &mut report);
    assert!(report.is_empty());
}

#[test]
fn batched_findings_surface_together() {
    // One pass over a doubly-broken input reports both problems at once.
    let key = generate_notary_key(&registry("erin"), None, None).unwrap();
    let mut seal = notarize_document("Note", "original", &key).unwrap();
    seal.attributes.document_type = "Altered".to_string();

    let mut report = ErrorReport::new();
    validate_document("not the original", &seal, &key.verification_certificate, &mut report);
    assert!(report.contains_key("document.hash"));
    assert!(report.contains_key("document.signature"));

    let err = ensure_valid("validateDocument", &report).unwrap_err();
    assert!(err.report().len() >= 2);
}
