//! # Ed25519 Signing and Verification
//!
//! The asymmetric half of the notarization protocol: key pairs for notary
//! identities, signatures over certificate and seal attributes.
//!
//! ## Security Invariant
//!
//! - Signing input MUST be `&CanonicalBytes` — you cannot sign raw bytes.
//!   Every signature therefore covers the deterministic canonical encoding
//!   of the record it attests to.
//! - Private keys are never serialized or logged. `SigningKeyPair` does not
//!   implement `Serialize`, and its `Debug` output is redacted. The seed is
//!   only exportable through [`SigningKeyPair::seed()`], which hands back a
//!   `Zeroizing` buffer for the keystore's sealing path.
//!
//! ## Serde
//!
//! Public keys and signatures serialize as lowercase hex strings.

use chainseal_core::error::CryptoError;
use chainseal_core::CanonicalBytes;
use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

/// An Ed25519 public key (32 bytes) for signature verification.
///
/// Serializes as a hex-encoded string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VerificationKey([u8; 32]);

/// An Ed25519 signature (64 bytes) over canonical bytes.
///
/// Serializes as a hex-encoded string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NotarySignature([u8; 64]);

/// An Ed25519 key pair held in memory for signing.
///
/// Does not implement `Serialize` — persisting a key pair goes through the
/// keystore's sealed form, never through plain serialization.
pub struct SigningKeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// VerificationKey impls
// ---------------------------------------------------------------------------

impl VerificationKey {
    /// Create a verification key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a verification key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(CryptoError::KeyError(format!(
                "verification key hex must be 64 chars, got {}",
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex).map_err(CryptoError::KeyError)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid verification key: {e}")))
    }
}

impl Serialize for VerificationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VerificationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerificationKey({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// NotarySignature impls
// ---------------------------------------------------------------------------

impl NotarySignature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    ///
    /// The hex text is also the byte encoding that a certification seal
    /// notarizes when one key cross-certifies the next.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 128 {
            return Err(CryptoError::VerificationFailed(format!(
                "signature hex must be 128 chars, got {}",
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex).map_err(CryptoError::VerificationFailed)?;
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Serialize for NotarySignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NotarySignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for NotarySignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotarySignature({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for NotarySignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// SigningKeyPair impls
// ---------------------------------------------------------------------------

impl SigningKeyPair {
    /// Generate a new random Ed25519 key pair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { signing_key }
    }

    /// Reconstruct a key pair from a 32-byte private seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Export the 32-byte private seed in a zeroizing buffer.
    ///
    /// The only consumer is the keystore's sealing path; the buffer is
    /// wiped when dropped.
    pub fn seed(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Get the public verification key for this pair.
    pub fn verification_key(&self) -> VerificationKey {
        VerificationKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign canonical bytes with the private half.
    ///
    /// The input type enforces that only canonicalized records can be
    /// signed; a non-canonical signing path does not compile.
    pub fn sign(&self, data: &CanonicalBytes) -> NotarySignature {
        let sig = self.signing_key.sign(data.as_bytes());
        NotarySignature(sig.to_bytes())
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an Ed25519 signature over canonical bytes.
///
/// Returns `Ok(())` if the signature is valid for the given verification
/// key, `Err(CryptoError::VerificationFailed)` otherwise. The message type
/// enforces at compile time that only canonicalized records are verified.
pub fn verify(
    data: &CanonicalBytes,
    signature: &NotarySignature,
    key: &VerificationKey,
) -> Result<(), CryptoError> {
    let vk = key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    vk.verify(data.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519 verification failed: {e}")))
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
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
