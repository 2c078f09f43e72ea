//! # Keystore — Password Protection for Private Key Seeds
//!
//! A notary key's private half must never be persisted in plaintext. This
//! module defines the sealed at-rest form and the seal/unseal operations:
//!
//! - **KDF**: Argon2id (19 MiB memory, 2 passes, 1 lane) derives a 32-byte
//!   encryption key from the caller's password and a random 16-byte salt.
//! - **AEAD**: ChaCha20-Poly1305 encrypts the 32-byte Ed25519 seed under
//!   the derived key with a random 12-byte nonce. The auth tag makes any
//!   tampering with the ciphertext detectable.
//!
//! There is no separate password-verification field. A wrong password and a
//! corrupted ciphertext both surface as the same AEAD failure, mapped to
//! `CryptoError::UnsealFailed` — the caller cannot distinguish them, and
//! must not be able to.
//!
//! Derived keys and decrypted seeds live in `Zeroizing` buffers and are
//! wiped on every exit path. The password itself is borrowed and never
//! retained; scrubbing it is the caller's responsibility.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use chainseal_core::error::CryptoError;

use crate::ed25519::SigningKeyPair;

/// Argon2id memory cost in KiB (19 MiB).
const KDF_MEMORY_KIB: u32 = 19_456;
/// Argon2id iteration count.
const KDF_PASSES: u32 = 2;
/// Argon2id parallelism.
const KDF_LANES: u32 = 1;
/// Length of the random KDF salt.
const SALT_LEN: usize = 16;
/// Length of the AEAD nonce.
const NONCE_LEN: usize = 12;

/// The sealed at-rest form of a private key seed.
///
/// Carries everything needed to re-derive the encryption key and decrypt,
/// except the password. Fields are hex-encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSigningKey {
    /// Random salt fed to the Argon2id derivation.
    #[serde(rename = "kdfSalt", with = "hex_bytes")]
    pub kdf_salt: Vec<u8>,
    /// Random AEAD nonce.
    #[serde(with = "hex_bytes")]
    pub nonce: Vec<u8>,
    /// ChaCha20-Poly1305 ciphertext of the 32-byte seed (tag appended).
    #[serde(with = "hex_bytes")]
    pub ciphertext: Vec<u8>,
}

/// Seal a key pair's private seed under a password.
///
/// # Errors
///
/// Returns `CryptoError::KeyError` for an empty password or a KDF setup
/// fault, and `CryptoError::UnsealFailed` is never returned here —
/// encryption with fresh random material does not fail for valid inputs.
pub fn seal_signing_key(
    key_pair: &SigningKeyPair,
    password: &str,
) -> Result<SealedSigningKey, CryptoError> {
    if password.is_empty() {
        return Err(CryptoError::KeyError(
            "password must not be empty".to_string(),
        ));
    }

    let mut kdf_salt = vec![0u8; SALT_LEN];
    let mut nonce = vec![0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut kdf_salt);
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let derived = derive_key(password, &kdf_salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(derived.as_slice()));
    let seed = key_pair.seed();
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), seed.as_slice())
        .map_err(|_| CryptoError::KeyError("seed encryption failed".to_string()))?;

    Ok(SealedSigningKey {
        kdf_salt,
        nonce,
        ciphertext,
    })
}

/// Unseal a private key seed and reconstruct the key pair.
///
/// # Errors
///
/// Returns `CryptoError::UnsealFailed` if decryption fails — a wrong
/// password and a tampered ciphertext are indistinguishable here — or if
/// the decrypted payload is not a structurally valid 32-byte seed.
pub fn unseal_signing_key(
    sealed: &SealedSigningKey,
    password: &str,
) -> Result<SigningKeyPair, CryptoError> {
    let derived = derive_key(password, &sealed.kdf_salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(derived.as_slice()));
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&sealed.nonce),
            sealed.ciphertext.as_slice(),
        )
        .map_err(|_| {
            CryptoError::UnsealFailed("wrong password or corrupted key material".to_string())
        })?;
    let plaintext = Zeroizing::new(plaintext);

    if plaintext.len() != 32 {
        return Err(CryptoError::UnsealFailed(format!(
            "decrypted seed has invalid length {}",
            plaintext.len()
        )));
    }
    let mut seed = Zeroizing::new([0u8; 32]);
    seed.copy_from_slice(&plaintext);
    Ok(SigningKeyPair::from_seed(&seed))
}

/// Derive a 32-byte encryption key from a password and salt via Argon2id.
fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let params = Params::new(KDF_MEMORY_KIB, KDF_PASSES, KDF_LANES, Some(32))
        .map_err(|e| CryptoError::KeyError(format!("invalid KDF parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut key = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt, key.as_mut_slice())
        .map_err(|e| CryptoError::KeyError(format!("key derivation failed: {e}")))?;
    Ok(key)
}

/// Hex encoding for the sealed key's byte fields.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        serializer.serialize_str(&hex)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        // Byte-wise decode: indexing the &str directly could land inside a
        // multi-byte character on hostile wire input.
        if !hex.is_ascii() {
            return Err(serde::de::Error::custom("hex string must be ASCII"));
        }
        if hex.len() % 2 != 0 {
            return Err(serde::de::Error::custom("hex string must have even length"));
        }
        (0..hex.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|e| serde::de::Error::custom(format!("invalid hex: {e}")))
            })
            .collect()
    }
}
