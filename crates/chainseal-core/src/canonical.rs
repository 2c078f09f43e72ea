//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! bytes that get signed or hashed when a notary record (certificate
//! attributes, seal attributes, a whole certificate) is involved.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats and
//! then serializes with RFC 8785 JCS (sorted keys, compact separators,
//! UTF-8). Signing and verifying therefore always see the same byte
//! sequence for the same record, independent of struct field order, map
//! iteration order, or whitespace.
//!
//! Any function that signs or digests a record accepts `&CanonicalBytes`,
//! so a non-canonical signing path is a compile error rather than a subtle
//! interoperability bug.
//!
//! ## Why floats are rejected
//!
//! JCS number serialization has edge cases where distinct float bit
//! patterns render identically. Notary attribute values are strings,
//! integers, booleans, or nested structures of those; a float in an
//! extension attribute is a caller error and fails loudly.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - No value in the serialized tree is a float.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All signature
    /// and digest computation over notary records must flow through this
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers, or `CanonicalizationError::SerializationFailed` if
    /// JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for signing or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// View the canonical bytes as a UTF-8 string.
    ///
    /// JCS output is always valid UTF-8, so this never fails. Used where a
    /// record's canonical text itself becomes a cited document (e.g. a
    /// certificate cited by the key that owns it).
    pub fn as_text(&self) -> &str {
        // JCS serialization produces UTF-8; the constructor is the only
        // writer of the inner buffer.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject float values anywhere in a JSON tree.
///
/// `null`, `bool`, `string`, and integer numbers pass through; objects and
/// arrays are recursed. A number not representable as i64/u64 is a float
/// and fails with `FloatRejected`.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => {
            for v in map.values() {
                reject_floats(v)?;
            }
            Ok(())
        }
        Value::Array(arr) => {
            for v in arr {
                reject_floats(v)?;
            }
            Ok(())
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating JSON-compatible values without floats,
    /// mirroring the domain of valid notary attribute values.
    fn json_value_no_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,40}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,10}", inner, 0..8).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        /// Canonicalization never fails for float-free values.
        #[test]
        fn canonicalization_never_fails(value in json_value_no_floats()) {
            let result = CanonicalBytes::new(&value);
            prop_assert!(result.is_ok(), "canonicalization failed: {:?}", result.err());
        }

        /// Canonicalization is deterministic: same input, same bytes.
        #[test]
        fn canonicalization_deterministic(value in json_value_no_floats()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical bytes are valid JSON that parses back.
        #[test]
        fn canonical_bytes_valid_json(value in json_value_no_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
            prop_assert!(parsed.is_ok(), "not valid JSON: {:?}", parsed.err());
        }

        /// Any value containing a non-integer float is rejected.
        #[test]
        fn float_always_rejected(f in any::<f64>().prop_filter("not integer", |f| {
            f.fract() != 0.0 && f.is_finite()
        })) {
            let data = serde_json::json!({"val": f});
            prop_assert!(CanonicalBytes::new(&data).is_err());
        }
    }
}
