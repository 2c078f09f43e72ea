//! # Resource Locations — Validated URI Newtype
//!
//! Defines `ResourceLocation`, the URI type used for document locations,
//! certificate locations, and identity-registry base URIs. A newtype
//! rather than a bare string, so a document hash can never be paired with
//! an arbitrary unvalidated identifier.
//!
//! The notary core never fetches a location — resolving a URI and supplying
//! the referenced bytes is the caller's job. Validation here is therefore
//! structural only: non-empty, with a URI scheme.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LocationError;

/// A validated URI identifying where a resource can be fetched.
///
/// Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocation(String);

impl ResourceLocation {
    /// Construct a location from a URI string.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::Empty` for an empty string and
    /// `LocationError::MissingScheme` if the string carries no `scheme:`
    /// prefix.
    pub fn new(uri: impl Into<String>) -> Result<Self, LocationError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(LocationError::Empty);
        }
        // A scheme is at least one character followed by ':' before any
        // path separator.
        let scheme_end = uri.find(':').filter(|&i| i > 0);
        let first_slash = uri.find('/');
        match (scheme_end, first_slash) {
            (Some(c), Some(s)) if c < s => Ok(Self(uri)),
            (Some(_), None) => Ok(Self(uri)),
            _ => Err(LocationError::MissingScheme(uri)),
        }
    }

    /// Mint a sub-location under this one.
    ///
    /// Joins with a single `/`, trimming any trailing slash first.
    pub fn join(&self, segment: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        let segment = segment.trim_start_matches('/');
        Self(format!("{base}/{segment}"))
    }

    /// Access the URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ResourceLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
