//! Claim sets and artifact identifier generation.
//!
//! Both artifact payloads are assembled from a `ClaimSet`. Protocol
//! claims (`iss`, `sub`, `id`, ...) are only reachable through the
//! builders; the generic extension path refuses them so an extension
//! claim can never shadow a protocol field.

use serde_json::{Map, Value};

use crate::crypto::random;
use crate::error::{Result, TrustMarkError};

/// Claim names owned by the protocol. Never settable as extensions.
pub const RESERVED_CLAIMS: &[&str] = &[
    "iss",
    "sub",
    "id",
    "iat",
    "exp",
    "jti",
    "ref",
    "logo_uri",
    "delegation",
];

/// Strip a trailing `#<lang>` language tag, if any, returning the base
/// claim name. The tag itself is opaque and stored verbatim.
fn base_claim_name(name: &str) -> &str {
    match name.split_once('#') {
        Some((base, _lang)) => base,
        None => name,
    }
}

/// An insertion-ordered set of claims destined for an artifact payload.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension claim.
    ///
    /// Fails with `ReservedClaim` when the base name (language tag
    /// ignored) collides with a protocol claim. Re-adding an existing
    /// extension name overwrites it, keeping names unique within the
    /// artifact.
    pub fn set_extension(&mut self, name: &str, value: Value) -> Result<()> {
        if RESERVED_CLAIMS.contains(&base_claim_name(name)) {
            return Err(TrustMarkError::ReservedClaim(name.to_string()));
        }
        self.claims.insert(name.to_string(), value);
        Ok(())
    }

    /// Set a protocol claim. Builder-internal; not exposed to callers.
    pub(crate) fn set_reserved(&mut self, name: &'static str, value: Value) {
        debug_assert!(RESERVED_CLAIMS.contains(&name));
        self.claims.insert(name.to_string(), value);
    }

    /// Consume the set, yielding the payload map in insertion order.
    pub fn into_map(self) -> Map<String, Value> {
        self.claims
    }

    /// Append these claims onto an existing payload map.
    pub(crate) fn extend_into(&self, payload: &mut Map<String, Value>) {
        for (k, v) in &self.claims {
            payload.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }
}

/// Generate a unique artifact identifier (`jti`).
///
/// 24 bytes from the secure random source, base58-rendered: 32-33
/// characters, 192 bits of entropy. Collisions are treated as
/// negligible; no deduplication is performed.
pub fn generate_jti() -> String {
    let bytes: [u8; 24] = random::random_bytes();
    bs58::encode(&bytes).into_string()
}
