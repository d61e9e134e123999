//! Consumer-side verification of trust marks and delegations.
//!
//! Verification checks, in order:
//! 1. Structural parse (nothing trusted yet)
//! 2. Media-type discriminator against the expected artifact kind
//! 3. Issuer key lookup through the trusted-key provider
//! 4. Signature
//! 5. Temporal window (`exp` / `iat` with clock-skew tolerance)
//! 6. Embedded delegation, recursively, plus the binding invariant
//!
//! The discriminator check comes before any key or signature work: a
//! confused artifact kind is rejected without touching cryptography.

use std::collections::HashMap;

use ed25519_dalek::VerifyingKey;
use serde_json::{Map, Value};

use crate::error::{Result, TrustMarkError};
use crate::jws::{DecodedJws, TRUST_MARK_DELEGATION_JWT_TYPE};
use crate::time::{TemporalValidity, DEFAULT_CLOCK_SKEW_SECS};

use super::trust_mark::check_delegation_binding;

/// Resolves verification keys for federation entities.
///
/// External collaborator; a real federation backs this with entity
/// statement resolution or a configured key store.
pub trait TrustedKeyProvider {
    /// Look up the verification key for an issuer identifier.
    fn lookup(&self, issuer: &str) -> Option<VerifyingKey>;
}

/// A fixed in-memory issuer-to-key map.
///
/// Suits tests and small static federations.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyProvider {
    keys: HashMap<String, VerifyingKey>,
}

impl StaticKeyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trusted issuer key.
    pub fn insert(&mut self, issuer: impl Into<String>, key: VerifyingKey) {
        self.keys.insert(issuer.into(), key);
    }

    pub fn with_key(mut self, issuer: impl Into<String>, key: VerifyingKey) -> Self {
        self.insert(issuer, key);
        self
    }
}

impl TrustedKeyProvider for StaticKeyProvider {
    fn lookup(&self, issuer: &str) -> Option<VerifyingKey> {
        self.keys.get(issuer).copied()
    }
}

/// Options controlling verification.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Clock-skew tolerance applied to the not-yet-valid bound, seconds.
    pub clock_skew_secs: i64,
    /// Whether an embedded delegation is verified recursively.
    pub validate_delegation: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
            validate_delegation: true,
        }
    }
}

/// The claims of a successfully verified artifact.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    payload: Map<String, Value>,
}

impl VerifiedClaims {
    pub fn issuer(&self) -> &str {
        self.claim_str("iss").unwrap_or_default()
    }

    pub fn subject(&self) -> &str {
        self.claim_str("sub").unwrap_or_default()
    }

    pub fn id(&self) -> &str {
        self.claim_str("id").unwrap_or_default()
    }

    pub fn claim_str(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }

    pub fn claim_i64(&self, name: &str) -> Option<i64> {
        self.payload.get(name).and_then(Value::as_i64)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.payload
    }
}

/// Verify a serialized artifact of the expected kind at time `now`.
///
/// On success returns the verified claim payload. For a trust mark
/// carrying a `delegation` claim (and `validate_delegation` on), the
/// delegation is verified as its own artifact — its issuer key looked up
/// independently — and the binding invariant is re-checked against the
/// verified delegation payload.
pub fn verify(
    artifact: &str,
    expected_type: &str,
    provider: &dyn TrustedKeyProvider,
    now: i64,
    opts: &VerifyOptions,
) -> Result<VerifiedClaims> {
    let decoded = DecodedJws::parse(artifact)?;

    if decoded.header().typ != expected_type {
        return Err(TrustMarkError::UnsupportedMediaType {
            expected: expected_type.to_string(),
            found: decoded.header().typ.clone(),
        });
    }

    let issuer = decoded
        .claim_str("iss")
        .ok_or_else(|| TrustMarkError::Malformed("payload has no 'iss' claim".into()))?
        .to_string();

    let key = provider
        .lookup(&issuer)
        .ok_or_else(|| TrustMarkError::UntrustedIssuer(issuer.clone()))?;

    decoded.verify_signature(&key)?;

    let iat = decoded
        .claim_i64("iat")
        .ok_or_else(|| TrustMarkError::Malformed("payload has no 'iat' claim".into()))?;
    let validity = TemporalValidity {
        iat,
        exp: decoded.claim_i64("exp"),
    };
    validity.check(now, opts.clock_skew_secs)?;

    if opts.validate_delegation {
        if let Some(delegation) = decoded.claim_str("delegation") {
            log::debug!("verifying embedded delegation for issuer {issuer}");
            let delegation_claims = verify(
                delegation,
                TRUST_MARK_DELEGATION_JWT_TYPE,
                provider,
                now,
                opts,
            )?;

            let mark_id = decoded
                .claim_str("id")
                .ok_or_else(|| TrustMarkError::Malformed("payload has no 'id' claim".into()))?;
            check_delegation_binding(delegation_claims.claims(), &issuer, mark_id)?;
        }
    }

    Ok(VerifiedClaims {
        payload: decoded.payload().clone(),
    })
}
