//! Trust mark delegations — signed authorizations to issue a mark.
//!
//! A delegation is a statement by a trust mark owner (`iss`) that a
//! specific issuer (`sub`) may issue the trust mark identified by `id`.
//! It is built and signed first, then embedded as an opaque string claim
//! in the trust mark it authorizes.

use serde_json::{Map, Value};

use crate::error::{Result, TrustMarkError};
use crate::jws::{encode_compact, JwsHeader, JwsSigner, TRUST_MARK_DELEGATION_JWT_TYPE};
use crate::time::{TemporalValidity, DEFAULT_CLOCK_SKEW_SECS};

use super::claims::{generate_jti, ClaimSet};

/// Builder for a trust mark delegation.
#[derive(Debug, Clone, Default)]
pub struct TrustMarkDelegation {
    issuer: Option<String>,
    subject: Option<String>,
    id: Option<String>,
    issue_time: Option<i64>,
    expiration_time: Option<i64>,
    extensions: ClaimSet,
}

impl TrustMarkDelegation {
    pub fn builder() -> Self {
        Self::default()
    }

    /// The trust mark owner granting the delegation.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// The trust mark issuer being delegated to. Must equal the `iss` of
    /// the trust mark this delegation will be embedded in.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// The trust mark type identifier this delegation authorizes.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Issue time in epoch seconds. Defaults to now.
    pub fn issue_time(mut self, iat: i64) -> Self {
        self.issue_time = Some(iat);
        self
    }

    /// Expiration time in epoch seconds. Must be strictly after the
    /// issue time.
    pub fn expiration_time(mut self, exp: i64) -> Self {
        self.expiration_time = Some(exp);
        self
    }

    /// Add an extension claim. Reserved protocol claims are rejected.
    pub fn claim(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.extensions.set_extension(name, value.into())?;
        Ok(self)
    }

    /// Validate, assemble, and sign the delegation.
    pub fn build(self, signer: &dyn JwsSigner) -> Result<SignedTrustMarkDelegation> {
        let issuer = require(self.issuer, "issuer")?;
        let subject = require(self.subject, "subject")?;
        let id = require(self.id, "id")?;

        let validity = TemporalValidity::compute(
            self.issue_time,
            self.expiration_time,
            DEFAULT_CLOCK_SKEW_SECS,
        )?;
        let jti = generate_jti();

        let mut claims = ClaimSet::new();
        claims.set_reserved("sub", Value::String(subject));
        claims.set_reserved("iss", Value::String(issuer));
        claims.set_reserved("id", Value::String(id));
        claims.set_reserved("iat", Value::from(validity.iat));
        if let Some(exp) = validity.exp {
            claims.set_reserved("exp", Value::from(exp));
        }
        claims.set_reserved("jti", Value::String(jti));
        let mut payload = claims.into_map();
        self.extensions.extend_into(&mut payload);

        let header = JwsHeader::new(
            signer.algorithm(),
            TRUST_MARK_DELEGATION_JWT_TYPE,
            signer.key_id(),
        );

        log::debug!(
            "signing trust mark delegation id={:?} sub={:?}",
            payload.get("id"),
            payload.get("sub")
        );
        let compact = encode_compact(&header, &payload, signer)?;

        Ok(SignedTrustMarkDelegation {
            compact,
            header,
            payload,
        })
    }
}

/// A signed, immutable trust mark delegation.
#[derive(Debug, Clone)]
pub struct SignedTrustMarkDelegation {
    compact: String,
    header: JwsHeader,
    payload: Map<String, Value>,
}

impl SignedTrustMarkDelegation {
    /// The compact serialized artifact, ready for embedding.
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    pub fn into_string(self) -> String {
        self.compact
    }

    pub fn header(&self) -> &JwsHeader {
        &self.header
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

pub(crate) fn require(field: Option<String>, name: &'static str) -> Result<String> {
    match field {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TrustMarkError::MissingField(name)),
    }
}
