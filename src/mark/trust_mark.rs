//! Trust marks — signed attestations about a federation entity.
//!
//! A trust mark is a statement by an issuer (`iss`) that a subject
//! entity (`sub`) satisfies the federation property identified by `id`.
//! When the issuer is not itself the trust mark owner, the mark embeds a
//! delegation proving the owner authorized it.

use serde_json::{Map, Value};

use crate::error::{Result, TrustMarkError};
use crate::jws::{
    encode_compact, DecodedJws, JwsHeader, JwsSigner, TRUST_MARK_DELEGATION_JWT_TYPE,
    TRUST_MARK_JWT_TYPE,
};
use crate::time::{TemporalValidity, DEFAULT_CLOCK_SKEW_SECS};

use super::claims::{generate_jti, ClaimSet};
use super::delegation::{require, SignedTrustMarkDelegation};

/// Check the delegation binding invariant against an enclosing mark.
///
/// The delegation's `sub` must equal the mark's `iss` (the owner
/// delegated to this issuer, not to somebody else), and the delegation's
/// `id` must equal the mark's `id` (it authorizes this mark type, not
/// issuance in general). Pure function over parsed payloads; it neither
/// needs nor checks any signature.
pub fn check_delegation_binding(
    delegation_payload: &Map<String, Value>,
    mark_issuer: &str,
    mark_id: &str,
) -> Result<()> {
    let delegated_subject = delegation_payload
        .get("sub")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            TrustMarkError::DelegationBinding("delegation payload has no 'sub' claim".into())
        })?;
    if delegated_subject != mark_issuer {
        return Err(TrustMarkError::DelegationBinding(format!(
            "delegation subject '{delegated_subject}' does not equal trust mark issuer '{mark_issuer}'"
        )));
    }

    let delegated_id = delegation_payload
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            TrustMarkError::DelegationBinding("delegation payload has no 'id' claim".into())
        })?;
    if delegated_id != mark_id {
        return Err(TrustMarkError::DelegationBinding(format!(
            "delegation id '{delegated_id}' does not equal trust mark id '{mark_id}'"
        )));
    }

    Ok(())
}

/// Builder for a trust mark.
#[derive(Debug, Clone, Default)]
pub struct TrustMark {
    id: Option<String>,
    issuer: Option<String>,
    subject: Option<String>,
    issue_time: Option<i64>,
    expiration_time: Option<i64>,
    logo_uri: Option<String>,
    reference: Option<String>,
    delegation: Option<String>,
    extensions: ClaimSet,
}

impl TrustMark {
    pub fn builder() -> Self {
        Self::default()
    }

    /// The trust mark type identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The issuing entity.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// The attested subject entity.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
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

    /// URI of a logo the subject may display while the mark is valid.
    pub fn logo_uri(mut self, uri: impl Into<String>) -> Self {
        self.logo_uri = Some(uri.into());
        self
    }

    /// Reference URI to human-readable information about the mark.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Embed a pre-signed delegation. The caller must have satisfied the
    /// binding invariant; `build` re-checks it structurally.
    pub fn delegation(mut self, delegation: &SignedTrustMarkDelegation) -> Self {
        self.delegation = Some(delegation.as_str().to_string());
        self
    }

    /// Embed a pre-signed delegation from its compact serialization.
    pub fn delegation_compact(mut self, delegation: impl Into<String>) -> Self {
        self.delegation = Some(delegation.into());
        self
    }

    /// Add an extension claim. Reserved protocol claims are rejected.
    pub fn claim(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.extensions.set_extension(name, value.into())?;
        Ok(self)
    }

    /// Validate, assemble, and sign the trust mark.
    ///
    /// An embedded delegation is parsed (not signature-verified; that is
    /// the consumer's job) and rejected unless its `typ` is the
    /// delegation discriminator and the binding invariant holds.
    pub fn build(self, signer: &dyn JwsSigner) -> Result<SignedTrustMark> {
        let id = require(self.id, "id")?;
        let issuer = require(self.issuer, "issuer")?;
        let subject = require(self.subject, "subject")?;

        let validity = TemporalValidity::compute(
            self.issue_time,
            self.expiration_time,
            DEFAULT_CLOCK_SKEW_SECS,
        )?;
        let jti = generate_jti();

        if let Some(delegation) = &self.delegation {
            let decoded = DecodedJws::parse(delegation)?;
            if decoded.header().typ != TRUST_MARK_DELEGATION_JWT_TYPE {
                return Err(TrustMarkError::UnsupportedMediaType {
                    expected: TRUST_MARK_DELEGATION_JWT_TYPE.into(),
                    found: decoded.header().typ.clone(),
                });
            }
            check_delegation_binding(decoded.payload(), &issuer, &id)?;
        }

        let mut claims = ClaimSet::new();
        claims.set_reserved("sub", Value::String(subject));
        claims.set_reserved("iss", Value::String(issuer));
        claims.set_reserved("id", Value::String(id));
        claims.set_reserved("iat", Value::from(validity.iat));
        if let Some(exp) = validity.exp {
            claims.set_reserved("exp", Value::from(exp));
        }
        claims.set_reserved("jti", Value::String(jti));
        if let Some(logo_uri) = self.logo_uri {
            claims.set_reserved("logo_uri", Value::String(logo_uri));
        }
        if let Some(reference) = self.reference {
            claims.set_reserved("ref", Value::String(reference));
        }
        if let Some(delegation) = self.delegation {
            claims.set_reserved("delegation", Value::String(delegation));
        }
        let mut payload = claims.into_map();
        self.extensions.extend_into(&mut payload);

        let header = JwsHeader::new(signer.algorithm(), TRUST_MARK_JWT_TYPE, signer.key_id());

        log::debug!(
            "signing trust mark id={:?} sub={:?} delegated={}",
            payload.get("id"),
            payload.get("sub"),
            payload.contains_key("delegation")
        );
        let compact = encode_compact(&header, &payload, signer)?;

        Ok(SignedTrustMark {
            compact,
            header,
            payload,
        })
    }
}

/// A signed, immutable trust mark.
#[derive(Debug, Clone)]
pub struct SignedTrustMark {
    compact: String,
    header: JwsHeader,
    payload: Map<String, Value>,
}

impl SignedTrustMark {
    /// The compact serialized artifact.
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

    /// The embedded delegation string, when one was attached.
    pub fn delegation(&self) -> Option<&str> {
        self.payload.get("delegation").and_then(Value::as_str)
    }
}
