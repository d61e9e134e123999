//! JWS header and media-type discriminators.

use serde::{Deserialize, Serialize};

/// `typ` header value for a Trust Mark artifact.
pub const TRUST_MARK_JWT_TYPE: &str = "trust-mark+jwt";

/// `typ` header value for a Trust Mark Delegation artifact.
pub const TRUST_MARK_DELEGATION_JWT_TYPE: &str = "trust-mark-delegation+jwt";

/// The protected header of a signed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    /// Signature algorithm identifier. Opaque to this layer.
    pub alg: String,
    /// Media-type discriminator: trust mark or delegation, never both.
    pub typ: String,
    /// Identifier of the signing key, when the credential provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl JwsHeader {
    pub fn new(alg: impl Into<String>, typ: impl Into<String>, kid: Option<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: typ.into(),
            kid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminators_distinct() {
        assert_ne!(TRUST_MARK_JWT_TYPE, TRUST_MARK_DELEGATION_JWT_TYPE);
    }

    #[test]
    fn test_header_serde_omits_absent_kid() {
        let h = JwsHeader::new("EdDSA", TRUST_MARK_JWT_TYPE, None);
        let json = serde_json::to_string(&h).unwrap();
        assert!(!json.contains("kid"));

        let h = JwsHeader::new("EdDSA", TRUST_MARK_JWT_TYPE, Some("abc".into()));
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("\"kid\":\"abc\""));

        let back: JwsHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
