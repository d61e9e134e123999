//! Compact JWS encoding and parsing.
//!
//! An artifact travels as `b64url(header).b64url(payload).b64url(sig)`.
//! Parsing recovers the header and payload without trusting any field;
//! signature verification is a separate, explicit step so a consumer can
//! inspect the discriminator before doing any cryptographic work.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::VerifyingKey;
use serde_json::{Map, Value};

use crate::crypto::signing;
use crate::error::{Result, TrustMarkError};

use super::header::JwsHeader;
use super::signer::JwsSigner;

/// Serialize and sign a payload into compact form.
pub fn encode_compact(
    header: &JwsHeader,
    payload: &Map<String, Value>,
    signer: &dyn JwsSigner,
) -> Result<String> {
    let header_json = serde_json::to_vec(header)
        .map_err(|e| TrustMarkError::Serialization(format!("header: {e}")))?;
    let payload_json = serde_json::to_vec(payload)
        .map_err(|e| TrustMarkError::Serialization(format!("payload: {e}")))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(payload_json)
    );

    let signature = signer.sign(signing_input.as_bytes())?;

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// A parsed-but-unverified compact JWS.
///
/// Nothing in here is trustworthy until `verify_signature` has passed.
#[derive(Debug, Clone)]
pub struct DecodedJws {
    compact: String,
    header: JwsHeader,
    payload: Map<String, Value>,
    signing_input_len: usize,
    signature: Vec<u8>,
}

impl DecodedJws {
    /// Split and decode a compact serialization. Performs no signature
    /// or claim validation.
    pub fn parse(compact: &str) -> Result<Self> {
        let mut parts = compact.split('.');
        let (h, p, s) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s), None) => (h, p, s),
            _ => {
                return Err(TrustMarkError::Malformed(
                    "compact serialization must have exactly 3 segments".into(),
                ))
            }
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(h)
            .map_err(|e| TrustMarkError::Malformed(format!("header segment: {e}")))?;
        let header: JwsHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| TrustMarkError::Malformed(format!("header JSON: {e}")))?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(p)
            .map_err(|e| TrustMarkError::Malformed(format!("payload segment: {e}")))?;
        let payload: Map<String, Value> = serde_json::from_slice(&payload_bytes)
            .map_err(|e| TrustMarkError::Malformed(format!("payload JSON: {e}")))?;

        let signature = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| TrustMarkError::Malformed(format!("signature segment: {e}")))?;

        Ok(Self {
            compact: compact.to_string(),
            header,
            payload,
            signing_input_len: h.len() + 1 + p.len(),
            signature,
        })
    }

    /// The protected header, as parsed. Untrusted until verified.
    pub fn header(&self) -> &JwsHeader {
        &self.header
    }

    /// The payload claims, as parsed. Untrusted until verified.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The original compact serialization.
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    /// The bytes the signature covers.
    pub fn signing_input(&self) -> &[u8] {
        self.compact[..self.signing_input_len].as_bytes()
    }

    /// Verify the signature against a verifying key.
    pub fn verify_signature(&self, verifying_key: &VerifyingKey) -> Result<()> {
        let sig = signing::signature_from_bytes(&self.signature)?;
        signing::verify(verifying_key, self.signing_input(), &sig)
    }

    /// Read a payload claim as a string.
    pub fn claim_str(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }

    /// Read a payload claim as an integer.
    pub fn claim_i64(&self, name: &str) -> Option<i64> {
        self.payload.get(name).and_then(Value::as_i64)
    }
}
