//! The signing capability seam.
//!
//! Builders never touch key material directly; they hand the JWS signing
//! input to a `JwsSigner`. An HSM-backed or remote signer implements the
//! same trait. Failures from the signer are surfaced to the caller
//! unchanged as `TrustMarkError::Signing`.

use ed25519_dalek::SigningKey;

use crate::crypto::{self, signing, Ed25519KeyPair};
use crate::error::Result;

/// A signing capability for compact JWS artifacts.
pub trait JwsSigner {
    /// Algorithm identifier placed in the `alg` header.
    fn algorithm(&self) -> &str;

    /// Key identifier placed in the `kid` header, when available.
    fn key_id(&self) -> Option<String> {
        None
    }

    /// Sign the JWS signing input (`b64(header) || '.' || b64(payload)`),
    /// returning the raw signature bytes.
    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>>;
}

/// An in-process Ed25519 signer ("EdDSA").
pub struct Ed25519JwsSigner {
    key_pair: Ed25519KeyPair,
    kid: String,
}

impl Ed25519JwsSigner {
    pub fn new(key_pair: Ed25519KeyPair) -> Self {
        let kid = crypto::key_thumbprint(key_pair.verifying_key());
        Self { key_pair, kid }
    }

    /// Generate a fresh key pair and wrap it in a signer.
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }

    /// The verifying key matching this signer's credential.
    pub fn verifying_key(&self) -> &ed25519_dalek::VerifyingKey {
        self.key_pair.verifying_key()
    }

    fn signing_key(&self) -> &SigningKey {
        self.key_pair.signing_key()
    }
}

impl JwsSigner for Ed25519JwsSigner {
    fn algorithm(&self) -> &str {
        "EdDSA"
    }

    fn key_id(&self) -> Option<String> {
        Some(self.kid.clone())
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        Ok(signing::sign(self.signing_key(), signing_input)
            .to_bytes()
            .to_vec())
    }
}
