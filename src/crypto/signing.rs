//! Ed25519 signing and verification over raw message bytes.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{Result, TrustMarkError};

/// Sign a message with an Ed25519 signing key.
///
/// Returns the signature as 64 bytes.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
    signing_key.sign(message)
}

/// Verify an Ed25519 signature against a public key and message.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &Signature) -> Result<()> {
    verifying_key
        .verify(message, signature)
        .map_err(|_| TrustMarkError::SignatureInvalid)
}

/// Parse 64 signature bytes into a `Signature`.
pub fn signature_from_bytes(bytes: &[u8]) -> Result<Signature> {
    let sig_array: [u8; 64] = bytes
        .try_into()
        .map_err(|_| TrustMarkError::Malformed("signature must be 64 bytes".into()))?;
    Ok(Signature::from_bytes(&sig_array))
}
