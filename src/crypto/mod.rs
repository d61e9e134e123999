//! Cryptographic primitives: Ed25519 keys, signing, and secure randomness.

pub mod keys;
pub mod random;
pub mod signing;

pub use keys::Ed25519KeyPair;

use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

/// Derive a stable key identifier from a verifying key.
///
/// Rendered as hex(SHA-256(public key bytes)); used as the JWS `kid`
/// header parameter.
pub fn key_thumbprint(verifying_key: &VerifyingKey) -> String {
    hex::encode(Sha256::digest(verifying_key.to_bytes()))
}
