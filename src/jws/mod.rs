//! Compact JWS envelope layer.
//!
//! The jws module provides:
//! - The two media-type discriminators that keep trust marks and
//!   delegations from being confused for one another
//! - Compact serialization (`header.payload.signature`, base64url)
//! - Parsing without verification, for reading untrusted artifacts
//! - The `JwsSigner` seam behind which key material lives

pub mod envelope;
pub mod header;
pub mod signer;

pub use envelope::{encode_compact, DecodedJws};
pub use header::{JwsHeader, TRUST_MARK_DELEGATION_JWT_TYPE, TRUST_MARK_JWT_TYPE};
pub use signer::{Ed25519JwsSigner, JwsSigner};
