//! Trust mark artifacts — construction and verification.
//!
//! The mark module provides:
//! - Claim sets with reserved-claim protection
//! - Unique artifact identifier generation
//! - The trust mark delegation builder (inner artifact)
//! - The trust mark builder with delegation binding checks (outer artifact)
//! - Consumer-side verification

pub mod claims;
pub mod delegation;
pub mod trust_mark;
pub mod verify;

pub use claims::{generate_jti, ClaimSet, RESERVED_CLAIMS};
pub use delegation::{SignedTrustMarkDelegation, TrustMarkDelegation};
pub use trust_mark::{check_delegation_binding, SignedTrustMark, TrustMark};
pub use verify::{verify, StaticKeyProvider, TrustedKeyProvider, VerifiedClaims, VerifyOptions};
