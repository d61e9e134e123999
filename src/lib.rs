//! Trust Marks for identity federations.
//!
//! A trust mark is a signed, time-bounded attestation that a subject
//! entity satisfies a federation-defined property. When the mark's
//! issuer is not the trust mark owner, the mark embeds a signed
//! delegation proving the owner authorized that issuer for that mark.
//! Relying parties verify the mark, the delegation, and the binding
//! between them to establish trust without a central authority.
//!
//! Artifacts travel as compact JWS (`header.payload.signature`) with a
//! `typ` discriminator keeping marks and delegations from being
//! confused for each other.
//!
//! # Example
//!
//! ```
//! use trustmark::{
//!     Ed25519JwsSigner, StaticKeyProvider, TrustMark, TrustMarkDelegation, VerifyOptions,
//!     TRUST_MARK_JWT_TYPE,
//! };
//!
//! let owner = Ed25519JwsSigner::generate();
//! let issuer = Ed25519JwsSigner::generate();
//!
//! let delegation = TrustMarkDelegation::builder()
//!     .issuer("https://owner.example")
//!     .subject("https://issuer.example")
//!     .id("https://marks.example/mark-1")
//!     .build(&owner)
//!     .unwrap();
//!
//! let mark = TrustMark::builder()
//!     .id("https://marks.example/mark-1")
//!     .issuer("https://issuer.example")
//!     .subject("https://subject.example")
//!     .delegation(&delegation)
//!     .build(&issuer)
//!     .unwrap();
//!
//! let provider = StaticKeyProvider::new()
//!     .with_key("https://issuer.example", *issuer.verifying_key())
//!     .with_key("https://owner.example", *owner.verifying_key());
//!
//! let claims = trustmark::verify(
//!     mark.as_str(),
//!     TRUST_MARK_JWT_TYPE,
//!     &provider,
//!     trustmark::time::now_secs(),
//!     &VerifyOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(claims.subject(), "https://subject.example");
//! ```

pub mod crypto;
pub mod error;
pub mod jws;
pub mod mark;
pub mod time;

// Re-export primary types
pub use crypto::Ed25519KeyPair;
pub use error::{Result, TrustMarkError};
pub use jws::{
    DecodedJws, Ed25519JwsSigner, JwsHeader, JwsSigner, TRUST_MARK_DELEGATION_JWT_TYPE,
    TRUST_MARK_JWT_TYPE,
};
pub use mark::{
    check_delegation_binding, verify, ClaimSet, SignedTrustMark, SignedTrustMarkDelegation,
    StaticKeyProvider, TrustMark, TrustMarkDelegation, TrustedKeyProvider, VerifiedClaims,
    VerifyOptions,
};
pub use time::TemporalValidity;
