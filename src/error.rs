//! Error types for trust mark construction and verification.
//!
//! All errors are strongly typed and propagated without panicking.
//! Every variant names the invariant that was violated so federation
//! operators can debug a rejected artifact from the message alone.

/// Trust mark error types covering build and verify operations.
#[derive(Debug, thiserror::Error)]
pub enum TrustMarkError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Claim '{0}' is reserved and must be set through its dedicated accessor")]
    ReservedClaim(String),

    #[error("Expiration time {exp} is not strictly after issue time {iat}")]
    InvalidTemporalRange { iat: i64, exp: i64 },

    #[error("Issue time {iat} is in the future (now {now}, allowed skew {skew}s)")]
    IssueTimeInFuture { iat: i64, now: i64, skew: i64 },

    #[error("Delegation binding violated: {0}")]
    DelegationBinding(String),

    #[error("Unsupported media type: expected '{expected}', found '{found}'")]
    UnsupportedMediaType { expected: String, found: String },

    #[error("No trusted key known for issuer: {0}")]
    UntrustedIssuer(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Artifact expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },

    #[error("Artifact not valid before {iat} (now {now})")]
    NotYetValid { iat: i64, now: i64 },

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Malformed artifact: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, TrustMarkError>;
