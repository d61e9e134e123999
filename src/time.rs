//! Time utilities and temporal validity windows.
//!
//! All wire timestamps are Unix epoch seconds (i64), matching the JWT
//! `iat`/`exp` claims the artifacts carry.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrustMarkError};

/// Default clock-skew tolerance applied to issue-time checks, in seconds.
pub const DEFAULT_CLOCK_SKEW_SECS: i64 = 5;

/// Return the current time as seconds since Unix epoch.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Convert epoch seconds to an RFC 3339 string.
pub fn secs_to_rfc3339(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .unwrap_or(chrono::DateTime::UNIX_EPOCH)
        .to_rfc3339()
}

/// The validity window of a signed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalValidity {
    /// Issue time (`iat`), epoch seconds.
    pub iat: i64,
    /// Expiration time (`exp`), epoch seconds. None = no expiry claim.
    pub exp: Option<i64>,
}

impl TemporalValidity {
    /// Compute the validity window for a new artifact.
    ///
    /// `issue_time` defaults to the current time when omitted. A supplied
    /// issue time may not lie in the future beyond `skew_secs`, and an
    /// expiration time must be strictly after the issue time.
    pub fn compute(
        issue_time: Option<i64>,
        expiration_time: Option<i64>,
        skew_secs: i64,
    ) -> Result<Self> {
        let now = now_secs();
        let iat = issue_time.unwrap_or(now);

        if iat > now + skew_secs {
            return Err(TrustMarkError::IssueTimeInFuture {
                iat,
                now,
                skew: skew_secs,
            });
        }

        if let Some(exp) = expiration_time {
            if exp <= iat {
                return Err(TrustMarkError::InvalidTemporalRange { iat, exp });
            }
        }

        Ok(Self {
            iat,
            exp: expiration_time,
        })
    }

    /// Check the window at verification time.
    ///
    /// `skew_secs` is applied to the not-yet-valid bound only; an expired
    /// artifact is expired, skew or not.
    pub fn check(&self, now: i64, skew_secs: i64) -> Result<()> {
        if let Some(exp) = self.exp {
            if now > exp {
                return Err(TrustMarkError::Expired { exp, now });
            }
        }
        if now + skew_secs < self.iat {
            return Err(TrustMarkError::NotYetValid {
                iat: self.iat,
                now,
            });
        }
        Ok(())
    }
}
