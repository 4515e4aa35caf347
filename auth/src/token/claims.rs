use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// Three mandatory fields: the subject (user id), issue time, and expiry.
/// Tokens without an expiry are never issued and never accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject with the given time-to-live from now.
    pub fn new(subject: i64, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check whether the claims are expired at the given Unix timestamp.
    ///
    /// A token is valid strictly before its expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
