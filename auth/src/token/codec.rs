use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::InvalidToken;
use super::errors::IssueTokenError;

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide symmetric secret.
/// Tokens are stateless: nothing is stored server-side and there is no
/// revocation list, so a token stays valid until its expiry.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a subject with the given time-to-live.
    ///
    /// # Arguments
    /// * `subject` - User identifier embedded as the `sub` claim
    /// * `ttl` - Lifetime of the token from now
    ///
    /// # Returns
    /// Opaque encoded token string
    ///
    /// # Errors
    /// * `IssueTokenError` - Token encoding failed
    pub fn issue(&self, subject: i64, ttl: Duration) -> Result<String, IssueTokenError> {
        let claims = AccessClaims::new(subject, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key).map_err(|e| IssueTokenError(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks the signature and expiry with zero clock leeway. Any failure
    /// (malformed encoding, bad signature, missing claim, expired) yields
    /// the same `InvalidToken` value.
    ///
    /// # Arguments
    /// * `token` - Encoded token string
    ///
    /// # Returns
    /// Verified claim set
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed any verification check
    pub fn verify(&self, token: &str) -> Result<AccessClaims, InvalidToken> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, Duration::minutes(30))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_verify_malformed_token() {
        let codec = TokenCodec::new(SECRET);

        assert_eq!(codec.verify("not.a.token"), Err(InvalidToken));
        assert_eq!(codec.verify(""), Err(InvalidToken));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"another_secret_at_least_32_bytes!!");

        let token = codec
            .issue(42, Duration::minutes(30))
            .expect("Failed to issue token");

        assert_eq!(other.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, Duration::seconds(-60))
            .expect("Failed to issue token");

        assert_eq!(codec.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_verify_missing_subject() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let codec = TokenCodec::new(SECRET);

        // Signed with the right secret but without a subject claim
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSubject {
                exp: chrono::Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        assert_eq!(codec.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_verify_missing_expiry() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: i64,
            iat: i64,
        }

        let codec = TokenCodec::new(SECRET);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                sub: 42,
                iat: chrono::Utc::now().timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        assert_eq!(codec.verify(&token), Err(InvalidToken));
    }
}
