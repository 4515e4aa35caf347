use thiserror::Error;

/// Uniform rejection for an unverifiable token.
///
/// Malformed encoding, bad signature, missing subject, and expiry all
/// collapse into this one value so callers learn nothing about which
/// check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid or expired token")]
pub struct InvalidToken;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
#[error("Failed to encode token: {0}")]
pub struct IssueTokenError(pub String);
