use auth::Role;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for credential-store operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] auth::RoleParseError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    //
    // One variant for either collision: the storage constraint reports which
    // column tripped, but callers get a single user-correctable signal.
    #[error("Username or email already exists")]
    DuplicateIdentity,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Outcome of the request-time authorization gates.
///
/// The first three gates (token present, token valid, subject resolvable and
/// active) collapse into `Unauthenticated` so a caller cannot tell which one
/// failed. Only the role gate reveals anything: the required role, which is
/// acceptable once identity is established.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Insufficient permissions. Required: {required}")]
    Forbidden { required: Role },

    #[error("Storage error: {0}")]
    Storage(String),
}
