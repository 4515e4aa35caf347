//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (PBKDF2-HMAC-SHA256 with per-user random salt)
//! - Signed, time-limited access tokens (HS256)
//! - Hierarchical role policy (viewer < user < admin)
//!
//! The credential store and the request-time orchestration live in the
//! service crate; this crate holds the pure, storage-free building blocks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue(42, Duration::minutes(30)).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, 42);
//! ```
//!
//! ## Role Policy
//! ```
//! use auth::Role;
//!
//! assert!(Role::Admin.satisfies(Role::User));
//! assert!(!Role::Viewer.satisfies(Role::Admin));
//! ```

pub mod password;
pub mod policy;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use policy::at_least;
pub use policy::Role;
pub use policy::RoleParseError;
pub use token::AccessClaims;
pub use token::InvalidToken;
pub use token::IssueTokenError;
pub use token::TokenCodec;
