use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::PasswordHash;
use pbkdf2::password_hash::PasswordHasher as KdfPasswordHasher;
use pbkdf2::password_hash::PasswordVerifier;
use pbkdf2::password_hash::SaltString;
use pbkdf2::Params;
use pbkdf2::Pbkdf2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Deterministic one-way transform of a plaintext password plus a per-user
/// random salt (internally PBKDF2-HMAC-SHA256). Every plaintext is hashed
/// the same way, including the empty string; rejecting unusable passwords
/// is the caller's job.
pub struct PasswordHasher;

impl PasswordHasher {
    /// PBKDF2 iteration count. Fixed and deliberately high.
    const ROUNDS: u32 = 100_000;

    /// Derived key length in bytes.
    const OUTPUT_LENGTH: usize = 32;

    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a fresh random salt per call, so two users with the same
    /// password never share a digest.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params {
            rounds: Self::ROUNDS,
            output_length: Self::OUTPUT_LENGTH,
        };

        Pbkdf2
            .hash_password_customized(password.as_bytes(), None, None, params, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Recomputes the derivation with the parameters and salt embedded in
    /// the stored PHC string and compares in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Pbkdf2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        // Verify correct password
        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        // Verify incorrect password
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_distinct_digests() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("shared_password").expect("Failed to hash");
        let second = hasher.hash("shared_password").expect("Failed to hash");

        // Random salt per call: identical plaintexts never collide
        assert_ne!(first, second);
        assert!(hasher.verify("shared_password", &first).unwrap());
        assert!(hasher.verify("shared_password", &second).unwrap());
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hasher = PasswordHasher::new();
        let password = "plaintext_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert_ne!(hash, password);
        assert!(!hash.is_empty());
    }

    #[test]
    fn test_empty_password_hashed_like_any_other() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("").expect("Failed to hash empty password");
        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("not_empty", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }
}
