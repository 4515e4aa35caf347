use async_trait::async_trait;
use auth::Role;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::UserError;

/// Port for the authentication facade.
///
/// This is the complete surface exposed to the routing layer; everything
/// behind it (hashing, token handling, the store) stays internal.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Create new user with validated fields.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Username or email is already taken
    /// * `Storage` - Store operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify credentials against the store.
    ///
    /// Returns `None` on any mismatch: an unknown username and a wrong
    /// password are indistinguishable, to avoid username enumeration.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<User>, UserError>;

    /// Verify credentials and, on success, issue an access token.
    ///
    /// # Errors
    /// * `TokenIssuance` - Token encoding failed
    /// * `Storage` - Store operation failed
    async fn login(&self, username: &str, password: &str)
        -> Result<Option<LoginOutcome>, UserError>;

    /// Retrieve an active user by identifier. Soft-deleted users are
    /// invisible here.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn get_active_user(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve all active users, newest-created first.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_active_users(&self) -> Result<Vec<User>, UserError>;

    /// Soft-delete a user. The record stays in the store but disappears
    /// from every lookup and from authentication.
    ///
    /// # Errors
    /// * `NotFound` - No active user with this id
    /// * `Storage` - Store operation failed
    async fn deactivate_user(&self, id: UserId) -> Result<(), UserError>;

    /// Run the four request-time authorization gates in order: token
    /// present, token valid, subject resolvable and active, role
    /// sufficient. Each failure is terminal.
    ///
    /// # Arguments
    /// * `bearer` - Raw bearer token, if the caller supplied one
    /// * `required` - Minimum role for the protected resource
    ///
    /// # Returns
    /// The resolved user, to be attached to the request
    ///
    /// # Errors
    /// * `Unauthenticated` - Gates 1-3 (uniform, no detail)
    /// * `Forbidden` - Gate 4, names the required role
    /// * `Storage` - Store operation failed
    async fn require_role(&self, bearer: Option<&str>, required: Role)
        -> Result<User, AuthError>;
}

/// Persistence operations for user records.
///
/// Uniqueness of username and email is enforced by the storage layer
/// itself, never by a check-then-insert sequence.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user, assigning id and creation timestamp.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Storage-native uniqueness constraint tripped
    /// * `Storage` - Store operation failed
    async fn insert(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Retrieve an active user by identifier.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_active_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve an active user by exact, case-sensitive username.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all active users, newest-created first.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_active(&self) -> Result<Vec<User>, UserError>;

    /// Check whether any admin row exists, active or not.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn admin_exists(&self) -> Result<bool, UserError>;

    /// Mark an active user inactive.
    ///
    /// # Errors
    /// * `NotFound` - No active user with this id
    /// * `Storage` - Store operation failed
    async fn deactivate(&self, id: UserId) -> Result<(), UserError>;
}
