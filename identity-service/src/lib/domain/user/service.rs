use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenCodec;
use chrono::Duration;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::Username;
use crate::user::ports::IdentityServicePort;
use crate::user::ports::UserRepository;

/// Well-known seed credentials, created once on an empty store and meant to
/// be rotated by an operator right away.
const SEED_ADMIN_USERNAME: &str = "admin";
const SEED_ADMIN_EMAIL: &str = "admin@example.com";
const SEED_ADMIN_PASSWORD: &str = "admin123";

/// Authentication facade.
///
/// Orchestrates the store, the password hasher, and the token codec. Owns
/// no data itself; every lookup consults the store fresh, so role changes
/// and deactivation take effect on the next request.
pub struct IdentityService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

impl<R> IdentityService<R>
where
    R: UserRepository,
{
    /// Create a new service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_codec` - Codec holding the process-wide signing secret
    /// * `token_ttl` - Lifetime of issued access tokens
    pub fn new(repository: Arc<R>, token_codec: TokenCodec, token_ttl: Duration) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec,
            token_ttl,
        }
    }

    /// Issue an access token for a user id with the configured TTL.
    pub fn issue_token(&self, id: UserId) -> Result<String, UserError> {
        self.token_codec
            .issue(id.0, self.token_ttl)
            .map_err(|e| UserError::TokenIssuance(e.to_string()))
    }

    /// Create the seed admin account if no admin row exists yet.
    ///
    /// Idempotent: a store that already holds an admin (active or not) is
    /// left untouched. Returns the created user when seeding happened.
    pub async fn ensure_seed_admin(&self) -> Result<Option<User>, UserError> {
        if self.repository.admin_exists().await? {
            return Ok(None);
        }

        let command = CreateUserCommand::new(
            Username::new(SEED_ADMIN_USERNAME.to_string())?,
            EmailAddress::new(SEED_ADMIN_EMAIL.to_string())?,
            SEED_ADMIN_PASSWORD.to_string(),
            Role::Admin,
        );

        match self.create_user(command).await {
            Ok(user) => {
                tracing::warn!(
                    username = SEED_ADMIN_USERNAME,
                    "Seed admin account created with a well-known password; rotate it immediately"
                );
                Ok(Some(user))
            }
            // Another instance won the race; the unique constraint decides
            Err(UserError::DuplicateIdentity) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<R> IdentityServicePort for IdentityService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
        };

        let user = self.repository.insert(new_user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created"
        );

        Ok(user)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        // Unknown username and wrong password produce the same `None`
        let Some(user) = self.repository.find_active_by_username(username).await? else {
            return Ok(None);
        };

        if self
            .password_hasher
            .verify(password, &user.password_hash)?
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<LoginOutcome>, UserError> {
        match self.authenticate(username, password).await? {
            Some(user) => {
                let access_token = self.issue_token(user.id)?;
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(Some(LoginOutcome { user, access_token }))
            }
            None => Ok(None),
        }
    }

    async fn get_active_user(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.repository.find_active_by_id(id).await
    }

    async fn list_active_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_active().await
    }

    async fn deactivate_user(&self, id: UserId) -> Result<(), UserError> {
        self.repository.deactivate(id).await?;
        tracing::info!(user_id = %id, "User deactivated");
        Ok(())
    }

    async fn require_role(
        &self,
        bearer: Option<&str>,
        required: Role,
    ) -> Result<User, AuthError> {
        // Gate 1: token present
        let token = bearer.ok_or(AuthError::Unauthenticated)?;

        // Gate 2: token valid
        let claims = self
            .token_codec
            .verify(token)
            .map_err(|_| AuthError::Unauthenticated)?;

        // Gate 3: subject resolvable and active. A deactivated account
        // loses access here even while its token is unexpired.
        let user = self
            .repository
            .find_active_by_id(UserId(claims.sub))
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::Unauthenticated)?;

        // Gate 4: role sufficient
        if !auth::at_least(user.role.as_str(), required.as_str()) {
            return Err(AuthError::Forbidden { required });
        }

        Ok(user)
    }
}
