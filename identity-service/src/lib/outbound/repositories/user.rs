use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// SQLite-backed user store.
///
/// Uniqueness of username and email is delegated to the table's UNIQUE
/// constraints; a violation during insert is re-signaled as
/// `DuplicateIdentity` instead of a generic storage fault. There is no
/// check-then-insert sequence anywhere, so concurrent creates with the
/// same identity cannot race past each other.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<User, UserError> {
        let role: String = row.try_get("role").map_err(storage)?;
        let username: String = row.try_get("username").map_err(storage)?;
        let email: String = row.try_get("email").map_err(storage)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(storage)?),
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password_hash: row.try_get("password_hash").map_err(storage)?,
            role: role.parse::<Role>()?,
            created_at,
            is_active: row.try_get("is_active").map_err(storage)?,
        })
    }
}

fn storage(e: sqlx::Error) -> UserError {
    UserError::Storage(e.to_string())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, UserError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role, created_at, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_str())
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(created_at)
        .bind(true)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::DuplicateIdentity;
                }
            }
            storage(e)
        })?;

        Ok(User {
            id: UserId(result.last_insert_rowid()),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at,
            is_active: true,
        })
    }

    async fn find_active_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at, is_active
            FROM users
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at, is_active
            FROM users
            WHERE username = ?1 AND is_active = 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_active(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at, is_active
            FROM users
            WHERE is_active = 1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn admin_exists(&self) -> Result<bool, UserError> {
        // Active or not: a deactivated admin still counts against seeding
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users WHERE role = 'admin'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;

        Ok(count > 0)
    }

    async fn deactivate(&self, id: UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = 0
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
