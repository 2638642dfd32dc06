use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Postgres-backed credential store.
///
/// Username uniqueness is enforced by the `users_username_key` constraint.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, AuthError> {
    let column_error = |e: sqlx::Error| AuthError::DatabaseError(e.to_string());

    let id: Uuid = row.try_get("id").map_err(column_error)?;
    let username: String = row.try_get("username").map_err(column_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(column_error)?;
    let role: String = row.try_get("role").map_err(column_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column_error)?;

    restore_user(id, username, password_hash, role, created_at)
}

/// Rebuild a `User` from stored columns. Values that no longer pass
/// validation mean the row is corrupt, which is a store failure.
fn restore_user(
    id: Uuid,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
) -> Result<User, AuthError> {
    let username = Username::new(username).map_err(|e| {
        tracing::error!(error = %e, user_id = %id, "Stored username is invalid");
        AuthError::DatabaseError(format!("Corrupt user row {}: {}", id, e))
    })?;
    let role = Role::new(role).map_err(|e| {
        tracing::error!(error = %e, user_id = %id, "Stored role is invalid");
        AuthError::DatabaseError(format!("Corrupt user row {}: {}", id, e))
    })?;

    Ok(User {
        id: UserId(id),
        username,
        password_hash,
        role,
        created_at,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return AuthError::DuplicateUser(user.username.as_str().to_string());
                }
            }
            tracing::error!(error = %e, "Failed to insert user");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to look up user");
            AuthError::DatabaseError(e.to_string())
        })?;

        row.as_ref().map(user_from_row).transpose()
    }
}
