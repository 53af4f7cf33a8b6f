use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::AccountError;
use crate::users::repo_types::{NewUser, User, UserChanges};

/// Persistence seam for the `users` table.
///
/// The request layer and the validator both talk to this trait; `PgUserStore`
/// is the production implementation and `MemoryUserStore` backs the tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a row (names capitalization-normalized) and returns the
    /// store-assigned id. A concurrent insert of the same email surfaces as
    /// `AccountError::DuplicateKey`.
    async fn create(&self, user: NewUser) -> Result<i64, AccountError>;

    /// Looks a user up by id; `Ok(None)` when the row is gone.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AccountError>;

    /// Looks a user up by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Uniqueness probe for validation. `exclude` carries the id of the row
    /// being updated so its own email does not count as taken.
    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> Result<bool, AccountError>;

    /// Rewrites the profile fields (names normalized); the password column is
    /// only part of the statement when `changes.password_hash` is present.
    /// Zero affected rows is `AccountError::NotFound`.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<(), AccountError>;

    /// Hard-deletes a row. `Ok(false)` when no row existed, so repeating a
    /// delete is acknowledged rather than failed.
    async fn delete(&self, id: i64) -> Result<bool, AccountError>;
}

/// Postgres-backed store. The pool handle is injected at construction; each
/// statement checks a connection out for its own duration only.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<i64, AccountError> {
        let user = user.normalized();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        debug!(user_id = id, "user row inserted");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AccountError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> Result<bool, AccountError> {
        let taken: bool = match exclude {
            Some(id) => {
                sqlx::query_scalar(
                    r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)"#,
                )
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(taken)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<(), AccountError> {
        let changes = changes.normalized();
        // Same statement either way, minus the password column when there is
        // no new hash to write.
        let result = match &changes.password_hash {
            Some(hash) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET first_name = $1, last_name = $2, email = $3, password = $4,
                        updated_at = now()
                    WHERE id = $5
                    "#,
                )
                .bind(&changes.first_name)
                .bind(&changes.last_name)
                .bind(&changes.email)
                .bind(hash)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET first_name = $1, last_name = $2, email = $3, updated_at = now()
                    WHERE id = $4
                    "#,
                )
                .bind(&changes.first_name)
                .bind(&changes.last_name)
                .bind(&changes.email)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound);
        }
        debug!(user_id = id, "user row updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AccountError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
