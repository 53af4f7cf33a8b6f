use thiserror::Error;

/// Postgres SQLSTATE for a unique constraint violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by account operations.
///
/// `Validation` and `NotFound` are recoverable by the caller (re-prompt the
/// form, invalidate the session). The remaining kinds are infrastructure
/// failures the caller should surface generically.
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more business rules violated; carries one message per rule.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A lookup by id or email found nothing where a row was required.
    #[error("user not found")]
    NotFound,

    /// The store's unique constraint rejected a write. Flows translate this
    /// into the same user-visible message as the uniqueness pre-check.
    #[error("duplicate key")]
    DuplicateKey,

    /// Connectivity or statement failure talking to the store.
    #[error("store unavailable")]
    StoreUnavailable(#[source] sqlx::Error),

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return AccountError::DuplicateKey;
            }
        }
        AccountError::StoreUnavailable(err)
    }
}
