//! In-memory `UserStore` implementation.
//!
//! Backs the test suite and is handy for local development; observable
//! semantics match `PgUserStore`: ids are assigned monotonically and never
//! reused, the email uniqueness constraint is enforced at insert time, and
//! timestamps are maintained on write.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::AccountError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};

#[derive(Debug, Default)]
struct Table {
    rows: HashMap<i64, User>,
    next_id: i64,
}

/// HashMap-backed user table behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live rows, for test assertions.
    pub fn len(&self) -> usize {
        self.table.read().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<i64, AccountError> {
        let user = user.normalized();
        let mut table = self.table.write().unwrap();

        // The unique index equivalent: reject before assigning an id.
        if table.rows.values().any(|row| row.email == user.email) {
            return Err(AccountError::DuplicateKey);
        }

        table.next_id += 1;
        let id = table.next_id;
        let now = OffsetDateTime::now_utc();
        table.rows.insert(
            id,
            User {
                id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                password_hash: user.password_hash,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AccountError> {
        Ok(self.table.read().unwrap().rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        Ok(self
            .table
            .read()
            .unwrap()
            .rows
            .values()
            .find(|row| row.email == email)
            .cloned())
    }

    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> Result<bool, AccountError> {
        Ok(self
            .table
            .read()
            .unwrap()
            .rows
            .values()
            .any(|row| row.email == email && Some(row.id) != exclude))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<(), AccountError> {
        let changes = changes.normalized();
        let mut table = self.table.write().unwrap();

        // The unique index fires on updates too, whichever statement shape.
        if table
            .rows
            .values()
            .any(|row| row.email == changes.email && row.id != id)
        {
            return Err(AccountError::DuplicateKey);
        }

        let row = table.rows.get_mut(&id).ok_or(AccountError::NotFound)?;
        row.first_name = changes.first_name;
        row.last_name = changes.last_name;
        row.email = changes.email;
        if let Some(hash) = changes.password_hash {
            row.password_hash = hash;
        }
        row.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AccountError> {
        Ok(self.table.write().unwrap().rows.remove(&id).is_some())
    }
}
