use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 hash, stored in the `password` column, not exposed in JSON.
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Insert payload for `UserStore::create`. The password arrives here already
/// hashed; plaintext never crosses the repository boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Applies the capitalization contract ahead of the insert.
    pub fn normalized(mut self) -> Self {
        self.first_name = capitalize(&self.first_name);
        self.last_name = capitalize(&self.last_name);
        self
    }
}

/// Field set for `UserStore::update`. `password_hash` is `Some` only when the
/// user supplied a new password; otherwise the stored hash is left untouched.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Applies the capitalization contract ahead of the update.
    pub fn normalized(mut self) -> Self {
        self.first_name = capitalize(&self.first_name);
        self.last_name = capitalize(&self.last_name);
        self
    }
}

/// Uppercases the first letter of a name and leaves the remainder unchanged:
/// "ana" becomes "Ana", "mcDonald" becomes "McDonald".
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
