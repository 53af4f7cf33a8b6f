//! Account management behind a session-holding frontend.
//!
//! The crate owns registration, login, profile reads and edits, and account
//! deletion over a relational `users` table. Callers keep the session and
//! rendering concerns; every flow here takes the user id (or credentials)
//! the caller already resolved and returns typed results.
//!
//! ```no_run
//! use accounts::users::{self, MemoryUserStore, RegisterInput};
//!
//! # async fn demo() -> Result<(), accounts::AccountError> {
//! let store = MemoryUserStore::new();
//! let id = users::services::register(
//!     &store,
//!     RegisterInput {
//!         first_name: "ana".into(),
//!         last_name: "lópez".into(),
//!         email: "ana@example.com".into(),
//!         password: "secret1".into(),
//!         confirm_password: "secret1".into(),
//!     },
//! )
//! .await?;
//! let profile = users::services::profile(&store, id).await?;
//! assert_eq!(profile.first_name, "Ana");
//! # Ok(())
//! # }
//! ```
//!
//! Production callers connect a [`users::PgUserStore`] over the pool from
//! [`db::connect`]; tests and embedders without a database reach for
//! [`users::MemoryUserStore`].

pub mod config;
pub mod db;
pub mod error;
pub mod users;

pub use config::AppConfig;
pub use error::AccountError;
