pub mod dto;
pub mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod validate;

pub use dto::{from_form, LoginInput, ProfileUpdate, RegisterInput};
pub use memory::MemoryUserStore;
pub use repo::{PgUserStore, UserStore};
pub use repo_types::{NewUser, User, UserChanges};
pub use validate::ValidationOutcome;
