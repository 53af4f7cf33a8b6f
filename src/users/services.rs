//! Account flows: the operations the request layer calls.
//!
//! Each flow runs the validator, applies password hashing where plaintext is
//! involved, and drives the store. Session establishment and teardown stay
//! with the caller.

use tracing::{info, instrument, warn};

use crate::error::AccountError;
use crate::users::dto::{LoginInput, ProfileUpdate, RegisterInput};
use crate::users::password::hash_password;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};
use crate::users::validate::{self, MSG_EMAIL_TAKEN, MSG_EMAIL_TAKEN_BY_OTHER};

/// Registers a new account and returns the store-assigned id for the caller
/// to bind a session to.
#[instrument(skip(store, input), fields(email = %input.email))]
pub async fn register(store: &dyn UserStore, input: RegisterInput) -> Result<i64, AccountError> {
    let outcome = validate::validate_registration(store, &input).await?;
    if !outcome.valid {
        warn!(rules = outcome.errors.len(), "registration rejected");
        return Err(AccountError::Validation(outcome.errors));
    }

    let password_hash = hash_password(&input.password)?;
    let user = NewUser {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash,
    };

    // The unique index is the authoritative uniqueness guarantee; a
    // concurrent registration that slipped past the pre-check lands here and
    // gets the same user-visible message.
    let id = match store.create(user).await {
        Err(AccountError::DuplicateKey) => {
            warn!("duplicate email raced past the uniqueness pre-check");
            return Err(AccountError::Validation(vec![MSG_EMAIL_TAKEN.to_string()]));
        }
        other => other?,
    };

    info!(user_id = id, "user registered");
    Ok(id)
}

/// Validates credentials and returns the matching user for session
/// establishment.
#[instrument(skip(store, input), fields(email = %input.email))]
pub async fn login(store: &dyn UserStore, input: LoginInput) -> Result<User, AccountError> {
    let outcome = validate::validate_login(store, &input).await?;
    if !outcome.valid {
        warn!("login rejected");
        return Err(AccountError::Validation(outcome.errors));
    }

    // Validation just proved the row exists; a concurrent delete in between
    // shows up as NotFound.
    let user = store
        .find_by_email(&input.email)
        .await?
        .ok_or(AccountError::NotFound)?;
    info!(user_id = user.id, "user logged in");
    Ok(user)
}

/// Loads the profile behind a session id. `NotFound` tells the caller the
/// session points at a deleted account and should be invalidated.
#[instrument(skip(store))]
pub async fn profile(store: &dyn UserStore, user_id: i64) -> Result<User, AccountError> {
    store
        .find_by_id(user_id)
        .await?
        .ok_or(AccountError::NotFound)
}

/// Applies a profile edit. Only a non-blank submitted password is re-hashed;
/// otherwise the stored hash stays as it is.
#[instrument(skip(store, input), fields(email = %input.email))]
pub async fn update_profile(
    store: &dyn UserStore,
    user_id: i64,
    input: ProfileUpdate,
) -> Result<(), AccountError> {
    let outcome = validate::validate_update(store, &input, user_id).await?;
    if !outcome.valid {
        warn!(user_id, rules = outcome.errors.len(), "profile update rejected");
        return Err(AccountError::Validation(outcome.errors));
    }

    let password_hash = match input.password.as_deref() {
        Some(password) if !password.trim().is_empty() => Some(hash_password(password)?),
        _ => None,
    };
    let changes = UserChanges {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash,
    };

    match store.update(user_id, changes).await {
        Err(AccountError::DuplicateKey) => {
            warn!(user_id, "duplicate email raced past the uniqueness pre-check");
            Err(AccountError::Validation(vec![
                MSG_EMAIL_TAKEN_BY_OTHER.to_string(),
            ]))
        }
        Err(other) => Err(other),
        Ok(()) => {
            info!(user_id, "profile updated");
            Ok(())
        }
    }
}

/// Hard-deletes the account. Deleting an already-absent row still succeeds,
/// so a retried form submission cannot fail the flow.
#[instrument(skip(store))]
pub async fn delete_account(store: &dyn UserStore, user_id: i64) -> Result<(), AccountError> {
    let deleted = store.delete(user_id).await?;
    if deleted {
        info!(user_id, "account deleted");
    } else {
        warn!(user_id, "delete of an absent account acknowledged");
    }
    Ok(())
}
