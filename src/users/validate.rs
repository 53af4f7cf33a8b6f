//! Business-rule validation for registration, profile update, and login.
//!
//! Every rule of an operation is evaluated (validation never short-circuits
//! across rules) and each violated rule contributes exactly one message.
//! The outcome is a plain return value; surfacing it (form re-render, JSON
//! body, flash message) is entirely the caller's concern.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::AccountError;
use crate::users::dto::{LoginInput, ProfileUpdate, RegisterInput};
use crate::users::password::verify_password;
use crate::users::repo::UserStore;

pub const MSG_EMAIL_TAKEN: &str = "Email is already registered.";
pub const MSG_EMAIL_TAKEN_BY_OTHER: &str = "Email is already used by another account.";
pub const MSG_EMAIL_FORMAT: &str = "Email format is invalid.";
pub const MSG_FIRST_NAME_LEN: &str = "First name must be at least 2 characters.";
pub const MSG_LAST_NAME_LEN: &str = "Last name must be at least 2 characters.";
pub const MSG_PASSWORD_LEN: &str = "Password must be at least 6 characters.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MSG_EMAIL_UNKNOWN: &str = "Email is not registered.";
pub const MSG_PASSWORD_WRONG: &str = "Incorrect password.";

const NAME_MIN_CHARS: usize = 2;
const PASSWORD_MIN_CHARS: usize = 6;

/// Result of running one validation operation: `valid` iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Local part of `.+_-`/alphanumerics, one alphanumeric domain label, an
/// alphabetic TLD. Deliberately a narrow RFC 5322 subset.
fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[a-zA-Z0-9.+_-]+@[a-zA-Z0-9]+\.[a-zA-Z]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn too_short(value: &str, min_chars: usize) -> bool {
    value.chars().count() < min_chars
}

/// Checks all six registration rules against the submitted fields and the
/// store, collecting a message per violated rule.
pub async fn validate_registration(
    store: &dyn UserStore,
    input: &RegisterInput,
) -> Result<ValidationOutcome, AccountError> {
    let mut errors = Vec::new();

    if store.email_taken(&input.email, None).await? {
        errors.push(MSG_EMAIL_TAKEN.to_string());
    }
    if !is_valid_email(&input.email) {
        errors.push(MSG_EMAIL_FORMAT.to_string());
    }
    if too_short(&input.first_name, NAME_MIN_CHARS) {
        errors.push(MSG_FIRST_NAME_LEN.to_string());
    }
    if too_short(&input.last_name, NAME_MIN_CHARS) {
        errors.push(MSG_LAST_NAME_LEN.to_string());
    }
    if too_short(&input.password, PASSWORD_MIN_CHARS) {
        errors.push(MSG_PASSWORD_LEN.to_string());
    }
    if input.password != input.confirm_password {
        errors.push(MSG_PASSWORD_MISMATCH.to_string());
    }

    Ok(ValidationOutcome::from_errors(errors))
}

/// Checks the profile-update rules for the user identified by `target_id`.
///
/// The uniqueness probe excludes `target_id`, so keeping one's own email is
/// valid. The password rules only apply when a non-blank password was
/// submitted; the confirmation only when it was submitted too.
pub async fn validate_update(
    store: &dyn UserStore,
    input: &ProfileUpdate,
    target_id: i64,
) -> Result<ValidationOutcome, AccountError> {
    let mut errors = Vec::new();

    if store.email_taken(&input.email, Some(target_id)).await? {
        errors.push(MSG_EMAIL_TAKEN_BY_OTHER.to_string());
    }
    if !is_valid_email(&input.email) {
        errors.push(MSG_EMAIL_FORMAT.to_string());
    }
    if too_short(&input.first_name, NAME_MIN_CHARS) {
        errors.push(MSG_FIRST_NAME_LEN.to_string());
    }
    if too_short(&input.last_name, NAME_MIN_CHARS) {
        errors.push(MSG_LAST_NAME_LEN.to_string());
    }

    if let Some(password) = input.password.as_deref() {
        if !password.trim().is_empty() {
            if too_short(password, PASSWORD_MIN_CHARS) {
                errors.push(MSG_PASSWORD_LEN.to_string());
            }
            if let Some(confirm) = input.confirm_password.as_deref() {
                if !confirm.trim().is_empty() && password != confirm {
                    errors.push(MSG_PASSWORD_MISMATCH.to_string());
                }
            }
        }
    }

    Ok(ValidationOutcome::from_errors(errors))
}

/// Checks the login credentials. Unlike the other operations this one
/// short-circuits: without a stored row there is no hash to compare against.
pub async fn validate_login(
    store: &dyn UserStore,
    input: &LoginInput,
) -> Result<ValidationOutcome, AccountError> {
    let mut errors = Vec::new();

    match store.find_by_email(&input.email).await? {
        None => errors.push(MSG_EMAIL_UNKNOWN.to_string()),
        Some(user) => {
            if !verify_password(&input.password, &user.password_hash)? {
                errors.push(MSG_PASSWORD_WRONG.to_string());
            }
        }
    }

    Ok(ValidationOutcome::from_errors(errors))
}
