use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AccountError;

/// Registration form fields. Every field is required; the legacy Spanish
/// field names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterInput {
    #[serde(alias = "nombre")]
    pub first_name: String,
    #[serde(alias = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile edit form fields. A blank or absent password means "keep the
/// stored one"; the confirmation is only checked when it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(alias = "nombre")]
    pub first_name: String,
    #[serde(alias = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Login form fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Builds a typed input from the request layer's string-field mapping.
///
/// Unknown keys and missing required keys are rejected here, with the serde
/// message carried as a validation error, instead of failing later at the
/// point of use.
pub fn from_form<T>(fields: &HashMap<String, String>) -> Result<T, AccountError>
where
    T: DeserializeOwned,
{
    let map: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect();
    serde_json::from_value(serde_json::Value::Object(map))
        .map_err(|e| AccountError::Validation(vec![format!("invalid submission: {e}")]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn register_input_parses_english_field_names() {
        let input: RegisterInput = from_form(&fields(&[
            ("first_name", "ana"),
            ("last_name", "lópez"),
            ("email", "ana@example.com"),
            ("password", "secret1"),
            ("confirm_password", "secret1"),
        ]))
        .expect("well-formed submission");

        assert_eq!(input.first_name, "ana");
        assert_eq!(input.confirm_password, "secret1");
    }

    #[test]
    fn register_input_accepts_spanish_aliases() {
        let input: RegisterInput = from_form(&fields(&[
            ("nombre", "ana"),
            ("apellido", "lópez"),
            ("email", "ana@example.com"),
            ("password", "secret1"),
            ("confirm_password", "secret1"),
        ]))
        .expect("aliases are known keys");

        assert_eq!(input.first_name, "ana");
        assert_eq!(input.last_name, "lópez");
    }

    #[test]
    fn missing_required_key_is_rejected_explicitly() {
        let err = from_form::<RegisterInput>(&fields(&[
            ("first_name", "ana"),
            ("last_name", "lópez"),
            ("password", "secret1"),
            ("confirm_password", "secret1"),
        ]))
        .unwrap_err();

        match err {
            AccountError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("email"), "got: {}", errors[0]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_key_is_rejected_explicitly() {
        let err = from_form::<LoginInput>(&fields(&[
            ("email", "ana@example.com"),
            ("password", "secret1"),
            ("remember_me", "on"),
        ]))
        .unwrap_err();

        match err {
            AccountError::Validation(errors) => {
                assert!(errors[0].contains("remember_me"), "got: {}", errors[0]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn profile_update_password_is_optional() {
        let input: ProfileUpdate = from_form(&fields(&[
            ("first_name", "ana"),
            ("last_name", "lópez"),
            ("email", "ana@example.com"),
        ]))
        .expect("password may be omitted");

        assert_eq!(input.password, None);
        assert_eq!(input.confirm_password, None);
    }

    #[test]
    fn profile_update_keeps_a_blank_password_distinct_from_absent() {
        let input: ProfileUpdate = from_form(&fields(&[
            ("first_name", "ana"),
            ("last_name", "lópez"),
            ("email", "ana@example.com"),
            ("password", ""),
        ]))
        .expect("blank password is a legal submission");

        assert_eq!(input.password.as_deref(), Some(""));
    }
}
