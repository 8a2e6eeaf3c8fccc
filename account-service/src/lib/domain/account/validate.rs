use std::str::FromStr;

use email_address::EmailAddress;

use super::models::LoginRequest;
use super::models::RegisterRequest;
use crate::domain::error::DomainError;
use crate::domain::error::FieldViolations;

/// Username length bounds, counted in characters.
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
/// Minimum password length, counted in characters.
const PASSWORD_MIN: usize = 6;

/// Validate a registration payload.
///
/// Rules are evaluated exhaustively: every violating field lands in the
/// map, tagged `"failed on <rule>"` with the first rule it failed.
///
/// # Errors
/// * `InvalidInput` - one or more fields violated their rules
pub fn register_request(request: &RegisterRequest) -> Result<(), DomainError> {
    let mut fields = FieldViolations::new();

    record(&mut fields, "username", username_rule(&request.username, true));
    record(&mut fields, "password", password_rule(&request.password));
    record(&mut fields, "email", email_rule(&request.email, true));

    finish(fields)
}

/// Validate a login payload.
///
/// Per-field rules run first (identifiers are optional there); only when
/// they all pass is the cross-field rule checked: at least one of
/// username/email must be non-empty.
///
/// # Errors
/// * `InvalidInput` - field rules violated, or both identifiers empty
pub fn login_request(request: &LoginRequest) -> Result<(), DomainError> {
    let mut fields = FieldViolations::new();

    record(&mut fields, "username", username_rule(&request.username, false));
    record(&mut fields, "email", email_rule(&request.email, false));
    record(&mut fields, "password", password_rule(&request.password));

    finish(fields)?;

    if request.username.is_empty() && request.email.is_empty() {
        let mut fields = FieldViolations::new();
        fields.insert(
            "username".to_string(),
            "required if email is empty".to_string(),
        );
        fields.insert(
            "email".to_string(),
            "required if username is empty".to_string(),
        );
        return Err(DomainError::invalid_input(
            "either username or email must be provided",
            Some(fields),
        ));
    }

    Ok(())
}

fn username_rule(value: &str, required: bool) -> Option<&'static str> {
    if value.is_empty() {
        return required.then_some("required");
    }
    let length = value.chars().count();
    if length < USERNAME_MIN {
        return Some("min");
    }
    if length > USERNAME_MAX {
        return Some("max");
    }
    None
}

fn password_rule(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("required");
    }
    if value.chars().count() < PASSWORD_MIN {
        return Some("min");
    }
    None
}

fn email_rule(value: &str, required: bool) -> Option<&'static str> {
    if value.is_empty() {
        return required.then_some("required");
    }
    if EmailAddress::from_str(value).is_err() {
        return Some("email");
    }
    None
}

fn record(fields: &mut FieldViolations, name: &str, rule: Option<&'static str>) {
    if let Some(rule) = rule {
        fields.insert(name.to_string(), format!("failed on {rule}"));
    }
}

fn finish(fields: FieldViolations) -> Result<(), DomainError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_input("validation failed", Some(fields)))
    }
}
