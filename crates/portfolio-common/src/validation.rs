use crate::models::auth::LoginRequest;
use std::collections::BTreeMap;

/// Minimum password length accepted by the login endpoint
pub const MIN_PASSWORD_LEN: usize = 6;

/// Field name -> first failing rule message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validates the shape of a login request before any credential check runs.
///
/// Only presence and form are checked here. Whether the credentials are
/// correct is decided by the login flow.
pub fn validate_login_request(req: &LoginRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if req.email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !looks_like_email(&req.email) {
        errors.insert("email", "Email is invalid");
    }

    if req.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 6 characters");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Single `@` with something on both sides. Deliverability is not our concern.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
