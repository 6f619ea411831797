use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::core::errors::FieldError;
use crate::core::models::UserInput;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn min_length_error(field: &str, label: &str, min: usize) -> FieldError {
    FieldError {
        field: field.to_string(),
        title: format!("{} Too Short", label),
        description: format!("{} must be at least {} characters long", label, min),
    }
}

/// Checks every field of `input` and reports all failures at once.
pub fn validate_user_input(input: &UserInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_valid_email(&input.email) {
        errors.push(FieldError {
            field: "email".to_string(),
            title: "Invalid Email".to_string(),
            description: "email must be a valid email address".to_string(),
        });
    }
    // Lengths count characters, not bytes.
    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(min_length_error("password", "Password", MIN_PASSWORD_LENGTH));
    }
    if input.name.chars().count() < MIN_NAME_LENGTH {
        errors.push(min_length_error("name", "Name", MIN_NAME_LENGTH));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
