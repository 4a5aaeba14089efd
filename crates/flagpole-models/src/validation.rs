//! Custom rules used by `#[validate(custom(...))]` attributes.

use std::borrow::Cow;

use validator::ValidationError;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 10;
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Rejects empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Password policy: 8 to 10 characters after trimming, with at least one lowercase
/// letter, one uppercase letter, one digit and one of `@$!%*?&`.
pub fn password_policy(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let len = value.chars().count();

    if len < PASSWORD_MIN_LEN {
        return Err(password_error(
            "password_min",
            "Password must be at least 8 characters long.",
        ));
    }

    if len > PASSWORD_MAX_LEN {
        return Err(password_error(
            "password_max",
            "Password must not exceed 10 characters.",
        ));
    }

    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(has_lower && has_upper && has_digit && has_special) {
        return Err(password_error(
            "password_pattern",
            "Password must include uppercase, lowercase, number, and special character.",
        ));
    }

    Ok(())
}

fn password_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
