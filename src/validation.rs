//! Request field validation
//!
//! Policy: name 20-60 chars, valid email shape, password 8-16 chars with at
//! least one uppercase and one special character, address up to 400 chars,
//! rating 1-5. Failures are reported per field.

use crate::error::{AppError, FieldError};

const NAME_MIN: usize = 20;
const NAME_MAX: usize = 60;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 16;
const ADDRESS_MAX: usize = 400;

pub fn validate_name(name: &str) -> Option<FieldError> {
    let len = name.trim().chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        return Some(FieldError {
            field: "name",
            message: format!("Name must be between {NAME_MIN} and {NAME_MAX} characters"),
        });
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if !is_valid_email(email) {
        return Some(FieldError {
            field: "email",
            message: "Invalid email address".into(),
        });
    }
    None
}

pub fn validate_password(password: &str) -> Option<FieldError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN || len > PASSWORD_MAX {
        return Some(FieldError {
            field: "password",
            message: format!(
                "Password must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters"
            ),
        });
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Some(FieldError {
            field: "password",
            message: "Password must contain at least one uppercase letter".into(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        return Some(FieldError {
            field: "password",
            message: "Password must contain at least one special character".into(),
        });
    }
    None
}

pub fn validate_address(address: &str) -> Option<FieldError> {
    if address.trim().is_empty() {
        return Some(FieldError {
            field: "address",
            message: "Address is required".into(),
        });
    }
    if address.chars().count() > ADDRESS_MAX {
        return Some(FieldError {
            field: "address",
            message: format!("Address must be at most {ADDRESS_MAX} characters"),
        });
    }
    None
}

/// Validates all signup fields at once so the client gets every failure
/// in a single response.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    address: &str,
) -> Result<(), AppError> {
    let errors: Vec<FieldError> = [
        validate_name(name),
        validate_email(email),
        validate_password(password),
        validate_address(address),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Store fields follow the same email/address policy; the name only needs
/// to be non-empty and fit the column.
pub fn validate_store(name: &str, email: &str, address: &str) -> Result<(), AppError> {
    let mut errors: Vec<FieldError> = Vec::new();
    let name_len = name.trim().chars().count();
    if name_len == 0 || name_len > NAME_MAX {
        errors.push(FieldError {
            field: "name",
            message: format!("Store name must be between 1 and {NAME_MAX} characters"),
        });
    }
    errors.extend(validate_email(email));
    errors.extend(validate_address(address));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub fn validate_rating(value: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&value) {
        return Err(AppError::Validation(vec![FieldError {
            field: "rating",
            message: "Rating must be between 1 and 5".into(),
        }]));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Jane Q. Public Twenty Chars Min").is_none());
        assert!(validate_name("Too Short").is_some());
        assert!(validate_name(&"x".repeat(61)).is_some());
        assert!(validate_name(&"x".repeat(60)).is_none());
        assert!(validate_name(&"x".repeat(20)).is_none());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("jane@x.com").is_none());
        assert!(validate_email("a.b+c@sub.example.org").is_none());
        assert!(validate_email("janex.com").is_some());
        assert!(validate_email("jane@xcom").is_some());
        assert!(validate_email("@x.com").is_some());
        assert!(validate_email("jane@.com").is_some());
        assert!(validate_email("jane doe@x.com").is_some());
        assert!(validate_email("").is_some());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Abcdef1!").is_none());
        // too short
        assert!(validate_password("Ab1!").is_some());
        // too long (17 chars)
        assert!(validate_password("Abcdefgh1!abcdefg").is_some());
        // no uppercase
        assert!(validate_password("abcdef1!").is_some());
        // no special character
        assert!(validate_password("Abcdefg1").is_some());
        // exactly 16 chars is fine
        assert!(validate_password("Abcdefgh1!abcdef").is_none());
    }

    #[test]
    fn test_address_bounds() {
        assert!(validate_address("1 Main St").is_none());
        assert!(validate_address("").is_some());
        assert!(validate_address("   ").is_some());
        assert!(validate_address(&"x".repeat(400)).is_none());
        assert!(validate_address(&"x".repeat(401)).is_some());
    }

    #[test]
    fn test_signup_collects_all_failures() {
        let err = validate_signup("short", "bad", "weak", "").unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["name", "email", "password", "address"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_signup_accepts_valid_input() {
        assert!(
            validate_signup(
                "Jane Q. Public Twenty Chars Min",
                "jane@x.com",
                "Abcdef1!",
                "1 Main St",
            )
            .is_ok()
        );
    }

    #[test]
    fn test_rating_range() {
        for v in 1..=5 {
            assert!(validate_rating(v).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }
}
