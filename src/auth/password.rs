//! Password hashing (argon2, salted)

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::AppError;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. An unparseable hash counts as
/// a mismatch, never an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_never_plaintext() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert_ne!(hash, "Abcdef1!");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert!(verify_password("Abcdef1!", &hash));
        assert!(!verify_password("Abcdef1?", &hash));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let a = hash_password("Abcdef1!").unwrap();
        let b = hash_password("Abcdef1!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_mismatch() {
        assert!(!verify_password("Abcdef1!", "not-a-hash"));
        assert!(!verify_password("Abcdef1!", ""));
    }
}
