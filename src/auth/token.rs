//! JWT session tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::users::User;
use crate::error::AppError;

/// JWT claims carried by every session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// User role (ADMIN | STORE_OWNER | USER)
    pub role: String,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
}

const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Create a session token for a user
pub fn create_token(user: &User, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(TOKEN_EXPIRY_DAYS)).timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(Box::new(e)))
}

/// Verify a session token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::Auth("Invalid or expired token".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u-1".into(),
            name: "Jane Q. Public Twenty Chars Min".into(),
            email: "jane@x.com".into(),
            password_hash: "$argon2id$irrelevant".into(),
            address: "1 Main St".into(),
            role: "USER".into(),
            created_at: 0,
        }
    }

    #[test]
    fn test_round_trip() {
        let token = create_token(&test_user(), "test-secret").unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "jane@x.com");
        assert_eq!(claims.role, "USER");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&test_user(), "test-secret").unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Sign claims that expired well past the default leeway
        let now = Utc::now();
        let claims = Claims {
            sub: "u-1".into(),
            email: "jane@x.com".into(),
            role: "USER".into(),
            iat: (now - Duration::days(8)).timestamp() as usize,
            exp: (now - Duration::days(1)).timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = verify_token(&token, "test-secret").unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = verify_token("not-a-token", "test-secret").unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }
}
