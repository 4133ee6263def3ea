//! Request authentication and role gating
//!
//! `require_auth` verifies the bearer token and attaches the authenticated
//! identity to the request; `require_role` checks that identity against the
//! route's allow-list. Tokens are self-contained, no server-side session
//! state exists between requests.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::token;
use crate::db::users::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity attached to the request after token verification
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Middleware that extracts and verifies the bearer token, then attaches
/// `AuthUser` to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing Authorization header".into()))?;

    let bearer = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid Authorization format".into()))?;

    let claims = token::verify_token(bearer, &state.jwt_secret)?;
    let role: Role = claims
        .role
        .parse()
        .map_err(|_| AppError::Auth("Invalid or expired token".into()))?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
        role,
    });

    Ok(next.run(request).await)
}

/// Rejects the request unless the authenticated role is in `allowed`.
/// Must run after `require_auth`.
pub async fn require_role(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Auth("Authentication required".into()))?;

    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    Ok(next.run(request).await)
}
