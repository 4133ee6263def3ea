//! API routes for rating-server

pub mod admin;
pub mod auth;
pub mod health;
pub mod store;
pub mod user;

use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{require_auth, require_role};
use crate::db::users::Role;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    // Public auth endpoints (no token)
    let public = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/setup-admin", post(auth::setup_admin));

    // Authenticated, any role
    let account = Router::new()
        .route("/auth/update-password", put(auth::update_password))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let user_routes = Router::new()
        .route("/user/stores", get(user::list_stores))
        .route("/user/ratings", post(user::submit_rating))
        .layer(middleware::from_fn(|req, next| {
            require_role(&[Role::User], req, next)
        }))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let store_routes = Router::new()
        .route("/store/dashboard", get(store::dashboard))
        .layer(middleware::from_fn(|req, next| {
            require_role(&[Role::StoreOwner], req, next)
        }))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/admin/stores",
            get(admin::list_stores).post(admin::create_store),
        )
        .layer(middleware::from_fn(|req, next| {
            require_role(&[Role::Admin], req, next)
        }))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(account)
        .merge(user_routes)
        .merge(store_routes)
        .merge(admin_routes)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS configuration from the configured origin list
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {o}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Display rounding for averages: two decimal places. Stored ratings stay
/// exact integers; this only shapes the JSON value.
pub(crate) fn round2(avg: f64) -> f64 {
    (avg * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        // mean of [5, 4, 3]
        assert_eq!(round2(4.0), 4.0);
        // mean of [5, 4]
        assert_eq!(round2(4.5), 4.5);
        // mean of [5, 4, 4]
        assert_eq!(round2(13.0 / 3.0), 4.33);
        // mean of [5, 5, 4]
        assert_eq!(round2(14.0 / 3.0), 4.67);
        // no ratings
        assert_eq!(round2(0.0), 0.0);
    }
}
