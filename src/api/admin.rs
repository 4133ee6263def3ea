//! Admin management endpoints
//!
//! GET  /admin/stats  — headline totals
//! POST /admin/users  — create a user with any role
//! GET  /admin/users  — filtered, sorted user listing
//! POST /admin/stores — create a store, optionally assigning an owner
//! GET  /admin/stores — filtered, sorted store listing with aggregates

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::db::users::{Role, UserFilter};
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use crate::validation;

use super::auth::UserBody;
use super::{now_millis, round2};

// ── GET /admin/stats ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let total_users = db::users::count_all(&state.pool).await?;
    let total_stores = db::stores::count_all(&state.pool).await?;
    let total_ratings = db::ratings::count_all(&state.pool).await?;

    Ok(Json(StatsResponse {
        total_users,
        total_stores,
        total_ratings,
    }))
}

// ── POST /admin/users ──

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub role: Role,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserBody>), AppError> {
    let email = req.email.trim().to_lowercase();
    validation::validate_signup(&req.name, &email, &req.password, &req.address)?;

    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = crate::auth::password::hash_password(&req.password)?;
    let id = uuid::Uuid::new_v4().to_string();
    let user = db::users::create(
        &state.pool,
        &id,
        req.name.trim(),
        &email,
        &password_hash,
        &req.address,
        req.role.as_str(),
        now_millis(),
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "Admin created user");

    Ok((StatusCode::CREATED, Json(UserBody::from_user(&user))))
}

// ── GET /admin/users ──

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserBody>>, AppError> {
    let order = db::order_clause(query.sort_by.as_deref(), query.sort_order.as_deref());
    let filter = UserFilter {
        name: query.name,
        email: query.email,
        address: query.address,
        role: query.role.map(|r| r.as_str().to_string()),
    };

    let users = db::users::list(&state.pool, &filter, &order).await?;
    Ok(Json(users.iter().map(UserBody::from_user).collect()))
}

// ── POST /admin/stores ──

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<String>,
}

pub async fn create_store(
    State(state): State<AppState>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreBody>), AppError> {
    let email = req.email.trim().to_lowercase();
    validation::validate_store(&req.name, &email, &req.address)?;

    if db::stores::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Store email already registered".into()));
    }

    if let Some(owner_id) = req.owner_id.as_deref() {
        let owner = db::users::find_by_id(&state.pool, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Owner not found".into()))?;

        if owner.role != Role::StoreOwner.as_str() {
            return Err(AppError::Validation(vec![FieldError {
                field: "ownerId",
                message: "Owner must have the STORE_OWNER role".into(),
            }]));
        }

        if db::stores::find_by_owner(&state.pool, owner_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Owner already has a store".into()));
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    let store = db::stores::create(
        &state.pool,
        &id,
        req.name.trim(),
        &email,
        &req.address,
        req.owner_id.as_deref(),
        now_millis(),
    )
    .await?;

    tracing::info!(store_id = %store.id, "Admin created store");

    Ok((
        StatusCode::CREATED,
        Json(StoreBody {
            id: store.id,
            name: store.name,
            email: store.email,
            address: store.address,
            owner_id: store.owner_id,
        }),
    ))
}

// ── GET /admin/stores ──

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: f64,
    pub rating_count: i64,
}

pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<Vec<StoreListItem>>, AppError> {
    let order = db::order_clause(query.sort_by.as_deref(), query.sort_order.as_deref());
    let filter = db::stores::StoreFilter {
        name: query.name,
        address: query.address,
    };

    let rows = db::stores::list_with_ratings(&state.pool, None, &filter, &order).await?;

    let stores = rows
        .into_iter()
        .map(|s| StoreListItem {
            id: s.id,
            name: s.name,
            email: s.email,
            address: s.address,
            average_rating: round2(s.average_rating),
            rating_count: s.rating_count,
        })
        .collect();

    Ok(Json(stores))
}
