//! User-facing endpoints
//!
//! GET  /user/stores  — browse stores with aggregates and own rating
//! POST /user/ratings — submit or overwrite a 1-5 rating

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::AppState;
use crate::validation;

use super::{now_millis, round2};

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
    pub user_rating: Option<i32>,
}

// ── GET /user/stores ──

pub async fn list_stores(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<Vec<StoreListItem>>, AppError> {
    let order = db::order_clause(query.sort_by.as_deref(), query.sort_order.as_deref());
    let filter = db::stores::StoreFilter {
        name: query.name,
        address: query.address,
    };

    let rows = db::stores::list_with_ratings(&state.pool, Some(&auth.id), &filter, &order).await?;

    let stores = rows
        .into_iter()
        .map(|s| StoreListItem {
            id: s.id,
            name: s.name,
            email: s.email,
            address: s.address,
            average_rating: round2(s.average_rating),
            rating_count: s.rating_count,
            user_rating: s.user_rating,
        })
        .collect();

    Ok(Json(stores))
}

// ── POST /user/ratings ──

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub store_id: String,
    pub rating: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBody {
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    pub rating: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<SubmitRatingRequest>,
) -> Result<Json<RatingBody>, AppError> {
    validation::validate_rating(req.rating)?;

    if db::stores::find_by_id(&state.pool, &req.store_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Store not found".into()));
    }

    let id = uuid::Uuid::new_v4().to_string();
    let rating = db::ratings::upsert(
        &state.pool,
        &id,
        &auth.id,
        &req.store_id,
        req.rating,
        now_millis(),
    )
    .await?;

    tracing::info!(user_id = %auth.id, store_id = %rating.store_id, rating = rating.rating, "Rating submitted");

    Ok(Json(RatingBody {
        id: rating.id,
        user_id: rating.user_id,
        store_id: rating.store_id,
        rating: rating.rating,
        created_at: rating.created_at,
        updated_at: rating.updated_at,
    }))
}
