//! Store-owner dashboard
//!
//! GET /store/dashboard — the caller's own store, its aggregate, and the
//! full per-user rating list ordered by creation time. Owners of nothing
//! get 403; there is no way to address another owner's store.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::AppState;

use super::round2;

#[derive(Serialize)]
pub struct StoreBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
}

#[derive(Serialize)]
pub struct RatingUserBody {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRating {
    pub user: RatingUserBody,
    pub rating: i32,
    pub created_at: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub store: StoreBody,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub ratings: Vec<DashboardRating>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let store = db::stores::find_by_owner(&state.pool, &auth.id)
        .await?
        .ok_or_else(|| AppError::Forbidden("No store is associated with this account".into()))?;

    let aggregate = db::stores::rating_aggregate(&state.pool, &store.id).await?;
    let rows = db::ratings::list_for_store(&state.pool, &store.id).await?;

    Ok(Json(DashboardResponse {
        store: StoreBody {
            id: store.id,
            name: store.name,
            email: store.email,
            address: store.address,
        },
        average_rating: round2(aggregate.average_rating),
        total_ratings: aggregate.rating_count,
        ratings: rows
            .into_iter()
            .map(|r| DashboardRating {
                user: RatingUserBody {
                    id: r.user_id,
                    name: r.user_name,
                    email: r.user_email,
                },
                rating: r.rating,
                created_at: r.created_at,
            })
            .collect(),
    }))
}
