use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct Rating {
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    pub rating: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A store's rating joined with the submitting user
#[derive(Debug, sqlx::FromRow)]
pub struct StoreRating {
    pub rating: i32,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

/// One row per (user, store): the first submission inserts, a resubmission
/// overwrites the value and bumps updated_at. Atomic with respect to
/// concurrent upserts on the same pair; the last committed write wins.
pub async fn upsert(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    store_id: &str,
    value: i32,
    now: i64,
) -> Result<Rating, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO ratings (id, user_id, store_id, rating, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         ON CONFLICT (user_id, store_id)
         DO UPDATE SET rating = EXCLUDED.rating, updated_at = EXCLUDED.updated_at
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(store_id)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// All ratings for one store with submitter details, ordered by creation time
pub async fn list_for_store(
    pool: &PgPool,
    store_id: &str,
) -> Result<Vec<StoreRating>, sqlx::Error> {
    sqlx::query_as(
        "SELECT r.rating, r.created_at, r.updated_at,
                u.id AS user_id, u.name AS user_name, u.email AS user_email
         FROM ratings r
         JOIN users u ON u.id = r.user_id
         WHERE r.store_id = $1
         ORDER BY r.created_at ASC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
        .fetch_one(pool)
        .await
}
