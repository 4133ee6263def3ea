use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<String>,
    pub created_at: i64,
}

/// Store row joined with its rating aggregate and, when a viewer is given,
/// the viewer's own rating.
#[derive(Debug, sqlx::FromRow)]
pub struct StoreWithRatings {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: f64,
    pub rating_count: i64,
    pub user_rating: Option<i32>,
}

/// Aggregate over a single store's ratings
#[derive(Debug, sqlx::FromRow)]
pub struct RatingAggregate {
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Filters for store listings; substring match is case-insensitive.
#[derive(Debug, Default)]
pub struct StoreFilter {
    pub name: Option<String>,
    pub address: Option<String>,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    email: &str,
    address: &str,
    owner_id: Option<&str>,
    now: i64,
) -> Result<Store, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO stores (id, name, email, address, owner_id, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(address)
    .bind(owner_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Store>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stores WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Store>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stores WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_owner(pool: &PgPool, owner_id: &str) -> Result<Option<Store>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stores WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// Lists stores with their rating aggregate. The average is computed over
/// all ratings at query time; a store with no ratings reports 0 / count 0.
/// When `viewer_id` is given, that user's own rating is merged in via a
/// second join. `%`/`_` in filters match literally; `order_by` must come
/// from [`crate::db::order_clause`].
pub async fn list_with_ratings(
    pool: &PgPool,
    viewer_id: Option<&str>,
    filter: &StoreFilter,
    order_by: &str,
) -> Result<Vec<StoreWithRatings>, sqlx::Error> {
    let sql = format!(
        "SELECT s.id, s.name, s.email, s.address,
                COALESCE(AVG(r.rating)::float8, 0) AS average_rating,
                COUNT(r.id) AS rating_count,
                mine.rating AS user_rating
         FROM stores s
         LEFT JOIN ratings r ON r.store_id = s.id
         LEFT JOIN ratings mine ON mine.store_id = s.id AND mine.user_id = $1
         WHERE ($2::text IS NULL OR s.name ILIKE '%' || $2 || '%' ESCAPE '\\')
           AND ($3::text IS NULL OR s.address ILIKE '%' || $3 || '%' ESCAPE '\\')
         GROUP BY s.id, s.name, s.email, s.address, mine.rating
         ORDER BY s.{order_by}"
    );
    sqlx::query_as(&sql)
        .bind(viewer_id)
        .bind(filter.name.as_deref().map(crate::db::escape_like))
        .bind(filter.address.as_deref().map(crate::db::escape_like))
        .fetch_all(pool)
        .await
}

pub async fn rating_aggregate(
    pool: &PgPool,
    store_id: &str,
) -> Result<RatingAggregate, sqlx::Error> {
    sqlx::query_as(
        "SELECT COALESCE(AVG(rating)::float8, 0) AS average_rating,
                COUNT(id) AS rating_count
         FROM ratings WHERE store_id = $1",
    )
    .bind(store_id)
    .fetch_one(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(pool)
        .await
}
