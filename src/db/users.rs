use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User role; stored as TEXT, SCREAMING_SNAKE_CASE on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    StoreOwner,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::StoreOwner => "STORE_OWNER",
            Role::User => "USER",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "STORE_OWNER" => Ok(Role::StoreOwner),
            "USER" => Ok(Role::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub role: String,
    pub created_at: i64,
}

/// Filters for the admin user listing; all optional, substring match
/// is case-insensitive.
#[derive(Debug, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    email: &str,
    password_hash: &str,
    address: &str,
    role: &str,
    now: i64,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (id, name, email, password_hash, address, role, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(address)
    .bind(role)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// True once the one-time bootstrap flag has been claimed
pub async fn bootstrap_completed(pool: &PgPool) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM admin_bootstrap WHERE id = 1)")
        .fetch_one(pool)
        .await
}

/// Claims the one-time bootstrap flag and creates the first admin in a single
/// transaction. Returns `None` if the flag was already claimed; concurrent
/// callers race on the flag row, not on a read of the users table.
pub async fn create_first_admin(
    pool: &PgPool,
    id: &str,
    name: &str,
    email: &str,
    password_hash: &str,
    address: &str,
    now: i64,
) -> Result<Option<User>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        "INSERT INTO admin_bootstrap (id, completed_at) VALUES (1, $1)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if claimed.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let admin: User = sqlx::query_as(
        "INSERT INTO users (id, name, email, password_hash, address, role, created_at)
         VALUES ($1, $2, $3, $4, $5, 'ADMIN', $6)
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(address)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(admin))
}

/// Admin listing with optional filters; `%`/`_` in filters match literally.
/// `order_by` must come from [`crate::db::order_clause`].
pub async fn list(
    pool: &PgPool,
    filter: &UserFilter,
    order_by: &str,
) -> Result<Vec<User>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM users
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\\')
           AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%' ESCAPE '\\')
           AND ($3::text IS NULL OR address ILIKE '%' || $3 || '%' ESCAPE '\\')
           AND ($4::text IS NULL OR role = $4)
         ORDER BY {order_by}"
    );
    sqlx::query_as(&sql)
        .bind(filter.name.as_deref().map(crate::db::escape_like))
        .bind(filter.email.as_deref().map(crate::db::escape_like))
        .bind(filter.address.as_deref().map(crate::db::escape_like))
        .bind(&filter.role)
        .fetch_all(pool)
        .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::StoreOwner, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("SUPERUSER".parse::<Role>().is_err());
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&Role::StoreOwner).unwrap(),
            "\"STORE_OWNER\""
        );
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
