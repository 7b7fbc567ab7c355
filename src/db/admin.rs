use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct AdminId(pub i32);

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct InternalAdmin {
    pub id: AdminId,
    pub username: String,
    pub hashed_password: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct InternalAdminSession {
    pub id: i32,
    pub admin_id: AdminId,
    pub token: String,
}

pub async fn by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<InternalAdmin>, sqlx::Error> {
    sqlx::query_as::<_, InternalAdmin>(
        "SELECT id, username, hashed_password FROM admin WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Inserts a fresh session with an opaque uuid token. Every login gets its
/// own row, so repeated logins by the same admin all stay valid.
pub async fn create_session(
    pool: &PgPool,
    admin_id: AdminId,
) -> Result<InternalAdminSession, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    debug!(admin_id = admin_id.0, "Creating admin session");
    sqlx::query_as::<_, InternalAdminSession>(
        "INSERT INTO admin_session (admin_id, token) VALUES ($1, $2) \
         RETURNING id, admin_id, token",
    )
    .bind(admin_id)
    .bind(token)
    .fetch_one(pool)
    .await
}

pub async fn session_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<InternalAdminSession>, sqlx::Error> {
    sqlx::query_as::<_, InternalAdminSession>(
        "SELECT id, admin_id, token FROM admin_session WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
