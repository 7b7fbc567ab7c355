use crate::auth;
use crate::db;
use crate::error::ApiError;
use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;

pub const SESSION_COOKIE: &str = "admin_session_token";

#[derive(Clone, Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// `POST /api/login`. Validates admin credentials and issues a fresh
/// session token in the `admin_session_token` cookie.
pub async fn login(
    pool: web::Data<PgPool>,
    body: web::Json<LoginBody>,
) -> Result<HttpResponse, ApiError> {
    let admin = db::admin::by_username(&pool, &body.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let requested = auth::hash_password(&body.password);
    if !auth::digests_match(&requested, &admin.hashed_password) {
        return Err(ApiError::InvalidCredentials);
    }

    let session = db::admin::create_session(&pool, admin.id).await?;
    info!(username = %admin.username, "Admin logged in");

    let cookie = Cookie::build(SESSION_COOKIE, session.token)
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "OK" })))
}
