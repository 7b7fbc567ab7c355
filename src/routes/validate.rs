use crate::auth;
use crate::db;
use crate::db::student::StudentId;
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordQuery {
    pub student_id: StudentId,
    pub password: String,
}

/// `GET /api/validate_password?studentId=&password=`. An unknown student id
/// reports invalid rather than erroring.
pub async fn validate_password(
    pool: web::Data<PgPool>,
    query: web::Query<PasswordQuery>,
) -> Result<HttpResponse, ApiError> {
    let is_valid = match db::student::by_id(&pool, query.student_id).await? {
        Some(student) => auth::digests_match(
            &auth::hash_password(&query.password),
            &student.hashed_password,
        ),
        None => false,
    };

    Ok(HttpResponse::Ok().json(json!({ "isValid": is_valid })))
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    pub student_id: StudentId,
}

/// `GET /api/validate_student?studentId=`. Reports whether the student has
/// already cast a vote.
pub async fn validate_student(
    pool: web::Data<PgPool>,
    query: web::Query<StudentQuery>,
) -> Result<HttpResponse, ApiError> {
    let has_voted = db::vote::has_student_voted(&pool, query.student_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "hasVoted": has_voted })))
}
