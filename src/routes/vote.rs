use crate::db;
use crate::db::student::StudentId;
use crate::db::vote::BallotEntry;
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashSet;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBody {
    pub student_id: StudentId,
    pub organization_pairs: Vec<BallotEntry>,
}

/// `POST /api/vote`. The whole ballot is inserted atomically; a second
/// ballot for an organization the student already voted in rejects the
/// submission without keeping any row. A ballot naming the same
/// organization twice is a malformed request, not a repeat vote.
pub async fn vote(
    pool: web::Data<PgPool>,
    body: web::Json<VoteBody>,
) -> Result<HttpResponse, ApiError> {
    let mut organizations = HashSet::new();
    for entry in &body.organization_pairs {
        if !organizations.insert(entry.organization_id) {
            return Err(ApiError::BadRequest(
                "Ballot lists an organization more than once".to_owned(),
            ));
        }
    }

    let accepted =
        db::vote::cast_ballot(&pool, body.student_id, &body.organization_pairs).await?;
    if !accepted {
        return Err(ApiError::AlreadyVoted);
    }
    Ok(HttpResponse::Ok().json(json!({})))
}
