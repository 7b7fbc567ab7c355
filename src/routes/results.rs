use crate::db;
use crate::db::organization::OrgNameCache;
use crate::error::ApiError;
use crate::tally::{self, PairResult};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::collections::BTreeMap;

/// `GET /api/admin/results`. Vote tallies grouped by formatted organization
/// name; the admin session middleware has already run by the time this is
/// called.
pub async fn results(
    pool: web::Data<PgPool>,
    org_names: web::Data<OrgNameCache>,
) -> Result<HttpResponse, ApiError> {
    let votes = db::vote::all(&pool).await?;
    let counts = db::vote::pair_counts(&pool).await?;
    let tallies = tally::voting_results(&votes, &counts);

    let mut payload: BTreeMap<String, Vec<PairResult>> = BTreeMap::new();
    for (organization_id, pair_results) in tallies {
        let name = org_names.formatted_name(&pool, organization_id).await?;
        payload.insert(name, pair_results);
    }

    Ok(HttpResponse::Ok().json(payload))
}
