use crate::db;
use crate::db::organization::{InternalMember, OrgNameCache, OrganizationId, PairId, Position};
use crate::error::ApiError;
use crate::tally;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
    pub nickname: String,
    pub full_name: Option<String>,
    pub position: Position,
    pub image_file_name: Option<String>,
}

impl From<InternalMember> for Member {
    fn from(member: InternalMember) -> Self {
        Self {
            id: member.id,
            organization_id: member.organization_id,
            pair_id: member.pair_id,
            nickname: member.nickname,
            full_name: member.full_name,
            position: member.position,
            image_file_name: member.image_file_name,
        }
    }
}

/// `GET /api/members`. Members grouped by formatted organization name, then
/// by pair id.
pub async fn members(
    pool: web::Data<PgPool>,
    org_names: web::Data<OrgNameCache>,
) -> Result<HttpResponse, ApiError> {
    let rows = db::organization::all_members(&pool).await?;
    let grouped = tally::group_members(rows);

    let mut payload: BTreeMap<String, BTreeMap<PairId, Vec<Member>>> = BTreeMap::new();
    for (organization_id, pairs) in grouped {
        let name = org_names.formatted_name(&pool, organization_id).await?;
        let pairs = pairs
            .into_iter()
            .map(|(pair_id, members)| {
                (pair_id, members.into_iter().map(Member::from).collect())
            })
            .collect();
        payload.insert(name, pairs);
    }

    Ok(HttpResponse::Ok().json(payload))
}
