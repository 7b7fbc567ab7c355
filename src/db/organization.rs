use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct OrganizationId(pub i32);

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct PairId(pub i32);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "member_position", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Chairman,
    ViceChairman,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct InternalOrganization {
    pub id: OrganizationId,
    pub name: String,
    pub full_name: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct InternalMember {
    pub id: i32,
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
    pub nickname: String,
    pub full_name: Option<String>,
    pub position: Position,
    pub image_file_name: Option<String>,
}

pub async fn by_id(
    pool: &PgPool,
    id: OrganizationId,
) -> Result<InternalOrganization, sqlx::Error> {
    sqlx::query_as::<_, InternalOrganization>(
        "SELECT id, name, full_name FROM organization WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn all_members(pool: &PgPool) -> Result<Vec<InternalMember>, sqlx::Error> {
    sqlx::query_as::<_, InternalMember>(
        "SELECT id, organization_id, pair_id, nickname, full_name, \"position\", image_file_name \
         FROM organization_member",
    )
    .fetch_all(pool)
    .await
}

/// Display name used as the grouping key in the members and results
/// payloads. The client renders it as HTML, hence the `<br>`.
pub fn format_name(organization: &InternalOrganization) -> String {
    format!("{}<br>({})", organization.full_name, organization.name)
}

/// Unbounded memo of formatted organization names. Organizations are seeded
/// once per election, so entries never need to be invalidated.
#[derive(Default)]
pub struct OrgNameCache {
    names: Mutex<HashMap<OrganizationId, String>>,
}

impl OrgNameCache {
    pub async fn formatted_name(
        &self,
        pool: &PgPool,
        id: OrganizationId,
    ) -> Result<String, sqlx::Error> {
        if let Some(name) = self.names.lock().await.get(&id) {
            return Ok(name.clone());
        }

        let organization = by_id(pool, id).await?;
        let name = format_name(&organization);
        debug!(organization_id = id.0, name = %name, "Caching organization name");
        self.names.lock().await.insert(id, name.clone());
        Ok(name)
    }
}
