use super::organization::{OrganizationId, PairId};
use super::student::StudentId;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct VoteId(pub i32);

#[derive(Clone, PartialEq, Eq, Debug, sqlx::FromRow)]
pub struct InternalVote {
    pub id: VoteId,
    pub student_id: StudentId,
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
}

/// One entry of a ballot, as submitted by the voting page.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotEntry {
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
}

/// Aggregated per-pair counts straight from the database, joined with the
/// pair's image.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PairVoteCount {
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
    pub vote_count: i64,
    pub image_file_name: Option<String>,
}

pub async fn all(pool: &PgPool) -> Result<Vec<InternalVote>, sqlx::Error> {
    sqlx::query_as::<_, InternalVote>(
        "SELECT id, student_id, organization_id, pair_id FROM vote",
    )
    .fetch_all(pool)
    .await
}

pub async fn pair_counts(pool: &PgPool) -> Result<Vec<PairVoteCount>, sqlx::Error> {
    sqlx::query_as::<_, PairVoteCount>(
        "SELECT v.organization_id, v.pair_id, COUNT(*) AS vote_count, \
                (SELECT op.image_file_name FROM organization_pair op \
                 WHERE op.organization_id = v.organization_id AND op.pair_id = v.pair_id) \
                AS image_file_name \
         FROM vote v \
         GROUP BY v.organization_id, v.pair_id",
    )
    .fetch_all(pool)
    .await
}

pub async fn has_student_voted(pool: &PgPool, student_id: StudentId) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM vote WHERE student_id = $1)")
        .bind(student_id)
        .fetch_one(pool)
        .await
}

/// Inserts the whole ballot in one transaction. Returns `false` without
/// keeping any row if the student already has a vote for one of the
/// organizations; the unique constraint on (student_id, organization_id)
/// makes this safe against concurrent submissions.
pub async fn cast_ballot(
    pool: &PgPool,
    student_id: StudentId,
    entries: &[BallotEntry],
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for entry in entries {
        let inserted = sqlx::query(
            "INSERT INTO vote (student_id, organization_id, pair_id) VALUES ($1, $2, $3) \
             ON CONFLICT (student_id, organization_id) DO NOTHING",
        )
        .bind(student_id)
        .bind(entry.organization_id)
        .bind(entry.pair_id)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            // Dropping the transaction rolls back the earlier inserts.
            debug!(
                student_id = student_id.0,
                organization_id = entry.organization_id.0,
                "Rejecting duplicate ballot"
            );
            return Ok(false);
        }
    }

    tx.commit().await?;
    Ok(true)
}
