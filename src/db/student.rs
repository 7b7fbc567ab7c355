use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct StudentId(pub i32);

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct InternalStudent {
    pub id: StudentId,
    pub hashed_password: String,
}

pub async fn by_id(pool: &PgPool, id: StudentId) -> Result<Option<InternalStudent>, sqlx::Error> {
    sqlx::query_as::<_, InternalStudent>("SELECT id, hashed_password FROM student WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
