pub mod admin;
pub mod organization;
pub mod student;
pub mod vote;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

pub async fn new_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    new_pool_with(database_url.parse()?).await
}

pub async fn new_pool_with(connect_options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
}

/// Pool that only connects on first use. The HTTP tests rely on this to run
/// request validation paths without a live database.
pub fn new_lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(database_url.parse()?))
}
