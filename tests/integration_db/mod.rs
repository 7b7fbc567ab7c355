use ballot_server::db;
use dotenv::dotenv;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Throwaway database with the crate's migrations applied, created from the
/// server named by DATABASE_URL. `try_new` answers `None` when no database
/// is reachable so the DB-backed tests skip instead of failing on machines
/// without PostgreSQL.
pub struct IntegrationTestDb {
    db_name: String,
    pool: PgPool,
    template_connect_options: PgConnectOptions,
}

impl IntegrationTestDb {
    pub async fn try_new() -> Option<Self> {
        dotenv().ok();
        let template_connect_options: PgConnectOptions =
            std::env::var("DATABASE_URL").ok()?.parse().ok()?;
        let template_pool = db::new_pool_with(template_connect_options.clone())
            .await
            .ok()?;

        let db_name = format!("integration_{}", Uuid::new_v4().simple());
        debug!(db = %db_name, "Creating test database");
        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&template_pool)
            .await
            .expect("create test database");

        let pool = db::new_pool_with(template_connect_options.clone().database(&db_name))
            .await
            .expect("connect to test database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("apply migrations to test database");

        Some(Self {
            db_name,
            pool,
            template_connect_options,
        })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        if let Ok(template_pool) = db::new_pool_with(self.template_connect_options.clone()).await {
            debug!(db = %self.db_name, "Dropping test database");
            let _ = sqlx::query(&format!("DROP DATABASE {}", self.db_name))
                .execute(&template_pool)
                .await;
        }
    }
}
