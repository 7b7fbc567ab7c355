use actix_web::{web, App, HttpServer};
use ballot_server::config::Config;
use ballot_server::db::{self, organization::OrgNameCache};
use ballot_server::{log, server};
use color_eyre::Result;
use dotenv::dotenv;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    color_eyre::install()?;
    log::init();

    let config = Config::from_env()?;
    let pool = db::new_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    info!(addr = %config.bind_addr, "Starting HTTP server");

    let pool = web::Data::new(pool);
    let org_names = web::Data::new(OrgNameCache::default());

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(org_names.clone())
            .configure(server::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
