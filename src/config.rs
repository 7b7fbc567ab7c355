use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::env;
use tracing::info;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            info!("BIND_ADDR not set, using default: {}", DEFAULT_BIND_ADDR);
            DEFAULT_BIND_ADDR.to_owned()
        });

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
