pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod log;
pub mod routes;
pub mod server;
pub mod tally;
