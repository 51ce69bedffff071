use config::Config;
use sqlx::PgPool;

pub mod config;
pub mod error;
pub mod export;
pub mod middleware;
pub mod stats;
pub mod utils;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
