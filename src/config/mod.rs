use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_expiration_secs: u64,
    pub remember_expiration_secs: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let session_expiration = env::var("SESSION_EXPIRATION")
            .unwrap_or_else(|_| "12".into())
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(12);
        let remember_expiration = env::var("REMEMBER_EXPIRATION")
            .unwrap_or_else(|_| "720".into())
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(720);
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            session_secret: env::var("SESSION_SECRET")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            session_expiration_secs: session_expiration * 3600,
            remember_expiration_secs: remember_expiration * 3600,
        })
    }

    pub fn session_expiration(&self) -> Duration {
        Duration::from_secs(self.session_expiration_secs)
    }

    pub fn remember_expiration(&self) -> Duration {
        Duration::from_secs(self.remember_expiration_secs)
    }
}
