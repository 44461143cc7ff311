use std::fmt;

use anyhow::Context;

const PLACEHOLDER_HOST: &str = "your_rds_endpoint_here";
const PLACEHOLDER_PASSWORD: &str = "your_db_password_here";

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// True while the shipped placeholder host or password are still in effect.
    pub fn uses_placeholders(&self) -> bool {
        self.host == PLACEHOLDER_HOST || self.password == PLACEHOLDER_PASSWORD
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let port = |key: &str, default: u16| -> anyhow::Result<u16> {
            match lookup(key) {
                Some(v) => v
                    .parse::<u16>()
                    .with_context(|| format!("{key} must be a port number, got {v:?}")),
                None => Ok(default),
            }
        };

        let db = DbConfig {
            host: var("DB_HOST", PLACEHOLDER_HOST),
            port: port("DB_PORT", 5432)?,
            database: var("DB_DATABASE", "gearshareios"),
            user: var("DB_USER", "admin"),
            password: var("DB_PASSWORD", PLACEHOLDER_PASSWORD),
        };

        Ok(Self {
            db,
            host: var("APP_HOST", "0.0.0.0"),
            port: port("APP_PORT", 8080)?,
        })
    }
}
