use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub(crate) fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

pub(crate) fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn parsed<T: std::str::FromStr>(
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct MonobankConfig {
    pub token: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub run_migrations: bool,
    /// Externally reachable origin of this API, used for file URLs and the payment webhook.
    pub public_base_url: String,
    /// Frontend origin, used for the payment redirect.
    pub client_url: String,
    pub upload_dir: PathBuf,
    pub monobank: MonobankConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = or_default("HOST", "0.0.0.0");
        let port = parsed::<u16>("PORT", "5000")?;

        let db_max_connections = parsed::<u32>("DB_MAX_CONNECTIONS", "20")?;
        let db_min_connections = parsed::<u32>("DB_MIN_CONNECTIONS", "2")?;
        if db_min_connections > db_max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                reason: "must not exceed DB_MAX_CONNECTIONS".to_string(),
            });
        }

        let public_base_url = or_default("PUBLIC_BASE_URL", &format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();
        let client_url = or_default("CLIENT_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host,
            port,
            database_url: required("DATABASE_URL")?,
            db_max_connections,
            db_min_connections,
            run_migrations: parsed::<bool>("RUN_MIGRATIONS", "false")?,
            public_base_url,
            client_url,
            upload_dir: PathBuf::from(or_default("UPLOAD_DIR", "uploads")),
            monobank: MonobankConfig {
                token: required("MONOBANK_TOKEN")?,
                api_url: or_default("MONOBANK_API_URL", "https://api.monobank.ua")
                    .trim_end_matches('/')
                    .to_string(),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads `.env.{RUST_ENV}` when present, otherwise `.env`.
pub fn load_env_files() -> String {
    let env_name = or_default("RUST_ENV", "development");
    let env_file = format!(".env.{}", env_name);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
    env_name
}
