//! Process configuration, loaded once from the environment at startup.

use jsonwebtoken::Algorithm;
use thiserror::Error;

pub const DEFAULT_USERNAME: &str = "testuser";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
const DEFAULT_DATABASE_URL: &str = "sqlite://products.db?mode=rwc";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// The single credential the service accepts, plus the token signing setup.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password_hash: String,
    pub secret_key: Vec<u8>,
    pub algorithm: Algorithm,
    pub token_ttl: chrono::Duration,
}

impl AuthConfig {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        secret_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            secret_key: secret_key.into(),
            algorithm: Algorithm::HS256,
            token_ttl: chrono::Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_token_ttl(mut self, token_ttl: chrono::Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl Settings {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let secret_key = get("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        let password_hash =
            get("HASHED_PASSWORD").ok_or(ConfigError::Missing("HASHED_PASSWORD"))?;
        let username = get("AUTH_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let algorithm = match get("ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let ttl_minutes = match get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "ACCESS_TOKEN_EXPIRE_MINUTES",
                        reason: format!("expected a positive number of minutes, got {raw:?}"),
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("not a valid port number: {raw:?}"),
            })?,
            None => 8000,
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => assemble_database_url(&get)?,
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| "Product catalog API".to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            auth: AuthConfig::new(username, password_hash, secret_key.into_bytes())
                .with_algorithm(algorithm)
                .with_token_ttl(chrono::Duration::minutes(ttl_minutes)),
        })
    }
}

/// Only the HMAC family makes sense with a shared secret.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(ConfigError::Invalid {
            var: "ALGORITHM",
            reason: format!("unsupported algorithm {raw:?}, expected HS256, HS384 or HS512"),
        }),
    }
}

fn assemble_database_url<G>(get: &G) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(server) = get("DB_SERVER") else {
        return Ok(DEFAULT_DATABASE_URL.to_string());
    };
    let name = get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
    let user = get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
    let password = get("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?;
    let port = get("DB_PORT").unwrap_or_else(|| "5432".to_string());

    Ok(format!("postgres://{user}:{password}@{server}:{port}/{name}").replace(' ', "+"))
}
