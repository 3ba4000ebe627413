/*
 * Responsibility
 * - Load settings from the environment (.env is honoured via dotenvy)
 * - Validate them once at startup (missing or invalid values abort the boot)
 * - Hand the auth-related subset to services as an explicit AuthConfig
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// `APP_ENV` wins; otherwise `PLATFORM=dev` is honoured, and anything else is
    /// treated as production so admin-only routes stay closed by default.
    pub fn from_env() -> Self {
        if let Ok(app_env) = env::var("APP_ENV") {
            return match app_env.to_ascii_lowercase().as_str() {
                "production" | "prod" => Self::Production,
                _ => Self::Development,
            };
        }

        match env::var("PLATFORM")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "dev" | "development" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings consumed by the session/refresh-token services.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("AuthConfig")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthConfig,

    // Pre-shared key for the Polka webhook (`Authorization: ApiKey <key>`)
    pub polka_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("auth", &self.auth)
            .finish()
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::Missing(key))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

// Ten years; anything longer is a typo.
const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

fn seconds_or(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    let seconds = match env::var(key) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key))?,
        Err(_) => default,
    };
    if seconds > MAX_TTL_SECONDS {
        return Err(ConfigError::Invalid(key));
    }
    Ok(seconds)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match env::var("PORT") {
            Ok(p) => p.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = required("DATABASE_URL")?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = required("JWT_SECRET")?;
        let access_token_ttl_seconds = seconds_or("ACCESS_TOKEN_TTL_SECONDS", 3_600)?; // 1 hour
        let refresh_token_ttl_seconds = seconds_or("REFRESH_TOKEN_TTL_SECONDS", 5_184_000)?; // 60 days

        let polka_key = required("POLKA_KEY")?;

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth: AuthConfig {
                jwt_secret,
                access_token_ttl_seconds,
                refresh_token_ttl_seconds,
            },
            polka_key,
        })
    }
}
