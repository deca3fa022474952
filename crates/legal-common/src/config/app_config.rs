//! Application configuration
//!
//! Everything is read from environment variables, optionally seeded from a `.env` file.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
    pub oauth: OAuthConfig,
    /// Admin account ensured at startup, when configured
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations from `migrations_dir` on startup
    pub run_migrations: bool,
    pub migrations_dir: String,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub token_expiry: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Local storage for uploaded files
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: String,
    pub max_file_size_mb: u32,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

/// Client credentials for one OAuth provider
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

/// Social login providers; an unconfigured provider is `None`
#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    pub google: Option<OAuthClientConfig>,
    pub facebook: Option<OAuthClientConfig>,
    pub linkedin: Option<OAuthClientConfig>,
}

#[derive(Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// HS256 secrets shorter than this are rejected
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Upper bound imposed by the 10-bit worker field of Snowflake ids
const MAX_WORKER_ID: u16 = 1023;

fn default_app_name() -> String {
    "legal-marketplace".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_token_expiry() -> i64 {
    86_400 // 1 day
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u32 {
    5
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

/// Reads variables through a lookup function so tests can avoid the process environment
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
            })
            .transpose()
    }

    fn parsed_or<T: FromStr>(&self, key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
        Ok(self.parsed(key)?.unwrap_or_else(default))
    }

    fn oauth_client(&self, id: &str, secret: &str, redirect: &str) -> Option<OAuthClientConfig> {
        Some(OAuthClientConfig {
            client_id: self.get(id)?,
            client_secret: self.get(secret)?,
            redirect_uri: self.get(redirect)?,
        })
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let env = match vars.get("APP_ENV") {
            Some(raw) => raw
                .parse()
                .map_err(|()| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let secret = vars.required("JWT_SECRET")?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_JWT_SECRET_LEN} bytes"),
            ));
        }

        let worker_id = vars.parsed_or("WORKER_ID", || 0u16)?;
        if worker_id > MAX_WORKER_ID {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        let bootstrap_admin = match (vars.get("ADMIN_EMAIL"), vars.get("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdminConfig {
                email: email.trim().to_lowercase(),
                password,
                name: vars.get("ADMIN_NAME").unwrap_or_else(default_admin_name),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingVar("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::MissingVar("ADMIN_EMAIL")),
        };

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: vars.parsed_or("DATABASE_RUN_MIGRATIONS", || true)?,
                migrations_dir: vars.get("MIGRATIONS_DIR").unwrap_or_else(default_migrations_dir),
            },
            jwt: JwtConfig {
                secret,
                token_expiry: vars.parsed_or("JWT_TOKEN_EXPIRY", default_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parsed_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: vars.get("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                max_file_size_mb: vars.parsed_or("MAX_FILE_SIZE_MB", default_max_file_size)?,
            },
            snowflake: SnowflakeConfig { worker_id },
            oauth: OAuthConfig {
                google: vars.oauth_client("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET", "GOOGLE_REDIRECT_URI"),
                facebook: vars.oauth_client("FACEBOOK_APP_ID", "FACEBOOK_APP_SECRET", "FACEBOOK_REDIRECT_URI"),
                linkedin: vars.oauth_client(
                    "LINKEDIN_CLIENT_ID",
                    "LINKEDIN_CLIENT_SECRET",
                    "LINKEDIN_REDIRECT_URI",
                ),
            },
            bootstrap_admin,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let mut vars: HashMap<String, String> = [
            ("API_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/legal"),
            ("JWT_SECRET", SECRET),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        for (k, v) in pairs {
            vars.insert((*k).to_string(), (*v).to_string());
        }
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.app.name, "legal-marketplace");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert_eq!(config.jwt.token_expiry, 86_400);
        assert_eq!(config.storage.max_file_size_mb, 5);
        assert_eq!(config.storage.max_file_size_bytes(), 5 * 1024 * 1024);
        assert!(config.database.run_migrations);
        assert!(config.oauth.google.is_none());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_jwt_secret_is_required_and_long() {
        let err = AppConfig::from_lookup(|key| match key {
            "API_PORT" => Some("1".into()),
            "DATABASE_URL" => Some("postgres://x".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));

        let err = load(&[("JWT_SECRET", "short")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("JWT_SECRET", _)));
    }

    #[test]
    fn test_malformed_numbers_are_reported() {
        let err = load(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));

        let err = load(&[("WORKER_ID", "4096")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("WORKER_ID", _)));
    }

    #[test]
    fn test_oauth_provider_needs_all_three_values() {
        let config = load(&[
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("GOOGLE_REDIRECT_URI", "http://localhost/cb"),
            ("FACEBOOK_APP_ID", "only-id"),
        ])
        .unwrap();
        assert_eq!(config.oauth.google.unwrap().client_id, "id");
        assert!(config.oauth.facebook.is_none());
    }

    #[test]
    fn test_bootstrap_admin_pairs_email_and_password() {
        let config = load(&[("ADMIN_EMAIL", " Boss@Firm.com "), ("ADMIN_PASSWORD", "hunter22")]).unwrap();
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.email, "boss@firm.com");
        assert_eq!(admin.name, "Administrator");
        assert!(!format!("{admin:?}").contains("hunter22"));

        let err = load(&[("ADMIN_EMAIL", "boss@firm.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("ADMIN_PASSWORD")));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_development());
        assert!(load(&[("APP_ENV", "moon")]).is_err());
    }

    #[test]
    fn test_cors_origins_are_trimmed() {
        let config = load(&[("CORS_ALLOWED_ORIGINS", "http://a.com, http://b.com ,")]).unwrap();
        assert_eq!(config.cors.allowed_origins, vec!["http://a.com", "http://b.com"]);
    }
}
