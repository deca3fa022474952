//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BootstrapAdminConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, OAuthClientConfig, OAuthConfig, RateLimitConfig, ServerConfig,
    SnowflakeConfig, StorageConfig, MIN_JWT_SECRET_LEN,
};
