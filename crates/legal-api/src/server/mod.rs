//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use legal_common::{AppConfig, AppError, JwtService};
use legal_core::SnowflakeGenerator;
use legal_db::{
    create_pool, run_migrations, PgAdminRepository, PgAppointmentRepository, PgAttorneyRepository,
    PgConsultationRepository, PgFeedbackRepository, PgLabTestBookingRepository, PgLabTestRepository,
    PgLegalServiceRepository, PgPool, PgUserRepository, PoolConfig,
};
use legal_service::{AdminService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the Axum application with all routes and middleware, without rate limiting
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let router = create_router(config.storage.max_file_size_bytes())
        .merge(health_routes())
        .nest_service("/uploads", ServeDir::new(state.upload_dir()));

    apply_middleware(router, &config.cors, config.app.env.is_production()).with_state(state.clone())
}

/// Wire repositories and services over an existing pool
pub fn create_app_state_with_pool(pool: PgPool, config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .attorney_repo(Arc::new(PgAttorneyRepository::new(pool.clone())))
        .admin_repo(Arc::new(PgAdminRepository::new(pool.clone())))
        .legal_service_repo(Arc::new(PgLegalServiceRepository::new(pool.clone())))
        .appointment_repo(Arc::new(PgAppointmentRepository::new(pool.clone())))
        .feedback_repo(Arc::new(PgFeedbackRepository::new(pool.clone())))
        .lab_test_repo(Arc::new(PgLabTestRepository::new(pool.clone())))
        .lab_test_booking_repo(Arc::new(PgLabTestBookingRepository::new(pool.clone())))
        .consultation_repo(Arc::new(PgConsultationRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .http_client(reqwest::Client::new())
        .oauth(config.oauth.clone())
        .storage(config.storage.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Connect to PostgreSQL, apply migrations and build the AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..PoolConfig::new(config.database.url.clone())
    };
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        info!(dir = %config.database.migrations_dir, "Applying migrations...");
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    }

    create_app_state_with_pool(pool, config)
}

/// Seed the configured admin account, if any
async fn seed_admin(state: &AppState) -> Result<(), AppError> {
    match &state.config().bootstrap_admin {
        Some(admin) => AdminService::new(state.service_context())
            .ensure_bootstrap_admin(admin)
            .await
            .map_err(|e| AppError::Config(format!("Failed to seed admin account: {e}"))),
        None => {
            warn!("ADMIN_EMAIL not set; no admin account is seeded");
            Ok(())
        }
    }
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let rate_limit = config.rate_limit.clone();

    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .map_err(|e| AppError::Config(format!("Cannot create upload directory: {e}")))?;

    let state = create_app_state(config).await?;
    seed_admin(&state).await?;

    let app = apply_rate_limit(create_app(state), &rate_limit)?;

    run_server(app, &addr).await
}
