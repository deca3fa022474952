//! Service context - dependency container for services
//!
//! Holds all repositories, the outbound HTTP client and the settings services need.

use std::sync::Arc;

use legal_common::{JwtService, OAuthConfig, StorageConfig};
use legal_core::traits::{
    AdminRepository, AppointmentRepository, AttorneyRepository, ConsultationRepository,
    FeedbackRepository, LabTestBookingRepository, LabTestRepository, LegalServiceRepository,
    UserRepository,
};
use legal_core::{DomainError, Snowflake, SnowflakeGenerator, User};
use legal_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - The shared `reqwest` client used for OAuth provider calls
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    attorney_repo: Arc<dyn AttorneyRepository>,
    admin_repo: Arc<dyn AdminRepository>,
    legal_service_repo: Arc<dyn LegalServiceRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    lab_test_repo: Arc<dyn LabTestRepository>,
    lab_test_booking_repo: Arc<dyn LabTestBookingRepository>,
    consultation_repo: Arc<dyn ConsultationRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    http_client: reqwest::Client,

    // Settings
    oauth: Arc<OAuthConfig>,
    storage: Arc<StorageConfig>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query, used by the readiness probe
    pub async fn ping_database(&self) -> ServiceResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| ServiceError::internal(e.to_string()))
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn attorney_repo(&self) -> &dyn AttorneyRepository {
        self.attorney_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    pub fn legal_service_repo(&self) -> &dyn LegalServiceRepository {
        self.legal_service_repo.as_ref()
    }

    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    pub fn feedback_repo(&self) -> &dyn FeedbackRepository {
        self.feedback_repo.as_ref()
    }

    pub fn lab_test_repo(&self) -> &dyn LabTestRepository {
        self.lab_test_repo.as_ref()
    }

    pub fn lab_test_booking_repo(&self) -> &dyn LabTestBookingRepository {
        self.lab_test_booking_repo.as_ref()
    }

    pub fn consultation_repo(&self) -> &dyn ConsultationRepository {
        self.consultation_repo.as_ref()
    }

    /// The User behind a self-service call; missing is 404, deactivated is 403
    pub async fn active_user(&self, id: Snowflake) -> ServiceResult<User> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))?;
        if !user.is_active {
            return Err(DomainError::AccountDeactivated.into());
        }
        Ok(user)
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    // === Settings ===

    pub fn oauth(&self) -> &OAuthConfig {
        &self.oauth
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("oauth", &self.oauth)
            .field("storage", &self.storage)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    attorney_repo: Option<Arc<dyn AttorneyRepository>>,
    admin_repo: Option<Arc<dyn AdminRepository>>,
    legal_service_repo: Option<Arc<dyn LegalServiceRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    feedback_repo: Option<Arc<dyn FeedbackRepository>>,
    lab_test_repo: Option<Arc<dyn LabTestRepository>>,
    lab_test_booking_repo: Option<Arc<dyn LabTestBookingRepository>>,
    consultation_repo: Option<Arc<dyn ConsultationRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    http_client: Option<reqwest::Client>,
    oauth: Option<OAuthConfig>,
    storage: Option<StorageConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn attorney_repo(mut self, repo: Arc<dyn AttorneyRepository>) -> Self {
        self.attorney_repo = Some(repo);
        self
    }

    pub fn admin_repo(mut self, repo: Arc<dyn AdminRepository>) -> Self {
        self.admin_repo = Some(repo);
        self
    }

    pub fn legal_service_repo(mut self, repo: Arc<dyn LegalServiceRepository>) -> Self {
        self.legal_service_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn feedback_repo(mut self, repo: Arc<dyn FeedbackRepository>) -> Self {
        self.feedback_repo = Some(repo);
        self
    }

    pub fn lab_test_repo(mut self, repo: Arc<dyn LabTestRepository>) -> Self {
        self.lab_test_repo = Some(repo);
        self
    }

    pub fn lab_test_booking_repo(mut self, repo: Arc<dyn LabTestBookingRepository>) -> Self {
        self.lab_test_booking_repo = Some(repo);
        self
    }

    pub fn consultation_repo(mut self, repo: Arc<dyn ConsultationRepository>) -> Self {
        self.consultation_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Defaults to a fresh client when not set
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn oauth(mut self, oauth: OAuthConfig) -> Self {
        self.oauth = Some(oauth);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            user_repo: self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            attorney_repo: self
                .attorney_repo
                .ok_or_else(|| ServiceError::validation("attorney_repo is required"))?,
            admin_repo: self.admin_repo.ok_or_else(|| ServiceError::validation("admin_repo is required"))?,
            legal_service_repo: self
                .legal_service_repo
                .ok_or_else(|| ServiceError::validation("legal_service_repo is required"))?,
            appointment_repo: self
                .appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            feedback_repo: self
                .feedback_repo
                .ok_or_else(|| ServiceError::validation("feedback_repo is required"))?,
            lab_test_repo: self
                .lab_test_repo
                .ok_or_else(|| ServiceError::validation("lab_test_repo is required"))?,
            lab_test_booking_repo: self
                .lab_test_booking_repo
                .ok_or_else(|| ServiceError::validation("lab_test_booking_repo is required"))?,
            consultation_repo: self
                .consultation_repo
                .ok_or_else(|| ServiceError::validation("consultation_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            http_client: self.http_client.unwrap_or_default(),
            oauth: Arc::new(self.oauth.unwrap_or_default()),
            storage: Arc::new(
                self.storage
                    .ok_or_else(|| ServiceError::validation("storage is required"))?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reports_first_missing_dependency() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert_eq!(err.to_string(), "pool is required");
    }
}
