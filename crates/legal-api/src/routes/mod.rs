//! Route definitions
//!
//! Public and client routes live under `/api`, admin routes under `/api/admin`.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    admin_users, admins, appointments, attorneys, consultations, feedback, health, lab_tests, services,
    users,
};
use crate::state::AppState;

/// Room for the text fields that travel with an icon upload
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the API router; `upload_limit` bounds the icon upload bodies
pub fn create_router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/users", user_routes())
        .nest("/api/admin", admin_routes(upload_limit))
        .merge(client_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Accounts, social login and the client's own views
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/attorney-forgot-password", post(users::attorney_forgot_password))
        .route("/set-password", post(users::set_password))
        .route("/profile", get(users::get_profile).put(users::update_profile))
        .route("/dashboard", get(users::dashboard))
        .route("/appointments", get(users::appointments))
        .route("/auth/google", post(users::google_auth))
        .route("/auth/facebook", post(users::facebook_auth))
        .route("/auth/linkedin", post(users::linkedin_auth))
}

/// Catalogue and self-service routes outside `/api/users`
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/api/services", get(services::list_public))
        .route("/api/appointments", post(appointments::book))
        .route("/api/feedback", post(feedback::create))
        .route("/api/lab-tests", get(lab_tests::list))
        .route("/api/lab-tests/bookings", post(lab_tests::book))
        .route("/api/consultations", get(consultations::list_mine).post(consultations::open))
        .route(
            "/api/consultations/:id/messages",
            get(consultations::messages).post(consultations::post_message),
        )
}

fn admin_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        // Session and admin accounts
        .route("/login", post(admins::login))
        .route("/login-history", get(admins::login_history))
        .route("/dashboard", get(admins::dashboard))
        .route("/create", post(admins::create))
        .route("/list", get(admins::list))
        .route("/permissions/:id", put(admins::update_permissions))
        .route("/promote-to-admin", post(admins::promote_to_admin))
        .route("/:id", delete(admins::remove))
        // Users
        .route("/users", get(admin_users::list_active).post(admin_users::create))
        .route("/all-users", get(admin_users::list_all))
        .route("/users/:id", delete(admin_users::soft_delete))
        .route("/users/:id/restore", put(admin_users::restore))
        // Attorneys
        .route("/doctors", get(attorneys::list).post(attorneys::create))
        .route("/doctors/:id", put(attorneys::update).delete(attorneys::delete))
        // Appointments
        .route("/appointments", get(appointments::list).post(appointments::admin_book))
        .route("/appointments/:id", delete(appointments::delete))
        .route("/appointments/:id/status", put(appointments::update_status))
        .route("/mark-expired", post(appointments::mark_expired))
        // Feedback
        .route("/feedback", get(feedback::list))
        .route("/feedback/:id", delete(feedback::delete))
        .route("/feedback/:id/status", put(feedback::update_status))
        .route("/feedback/:id/respond", put(feedback::respond))
        // Lab tests
        .route("/lab-tests", get(lab_tests::admin_list).post(lab_tests::create))
        .route("/lab-tests/:id", put(lab_tests::update).delete(lab_tests::delete))
        .route("/lab-test-bookings", get(lab_tests::list_bookings))
        .route("/lab-test-bookings/:id", delete(lab_tests::delete_booking))
        .route("/lab-test-bookings/:id/status", put(lab_tests::update_booking_status))
        // Consultations
        .route("/consultations", get(consultations::list))
        .route("/consultations/:id/messages", get(consultations::admin_messages))
        .route("/consultations/:id/reply", post(consultations::reply))
        // Catalogue
        .merge(catalogue_routes(upload_limit))
}

/// Multipart catalogue routes carry their own body limit
fn catalogue_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", put(services::update).delete(services::delete))
        .layer(DefaultBodyLimit::max(upload_limit + MULTIPART_OVERHEAD))
}
