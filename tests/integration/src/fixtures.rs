//! Test fixtures and data generators
//!
//! Request bodies with unique data, plus the multi-step setups most tests
//! share (a registered client, an attorney profile).

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use legal_core::{OAuthProvider, User, UserRepository};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

use crate::helpers::{assert_json, id_at, token_of, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique across the test binary and across runs against the same database
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", Utc::now().timestamp_micros())
}

/// A date `days` from today; negative values are in the past
pub fn day_offset(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// Client registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Client {suffix}"),
            email: format!("client{suffix}@example.com"),
            password: "ClientPass123!".to_string(),
        }
    }

    pub fn login(&self) -> Value {
        json!({ "email": self.email, "password": self.password })
    }
}

/// A registered client with its token
#[derive(Debug, Clone)]
pub struct TestClient {
    pub id: String,
    pub token: String,
    pub registration: RegisterRequest,
}

/// Register a fresh client through the public endpoint
pub async fn register_client(server: &TestServer) -> Result<TestClient> {
    let registration = RegisterRequest::unique();
    let response = server.post("/api/users/register", &registration).await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;

    Ok(TestClient {
        id: id_at(&body, "/user/id")?,
        token: token_of(&body)?,
        registration,
    })
}

/// A self-registered attorney account
#[derive(Debug, Clone)]
pub struct TestAttorney {
    pub id: String,
    pub token: String,
    pub email: String,
}

/// Register through the public endpoint with the Attorney role
pub async fn register_attorney(server: &TestServer) -> Result<TestAttorney> {
    let suffix = unique_suffix();
    let email = format!("attorney{suffix}@example.com");
    let response = server
        .post(
            "/api/users/register",
            &json!({
                "name": format!("Attorney {suffix}"),
                "email": email,
                "password": "AttorneyPass123!",
                "role": "Attorney",
            }),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;

    Ok(TestAttorney {
        id: id_at(&body, "/attorney/id")?,
        token: token_of(&body)?,
        email,
    })
}

/// Google sign-in account without a password, written straight to the store
pub async fn insert_google_user(server: &TestServer, email: &str) -> Result<User> {
    let ctx = server.state.service_context();
    let user = User::new_social(
        ctx.generate_id(),
        "Google Client".to_string(),
        email.to_string(),
        OAuthProvider::Google,
        format!("google-{}", unique_suffix()),
        None,
    );
    ctx.user_repo()
        .create(&user, None)
        .await
        .map_err(|e| anyhow::anyhow!("inserting Google user: {e}"))?;
    Ok(user)
}

/// Multipart catalogue form; `icon` is `(file name, content type, bytes)`
pub fn service_form(name: &str, icon: Option<(&str, &str, Vec<u8>)>) -> Result<Form> {
    let mut form = Form::new()
        .text("service_name", name.to_string())
        .text("description", "Drafting and review")
        .text("category", "Legal Service")
        .text("price", "120");
    if let Some((file_name, content_type, bytes)) = icon {
        let part = Part::bytes(bytes).file_name(file_name.to_string()).mime_str(content_type)?;
        form = form.part("iconFile", part);
    }
    Ok(form)
}

/// A tiny PNG signature, enough for an icon upload
pub fn png_icon() -> Option<(&'static str, &'static str, Vec<u8>)> {
    Some(("scales.png", "image/png", vec![137, 80, 78, 71, 13, 10, 26, 10]))
}

/// Admin-created user; returns its id
pub async fn create_user(server: &TestServer, admin_token: &str) -> Result<String> {
    let suffix = unique_suffix();
    let response = server
        .post_auth(
            "/api/admin/users",
            admin_token,
            &json!({
                "name": format!("User {suffix}"),
                "email": format!("user{suffix}@example.com"),
                "password": "UserPass123!",
            }),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    id_at(&body, "/user/id")
}

/// Attorney profile body for `user_id`
pub fn attorney_body(user_id: &str) -> Value {
    json!({
        "userId": user_id,
        "specialization": "Family Law",
        "qualification": "JD",
        "experience": 7,
        "fees": 150.0,
        "barNumber": "BAR-1234",
    })
}

/// Create a user and an attorney profile for it; returns the attorney id
pub async fn create_attorney(server: &TestServer, admin_token: &str) -> Result<String> {
    let user_id = create_user(server, admin_token).await?;
    let response = server
        .post_auth("/api/admin/doctors", admin_token, &attorney_body(&user_id))
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    id_at(&body, "/attorney/id")
}

/// Admin booking body
pub fn admin_booking(user_id: &str, attorney_id: &str, date: NaiveDate, time: &str, status: Option<&str>) -> Value {
    let mut body = json!({
        "user_id": user_id,
        "doctor_id": attorney_id,
        "date": date,
        "time": time,
    });
    if let Some(status) = status {
        body["status"] = json!(status);
    }
    body
}

/// Lab test with a unique name; returns its id
pub async fn create_lab_test(server: &TestServer, admin_token: &str) -> Result<String> {
    let response = server
        .post_auth(
            "/api/admin/lab-tests",
            admin_token,
            &json!({
                "test_name": format!("Title search {}", unique_suffix()),
                "description": "County records lookup",
                "price": 80.0,
            }),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    id_at(&body, "/labTest/id")
}
