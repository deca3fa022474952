//! Test helpers for integration tests
//!
//! Spawns a server per test, wraps the HTTP verbs the API uses and
//! asserts on status codes and bodies.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use legal_api::{create_app, create_app_state, AppState};
use legal_common::AppConfig;
use legal_service::AdminService;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Admin account seeded for every test server
pub const TEST_ADMIN_EMAIL: &str = "integration-admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "IntegrationAdmin123!";

const FALLBACK_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Shared with the running app, for setups no endpoint offers
    pub state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a seeded admin
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        seed_admin(&state).await?;

        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::with_token(self.client.post(self.url(path)), Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::with_token(self.client.put(self.url(path)), Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn post_multipart_auth(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Log in as the seeded admin and return the token
    pub async fn admin_token(&self) -> Result<String> {
        let response = self
            .post(
                "/api/admin/login",
                &json!({ "email": TEST_ADMIN_EMAIL, "password": TEST_ADMIN_PASSWORD }),
            )
            .await?;
        let body: Value = assert_json(response, StatusCode::OK).await?;
        token_of(&body)
    }
}

/// Seeding races between concurrently starting servers; the loser retries
/// and finds the account in place.
async fn seed_admin(state: &AppState) -> Result<()> {
    let Some(admin) = state.config().bootstrap_admin.clone() else {
        return Ok(());
    };
    let service = AdminService::new(state.service_context());
    if service.ensure_bootstrap_admin(&admin).await.is_err() {
        service
            .ensure_bootstrap_admin(&admin)
            .await
            .context("seeding the test admin")?;
    }
    Ok(())
}

/// Configuration from the environment, with test defaults for what is unset
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let migrations_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");
    let upload_dir = env::temp_dir().join("legal-integration-uploads");

    AppConfig::from_lookup(|key| {
        env::var(key).ok().or_else(|| {
            let fallback = match key {
                "API_PORT" => "0".to_string(),
                "JWT_SECRET" => FALLBACK_JWT_SECRET.to_string(),
                "MIGRATIONS_DIR" => migrations_dir.to_string(),
                "UPLOAD_DIR" => upload_dir.display().to_string(),
                "ADMIN_EMAIL" => TEST_ADMIN_EMAIL.to_string(),
                "ADMIN_PASSWORD" => TEST_ADMIN_PASSWORD.to_string(),
                _ => return None,
            };
            Some(fallback)
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Pull `token` out of a login or registration body
pub fn token_of(body: &Value) -> Result<String> {
    body["token"]
        .as_str()
        .map(String::from)
        .context("response has no token")
}

/// Pull the string id at `pointer`, e.g. `/user/id`
pub fn id_at(body: &Value, pointer: &str) -> Result<String> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(String::from)
        .with_context(|| format!("no id at {pointer} in {body}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error status and return the `error` object
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<Value> {
    let body: Value = assert_json(response, expected_status).await?;
    Ok(body["error"].clone())
}
