//! Authentication extractors
//!
//! Extracts and validates bearer tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use legal_core::{Role, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identified by a valid bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User id, or attorney id for attorney tokens
    pub id: Snowflake,
    pub role: Role,
}

impl AuthUser {
    pub fn new(id: Snowflake, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().decode_token(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            ApiError::App(e)
        })?;

        let id = claims.subject_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid subject in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(id, claims.role))
    }
}

/// Caller holding an Admin token
///
/// No token is a 401; a token for any other role is a 403.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    pub fn id(&self) -> Snowflake {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(caller_id = %user.id, role = %user.role, "Non-admin on admin route");
            return Err(ApiError::admin_only());
        }
        Ok(AdminUser(user))
    }
}

/// Caller holding a User token (client or admin)
///
/// Attorney tokens carry an attorney id, so they are refused with a 403
/// before the id reaches a user lookup.
#[derive(Debug, Clone, Copy)]
pub struct ClientUser(pub AuthUser);

impl ClientUser {
    pub fn id(&self) -> Snowflake {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == Role::Attorney {
            tracing::warn!(caller_id = %user.id, "Attorney on user route");
            return Err(ApiError::users_only());
        }
        Ok(ClientUser(user))
    }
}
