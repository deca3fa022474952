//! Social login through Google, Facebook and LinkedIn
//!
//! Each provider follows the authorization-code flow: the browser hands us a
//! code, we exchange it for an access token, fetch the profile and sign the
//! matching user in (creating the account on first use).

use legal_common::{AppError, OAuthClientConfig};
use legal_core::{DomainError, OAuthProvider, User};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::dto::{OAuthCodeRequest, SocialAuthResponse, SocialUserResponse};

use super::auth::normalize_email;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const FACEBOOK_TOKEN_URL: &str = "https://graph.facebook.com/v18.0/oauth/access_token";
const FACEBOOK_PROFILE_URL: &str = "https://graph.facebook.com/v18.0/me";
const LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const LINKEDIN_USERINFO_URL: &str = "https://api.linkedin.com/v2/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    #[serde(default)]
    verified_email: bool,
}

#[derive(Debug, Deserialize)]
struct FacebookPictureData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FacebookPicture {
    data: Option<FacebookPictureData>,
}

#[derive(Debug, Deserialize)]
struct FacebookProfile {
    id: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<FacebookPicture>,
}

/// OpenID Connect userinfo document
#[derive(Debug, Deserialize)]
struct LinkedInUserInfo {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

/// Provider-neutral view of the fetched profile
#[derive(Debug, Clone, PartialEq, Eq)]
struct SocialProfile {
    provider: OAuthProvider,
    provider_id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUserInfo> for SocialProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider: OAuthProvider::Google,
            provider_id: info.id,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}

impl From<FacebookProfile> for SocialProfile {
    fn from(profile: FacebookProfile) -> Self {
        Self {
            provider: OAuthProvider::Facebook,
            provider_id: profile.id,
            email: profile.email,
            name: profile.name,
            picture: profile.picture.and_then(|p| p.data).and_then(|d| d.url),
        }
    }
}

impl From<LinkedInUserInfo> for SocialProfile {
    fn from(info: LinkedInUserInfo) -> Self {
        Self {
            provider: OAuthProvider::LinkedIn,
            provider_id: info.sub,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}

/// Name for a new account: the profile name, else the email's local part
fn display_name(name: Option<&str>, email: &str) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string())
}

fn required_code(request: OAuthCodeRequest) -> ServiceResult<String> {
    request
        .code
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ServiceError::bad_request("MISSING_CODE", "Authorization code is required"))
}

fn provider_error(provider: OAuthProvider, err: reqwest::Error) -> ServiceError {
    warn!(%provider, error = %err, "OAuth provider request failed");
    AppError::ExternalService(format!("{provider} authentication failed")).into()
}

/// Social login service
pub struct OAuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OAuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn client_config(&self, provider: OAuthProvider) -> ServiceResult<&OAuthClientConfig> {
        let oauth = self.ctx.oauth();
        let config = match provider {
            OAuthProvider::Google => oauth.google.as_ref(),
            OAuthProvider::Facebook => oauth.facebook.as_ref(),
            OAuthProvider::LinkedIn => oauth.linkedin.as_ref(),
        };
        config.ok_or_else(|| AppError::ExternalService(format!("{provider} login is not configured")).into())
    }

    #[instrument(skip(self, request))]
    pub async fn google(&self, request: OAuthCodeRequest) -> ServiceResult<SocialAuthResponse> {
        let code = required_code(request)?;
        let config = self.client_config(OAuthProvider::Google)?;
        let http = self.ctx.http_client();
        let fail = |e| provider_error(OAuthProvider::Google, e);

        let token: TokenResponse = http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("code", code.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        let access_token = token.access_token.ok_or_else(|| {
            ServiceError::bad_request("TOKEN_EXCHANGE_FAILED", "Failed to obtain access token from Google")
        })?;

        let info: GoogleUserInfo = http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        if !info.verified_email {
            return Err(ServiceError::bad_request(
                "EMAIL_NOT_VERIFIED",
                "Please verify your Google account email first",
            ));
        }

        self.sign_in(info.into()).await
    }

    #[instrument(skip(self, request))]
    pub async fn facebook(&self, request: OAuthCodeRequest) -> ServiceResult<SocialAuthResponse> {
        let code = required_code(request)?;
        let config = self.client_config(OAuthProvider::Facebook)?;
        let http = self.ctx.http_client();
        let fail = |e| provider_error(OAuthProvider::Facebook, e);

        let token: TokenResponse = http
            .get(FACEBOOK_TOKEN_URL)
            .query(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("code", code.as_str()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        let access_token = token.access_token.ok_or_else(|| {
            ServiceError::bad_request("TOKEN_EXCHANGE_FAILED", "Failed to obtain access token from Facebook")
        })?;

        let profile: FacebookProfile = http
            .get(FACEBOOK_PROFILE_URL)
            .query(&[("fields", "id,name,email,picture"), ("access_token", access_token.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        self.sign_in(profile.into()).await
    }

    #[instrument(skip(self, request))]
    pub async fn linkedin(&self, request: OAuthCodeRequest) -> ServiceResult<SocialAuthResponse> {
        let code = required_code(request)?;
        let config = self.client_config(OAuthProvider::LinkedIn)?;
        let http = self.ctx.http_client();
        let fail = |e| provider_error(OAuthProvider::LinkedIn, e);

        let token: TokenResponse = http
            .post(LINKEDIN_TOKEN_URL)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        let access_token = token.access_token.ok_or_else(|| {
            ServiceError::bad_request("TOKEN_EXCHANGE_FAILED", "Failed to obtain access token from LinkedIn")
        })?;

        let info: LinkedInUserInfo = http
            .get(LINKEDIN_USERINFO_URL)
            .bearer_auth(&access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        self.sign_in(info.into()).await
    }

    /// Find or create the user behind a provider profile and issue a token
    async fn sign_in(&self, profile: SocialProfile) -> ServiceResult<SocialAuthResponse> {
        let email = profile
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                ServiceError::bad_request("MISSING_EMAIL", "The provider did not share an email address")
            })?;

        let user = match self.ctx.user_repo().find_by_email(&email).await? {
            None => {
                let user = User::new_social(
                    self.ctx.generate_id(),
                    display_name(profile.name.as_deref(), &email),
                    email,
                    profile.provider,
                    profile.provider_id,
                    profile.picture,
                );
                self.ctx.user_repo().create(&user, None).await?;
                info!(user_id = %user.id, provider = %profile.provider, "Social account created");
                user
            }
            Some(mut user) => {
                if !user.is_active {
                    warn!(user_id = %user.id, "Social login refused: account deactivated");
                    return Err(DomainError::AccountDeactivated.into());
                }
                if Self::merge_profile(&mut user, profile) {
                    self.ctx.user_repo().update(&user).await?;
                    info!(user_id = %user.id, "Social profile linked to account");
                }
                user
            }
        };

        let token = self.ctx.jwt_service().issue(user.id, user.role)?;
        Ok(SocialAuthResponse {
            token,
            user: SocialUserResponse::from(&user),
        })
    }

    /// Fold a provider profile into an existing account; returns whether anything changed.
    ///
    /// Google keeps the account name and picture in sync. The other providers only
    /// link accounts that were not social yet.
    fn merge_profile(user: &mut User, profile: SocialProfile) -> bool {
        let mut changed = false;

        if !user.is_social_login {
            user.link_provider(profile.provider, profile.provider_id, profile.picture.clone());
            changed = true;
        }

        if profile.provider == OAuthProvider::Google {
            if user.profile_picture.is_none() && profile.picture.is_some() {
                user.profile_picture = profile.picture;
                changed = true;
            }
            if let Some(name) = profile.name.filter(|n| !n.trim().is_empty() && *n != user.name) {
                user.name = name;
                changed = true;
            }
        }

        changed
    }
}
