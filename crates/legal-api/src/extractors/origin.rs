//! Client origin extractor
//!
//! Collects the caller's address and user agent for the admin login history.

use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use legal_service::LoginOrigin;

/// Where a request came from; never rejects
#[derive(Debug, Clone, Default)]
pub struct ClientOrigin(pub LoginOrigin);

/// First hop of `X-Forwarded-For`, if a proxy set one
fn forwarded_for(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientOrigin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip_address = forwarded_for(parts).or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        Ok(ClientOrigin(LoginOrigin { ip_address, user_agent }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn origin(request: Request<()>) -> LoginOrigin {
        let (mut parts, ()) = request.into_parts();
        let ClientOrigin(origin) = ClientOrigin::from_request_parts(&mut parts, &()).await.unwrap();
        origin
    }

    #[tokio::test]
    async fn test_forwarded_header_wins() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header(header::USER_AGENT, "curl/8.0")
            .body(())
            .unwrap();

        let origin = origin(request).await;
        assert_eq!(origin.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(origin.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[tokio::test]
    async fn test_falls_back_to_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 4], 5000))));

        let origin = origin(request).await;
        assert_eq!(origin.ip_address.as_deref(), Some("192.0.2.4"));
        assert!(origin.user_agent.is_none());
    }
}
