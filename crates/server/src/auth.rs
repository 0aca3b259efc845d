//! Resolves the calling principal from the session token.
//!
//! Tokens are issued by the external identity provider; this service only
//! verifies them. A missing or invalid token yields no principal, never an
//! error response, so the vehicle workflows decide what "unauthenticated" means.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::warn;

use service::Principal;

use crate::state::AppState;

#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Principal>;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// HS256 verification of `Authorization: Bearer <token>`, falling back to the session cookie.
pub struct JwtPrincipalResolver {
    key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl JwtPrincipalResolver {
    pub fn new(secret: &str, issuer: Option<&str>, cookie_name: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation, cookie_name: cookie_name.into() }
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(&cfg.jwt_secret, cfg.issuer.as_deref(), cfg.cookie_name.clone())
    }

    fn token(&self, headers: &HeaderMap) -> Option<String> {
        if let Some(raw) = headers.get(header::AUTHORIZATION) {
            let value = raw.to_str().ok()?;
            return match value.strip_prefix("Bearer ") {
                Some(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
                _ => {
                    warn!("invalid Authorization format (expect Bearer)");
                    None
                }
            };
        }
        CookieJar::from_headers(headers)
            .get(&self.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl PrincipalResolver for JwtPrincipalResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        let token = self.token(headers)?;
        match decode::<Claims>(&token, &self.key, &self.validation) {
            Ok(data) if !data.claims.sub.trim().is_empty() => Some(Principal::new(data.claims.sub)),
            Ok(_) => {
                warn!("token has empty subject");
                None
            }
            Err(e) => {
                warn!(err = %e, "token validation failed");
                None
            }
        }
    }
}

/// The resolved principal of the current request, if any.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(CurrentPrincipal(state.principals.resolve(&parts.headers).await))
    }
}
