//! Session-based authentication.
//!
//! Sessions are opaque 64-character tokens handed out in an HttpOnly
//! cookie. Only the SHA-256 hash of a token is stored, so a leaked
//! database dump cannot be replayed against the API. Admin handlers
//! re-resolve the session on every request through [`AdminContext`].

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::db::models::Profile;
use crate::db::{self, repo};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL_DAYS: i64 = 7;

pub fn generate_session_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 64)
}

pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn session_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::days(SESSION_TTL_DAYS)
}

fn cookie_secure() -> bool {
    match std::env::var("COOKIE_SECURE") {
        Ok(value) => value == "true",
        Err(_) => {
            std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        }
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(cookie_secure());
    cookie
}

/// Cookie with matching attributes for `CookieJar::remove`.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(cookie_secure());
    cookie
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|_| AppError::Upstream("Password hashing failed"))?
        .map_err(|_| AppError::Upstream("Password hashing failed"))
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|_| AppError::Upstream("Password verification failed"))?
        .map_err(|_| AppError::Upstream("Password verification failed"))
}

/// Resolves the cookie in `jar` to a live profile, or nothing. Database
/// problems resolve to nothing as well, so callers on unauthenticated
/// paths never fail on a cold pool.
pub async fn resolve_session(jar: &CookieJar) -> Option<Profile> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    let pool = db::get_pool()?;
    let token_hash = hash_session_token(&token);
    repo::find_profile_by_session(&pool, &token_hash)
        .await
        .ok()
        .flatten()
}

/// Extractor for admin-only handlers. Pulls the session cookie, loads the
/// profile behind it and checks the role, returning the taxonomy errors
/// directly when any step fails.
pub struct AdminContext {
    pub profile: Profile,
    pub pool: Arc<PgPool>,
}

impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::NotAuthenticated)?;

        let pool = db::get_pool().ok_or(AppError::Unavailable)?;

        let token_hash = hash_session_token(&token);
        let profile = repo::find_profile_by_session(&pool, &token_hash)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        if profile.role != "admin" {
            return Err(AppError::NotAuthorized);
        }

        Ok(Self { profile, pool })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_is_64_alphanumeric() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

        let other = generate_session_token();
        assert_ne!(token, other);
    }

    #[test]
    fn test_token_hash_is_hex_sha256() {
        let hash = hash_session_token("some-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_session_token("some-token"));
        assert_ne!(hash, hash_session_token("other-token"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[tokio::test]
    async fn test_password_verify_roundtrip() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        assert!(verify_password("correct horse".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong horse".to_string(), hash)
            .await
            .unwrap());
    }

    #[test]
    fn test_session_expiry_is_in_the_future() {
        let expiry = session_expiry();
        assert!(expiry > Utc::now() + Duration::days(6));
        assert!(expiry < Utc::now() + Duration::days(8));
    }
}
