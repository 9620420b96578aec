/**
 * Authentication Routes
 * Cookie-session login, logout, current profile, and first-run registration
 */
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::db::models::ProfileSummary;
use crate::db::{self, repo};
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::validation::{self, LoginPayload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub profile: ProfileSummary,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub profile: ProfileSummary,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// POST /auth/login
/// Verifies credentials and opens a session. Unknown email and wrong
/// password fail identically so the response does not leak which one it was.
pub async fn login(
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_login(&payload)?;

    let pool = db::get_pool().ok_or(AppError::Unavailable)?;

    let Some(profile) = repo::find_profile_by_email(&pool, &payload.email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(AppError::NotAuthenticated);
    };

    let password_ok =
        auth::verify_password(payload.password, profile.password_hash.clone()).await?;
    if !password_ok {
        tracing::warn!("Failed login attempt for: {}", profile.email);
        return Err(AppError::NotAuthenticated);
    }

    let token = auth::generate_session_token();
    let token_hash = auth::hash_session_token(&token);
    repo::insert_session(&pool, profile.id, &token_hash, auth::session_expiry()).await?;

    tracing::info!("Successful login for: {}", profile.email);

    let jar = jar.add(auth::session_cookie(token));
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            profile: ProfileSummary::from(&profile),
        }),
    ))
}

/// POST /auth/logout
/// Revokes the session behind the cookie, best effort. Always succeeds,
/// even with no session attached.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(auth::SESSION_COOKIE) {
        let token_hash = auth::hash_session_token(cookie.value());
        if let Some(pool) = db::get_pool() {
            let _ = repo::revoke_session(&pool, &token_hash).await;
        }
    }

    let jar = jar.remove(auth::removal_cookie());
    (jar, SuccessResponse::ok())
}

/// GET /auth/me
pub async fn me(jar: CookieJar) -> Result<Json<MeResponse>, AppError> {
    let profile = auth::resolve_session(&jar)
        .await
        .ok_or(AppError::NotAuthenticated)?;
    Ok(Json(MeResponse {
        profile: ProfileSummary::from(&profile),
    }))
}

/// POST /auth/register
/// First-run setup: creates the admin account while no profile exists.
/// Once one does, registration is closed for good.
pub async fn register(
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !validation::is_valid_email(&payload.email) {
        return Err(AppError::validation("email", "Invalid email address"));
    }
    if payload.password.chars().count() < 8 {
        return Err(AppError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }

    let pool = db::get_pool().ok_or(AppError::Unavailable)?;

    if repo::count_profiles(&pool).await? > 0 {
        return Err(AppError::NotAuthorized);
    }

    let password_hash = auth::hash_password(payload.password).await?;
    let profile = repo::insert_profile(
        &pool,
        &payload.email,
        &password_hash,
        payload.full_name.as_deref(),
    )
    .await?;

    tracing::info!("Admin profile registered: {}", profile.email);

    Ok((
        StatusCode::CREATED,
        Json(MeResponse {
            profile: ProfileSummary::from(&profile),
        }),
    ))
}
