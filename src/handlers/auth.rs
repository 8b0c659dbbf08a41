use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::time::Duration;
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use chrono::Utc;

use crate::{
    error::{AppError, Result},
    models::session::Session,
    repositories::admin as admin_repo,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
};

use redis::AsyncCommands;

/// The request payload for admin login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// Creates a secure cookie with the given name, value, and max age.
fn create_secure_cookie(name: String, value: String, max_age_days: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.clone(), value);

    let is_production = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "development".to_string()) == "production";

    // The CSRF cookie must stay readable by the SPA for the double-submit
    // header; the session cookie never is.
    if name != "csrf_token" {
        cookie.set_http_only(true);
    }

    if is_production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    let duration_secs = max_age_days * 86400;
    cookie.set_max_age(Duration::seconds(duration_secs));
    cookie.set_path("/");

    cookie
}

/// Handles admin login.
#[axum::debug_handler]
pub async fn login(
    State(mut state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", payload.email);
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let admin = auth_service::authenticate_admin(
        &state.db,
        &payload.email,
        &payload.password,
    )
    .await?;

    let session_id = Uuid::new_v4();
    tracing::debug!("🔑 Generated session_id: {}", session_id);

    let session = Session {
        admin_id: admin.id,
        created_at: Utc::now(),
        expires_at: Utc::now() + chrono::Duration::days(state.config.session_duration_days),
    };

    let session_json = sonic_rs::to_string(&session)
        .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

    let expiration_seconds: u64 = (state.config.session_duration_days * 86400) as u64;
    let _: () = state
        .redis
        .set_ex(
            format!("session:{}", session_id),
            &session_json,
            expiration_seconds,
        )
        .await
        .map_err(|e| {
            tracing::error!("❌ Redis set_ex failed: {}", e);
            AppError::Redis(e)
        })?;

    tracing::info!("✅ Session saved to Redis: session:{}", session_id);

    let session_cookie = create_secure_cookie(
        "session_id".to_string(),
        session_id.to_string(),
        state.config.session_duration_days,
    );
    cookies.add(session_cookie);

    // The CSRF token must outlive every request of the session, so it
    // shares the session's TTL.
    let csrf_token = crate::crypto::csrf::generate_csrf_token()?;
    let _: () = state
        .redis
        .set_ex(format!("csrf:{}", csrf_token), "valid", expiration_seconds)
        .await
        .map_err(|e| {
            tracing::error!("❌ Redis set_ex failed for CSRF: {}", e);
            AppError::Redis(e)
        })?;

    let csrf_cookie = create_secure_cookie(
        "csrf_token".to_string(),
        csrf_token,
        state.config.session_duration_days,
    );
    cookies.add(csrf_cookie);

    tracing::info!("✅ Admin logged in: {}", admin.id);

    let response = AuthResponse {
        success: true,
        message: "Login successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles admin logout.
#[axum::debug_handler]
pub async fn logout(
    State(mut state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
) -> Result<Response> {
    tracing::info!("👋 Logout for admin: {}", session.admin_id);

    let session_id = cookies
        .get("session_id")
        .map(|c| c.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let _: () = state
        .redis
        .del(format!("session:{}", session_id))
        .await?;

    if let Some(csrf_cookie) = cookies.get("csrf_token") {
        let csrf_token = csrf_cookie.value();
        let _: () = state
            .redis
            .del(format!("csrf:{}", csrf_token))
            .await
            .unwrap_or(());
    }

    let mut session_cookie = Cookie::new("session_id", "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    let mut csrf_cookie = Cookie::new("csrf_token", "");
    csrf_cookie.set_max_age(Duration::seconds(0));
    csrf_cookie.set_path("/");
    cookies.remove(csrf_cookie);

    tracing::info!("✅ Admin logged out: {}", session.admin_id);

    let response = AuthResponse {
        success: true,
        message: "Logout successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Returns the currently authenticated admin's profile.
#[axum::debug_handler]
pub async fn current_admin(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let admin = admin_repo::find_by_id(&state.db, &session.admin_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "id": admin.id.to_string(),
        "email": admin.email,
        "created_at": admin.created_at.to_rfc3339()
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::OK, response).into_response())
}
