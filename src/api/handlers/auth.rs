use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::maybe_auth::MaybeAdmin;
use crate::domain::models::auth::AuthResponse;
use crate::domain::services::auth_service::{ACCESS_COOKIE, ACCESS_TOKEN_MINUTES};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.auth_service.verify_credentials(&payload.email, &payload.password)
        .inspect_err(|_| warn!("Failed sign-in attempt for {}", payload.email.trim()))?;

    let session = state.auth_service.issue_session(&admin)?;
    cookies.add(session_cookie(session.access_token));

    info!("Admin signed in: {}", admin.email);

    Ok(Json(AuthResponse { csrf_token: session.csrf_token, admin }))
}

pub async fn logout(cookies: Cookies) -> StatusCode {
    cookies.remove(Cookie::build((ACCESS_COOKIE, "")).path("/").into());
    info!("Admin signed out");
    StatusCode::OK
}

pub async fn current_admin(MaybeAdmin(admin): MaybeAdmin) -> impl IntoResponse {
    Json(serde_json::json!({ "admin": admin }))
}

fn session_cookie(access_token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE, access_token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::minutes(ACCESS_TOKEN_MINUTES))
        .build()
}
