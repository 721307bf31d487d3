use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::error::AppError;
use crate::domain::models::auth::{AdminProfile, Claims};
use crate::domain::services::auth_service::{ACCESS_COOKIE, ACCESS_TOKEN_AUDIENCE};
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use tracing::{debug, Span};

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Signed-in admin. State-changing requests must echo the session's CSRF
/// token in `X-CSRF-Token`.
pub struct AdminUser(pub AdminProfile);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = session_claims(parts, &app_state)?.ok_or(AppError::Unauthorized)?;

        if !parts.method.is_safe() {
            let echoed = parts.headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok());
            if echoed != Some(claims.csrf_token.as_str()) {
                return Err(AppError::Forbidden("Missing or invalid CSRF token".into()));
            }
        }

        Span::current().record("admin", claims.sub.as_str());

        Ok(AdminUser(AdminProfile { email: claims.sub }))
    }
}

/// Claims from the session cookie. `Ok(None)` when there is no cookie;
/// an unreadable or expired token is `Unauthorized`.
pub(crate) fn session_claims(parts: &Parts, state: &AppState) -> Result<Option<Claims>, AppError> {
    let cookies = parts.extensions.get::<Cookies>()
        .ok_or_else(|| AppError::InternalWithMsg("Cookie layer missing".into()))?;

    let Some(cookie) = cookies.get(ACCESS_COOKIE) else {
        return Ok(None);
    };

    decode_claims(cookie.value(), &state.config.jwt_public_key)
        .map(Some)
        .map_err(|e| {
            debug!("Rejected session token: {}", e);
            AppError::Unauthorized
        })
}

fn decode_claims(token: &str, public_key_pem: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_audience(&[ACCESS_TOKEN_AUDIENCE]);

    decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)
}
