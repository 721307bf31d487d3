use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::AdminProfile;
use crate::api::extractors::auth::session_claims;
use std::convert::Infallible;
use std::sync::Arc;

/// Current admin if a valid session cookie is present, never rejects.
pub struct MaybeAdmin(pub Option<AdminProfile>);

impl<S> FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        // Expired or tampered token -> signed out
        let admin = session_claims(parts, &app_state)
            .ok()
            .flatten()
            .map(|claims| AdminProfile { email: claims.sub });

        Ok(MaybeAdmin(admin))
    }
}
