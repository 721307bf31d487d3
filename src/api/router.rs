use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, event, auth};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/auth", auth_routes())
        .nest("/api/v1/events", event_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    // Route template keeps event ids out of the span name.
                    let route = request.extensions()
                        .get::<MatchedPath>()
                        .map(|p| p.as_str().to_owned())
                        .unwrap_or_else(|| request.uri().path().to_owned());

                    info_span!(
                        "http_request",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        route = %route,
                        admin = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("{} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    let status = response.status();
                    if status.is_client_error() {
                        warn!(status = status.as_u16(), latency_ms = latency.as_millis(), "request rejected");
                    } else {
                        info!(status = status.as_u16(), latency_ms = latency.as_millis(), "request completed");
                    }
                })
                .on_failure(|failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    error!(latency_ms = latency.as_millis(), "request failed: {}", failure);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::current_admin))
}

fn event_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(event::list_events).post(event::create_event))
        // Read models and dry runs, matched ahead of `/{id}`
        .route("/overview", get(event::event_overview))
        .route("/preview", post(event::preview_event))
        .route("/validate", post(event::validate_event))
        .route("/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/{id}/save", post(event::save_event))
}
