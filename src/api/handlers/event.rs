use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::{
    requests::{OverviewQuery, ValidateEventRequest},
    responses::{
        EventCreatedResponse, EventDeletedResponse, EventOption, EventOverviewResponse,
        EventPreviewResponse, EventUpdatedResponse, SelectedEventView,
    },
};
use crate::domain::models::event::{CreateEventForm, Event, EventPatch};
use crate::domain::services::{datetime, render::sanitize_description, selection::EventSelection};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_service.fetch_events().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.get_event(&id).await?;
    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateEventForm>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event '{}' by {}", payload.name.trim(), admin.email);

    let event_id = state.event_service.create_event(&payload).await?;

    Ok(Json(EventCreatedResponse {
        success: true,
        event_id,
    }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<EventPatch>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.update_event(&id, &payload).await?;
    info!("Event {} updated by {}", id, admin.email);

    Ok(Json(EventUpdatedResponse {
        success: true,
        event,
    }))
}

/// Saves a full edited record from the modify screen; only changed fields
/// are written.
pub async fn save_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(draft): Json<Event>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.save_event(&id, draft).await?;
    info!("Event {} saved by {}", id, admin.email);

    Ok(Json(EventUpdatedResponse {
        success: true,
        event,
    }))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_service.delete_event(&id).await?;
    info!("Event {} deleted by {}", id, admin.email);

    Ok(Json(EventDeletedResponse { success: true }))
}

pub async fn validate_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<ValidateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.event_service.civil_timezone();
    let report = state.event_service.validate_event(&payload.into_candidate(tz));
    Ok(Json(report))
}

/// List screen model: every event as an option plus the selected one in detail.
pub async fn event_overview(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<OverviewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.event_service.civil_timezone();
    let mut selection = EventSelection::new(state.event_service.fetch_events().await?);

    if let Some(id) = query.selected.as_deref() {
        selection.select(id);
    }

    let options = selection.events().iter()
        .map(|event| EventOption {
            id: event.id.clone(),
            label: format!("{} ({})", event.name, datetime::format_short_date(event.start_time, tz)),
        })
        .collect();

    let selected = selection.selected().map(|event| SelectedEventView {
        id: event.id.clone(),
        name: event.name.clone(),
        starts: datetime::to_local_input_format(event.start_time, tz),
        ends: datetime::to_local_input_format(event.end_time, tz),
        sold: event.sold,
        capacity: event.capacity,
        available: event.available(),
        price: event.price,
        image_url: event.image_url.clone(),
        description_raw: event.description.clone(),
        description_html: sanitize_description(&event.description),
    });

    Ok(Json(EventOverviewResponse {
        options,
        selected_id: selection.selected_id().to_string(),
        selected,
    }))
}

/// Renders the create form as buyers would see it, without storing anything.
pub async fn preview_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateEventForm>,
) -> Result<impl IntoResponse, AppError> {
    let service = &state.event_service;
    let tz = service.civil_timezone();
    let candidate = service.candidate_from_form(&payload);

    let (date_label, time_range) = match (candidate.start_time, candidate.end_time) {
        (Some(start), Some(end)) => (
            Some(datetime::format_long_date(start, tz)),
            Some(datetime::format_time_range(start, end, tz)),
        ),
        _ => (None, None),
    };

    Ok(Json(EventPreviewResponse {
        name: candidate.name,
        price: candidate.price.is_finite().then_some(candidate.price),
        description_html: candidate.description,
        date_label,
        time_range,
        tickets_available: if candidate.capacity.is_finite() { candidate.capacity as i64 } else { 0 },
    }))
}
