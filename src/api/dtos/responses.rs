use crate::domain::models::event::Event;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub success: bool,
    pub event_id: String,
}

#[derive(Serialize)]
pub struct EventUpdatedResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventDeletedResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct EventOption {
    pub id: String,
    pub label: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedEventView {
    pub id: String,
    pub name: String,
    pub starts: String,
    pub ends: String,
    pub sold: i64,
    pub capacity: i64,
    pub available: i64,
    pub price: f64,
    pub image_url: String,
    pub description_raw: String,
    pub description_html: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverviewResponse {
    pub options: Vec<EventOption>,
    pub selected_id: String,
    pub selected: Option<SelectedEventView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPreviewResponse {
    pub name: String,
    pub price: Option<f64>,
    pub description_html: String,
    pub date_label: Option<String>,
    pub time_range: Option<String>,
    pub tickets_available: i64,
}
