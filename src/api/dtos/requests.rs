use crate::domain::models::event::EventCandidate;
use crate::domain::services::datetime::parse_form_datetime;
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Loose event shape accepted by the validate endpoint. Missing numbers are
/// treated as non-numeric, unparseable times as invalid.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateEventRequest {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<f64>,
    pub sold: Option<f64>,
    pub price: Option<f64>,
}

impl ValidateEventRequest {
    pub fn into_candidate(self, tz: Tz) -> EventCandidate {
        EventCandidate {
            id: self.id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            start_time: self.start_time.as_deref().and_then(|v| parse_form_datetime(v, tz)),
            end_time: self.end_time.as_deref().and_then(|v| parse_form_datetime(v, tz)),
            capacity: self.capacity.unwrap_or(f64::NAN),
            sold: self.sold.unwrap_or(f64::NAN),
            price: self.price.unwrap_or(f64::NAN),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct OverviewQuery {
    pub selected: Option<String>,
}
