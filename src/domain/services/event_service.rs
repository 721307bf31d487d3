use std::sync::Arc;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::models::event::{
    CreateEventForm, Event, EventCandidate, EventDocument, EventPatch, ValidationReport,
};
use crate::domain::ports::{DocumentBody, DocumentStore, StoredDocument};
use crate::domain::services::{datetime, render::sanitize_description, selection::EventSelection, validation};
use crate::error::AppError;

pub struct EventService {
    store: Arc<dyn DocumentStore>,
    collection: String,
    civil_tz: Tz,
    sales_tax_rate: f64,
}

impl EventService {
    pub fn new(store: Arc<dyn DocumentStore>, collection: String, civil_tz: Tz, sales_tax_rate: f64) -> Self {
        Self { store, collection, civil_tz, sales_tax_rate }
    }

    pub fn civil_timezone(&self) -> Tz {
        self.civil_tz
    }

    pub fn sales_tax_rate(&self) -> f64 {
        self.sales_tax_rate
    }

    /// All events, latest end time first.
    pub async fn fetch_events(&self) -> Result<Vec<Event>, AppError> {
        let documents = self.store.get_all(&self.collection).await.map_err(|e| {
            error!("Error fetching events: {}", e);
            e
        })?;

        let mut events = documents
            .into_iter()
            .map(decode_event)
            .collect::<Result<Vec<_>, _>>()?;

        events.sort_by(|a, b| b.end_time.cmp(&a.end_time));
        Ok(events)
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, AppError> {
        require_id(id)?;
        let document = self.store.get(&self.collection, id).await?
            .ok_or_else(|| not_found(id))?;
        decode_event(document)
    }

    /// Creates an event from raw form input and returns its id.
    ///
    /// The document is written first without `EventId`, then patched with the
    /// id the store assigned. The two writes are not atomic.
    pub async fn create_event(&self, form: &CreateEventForm) -> Result<String, AppError> {
        let candidate = self.candidate_from_form(form);

        let report = validation::validate(&candidate);
        if !report.is_valid {
            return Err(AppError::InvalidEvent(report.errors));
        }

        let (Some(start_time), Some(end_time)) = (candidate.start_time, candidate.end_time) else {
            return Err(AppError::Internal);
        };

        let document = Event {
            id: String::new(),
            name: candidate.name,
            description: candidate.description,
            image_url: candidate.image_url,
            start_time,
            end_time,
            capacity: candidate.capacity as i64,
            sold: 0,
            price: candidate.price,
        }.to_document();
        let document = EventDocument { event_id: None, ..document };

        let body = to_body(&document)?;
        let id = self.store.add(&self.collection, &body).await?;

        let mut id_patch = DocumentBody::new();
        id_patch.insert("EventId".into(), Value::String(id.clone()));
        if let Err(e) = self.store.update(&self.collection, &id, &id_patch).await {
            error!("Event {} stored without EventId: {}", id, e);
            return Err(e);
        }

        info!("Event created: {}", id);
        Ok(id)
    }

    /// Applies `patch` to the stored event after re-validating the merged
    /// record against what is currently stored.
    pub async fn update_event(&self, id: &str, patch: &EventPatch) -> Result<Event, AppError> {
        require_id(id)?;
        if patch.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }

        let stored = self.store.get(&self.collection, id).await?
            .ok_or_else(|| not_found(id))?;
        let mut event = decode_event(stored)?;

        let patch = normalize_patch(patch);
        event.apply(&patch);

        let report = validation::validate(&EventCandidate::from(&event));
        if !report.is_valid {
            warn!("Rejected update for event {}: {:?}", id, report.errors);
            return Err(AppError::InvalidEvent(report.errors));
        }

        self.store.update(&self.collection, id, &patch.to_document_fields()).await?;

        info!("Event updated: {}", id);
        Ok(event)
    }

    /// Saves an edited copy of a stored event. Only fields that differ from
    /// the stored record are sent through `update_event`; an unchanged draft
    /// returns the stored event without writing.
    pub async fn save_event(&self, id: &str, draft: Event) -> Result<Event, AppError> {
        let stored = self.get_event(id).await?;

        let mut selection = EventSelection::new(vec![stored]);
        selection.replace_selected(draft);

        match selection.pending_changes() {
            Some(patch) => self.update_event(id, &patch).await,
            None => {
                info!("Event {} saved without changes", id);
                selection.events().first().cloned().ok_or_else(|| not_found(id))
            }
        }
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        require_id(id)?;
        if self.store.get(&self.collection, id).await?.is_none() {
            return Err(not_found(id));
        }

        self.store.delete(&self.collection, id).await?;
        info!("Event deleted: {}", id);
        Ok(())
    }

    pub fn validate_event(&self, candidate: &EventCandidate) -> ValidationReport {
        validation::validate(candidate)
    }

    /// Price shown to buyers: tax applied when requested, rounded to cents.
    pub fn final_price(&self, base_price: f64, add_sales_tax: bool) -> f64 {
        let price = if add_sales_tax {
            base_price * (1.0 + self.sales_tax_rate)
        } else {
            base_price
        };
        round_to_cents(price)
    }

    /// Coerces form strings. Anything unparseable becomes NaN or a missing
    /// instant so the validator reports it.
    pub fn candidate_from_form(&self, form: &CreateEventForm) -> EventCandidate {
        let capacity = form.capacity.trim().parse::<i64>().map(|c| c as f64).unwrap_or(f64::NAN);
        let base_price = form.price.trim().parse::<f64>().unwrap_or(f64::NAN);

        EventCandidate {
            id: None,
            name: form.name.trim().to_string(),
            description: sanitize_description(form.description.trim()),
            image_url: form.image_url.trim().to_string(),
            start_time: datetime::parse_form_datetime(&form.start_date_time, self.civil_tz),
            end_time: datetime::parse_form_datetime(&form.end_date_time, self.civil_tz),
            capacity,
            sold: 0.0,
            price: self.final_price(base_price, form.add_sales_tax),
        }
    }
}

/// Documents written before sanitization existed are cleaned on the way out.
fn decode_event(document: StoredDocument) -> Result<Event, AppError> {
    let StoredDocument { id, body } = document;
    let parsed: EventDocument = serde_json::from_value(Value::Object(body))?;
    let mut event = Event::from_document(&id, parsed)?;
    event.description = sanitize_description(&event.description);
    Ok(event)
}

/// Applies the same clean-up to patched fields as create does to form input.
fn normalize_patch(patch: &EventPatch) -> EventPatch {
    EventPatch {
        name: patch.name.as_deref().map(|v| v.trim().to_string()),
        description: patch.description.as_deref().map(|v| sanitize_description(v.trim())),
        image_url: patch.image_url.as_deref().map(|v| v.trim().to_string()),
        price: patch.price.map(round_to_cents),
        ..patch.clone()
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_body(document: &EventDocument) -> Result<DocumentBody, AppError> {
    match serde_json::to_value(document)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::InternalWithMsg("Event document did not serialize to an object".into())),
    }
}

fn require_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("Missing event identifier".into()));
    }
    Ok(())
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Event with ID {} not found", id))
}
