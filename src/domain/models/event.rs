use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::error::AppError;

/// Event as handled by the service and returned to callers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i64,
    pub sold: i64,
    pub price: f64,
}

impl Event {
    pub fn from_document(id: &str, doc: EventDocument) -> Result<Self, AppError> {
        Ok(Self {
            id: id.to_string(),
            name: doc.name,
            description: doc.description,
            image_url: doc.image_url,
            start_time: doc.start_date_time.to_datetime()?,
            end_time: doc.end_date_time.to_datetime()?,
            capacity: doc.capacity,
            sold: doc.sold,
            price: doc.price,
        })
    }

    pub fn to_document(&self) -> EventDocument {
        EventDocument {
            event_id: Some(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            start_date_time: StoreTimestamp::from_datetime(self.start_time),
            end_date_time: StoreTimestamp::from_datetime(self.end_time),
            capacity: self.capacity,
            sold: self.sold,
            price: self.price,
        }
    }

    pub fn available(&self) -> i64 {
        self.capacity - self.sold
    }

    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(val) = &patch.name { self.name = val.clone(); }
        if let Some(val) = &patch.description { self.description = val.clone(); }
        if let Some(val) = &patch.image_url { self.image_url = val.clone(); }
        if let Some(val) = patch.start_time { self.start_time = val; }
        if let Some(val) = patch.end_time { self.end_time = val; }
        if let Some(val) = patch.capacity { self.capacity = val; }
        if let Some(val) = patch.sold { self.sold = val; }
        if let Some(val) = patch.price { self.price = val; }
    }
}

/// Timestamp in the document store's native shape.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimestamp {
    #[serde(rename = "_seconds")]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds")]
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanoseconds: value.timestamp_subsec_nanos(),
        }
    }

    pub fn to_datetime(self) -> Result<DateTime<Utc>, AppError> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds).ok_or_else(|| {
            AppError::InternalWithMsg(format!(
                "Stored timestamp out of range: {}s {}ns",
                self.seconds, self.nanoseconds
            ))
        })
    }
}

/// Stored document body. Key names are the on-disk contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EventDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub start_date_time: StoreTimestamp,
    pub end_date_time: StoreTimestamp,
    pub capacity: i64,
    pub sold: i64,
    pub price: f64,
}

/// Fields to change on an existing event.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i64>,
    pub sold: Option<i64>,
    pub price: Option<f64>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Store-schema fields touched by this patch.
    pub fn to_document_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut fields = serde_json::Map::new();
        if let Some(val) = &self.name { fields.insert("Name".into(), val.clone().into()); }
        if let Some(val) = &self.description { fields.insert("Description".into(), val.clone().into()); }
        if let Some(val) = &self.image_url { fields.insert("ImageUrl".into(), val.clone().into()); }
        if let Some(val) = self.start_time {
            fields.insert("StartDateTime".into(), timestamp_value(val));
        }
        if let Some(val) = self.end_time {
            fields.insert("EndDateTime".into(), timestamp_value(val));
        }
        if let Some(val) = self.capacity { fields.insert("Capacity".into(), val.into()); }
        if let Some(val) = self.sold { fields.insert("Sold".into(), val.into()); }
        if let Some(val) = self.price { fields.insert("Price".into(), val.into()); }
        fields
    }
}

fn timestamp_value(value: DateTime<Utc>) -> serde_json::Value {
    let ts = StoreTimestamp::from_datetime(value);
    serde_json::json!({ "_seconds": ts.seconds, "_nanoseconds": ts.nanoseconds })
}

/// Raw create form, all values as typed by the admin.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEventForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub capacity: String,
    pub price: String,
    pub add_sales_tax: bool,
}

/// Validator input. Numbers may be non-finite and instants missing when the
/// source value could not be coerced.
#[derive(Debug, Clone)]
pub struct EventCandidate {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: f64,
    pub sold: f64,
    pub price: f64,
}

impl From<&Event> for EventCandidate {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id.clone()),
            name: event.name.clone(),
            description: event.description.clone(),
            image_url: event.image_url.clone(),
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            capacity: event.capacity as f64,
            sold: event.sold as f64,
            price: event.price,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> Event {
        Event {
            id: "abc123".into(),
            name: "Jazz Night".into(),
            description: "<p>Live</p>".into(),
            image_url: "https://img.example.com/jazz.png".into(),
            start_time: Utc.with_ymd_and_hms(2026, 7, 4, 2, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 7, 4, 5, 0, 0).unwrap(),
            capacity: 100,
            sold: 12,
            price: 10.85,
        }
    }

    #[test]
    fn test_document_uses_capitalized_keys() {
        let json = serde_json::to_value(sample_event().to_document()).unwrap();
        let obj = json.as_object().unwrap();

        for key in ["EventId", "Name", "Description", "ImageUrl", "StartDateTime", "EndDateTime", "Capacity", "Sold", "Price"] {
            assert!(obj.contains_key(key), "missing stored key {}", key);
        }
        assert_eq!(json["StartDateTime"]["_seconds"], 1783130400);
        assert_eq!(json["EventId"], "abc123");
    }

    #[test]
    fn test_document_without_event_id_decodes() {
        let mut doc = sample_event().to_document();
        doc.event_id = None;
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("EventId").is_none());

        let decoded: EventDocument = serde_json::from_value(json).unwrap();
        let event = Event::from_document("abc123", decoded).unwrap();
        assert_eq!(event, sample_event());
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let mut doc = sample_event().to_document();
        doc.end_date_time = StoreTimestamp { seconds: i64::MAX, nanoseconds: 0 };

        assert!(matches!(
            Event::from_document("abc123", doc),
            Err(AppError::InternalWithMsg(_))
        ));
    }

    #[test]
    fn test_patch_touches_only_given_fields() {
        let patch = EventPatch { sold: Some(40), ..Default::default() };
        let fields = patch.to_document_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Sold"], 40);

        let mut event = sample_event();
        event.apply(&patch);
        assert_eq!(event.sold, 40);
        assert_eq!(event.available(), 60);
        assert!(EventPatch::default().is_empty());
        assert!(!patch.is_empty());
    }
}
