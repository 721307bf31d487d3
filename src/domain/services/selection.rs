use crate::domain::models::event::{Event, EventPatch};

/// Picks one event out of a loaded list and holds an unsaved draft of it.
///
/// The draft lives only in memory; persisting it is an explicit save that
/// sends `pending_changes()` to `EventService::update_event`.
#[derive(Debug, Clone)]
pub struct EventSelection {
    events: Vec<Event>,
    selected_id: String,
    draft: Option<Event>,
}

impl EventSelection {
    pub fn new(events: Vec<Event>) -> Self {
        let selected_id = events.first().map(|e| e.id.clone()).unwrap_or_default();
        Self { events, selected_id, draft: None }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    /// The draft when one exists, otherwise the loaded event.
    pub fn selected(&self) -> Option<&Event> {
        self.draft.as_ref().or_else(|| self.original())
    }

    /// Switches selection and discards any draft. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.events.iter().any(|e| e.id == id) {
            return false;
        }
        self.selected_id = id.to_string();
        self.draft = None;
        true
    }

    /// Replaces the selected event's in-memory contents. The id is pinned to
    /// the current selection.
    pub fn replace_selected(&mut self, mut event: Event) -> bool {
        if self.original().is_none() {
            return false;
        }
        event.id = self.selected_id.clone();
        self.draft = Some(event);
        true
    }

    /// Field-level diff between the draft and the loaded event.
    pub fn pending_changes(&self) -> Option<EventPatch> {
        let (original, draft) = (self.original()?, self.draft.as_ref()?);

        let patch = EventPatch {
            name: (draft.name != original.name).then(|| draft.name.clone()),
            description: (draft.description != original.description).then(|| draft.description.clone()),
            image_url: (draft.image_url != original.image_url).then(|| draft.image_url.clone()),
            start_time: (draft.start_time != original.start_time).then_some(draft.start_time),
            end_time: (draft.end_time != original.end_time).then_some(draft.end_time),
            capacity: (draft.capacity != original.capacity).then_some(draft.capacity),
            sold: (draft.sold != original.sold).then_some(draft.sold),
            price: (draft.price != original.price).then_some(draft.price),
        };

        (!patch.is_empty()).then_some(patch)
    }

    fn original(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.id == self.selected_id)
    }
}
